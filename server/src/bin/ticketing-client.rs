//! Walks a running ticketing server through one booking's lifecycle.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;

use ticketing_server::models::{
    ModifySeatRequest, PurchaseRequest, Receipt, SectionUsers, StatusMessage, User,
};
use ticketing_server::utils::response::{ApiErrorResponse, ApiResponse};

const DEFAULT_URL: &str = "http://localhost:50051";

#[derive(Debug, Error)]
enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{call} failed with {code}: {message}")]
    Api {
        call: &'static str,
        code: String,
        message: String,
    },

    #[error("{0} returned an empty payload")]
    EmptyPayload(&'static str),

    #[error("invalid server url '{0}'")]
    InvalidUrl(String),
}

/// Appends `segments` to the base url's path, percent-encoding each one so
/// an email can never spill into another route or the query string.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

struct TicketClient {
    http: Client,
    base_url: Url,
}

impl TicketClient {
    fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        let http = Client::builder().timeout(Duration::from_secs(1)).build()?;
        Ok(Self { http, base_url })
    }

    async fn decode<T: DeserializeOwned>(
        call: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if !response.status().is_success() {
            let body: ApiErrorResponse = response.json().await?;
            return Err(ClientError::Api {
                call,
                code: body.error.code,
                message: body.error.message,
            });
        }

        let body: ApiResponse<T> = response.json().await?;
        body.data.ok_or(ClientError::EmptyPayload(call))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        call: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        Self::decode(call, response).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        endpoint(&self.base_url, segments)
    }

    async fn purchase_ticket(&self, request: &PurchaseRequest) -> Result<Receipt, ClientError> {
        let builder = self.http.post(self.url(&["tickets"])?).json(request);
        self.send("PurchaseTicket", builder).await
    }

    async fn get_receipt(&self, email: &str) -> Result<Receipt, ClientError> {
        let builder = self.http.get(self.url(&["tickets", email])?);
        self.send("GetReceipt", builder).await
    }

    async fn view_seats(&self, section: &str) -> Result<SectionUsers, ClientError> {
        let builder = self.http.get(self.url(&["sections", section, "users"])?);
        self.send("ViewSeats", builder).await
    }

    async fn modify_seat(&self, email: &str, new_seat: &str) -> Result<StatusMessage, ClientError> {
        let builder = self
            .http
            .put(self.url(&["tickets", email, "seat"])?)
            .json(&ModifySeatRequest {
                new_seat: new_seat.to_string(),
            });
        self.send("ModifySeat", builder).await
    }

    async fn remove_user(&self, email: &str) -> Result<StatusMessage, ClientError> {
        let builder = self.http.delete(self.url(&["users", email])?);
        self.send("RemoveUser", builder).await
    }
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let base_url = env::var("TICKETING_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let client = TicketClient::new(&base_url)?;

    let email = "john.doe@example.com";
    let purchase = PurchaseRequest {
        from: "London".to_string(),
        to: "France".to_string(),
        user: User {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
        },
        price_paid: Decimal::from(20),
    };

    let receipt = client.purchase_ticket(&purchase).await?;
    tracing::info!(?receipt, "Purchase receipt");

    let receipt = client.get_receipt(email).await?;
    tracing::info!(?receipt, "Receipt details");

    let seats = client.view_seats("A").await?;
    tracing::info!(users = ?seats.users, "Seats in section A");

    let status = client.modify_seat(email, "B1").await?;
    tracing::info!(message = %status.message, "Modify seat response");

    let status = client.remove_user(email).await?;
    tracing::info!(message = %status.message, "Remove user response");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_reserved_characters() {
        let base = Url::parse("http://localhost:50051").unwrap();

        let url = endpoint(&base, &["tickets", "a/b?c#d@example.com", "seat"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:50051/tickets/a%2Fb%3Fc%23d@example.com/seat"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://localhost:50051/api/").unwrap();

        let url = endpoint(&base, &["users", "john.doe@example.com"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:50051/api/users/john.doe@example.com"
        );
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_a_base_url() {
        let base = Url::parse("mailto:john.doe@example.com").unwrap();

        assert!(matches!(
            endpoint(&base, &["tickets"]),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
