pub mod ticket;
pub mod user;

pub use ticket::{
    ModifySeatRequest, PurchaseRequest, Receipt, Seat, Section, SectionUsers, StatusMessage,
};
pub use user::User;
