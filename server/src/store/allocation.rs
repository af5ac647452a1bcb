use crate::models::{Seat, Section};

/// Hands out seats alternately from section A and section B.
///
/// A is preferred on ties. A section accepts seat numbers up to and
/// including `capacity`, so each section yields `capacity + 1` seats
/// before allocation fails.
#[derive(Debug, Clone)]
pub struct SeatAllocator {
    capacity: u32,
    next_a: u32,
    next_b: u32,
}

impl SeatAllocator {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            next_a: 0,
            next_b: 0,
        }
    }

    /// Returns `None` once both sections are past capacity. Counters are
    /// left untouched in that case.
    pub fn allocate(&mut self) -> Option<Seat> {
        if self.next_a <= self.next_b && self.next_a <= self.capacity {
            let seat = Seat::new(Section::A, self.next_a);
            self.next_a += 1;
            Some(seat)
        } else if self.next_b <= self.capacity {
            let seat = Seat::new(Section::B, self.next_b);
            self.next_b += 1;
            Some(seat)
        } else {
            None
        }
    }

    #[cfg(test)]
    fn next_seat(&self, section: Section) -> u32 {
        match section {
            Section::A => self.next_a,
            Section::B => self.next_b,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates_sections_starting_with_a() {
        let mut allocator = SeatAllocator::new(10);

        for k in 1..=20u32 {
            let seat = allocator.allocate().unwrap();
            let expected_section = if k % 2 == 1 { Section::A } else { Section::B };
            assert_eq!(seat.section, expected_section, "purchase {}", k);
            assert_eq!(seat.number, k.div_ceil(2) - 1, "purchase {}", k);
        }
    }

    #[test]
    fn test_exhaustion_leaves_counters_untouched() {
        let mut allocator = SeatAllocator::new(1);

        let seats: Vec<String> = (0..4)
            .map(|_| allocator.allocate().unwrap().to_string())
            .collect();
        assert_eq!(seats, vec!["A-0", "B-0", "A-1", "B-1"]);

        assert!(allocator.allocate().is_none());
        assert!(allocator.allocate().is_none());
        assert_eq!(allocator.next_seat(Section::A), 2);
        assert_eq!(allocator.next_seat(Section::B), 2);
    }

    #[test]
    fn test_zero_capacity_still_yields_seat_zero() {
        let mut allocator = SeatAllocator::new(0);

        assert_eq!(allocator.allocate(), Some(Seat::new(Section::A, 0)));
        assert_eq!(allocator.allocate(), Some(Seat::new(Section::B, 0)));
        assert_eq!(allocator.allocate(), None);
    }
}
