//! Reservation domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// Table reservation made by a paid member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i32,
    pub restaurant_id: i32,
    pub account_id: i32,
    /// When the party arrives
    pub reservation_date: DateTime<Utc>,
    pub number_of_people: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Largest party the `number_of_people` column can store.
pub const MAX_PARTY_SIZE: u32 = i32::MAX as u32;

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub restaurant_id: i32,
    pub account_id: i32,
    pub reservation_date: DateTime<Utc>,
    pub number_of_people: u32,
}

impl NewReservation {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.number_of_people < 1 {
            return Err(DomainError::Validation(
                "number_of_people must be at least 1".into(),
            ));
        }
        if self.number_of_people > MAX_PARTY_SIZE {
            return Err(DomainError::Validation(format!(
                "number_of_people must be at most {}",
                MAX_PARTY_SIZE
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(number_of_people: u32) -> NewReservation {
        NewReservation {
            restaurant_id: 1,
            account_id: 1,
            reservation_date: Utc::now() + Duration::days(2),
            number_of_people,
        }
    }

    #[test]
    fn party_of_one_is_valid() {
        assert!(sample(1).validate().is_ok());
    }

    #[test]
    fn empty_party_is_rejected() {
        assert!(matches!(sample(0).validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn party_larger_than_storable_is_rejected() {
        assert!(sample(MAX_PARTY_SIZE).validate().is_ok());
        assert!(matches!(
            sample(MAX_PARTY_SIZE + 1).validate(),
            Err(DomainError::Validation(_))
        ));
    }
}
