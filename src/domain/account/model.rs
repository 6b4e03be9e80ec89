//! Account domain entity

use chrono::{DateTime, Utc};

/// Paid-membership lifecycle of an account, derived from its stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipState {
    /// No subscription and no checkout in flight
    Unpaid,
    /// A checkout session was created and has not been confirmed yet
    CheckoutPending,
    /// Checkout confirmed; the account may use paid features
    Paid,
}

impl MembershipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::CheckoutPending => "checkout_pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_paid: bool,
    /// Customer id at the billing provider, recorded on checkout confirmation
    pub billing_customer_id: Option<String>,
    /// Checkout session awaiting confirmation
    pub checkout_session_id: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn membership_state(&self) -> MembershipState {
        if self.is_paid {
            MembershipState::Paid
        } else if self.checkout_session_id.is_some() {
            MembershipState::CheckoutPending
        } else {
            MembershipState::Unpaid
        }
    }

    pub fn has_billing_customer(&self) -> bool {
        self.billing_customer_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    pub fn role(&self) -> &'static str {
        if self.is_staff {
            "staff"
        } else {
            "member"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 1,
            username: "hanako".into(),
            email: "hanako@example.com".into(),
            password_hash: String::new(),
            is_paid: false,
            billing_customer_id: None,
            checkout_session_id: None,
            is_staff: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn new_account_is_unpaid() {
        assert_eq!(account().membership_state(), MembershipState::Unpaid);
    }

    #[test]
    fn pending_checkout_is_reported() {
        let mut a = account();
        a.checkout_session_id = Some("cs_test_1".into());
        assert_eq!(a.membership_state(), MembershipState::CheckoutPending);
    }

    #[test]
    fn paid_wins_over_pending() {
        let mut a = account();
        a.checkout_session_id = Some("cs_test_1".into());
        a.is_paid = true;
        assert_eq!(a.membership_state(), MembershipState::Paid);
    }

    #[test]
    fn empty_customer_id_is_not_a_customer() {
        let mut a = account();
        a.billing_customer_id = Some(String::new());
        assert!(!a.has_billing_customer());
        a.billing_customer_id = Some("cus_123".into());
        assert!(a.has_billing_customer());
    }
}
