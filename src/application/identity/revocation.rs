//! In-process set of revoked token ids.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

/// Token ids revoked by logout, kept until the token would have expired.
#[derive(Clone, Default)]
pub struct TokenRevocations {
    revoked: Arc<DashMap<String, i64>>,
}

impl TokenRevocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `jti` until the Unix timestamp `expires_at`.
    pub fn revoke(&self, jti: &str, expires_at: i64) {
        self.revoked.insert(jti.to_string(), expires_at);
        self.purge_expired();
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains_key(jti)
    }

    /// Drop entries whose token has expired anyway.
    pub fn purge_expired(&self) {
        let now = Utc::now().timestamp();
        self.revoked.retain(|_, exp| *exp >= now);
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_ids_are_remembered_until_expiry() {
        let revocations = TokenRevocations::new();
        let later = Utc::now().timestamp() + 3600;
        revocations.revoke("a", later);
        assert!(revocations.is_revoked("a"));
        assert!(!revocations.is_revoked("b"));

        revocations.revoke("stale", Utc::now().timestamp() - 10);
        assert!(!revocations.is_revoked("stale"));
        assert_eq!(revocations.len(), 1);
    }
}
