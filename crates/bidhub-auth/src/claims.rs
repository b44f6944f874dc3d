//! JWT claims structure used in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bidhub_core::types::id::UserId;
use bidhub_entity::user::UserRole;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: UserId,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn expired_token_is_detected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::from(Uuid::new_v4()),
            role: UserRole::Buyer,
            iat: now - 7200,
            exp: now - 3600,
        };
        assert!(claims.is_expired());
    }

    #[test]
    fn live_token_is_not_expired() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::from(Uuid::new_v4()),
            role: UserRole::Seller,
            iat: now,
            exp: now + 3600,
        };
        assert!(!claims.is_expired());
        assert!(claims.expires_at() > Utc::now());
    }
}
