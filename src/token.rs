use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};
use crate::models::Role;

/// Validity of an issued session token.
pub const SESSION_LIFETIME_HOURS: i64 = 8;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
struct Claims {
    id: i32,
    role: String,
    iat: i64,
    exp: i64,
}

/// Identity resolved from a verified token.
#[derive(Debug, PartialEq, Clone)]
pub struct Session {
    pub user_id: i32,
    pub role: Role,
}

/// Issues and verifies HS256 signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: i32, role: &Role) -> ServiceResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    pub fn issue_at(&self, user_id: i32, role: &Role, now: DateTime<Utc>) -> ServiceResult<String> {
        let claims = Claims {
            id: user_id,
            role: role.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_LIFETIME_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| ServiceError::InternalServerError(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> ServiceResult<Session> {
        self.verify_at(token, Utc::now())
    }

    /// Expiry is checked here instead of by `jsonwebtoken` so that a token is
    /// rejected from the exact second it expires.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<Session> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|err| {
            log::debug!("Rejected token: {}", err);
            ServiceError::InvalidToken
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(ServiceError::InvalidToken);
        }

        Ok(Session {
            user_id: data.claims.id,
            role: Role::from(data.claims.role.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_token_roundtrip() {
        let tokens = TokenService::from_secret(b"secret");
        let token = tokens.issue(7, &Role::Waiter).unwrap();

        let session = tokens.verify(&token).unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.role, Role::Waiter);
    }

    #[test]
    fn test_token_valid_for_eight_hours() {
        let tokens = TokenService::from_secret(b"secret");
        let now = issued_at();
        let token = tokens.issue_at(1, &Role::Admin, now).unwrap();

        assert!(tokens.verify_at(&token, now).is_ok());
        assert!(tokens
            .verify_at(&token, now + Duration::hours(8) - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            tokens.verify_at(&token, now + Duration::hours(8)),
            Err(ServiceError::InvalidToken)
        );
        assert_eq!(
            tokens.verify_at(&token, now + Duration::days(2)),
            Err(ServiceError::InvalidToken)
        );
    }

    #[test]
    fn test_token_with_foreign_signature() {
        let tokens = TokenService::from_secret(b"secret");
        let foreign = TokenService::from_secret(b"another secret");
        let token = foreign.issue(1, &Role::Admin).unwrap();

        assert_eq!(tokens.verify(&token), Err(ServiceError::InvalidToken));
    }

    #[test]
    fn test_malformed_token() {
        let tokens = TokenService::from_secret(b"secret");

        assert_eq!(tokens.verify(""), Err(ServiceError::InvalidToken));
        assert_eq!(
            tokens.verify("not.a.token"),
            Err(ServiceError::InvalidToken)
        );
    }

    #[test]
    fn test_free_text_role_survives() {
        let tokens = TokenService::from_secret(b"secret");
        let role = Role::Other("kitchen".to_owned());
        let token = tokens.issue(3, &role).unwrap();

        assert_eq!(tokens.verify(&token).unwrap().role, role);
    }
}
