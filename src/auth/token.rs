use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The identity of an authenticated caller, taken from a verified `sub` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Claims read from the identity provider's tokens.
///
/// Only `sub` and `exp` matter here. Provider tokens also carry `aud`, `role`
/// and others, which are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Verifies HS256 bearer tokens against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issuer tokens carry an audience we are not configured to check.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a token and returns the user it was issued to.
    ///
    /// Returns `AppError::Unauthorized` if the token is malformed, its signature
    /// is invalid, it has expired, or its `sub` claim is missing or not a UUID.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        let sub = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| AppError::Unauthorized("User ID not found in token".into()))?;

        Uuid::parse_str(&sub)
            .map(UserId)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()))
    }

    /// Signs a token for `user` that expires after `ttl`.
    ///
    /// Real tokens come from the identity provider; this is for tests and local tooling.
    pub fn issue(&self, user: UserId, ttl: chrono::Duration) -> Result<String, AppError> {
        let expiration = (chrono::Utc::now() + ttl).timestamp().max(0) as usize;

        let claims = Claims {
            sub: Some(user.to_string()),
            exp: expiration,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test_secret_for_verifier";

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn test_token_issue_and_verify() {
        let verifier = TokenVerifier::new(SECRET);
        let user = UserId(Uuid::new_v4());
        let token = verifier.issue(user, chrono::Duration::hours(1)).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), user);
    }

    #[test]
    fn test_audience_is_not_checked() {
        let verifier = TokenVerifier::new(SECRET);
        let user = Uuid::new_v4();
        let token = sign(
            &json!({ "sub": user.to_string(), "exp": in_one_hour(), "aud": "authenticated", "role": "authenticated" }),
            SECRET,
        );
        assert_eq!(verifier.verify(&token).unwrap(), UserId(user));
    }

    #[test]
    fn test_token_expiration() {
        let verifier = TokenVerifier::new(SECRET);
        let expired = (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp();
        let token = sign(
            &json!({ "sub": Uuid::new_v4().to_string(), "exp": expired }),
            SECRET,
        );

        match verifier.verify(&token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.starts_with("Invalid authentication credentials"));
                assert!(msg.contains("ExpiredSignature"));
            }
            other => panic!("expected expired token to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(
            &json!({ "sub": Uuid::new_v4().to_string(), "exp": in_one_hour() }),
            "a_completely_different_secret",
        );

        match verifier.verify(&token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("InvalidSignature"));
            }
            other => panic!("expected signature mismatch to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_token() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify("not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_missing_subject_claim() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&json!({ "exp": in_one_hour() }), SECRET);

        match verifier.verify(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "User ID not found in token"),
            other => panic!("expected missing sub to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_non_uuid_subject_claim() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&json!({ "sub": "1234567890", "exp": in_one_hour() }), SECRET);

        match verifier.verify(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid user ID in token"),
            other => panic!("expected non-UUID sub to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_other_algorithms_are_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "sub": Uuid::new_v4().to_string(), "exp": in_one_hour() }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
