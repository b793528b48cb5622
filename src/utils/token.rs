use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::error;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;

/// Validity window for an issued session token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Payload of the signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mints and signature-checks session tokens. Holds the server secret as
/// immutable state; constructed once at startup from config.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    mac_key: Vec<u8>,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        TokenIssuer {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            mac_key: secret.as_bytes().to_vec(),
        }
    }

    /// Signed token asserting `user_id`, valid for [`TOKEN_TTL_HOURS`] from
    /// now. The returned expiry is the same instant embedded in the token, so
    /// the ledger row written from it stays in sync with the signed form.
    pub fn issue(&self, user_id: i64) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;
        Ok((token, expires_at))
    }

    /// Signature and embedded-expiry check only; the ledger is not consulted.
    /// Pinned to HS256 so "none" or an asymmetric alg in the header is
    /// rejected outright.
    pub fn verify_signature(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    /// Keyed hash of the token string, used as the ledger key. Deterministic,
    /// so it doubles as the lookup key for revocation and liveness checks.
    pub fn ledger_hash(&self, token: &str) -> Result<String, AppError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.mac_key)
            .map_err(|_| AppError::Internal("invalid ledger hash key".to_string()))?;
        mac.update(token.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

/// Full token check: signature, ledger liveness, and agreement between the
/// two. Returns the user id the token belongs to.
pub async fn validate_token(
    db: &PostgresService,
    issuer: &TokenIssuer,
    token: &str,
) -> Result<i64, AppError> {
    let claims = issuer.verify_signature(token)?;

    let hash = issuer.ledger_hash(token)?;
    let ledger_user = db
        .find_live_token(&hash)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let subject: i64 = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;
    if subject != ledger_user {
        // Ledger corruption or a hash collision. Neither side is trusted.
        error!(
            "token integrity fault: signature subject {} but ledger owner {}",
            subject, ledger_user
        );
        return Err(AppError::Unauthorized);
    }

    Ok(subject)
}

pub fn encrypt(password: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-minimum-32-chars-long!!";

    #[test]
    fn issue_then_verify_signature_round_trip() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        let (token, expires_at) = issuer.issue(42).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.verify_signature(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        let other = TokenIssuer::new("another-secret-key-minimum-32-chars!!!!");
        let (token, _) = issuer.issue(1).unwrap();
        assert!(other.verify_signature(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        let (token, _) = issuer.issue(1).unwrap();
        let mut tampered = token.clone();
        // flip a character in the payload segment
        let dot = tampered.find('.').unwrap() + 1;
        let original = tampered.remove(dot);
        tampered.insert(dot, if original == 'A' { 'B' } else { 'A' });
        assert!(issuer.verify_signature(&tampered).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        assert!(issuer.verify_signature("not.a.token").is_err());
        assert!(issuer.verify_signature("").is_err());
    }

    #[test]
    fn unexpected_algorithm_is_rejected() {
        // token signed with the right secret but HS384 must not pass
        let issuer = TokenIssuer::new(TEST_SECRET);
        let claims = Claims {
            sub: "7".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let confused = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();
        assert!(issuer.verify_signature(&confused).is_err());
    }

    #[test]
    fn embedded_expiry_is_enforced() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        let claims = Claims {
            sub: "7".to_string(),
            iat: (Utc::now() - Duration::hours(2)).timestamp(),
            // well past the decoder's default leeway
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let stale = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();
        assert!(issuer.verify_signature(&stale).is_err());
    }

    #[test]
    fn ledger_hash_is_deterministic_and_keyed() {
        let issuer = TokenIssuer::new(TEST_SECRET);
        let other = TokenIssuer::new("another-secret-key-minimum-32-chars!!!!");
        let h1 = issuer.ledger_hash("some-token").unwrap();
        let h2 = issuer.ledger_hash("some-token").unwrap();
        assert_eq!(h1, h2);
        assert_ne!(h1, issuer.ledger_hash("other-token").unwrap());
        assert_ne!(h1, other.ledger_hash("some-token").unwrap());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = encrypt("secret123").unwrap();
        assert!(verify("secret123", &hash).unwrap());
        assert!(!verify("wrong", &hash).unwrap());
    }
}
