//! # Token Codec
//!
//! Mints and verifies compact HMAC-SHA256 JWTs carrying `{ sub, iat, exp }`.
//!
//! ## Verification Order
//!
//! 1. Structure: three segments, decodable header, supported algorithm.
//! 2. Signature: recomputed over `header.payload` and compared.
//! 3. Claims: `sub` and `exp` present, `sub` non-empty.
//! 4. Expiry: `exp` must be strictly after the verification instant.
//!
//! A tampered token therefore reports [`TokenError::InvalidSignature`] even if
//! it has also expired.
//!
//! ## Expiry Bound
//!
//! `exp == now` is expired. The library's own expiry check allows equality
//! (and applies leeway), so it is disabled and the comparison is done here.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::secret::SigningSecret;

/// Lifetime of a minted token.
pub const TOKEN_VALIDITY: std::time::Duration = std::time::Duration::from_secs(14 * 24 * 60 * 60);

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's email.
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the token is expired at `now`. Equality counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// An encoded token string.
///
/// `Debug` shows only the header segment.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self.0.split('.').next().unwrap_or_default();
        write!(f, "Token({header}.[REDACTED])")
    }
}

/// A freshly minted token together with the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: Token,
    pub claims: Claims,
}

/// Signs and verifies identity tokens under one secret.
///
/// Immutable after construction and safe to share across tasks.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec bound to `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.expose()),
            decoding: DecodingKey::from_secret(secret.expose()),
            validation,
        }
    }

    /// Mint a token for `subject`, issued now.
    pub fn mint(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.mint_at(subject, Utc::now())
    }

    /// Mint a token for `subject`, issued at `issued_at`.
    ///
    /// Deterministic: the same subject, instant and secret produce the same
    /// string.
    pub fn mint_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(TOKEN_VALIDITY.as_secs() as i64),
        };
        let token = jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        Ok(IssuedToken {
            token: Token(token),
            claims,
        })
    }

    /// Verify `token` against the current time and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now` and return its subject.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.decode_claims_at(token, now).map(|claims| claims.sub)
    }

    /// Verify `token` as of `now` and return all of its claims.
    pub fn decode_claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("validity_secs", &TOKEN_VALIDITY.as_secs())
            .finish_non_exhaustive()
    }
}
