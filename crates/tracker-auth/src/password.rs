//! # Password Hashing
//!
//! Argon2id with a per-password random salt, stored as a PHC string.
//!
//! Verification goes through `argon2`'s `PasswordVerifier`, which compares
//! digests in constant time. [`PasswordScheme::verify_decoy`] burns the same
//! amount of work against a throwaway digest so that a login for an unknown
//! email costs about as much as one with a wrong password.

use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand_core::OsRng;
use tracker_core::PasswordDigest;
use zeroize::Zeroizing;

use crate::error::PasswordError;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum accepted password length; bounds hashing work per request.
pub const MAX_PASSWORD_LEN: usize = 128;

/// Argon2id hasher with fixed cost parameters.
#[derive(Clone)]
pub struct PasswordScheme {
    params: Params,
    decoy: PasswordDigest,
}

impl PasswordScheme {
    /// Build a scheme with the given Argon2 costs.
    ///
    /// `m_cost` is in KiB. Hashes made under other parameters still verify;
    /// the PHC string carries its own.
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Self::from_params(params)
    }

    /// Argon2id with the crate's recommended parameters (19 MiB, t=2, p=1).
    ///
    /// Fails if the decoy digest cannot be computed. There is no scheme
    /// without a decoy.
    pub fn recommended() -> Result<Self, PasswordError> {
        Self::from_params(Params::default())
    }

    fn from_params(params: Params) -> Result<Self, PasswordError> {
        let mut scheme = Self {
            params,
            decoy: PasswordDigest::from_phc(String::new()),
        };
        scheme.decoy = scheme.hash("decoy password for unknown identities")?;
        Ok(scheme)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `secret` with a fresh salt.
    pub fn hash(&self, secret: &str) -> Result<PasswordDigest, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| PasswordDigest::from_phc(h.to_string()))
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Check `secret` against `digest`. An unparsable digest never matches.
    pub fn verify(&self, secret: &str, digest: &PasswordDigest) -> bool {
        PasswordHash::new(digest.as_str())
            .ok()
            .as_ref()
            .map(|hash| self.argon2().verify_password(secret.as_bytes(), hash).is_ok())
            .unwrap_or(false)
    }

    /// Verify against the internal decoy digest. Always false.
    pub fn verify_decoy(&self, secret: &str) -> bool {
        let _ = self.verify(secret, &self.decoy);
        false
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(
        self: Arc<Self>,
        secret: Zeroizing<String>,
    ) -> Result<PasswordDigest, PasswordError> {
        tokio::task::spawn_blocking(move || self.hash(&secret))
            .await
            .map_err(|e| PasswordError::Hash(format!("hashing task failed: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking pool. `None` checks the decoy.
    pub async fn verify_blocking(
        self: Arc<Self>,
        secret: Zeroizing<String>,
        digest: Option<PasswordDigest>,
    ) -> bool {
        let outcome = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => self.verify(&secret, &digest),
            None => self.verify_decoy(&secret),
        })
        .await;
        match outcome {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for PasswordScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordScheme")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish_non_exhaustive()
    }
}

/// Check a registration password against the length policy.
pub fn check_policy(secret: &str) -> Result<(), tracker_core::ValidationError> {
    let len = secret.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(tracker_core::ValidationError::WeakPassword(format!(
            "must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(tracker_core::ValidationError::WeakPassword(format!(
            "must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordScheme {
        PasswordScheme::with_cost(256, 1, 1).unwrap()
    }

    #[test]
    fn recommended_scheme_has_a_usable_decoy() {
        let scheme = PasswordScheme::recommended().unwrap();
        assert_eq!(scheme.params.m_cost(), Params::DEFAULT_M_COST);
        assert!(PasswordHash::new(scheme.decoy.as_str()).is_ok());
        assert!(!scheme.verify_decoy("anything"));
    }

    #[test]
    fn decoy_is_a_real_digest() {
        let scheme = cheap();
        assert!(scheme.decoy.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn hash_then_verify() {
        let scheme = cheap();
        let digest = scheme.hash("auth_pass").unwrap();
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(scheme.verify("auth_pass", &digest));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let scheme = cheap();
        let digest = scheme.hash("auth_pass").unwrap();
        assert!(!scheme.verify("auth_pas", &digest));
        assert!(!scheme.verify("", &digest));
    }

    #[test]
    fn salts_differ_per_hash() {
        let scheme = cheap();
        let a = scheme.hash("auth_pass").unwrap();
        let b = scheme.hash("auth_pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn digests_verify_under_other_cost_settings() {
        let digest = cheap().hash("auth_pass").unwrap();
        let other = PasswordScheme::with_cost(512, 2, 1).unwrap();
        assert!(other.verify("auth_pass", &digest));
    }

    #[test]
    fn garbage_digest_never_verifies() {
        let scheme = cheap();
        assert!(!scheme.verify("auth_pass", &PasswordDigest::from_phc("plaintext")));
        assert!(!scheme.verify("", &PasswordDigest::from_phc("")));
    }

    #[test]
    fn decoy_never_matches() {
        let scheme = cheap();
        assert!(!scheme.verify_decoy("decoy password for unknown identities"));
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(matches!(
            PasswordScheme::with_cost(0, 0, 0),
            Err(PasswordError::Params(_))
        ));
    }

    #[test]
    fn policy_bounds() {
        assert!(check_policy("short").is_err());
        assert!(check_policy("long enough").is_ok());
        assert!(check_policy(&"x".repeat(129)).is_err());
    }

    #[tokio::test]
    async fn blocking_variants_agree() {
        let scheme = Arc::new(cheap());
        let digest = Arc::clone(&scheme)
            .hash_blocking(Zeroizing::new("auth_pass".to_string()))
            .await
            .unwrap();
        assert!(
            Arc::clone(&scheme)
                .verify_blocking(Zeroizing::new("auth_pass".to_string()), Some(digest.clone()))
                .await
        );
        assert!(
            !Arc::clone(&scheme)
                .verify_blocking(Zeroizing::new("nope".to_string()), Some(digest))
                .await
        );
        assert!(
            !scheme
                .verify_blocking(Zeroizing::new("auth_pass".to_string()), None)
                .await
        );
    }
}
