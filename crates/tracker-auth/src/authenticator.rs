//! # Authenticator
//!
//! Turns `(identifier, secret)` into a signed token.
//!
//! Every rejection is [`AuthError::AuthenticationFailed`]. An identifier that
//! is not an email, an email with no record, and a wrong password all take
//! the same path out, and the first two still run a decoy Argon2
//! verification so response time does not reveal which emails exist.

use std::sync::Arc;

use tracker_core::Email;
use zeroize::Zeroizing;

use crate::error::AuthError;
use crate::password::PasswordScheme;
use crate::store::CredentialStore;
use crate::token::{IssuedToken, TokenCodec};

/// Login verifier. Cheap to clone; all parts are shared.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
    passwords: Arc<PasswordScheme>,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        codec: Arc<TokenCodec>,
        passwords: Arc<PasswordScheme>,
    ) -> Self {
        Self {
            store,
            codec,
            passwords,
        }
    }

    /// Verify the credentials and mint a token whose subject is `identifier`.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<IssuedToken, AuthError> {
        let secret = Zeroizing::new(secret.to_string());

        let record = match Email::new(identifier) {
            Ok(email) => self.store.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(record) = record else {
            Arc::clone(&self.passwords)
                .verify_blocking(secret, None)
                .await;
            tracing::debug!("login rejected");
            return Err(AuthError::AuthenticationFailed);
        };

        let matched = Arc::clone(&self.passwords)
            .verify_blocking(secret, Some(record.password_digest.clone()))
            .await;
        if !matched {
            tracing::debug!("login rejected");
            return Err(AuthError::AuthenticationFailed);
        }

        let issued = self.codec.mint(record.email.as_str())?;
        tracing::debug!(user = %record.id, "login accepted");
        Ok(issued)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("codec", &self.codec)
            .field("passwords", &self.passwords)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::secret::SigningSecret;
    use crate::store::InMemoryCredentialStore;
    use async_trait::async_trait;
    use tracker_core::CredentialRecord;

    struct FailingStore;

    #[async_trait]
    impl CredentialStore for FailingStore {
        async fn find_by_email(
            &self,
            _email: &Email,
        ) -> Result<Option<CredentialRecord>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn save(&self, _record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(
            &SigningSecret::new("authenticator-test-secret").unwrap(),
        ))
    }

    fn scheme() -> Arc<PasswordScheme> {
        Arc::new(PasswordScheme::with_cost(256, 1, 1).unwrap())
    }

    async fn seeded() -> (Authenticator, Arc<TokenCodec>) {
        let store = InMemoryCredentialStore::new();
        let passwords = scheme();
        let record = CredentialRecord::new(
            Email::new("auth@user.in").unwrap(),
            passwords.hash("auth_pass").unwrap(),
            "Auth User",
        )
        .unwrap();
        store.save(record).await.unwrap();
        let codec = codec();
        (
            Authenticator::new(Arc::new(store), Arc::clone(&codec), passwords),
            codec,
        )
    }

    #[tokio::test]
    async fn valid_credentials_mint_token_for_identifier() {
        let (auth, codec) = seeded().await;
        let issued = auth.authenticate("auth@user.in", "auth_pass").await.unwrap();
        assert_eq!(issued.claims.sub, "auth@user.in");
        assert_eq!(codec.verify(issued.token.as_str()).unwrap(), "auth@user.in");
    }

    #[tokio::test]
    async fn wrong_secret_fails() {
        let (auth, _) = seeded().await;
        let err = auth.authenticate("auth@user.in", "wrong_pass").await.unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn unknown_identifier_fails_identically() {
        let (auth, _) = seeded().await;
        let unknown = auth.authenticate("ghost@user.in", "auth_pass").await.unwrap_err();
        let wrong = auth.authenticate("auth@user.in", "nope").await.unwrap_err();
        assert!(matches!(unknown, AuthError::AuthenticationFailed));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn non_email_identifier_fails_identically() {
        let (auth, _) = seeded().await;
        let err = auth.authenticate("not an email", "auth_pass").await.unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn identifier_lookup_is_exact() {
        let (auth, _) = seeded().await;
        let err = auth.authenticate("AUTH@user.in", "auth_pass").await.unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn store_failure_is_not_a_credential_verdict() {
        let auth = Authenticator::new(Arc::new(FailingStore), codec(), scheme());
        let err = auth.authenticate("auth@user.in", "auth_pass").await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }

    #[tokio::test]
    async fn token_from_other_codec_is_rejected() {
        let (auth, _) = seeded().await;
        let issued = auth.authenticate("auth@user.in", "auth_pass").await.unwrap();
        let stranger = TokenCodec::new(&SigningSecret::new("different-secret").unwrap());
        assert!(stranger.verify(issued.token.as_str()).is_err());
    }
}
