//! # Identity Resolution
//!
//! Maps a verified token subject back to the full user record. Stricter
//! than the authorization gate: a miss is an error, not a fallback.

use std::sync::Arc;

use tracker_core::Email;

use crate::error::ResolveError;
use crate::principal::Identity;
use crate::store::CredentialStore;

#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn CredentialStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Look up the identity named by `subject`.
    ///
    /// A subject that is not a valid email cannot match any record and
    /// reports [`ResolveError::IdentityNotFound`].
    pub async fn resolve(&self, subject: &str) -> Result<Identity, ResolveError> {
        let Ok(email) = Email::new(subject) else {
            return Err(ResolveError::IdentityNotFound(subject.to_string()));
        };
        self.store
            .find_by_email(&email)
            .await?
            .map(Identity::from)
            .ok_or_else(|| ResolveError::IdentityNotFound(subject.to_string()))
    }

    /// Whether a record already exists for `email`.
    pub async fn is_registered(&self, email: &Email) -> Result<bool, ResolveError> {
        Ok(self.store.find_by_email(email).await?.is_some())
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}
