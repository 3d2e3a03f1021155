//! # Credential Store
//!
//! The persistence seam for credential records. The auth core only ever
//! looks records up by email and saves them whole.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracker_core::{CredentialRecord, Email};

use crate::error::StoreError;

/// Lookup and persistence of credential records keyed by email.
///
/// Implementations must be `Send + Sync`; lookups for different emails may
/// run concurrently in any order.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the record whose email equals `email`.
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, StoreError>;

    /// Insert or replace the record with the same email. Returns what was stored.
    async fn save(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError>;
}

/// Thread-safe, cloneable in-memory credential store.
///
/// The lock is `parking_lot` and never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<HashMap<Email, CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self.records.read().get(email).cloned())
    }

    async fn save(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
        self.records
            .write()
            .insert(record.email.clone(), record.clone());
        Ok(record)
    }
}
