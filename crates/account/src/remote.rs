//! Remote identity store boundary.
//!
//! The hosted backend is an external collaborator with a narrow contract:
//! look an account up by email, overwrite its password. Request/response
//! only, no partial results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use jewelmart_core::Identity;

/// Adapter-level error for remote identity store implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("api error (status {0}): {1}")]
    Api(u16, String),

    #[error("malformed response: {0}")]
    Parse(String),
}

/// The two operations this client consumes from the hosted backend.
///
/// `find_by_email` expects at most one match per email (unique per account).
/// `update_password` overwrites the stored password field with the supplied
/// plaintext value, a known weakness of this backend's contract (see
/// DESIGN.md).
#[allow(async_fn_in_trait)]
pub trait RemoteIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn update_password(&self, email: &str, new_password: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    identity: Identity,
    password: String,
}

/// In-memory identity store.
///
/// First-class (not test-gated): the demo shell and every crate's tests
/// share it. Clones share the same accounts.
#[derive(Debug, Default, Clone)]
pub struct MemoryIdentityStore {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for seeding accounts.
    pub fn with_account(self, identity: Identity, password: impl Into<String>) -> Self {
        self.insert(identity, password);
        self
    }

    pub fn insert(&self, identity: Identity, password: impl Into<String>) {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                identity.email.clone(),
                StoredAccount {
                    identity,
                    password: password.into(),
                },
            );
        }
    }

    /// The stored (plaintext) password for an email, if the account exists.
    pub fn password_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .ok()
            .and_then(|accounts| accounts.get(email).map(|a| a.password.clone()))
    }
}

impl RemoteIdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Network("store lock poisoned".to_string()))?;
        Ok(accounts.get(email).map(|a| a.identity.clone()))
    }

    async fn update_password(&self, email: &str, new_password: &str) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Network("store lock poisoned".to_string()))?;
        match accounts.get_mut(email) {
            Some(account) => {
                account.password = new_password.to_string();
                Ok(())
            }
            None => Err(StoreError::Api(404, format!("no account for {email}"))),
        }
    }
}
