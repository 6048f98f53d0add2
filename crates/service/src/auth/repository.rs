use async_trait::async_trait;
use thiserror::Error;

use models::Account;

/// Failures surfaced by a [`UserStore`] backend.
///
/// The duplicate variants are the store's atomic uniqueness signal: two
/// racing registrations must resolve here, not in the service's pre-checks.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("username already taken")]
    DuplicateUsername,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable account storage collaborator.
///
/// `save` is insert-or-update by account id and MUST enforce email and
/// username uniqueness atomically with the write.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;
    async fn find_by_email_or_username(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, StoreError>;
    async fn save(&self, account: Account) -> Result<Account, StoreError>;
}

/// In-memory store for tests, doc examples, and embedders without a database.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MemoryUserStore {
        accounts: Mutex<HashMap<Uuid, Account>>, // key: account id
    }

    impl MemoryUserStore {
        pub fn len(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn get(&self, id: Uuid) -> Option<Account> {
            self.accounts.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.values().any(|a| a.email == email))
        }

        async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.values().any(|a| a.username == username))
        }

        async fn find_by_email_or_username(
            &self,
            identifier: &str,
        ) -> Result<Option<Account>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts
                .values()
                .find(|a| a.email == identifier || a.username == identifier)
                .cloned())
        }

        async fn save(&self, account: Account) -> Result<Account, StoreError> {
            // Uniqueness check and write happen under one lock acquisition,
            // which is what makes concurrent duplicate registration resolve
            // to exactly one winner.
            let mut accounts = self.accounts.lock().unwrap();
            if accounts
                .values()
                .any(|a| a.id != account.id && a.email == account.email)
            {
                return Err(StoreError::DuplicateEmail);
            }
            if accounts
                .values()
                .any(|a| a.id != account.id && a.username == account.username)
            {
                return Err(StoreError::DuplicateUsername);
            }
            accounts.insert(account.id, account.clone());
            Ok(account)
        }
    }
}
