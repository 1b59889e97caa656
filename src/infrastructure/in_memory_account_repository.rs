use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, AccountId},
        registration::RegistrationRequest,
    },
    repositories::account_repository::AccountRepository,
};

/// Account store backed by process memory. Durable persistence is an
/// external collaborator; this implementation lets the service and its
/// tests run without one while still enforcing unique login emails.
/// The password never reaches the record: hashing and credential storage
/// belong to that external collaborator.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Account, RepositoryError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if accounts
            .iter()
            .any(|account| account.email() == request.email())
        {
            return Err(RepositoryError::AlreadyExists(request.email().to_string()));
        }

        let account = Account::new(
            AccountId::new(),
            request.name().to_string(),
            request.email().to_string(),
        );
        accounts.push(account.clone());

        Ok(account)
    }
}
