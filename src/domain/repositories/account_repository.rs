use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{account::Account, registration::RegistrationRequest},
};

/// Persistence boundary for account creation. Password hashing and durable
/// storage live behind this seam, not in this crate.
#[async_trait]
pub trait AccountRepository {
    /// Create the durable account record for a validated registration
    async fn create_account(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Account, RepositoryError>;
}
