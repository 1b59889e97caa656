use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    models::{account::Account, registration::RegistrationRequest},
    repositories::account_repository::AccountRepository,
    services::social_linkage_service::SocialLinkageResolver,
};

pub struct RegisterAccountUsecase<R: AccountRepository, S: SocialLinkageResolver> {
    account_repository: R,
    linkage_resolver: S,
}

impl<R: AccountRepository, S: SocialLinkageResolver> RegisterAccountUsecase<R, S> {
    pub fn new(account_repository: R, linkage_resolver: S) -> Self {
        Self {
            account_repository,
            linkage_resolver,
        }
    }

    pub async fn register(&self, payload: Map<String, Value>) -> Result<Account, DomainError>
    where
        R: Send + Sync,
        S: Send + Sync,
    {
        // Resolve the social linkage first: it decides whether the payload
        // needs a password at all.
        let has_social_login = self.linkage_resolver.resolve(&payload);

        let request = RegistrationRequest::validate(&payload, has_social_login)?;

        let account = self.account_repository.create_account(&request).await?;

        tracing::debug!(account_id = %account.id(), "account record created");

        Ok(account)
    }
}
