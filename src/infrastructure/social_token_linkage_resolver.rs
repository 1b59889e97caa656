use serde_json::{Map, Value};

use crate::domain::services::social_linkage_service::SocialLinkageResolver;

/// Treats a non-blank `social_token` field on the payload as an attached
/// social identity credential. Verifying the token against the provider
/// happens upstream of this service.
#[derive(Clone)]
pub struct SocialTokenLinkageResolver;

impl SocialTokenLinkageResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SocialTokenLinkageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialLinkageResolver for SocialTokenLinkageResolver {
    fn resolve(&self, payload: &Map<String, Value>) -> bool {
        payload
            .get("social_token")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.trim().is_empty())
    }
}
