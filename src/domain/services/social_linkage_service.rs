use serde_json::{Map, Value};

/// Service that decides whether a social identity credential accompanies a
/// registration payload. It runs before validation, and the boolean it
/// produces controls whether a password is required. Verifying the
/// credential itself is an upstream concern.
pub trait SocialLinkageResolver: Clone {
    fn resolve(&self, payload: &Map<String, Value>) -> bool;
}
