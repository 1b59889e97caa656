use serde_json::{Map, Value};

use crate::domain::error::{ValidationError, ValidationErrors};

/// A create-user payload that passed every registration rule.
///
/// The only way to obtain one is [`RegistrationRequest::validate`], so a
/// value of this type always carries a trimmed, non-empty name, a trimmed,
/// syntactically valid email, and a password exactly when the registration
/// rules demanded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    name: String,
    email: String,
    password: Option<String>,
}

enum RawField<'a> {
    Missing,
    Malformed,
    Text(&'a str),
}

/// JSON null counts as absent: the parsed mapping gives the caller no
/// useful way to tell a null from a missing key.
fn raw_field<'a>(payload: &'a Map<String, Value>, key: &str) -> RawField<'a> {
    match payload.get(key) {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::String(value)) => RawField::Text(value),
        Some(_) => RawField::Malformed,
    }
}

/// local-part "@" domain, with at least one dot inside the domain
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

impl RegistrationRequest {
    /// Check a raw create-user payload against every registration rule.
    ///
    /// `has_social_login` comes from the social-linkage resolver: when a
    /// social identity credential accompanies the request, a password
    /// becomes optional. Every rule runs regardless of earlier failures,
    /// so the caller always receives the complete list of violations.
    pub fn validate(
        payload: &Map<String, Value>,
        has_social_login: bool,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let name = match raw_field(payload, "name") {
            RawField::Missing => {
                errors.push(ValidationError::MissingField("name"));
                None
            }
            RawField::Malformed => {
                errors.push(ValidationError::InvalidFormat("name"));
                None
            }
            RawField::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    errors.push(ValidationError::EmptyField("name"));
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            }
        };

        let email = match raw_field(payload, "email") {
            RawField::Missing => {
                errors.push(ValidationError::MissingField("email"));
                None
            }
            RawField::Malformed => {
                errors.push(ValidationError::InvalidFormat("email"));
                None
            }
            RawField::Text(value) => {
                let trimmed = value.trim();
                if is_valid_email(trimmed) {
                    Some(trimmed.to_owned())
                } else {
                    errors.push(ValidationError::InvalidFormat("email"));
                    None
                }
            }
        };

        // A blank password is normalized to absent before the conditional
        // rule below looks at it.
        let mut password_malformed = false;
        let password = match raw_field(payload, "password") {
            RawField::Missing => None,
            RawField::Malformed => {
                errors.push(ValidationError::InvalidFormat("password"));
                password_malformed = true;
                None
            }
            RawField::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
        };

        // Direct email login needs a password; a social linkage stands in
        // for it. Social accounts may still set one.
        if !has_social_login && password.is_none() && !password_malformed {
            errors.push(ValidationError::MissingField("password"));
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(ValidationErrors::new(errors)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}
