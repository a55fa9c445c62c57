//! Contact form validation and sanitisation.
//!
//! [`validate`] is a pure function: no I/O, no logging. Rules run in a fixed
//! order and stop at the first failure:
//!
//! 1. all three fields present and non-empty
//! 2. all three are strings
//! 3. length caps (name 100, email 254, message 5000 characters)
//! 4. email shaped like `local@domain.tld`

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Maximum name length in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum email length in characters.
pub const MAX_EMAIL_LEN: usize = 254;
/// Maximum message length in characters.
pub const MAX_MESSAGE_LEN: usize = 5000;

// The pattern is a literal; it cannot fail to compile.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Raw form payload as received.
///
/// Fields are untyped JSON so that a present-but-wrong-type value can be
/// told apart from a missing one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
    /// Sender name.
    pub name: Option<Value>,
    /// Sender email.
    pub email: Option<Value>,
    /// Message body.
    pub message: Option<Value>,
}

impl ContactForm {
    /// Build a form from three strings.
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            email: Some(Value::String(email.into())),
            message: Some(Value::String(message.into())),
        }
    }
}

/// A form that passed validation, with unsafe characters neutralised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedContact {
    /// Trimmed name with `<` and `>` escaped.
    pub name: String,
    /// Trimmed, lowercased email.
    pub email: String,
    /// Trimmed message with `<` and `>` escaped.
    pub message: String,
}

/// Why a form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field is absent or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// A field is present but not a string.
    #[error("Invalid field types")]
    InvalidType,

    /// A field exceeds its length cap.
    #[error("{field} must be {max} characters or less")]
    FieldTooLong {
        /// Display name of the field.
        field: &'static str,
        /// Cap that was exceeded.
        max: usize,
    },

    /// The email does not look like an address.
    #[error("Invalid email format")]
    InvalidEmailFormat,
}

/// Validate and sanitise a contact form.
pub fn validate(form: &ContactForm) -> Result<SanitizedContact, ValidationError> {
    let fields = [&form.name, &form.email, &form.message];

    if fields.iter().any(|field| is_blank(field.as_ref())) {
        return Err(ValidationError::MissingFields);
    }

    let (Some(Value::String(name)), Some(Value::String(email)), Some(Value::String(message))) =
        (&form.name, &form.email, &form.message)
    else {
        return Err(ValidationError::InvalidType);
    };

    check_len("Name", name, MAX_NAME_LEN)?;
    check_len("Email", email, MAX_EMAIL_LEN)?;
    check_len("Message", message, MAX_MESSAGE_LEN)?;

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(SanitizedContact {
        name: sanitize(name),
        email: email.trim().to_lowercase(),
        message: sanitize(message),
    })
}

/// Absent, null, empty string, `false`, and `0` all count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Trim and escape angle brackets. Not a general HTML sanitiser.
fn sanitize(value: &str) -> String {
    value.trim().replace('<', "&lt;").replace('>', "&gt;")
}
