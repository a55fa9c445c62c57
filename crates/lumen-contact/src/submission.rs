//! Validated submissions and their request metadata.

use serde::{Deserialize, Serialize};

use crate::validate::SanitizedContact;

/// Source tag recorded for submissions from the site contact form.
pub const CONTACT_FORM_SOURCE: &str = "website_contact_form";

/// Best-effort metadata about the request that carried a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// Client IP as reported by the proxy chain.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

/// A contact inquiry that has passed validation.
///
/// Only [`validate`](crate::validate) produces the [`SanitizedContact`] this
/// is built from, so an unvalidated form can never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Sanitised sender name.
    pub name: String,
    /// Normalised sender email.
    pub email: String,
    /// Sanitised message body.
    pub message: String,
    /// Origin form tag.
    pub source: String,
    /// Client IP, if known.
    pub ip_address: Option<String>,
    /// Client user agent, if known.
    pub user_agent: Option<String>,
}

impl Submission {
    /// Build a submission from validated form data and request metadata.
    pub fn new(contact: SanitizedContact, meta: RequestMeta) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            message: contact.message,
            source: CONTACT_FORM_SOURCE.to_string(),
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        }
    }
}
