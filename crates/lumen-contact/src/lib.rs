//! Contact form pipeline.
//!
//! Stages run in order for each inbound submission:
//!
//! 1. [`validate`]: shape, length, and format checks plus sanitisation
//! 2. [`SubmissionStore::persist`]: best-effort write to the document store
//! 3. [`Notifier`]: operator alert and sender acknowledgment, each isolated
//!
//! [`ContactService`] wires the three together.

#![doc = include_str!("../README.md")]

mod mock;
mod notify;
mod service;
mod store;
mod submission;
mod validate;

pub use mock::{FailingSubmissionStore, MemorySubmissionStore, MockMailer};
pub use notify::{DEFAULT_OPERATOR_EMAIL, Email, Mailer, Notifier, SmtpMailer, SmtpSettings};
pub use service::{ContactService, SubmissionReceipt};
pub use store::{
    DatabaseSettings, MongoPool, MongoSubmissionStore, SubmissionRecord, SubmissionStore,
};
pub use submission::{CONTACT_FORM_SOURCE, RequestMeta, Submission};
pub use validate::{
    ContactForm, MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, SanitizedContact, ValidationError,
    validate,
};
