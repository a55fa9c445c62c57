//! Submission orchestration.

use std::sync::Arc;

use serde::Serialize;

use crate::notify::Notifier;
use crate::store::SubmissionStore;
use crate::submission::{RequestMeta, Submission};
use crate::validate::{ContactForm, ValidationError, validate};

/// Outcome of an accepted submission.
///
/// Persistence and each notification succeed or fail independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Stored record id, or `None` if the write failed.
    pub id: Option<String>,
    /// Whether the operator alert was delivered.
    pub operator_notified: bool,
    /// Whether the sender acknowledgment was delivered.
    pub applicant_notified: bool,
}

/// Runs validate, persist, notify for each inbound form.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn SubmissionStore>,
    notifier: Notifier,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService")
            .field("store", &self.store.name())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl ContactService {
    /// Create a service over a store and notifier.
    pub fn new(store: Arc<dyn SubmissionStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Process one form.
    ///
    /// # Errors
    ///
    /// Only validation failures. A failed write or send is logged and
    /// reflected in the receipt.
    pub async fn submit(
        &self,
        form: &ContactForm,
        meta: RequestMeta,
    ) -> std::result::Result<SubmissionReceipt, ValidationError> {
        let contact = match validate(form) {
            Ok(contact) => contact,
            Err(e) => {
                log::debug!("Contact form rejected: {e}");
                return Err(e);
            }
        };
        let submission = Submission::new(contact, meta);

        let id = match self.store.persist(&submission).await {
            Ok(id) => {
                log::debug!("Stored submission {id} in {}", self.store.name());
                Some(id)
            }
            Err(e) => {
                log::warn!("Could not store submission in {}: {e}", self.store.name());
                None
            }
        };

        let operator_notified = self.notifier.notify_operator(&submission).await;
        let applicant_notified = self
            .notifier
            .notify_applicant(&submission.name, &submission.email)
            .await;

        Ok(SubmissionReceipt {
            id,
            operator_notified,
            applicant_notified,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{FailingSubmissionStore, MemorySubmissionStore, MockMailer};

    fn service(store: Arc<dyn SubmissionStore>, mailer: &MockMailer) -> ContactService {
        ContactService::new(store, Notifier::new(Arc::new(mailer.clone()), "ops@example.org"))
    }

    fn meta() -> RequestMeta {
        RequestMeta {
            ip_address: Some("198.51.100.4".into()),
            user_agent: Some("test-agent".into()),
        }
    }

    #[tokio::test]
    async fn test_submit_persists_and_notifies() {
        let store = MemorySubmissionStore::new();
        let mailer = MockMailer::new();
        let service = service(Arc::new(store.clone()), &mailer);

        let receipt = service
            .submit(&ContactForm::new(" Bob ", "BOB@Example.com", "Hello"), meta())
            .await
            .unwrap();

        assert_eq!(receipt.id.as_deref(), Some("mem-1"));
        assert!(receipt.operator_notified);
        assert!(receipt.applicant_notified);

        let records = store.records().await;
        assert_eq!(records[0].name, "Bob");
        assert_eq!(records[0].email, "bob@example.com");
        assert_eq!(records[0].ip_address.as_deref(), Some("198.51.100.4"));

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "ops@example.org");
        assert_eq!(sent[1].to, "bob@example.com");
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_store_is_down() {
        let mailer = MockMailer::new();
        let service = service(Arc::new(FailingSubmissionStore), &mailer);

        let receipt = service
            .submit(&ContactForm::new("Bob", "bob@example.com", "Hello"), meta())
            .await
            .unwrap();

        assert!(receipt.id.is_none());
        assert!(receipt.operator_notified);
        assert!(receipt.applicant_notified);
        assert_eq!(mailer.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_mail_is_down() {
        let store = MemorySubmissionStore::new();
        let mailer = MockMailer::failing();
        let service = service(Arc::new(store.clone()), &mailer);

        let receipt = service
            .submit(&ContactForm::new("Bob", "bob@example.com", "Hello"), meta())
            .await
            .unwrap();

        assert!(receipt.id.is_some());
        assert!(!receipt.operator_notified);
        assert!(!receipt.applicant_notified);
        // The acknowledgment is still attempted after the alert fails.
        assert_eq!(mailer.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_is_never_persisted() {
        let store = MemorySubmissionStore::new();
        let mailer = MockMailer::new();
        let service = service(Arc::new(store.clone()), &mailer);

        let err = service
            .submit(&ContactForm::new("Bob", "not-an-email", "hi"), meta())
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidEmailFormat);
        assert!(store.records().await.is_empty());
        assert!(mailer.sent().await.is_empty());
    }

    #[test]
    fn test_receipt_serializes_camel_case() {
        let receipt = SubmissionReceipt {
            id: None,
            operator_notified: true,
            applicant_notified: false,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["operatorNotified"], true);
        assert!(json["id"].is_null());
    }
}
