//! In-memory test doubles for the store and mailer seams.

use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::{Error, Result};
use tokio::sync::Mutex;

use crate::notify::{Email, Mailer};
use crate::store::SubmissionStore;
use crate::submission::Submission;

/// Store that keeps submissions in memory.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemorySubmissionStore {
    records: Arc<Mutex<Vec<Submission>>>,
}

impl MemorySubmissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything persisted so far, in order.
    pub async fn records(&self) -> Vec<Submission> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn persist(&self, submission: &Submission) -> Result<String> {
        let mut records = self.records.lock().await;
        records.push(submission.clone());
        Ok(format!("mem-{}", records.len()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store whose every write fails, as if the database were unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSubmissionStore;

#[async_trait]
impl SubmissionStore for FailingSubmissionStore {
    async fn persist(&self, _submission: &Submission) -> Result<String> {
        Err(Error::database("connection refused"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Mailer that records messages instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<Email>>>,
    fail: bool,
}

impl MockMailer {
    /// Creates a mailer that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that rejects every message. Attempts are still recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages handed to [`send`](Mailer::send), including rejected ones.
    pub async fn sent(&self) -> Vec<Email> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: Email) -> Result<()> {
        self.sent.lock().await.push(email);
        if self.fail {
            return Err(Error::transport("mock mailer rejects all messages"));
        }
        Ok(())
    }
}
