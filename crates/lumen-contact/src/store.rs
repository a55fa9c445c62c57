//! Submission persistence.
//!
//! [`MongoPool`] owns the process-wide document store client. It is built
//! once at startup and handed to [`MongoSubmissionStore`]; the first
//! [`get`](MongoPool::get) connects and every later call reuses the same
//! client. A missing connection string is only an error when a write is
//! attempted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lumen_core::{Error, Result};
use mongodb::Client;
use mongodb::bson::{self, Bson};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::submission::Submission;

/// Persists validated submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Store `submission`, stamping its creation time, and return the new
    /// record's identifier.
    ///
    /// # Errors
    ///
    /// Any connection or write failure. Callers decide whether it is fatal.
    async fn persist(&self, submission: &Submission) -> Result<String>;

    /// Returns the name of this store for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string, e.g. `mongodb+srv://...`.
    pub uri: Option<String>,
    /// Database name.
    pub name: String,
    /// Collection holding contact submissions.
    pub collection: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: None,
            name: "lumen".to_string(),
            collection: "contact_submissions".to_string(),
        }
    }
}

// ============================================================================
// Stored record
// ============================================================================

/// The document written for each submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Origin form tag.
    pub source: String,
    /// Client IP, if known.
    pub ip_address: Option<String>,
    /// Client user agent, if known.
    pub user_agent: Option<String>,
    /// Server-assigned creation time.
    pub created_at: bson::DateTime,
}

impl SubmissionRecord {
    /// Build the record for `submission`, created at `now`.
    pub fn stamp(submission: &Submission, now: DateTime<Utc>) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            source: submission.source.clone(),
            ip_address: submission.ip_address.clone(),
            user_agent: submission.user_agent.clone(),
            created_at: bson::DateTime::from_millis(now.timestamp_millis()),
        }
    }
}

// ============================================================================
// MongoPool
// ============================================================================

/// Lazily connected, shared document store client.
///
/// The driver's `Client` pools connections internally; this type only
/// guarantees there is one `Client` per process and gives it an explicit
/// lifecycle.
#[derive(Debug)]
pub struct MongoPool {
    settings: DatabaseSettings,
    client: RwLock<Option<Client>>,
}

impl MongoPool {
    /// Create an unconnected pool.
    pub fn new(settings: DatabaseSettings) -> Self {
        Self {
            settings,
            client: RwLock::new(None),
        }
    }

    /// The settings this pool was built with.
    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Connect now instead of on first use.
    pub async fn init(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }

    /// Return the shared client, connecting on first call.
    ///
    /// Concurrent first calls are serialised by the write lock, so only one
    /// client is ever created.
    pub async fn get(&self) -> Result<Client> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let uri = self
            .settings
            .uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| Error::config("database.uri is not set"))?;

        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::database(format!("connect: {e}")))?;
        log::info!("Document store client created for database '{}'", self.settings.name);

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Whether a client has been created.
    pub async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Shut the client down. A later [`get`](Self::get) reconnects.
    pub async fn close(&self) {
        let client = self.client.write().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            log::info!("Document store client closed");
        }
    }
}

// ============================================================================
// MongoSubmissionStore
// ============================================================================

/// [`SubmissionStore`] writing to a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoSubmissionStore {
    pool: Arc<MongoPool>,
}

impl MongoSubmissionStore {
    /// Create a store over a shared pool.
    pub fn new(pool: Arc<MongoPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for MongoSubmissionStore {
    async fn persist(&self, submission: &Submission) -> Result<String> {
        let client = self.pool.get().await?;
        let settings = self.pool.settings();
        let collection = client
            .database(&settings.name)
            .collection::<SubmissionRecord>(&settings.collection);

        let record = SubmissionRecord::stamp(submission, Utc::now());
        let result = collection
            .insert_one(&record)
            .await
            .map_err(|e| Error::database(format!("insert: {e}")))?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}
