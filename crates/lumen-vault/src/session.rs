//! Time-bounded vault grants.
//!
//! A grant is held by the client, one per tab. [`GrantStorage`] abstracts
//! where it lives; [`MemoryGrantStorage`] is the in-process version.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::area::VaultArea;

/// How long a grant stays valid after it is issued.
pub const SESSION_DURATION: Duration = Duration::from_secs(30 * 60);

/// Proof that a passkey for `page` was accepted at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultGrant {
    /// The area the grant authorises.
    pub page: VaultArea,
    /// Issue time, serialised as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl VaultGrant {
    /// Whether the grant has lapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.timestamp);
        elapsed.num_milliseconds() >= SESSION_DURATION.as_millis() as i64
    }
}

/// Holds at most one grant.
pub trait GrantStorage: Send + Sync {
    /// The stored grant, if any.
    fn load(&self) -> Option<VaultGrant>;

    /// Replace the stored grant.
    fn store(&self, grant: VaultGrant);

    /// Drop the stored grant.
    fn remove(&self);
}

/// [`GrantStorage`] in process memory.
#[derive(Debug, Default)]
pub struct MemoryGrantStorage {
    slot: Mutex<Option<VaultGrant>>,
}

impl MemoryGrantStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GrantStorage for MemoryGrantStorage {
    fn load(&self) -> Option<VaultGrant> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, grant: VaultGrant) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(grant);
    }

    fn remove(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Grant lifecycle over a [`GrantStorage`].
#[derive(Debug, Default)]
pub struct VaultSession<S: GrantStorage> {
    storage: S,
}

impl<S: GrantStorage> VaultSession<S> {
    /// Wrap `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Issue a grant for `page`, replacing any existing one.
    pub fn grant(&self, page: VaultArea) -> VaultGrant {
        self.grant_at(page, Utc::now())
    }

    /// Issue a grant for `page` as of `now`.
    pub fn grant_at(&self, page: VaultArea, now: DateTime<Utc>) -> VaultGrant {
        let grant = VaultGrant {
            page,
            timestamp: now,
        };
        self.storage.store(grant);
        grant
    }

    /// Whether the stored grant authorises `page`.
    pub fn check(&self, page: VaultArea) -> bool {
        self.check_at(page, Utc::now())
    }

    /// Whether the stored grant authorises `page` at `now`.
    ///
    /// An expired grant is removed from storage and reads as absent.
    pub fn check_at(&self, page: VaultArea, now: DateTime<Utc>) -> bool {
        let Some(grant) = self.storage.load() else {
            return false;
        };
        if grant.is_expired_at(now) {
            log::debug!("Vault grant for '{}' expired", grant.page);
            self.storage.remove();
            return false;
        }
        grant.page == page
    }

    /// The stored grant, expired or not.
    pub fn current(&self) -> Option<VaultGrant> {
        self.storage.load()
    }

    /// Drop the stored grant.
    pub fn clear(&self) {
        self.storage.remove();
    }
}
