//! Environment helpers shared by config-touching tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialise tests that read or write process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard for env var manipulation in tests.
///
/// Callers must hold [`env_lock`] for the guard's lifetime.
pub(crate) struct EnvGuard {
    key: String,
    prev: Option<String>,
}

#[allow(unsafe_code)]
impl EnvGuard {
    pub(crate) fn new(key: &str, value: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: env-mutating tests are serialised by `env_lock`.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            prev,
        }
    }

    pub(crate) fn remove(key: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: env-mutating tests are serialised by `env_lock`.
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_string(),
            prev,
        }
    }
}

#[allow(unsafe_code)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: env-mutating tests are serialised by `env_lock`.
        unsafe {
            match &self.prev {
                Some(val) => std::env::set_var(&self.key, val),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}
