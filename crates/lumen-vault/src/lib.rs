//! Vault access gate.
//!
//! A passkey is checked against one secret per [`VaultArea`]. A match
//! yields a [`VaultGrant`] scoped to that area, which a [`VaultSession`]
//! honours for [`SESSION_DURATION`].

#![doc = include_str!("../README.md")]

pub mod area;
pub mod passkey;
pub mod session;

pub use area::VaultArea;
pub use passkey::{PasskeyCheck, PasskeyRegistry, VaultPasskeys};
pub use session::{GrantStorage, MemoryGrantStorage, SESSION_DURATION, VaultGrant, VaultSession};
