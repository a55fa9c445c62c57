//! Passkey registry.

use serde::{Deserialize, Serialize};

use crate::area::VaultArea;

/// Configured secrets, one per area. Unset areas cannot be unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultPasskeys {
    /// Passkey for [`VaultArea::Investors`].
    pub investors: Option<String>,
    /// Passkey for [`VaultArea::Talent`].
    pub talent: Option<String>,
    /// Passkey for [`VaultArea::Community`].
    pub community: Option<String>,
}

impl VaultPasskeys {
    /// The secret configured for `area`.
    pub fn get(&self, area: VaultArea) -> Option<&str> {
        match area {
            VaultArea::Investors => self.investors.as_deref(),
            VaultArea::Talent => self.talent.as_deref(),
            VaultArea::Community => self.community.as_deref(),
        }
    }
}

/// Result of a passkey check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasskeyCheck {
    /// The passkey unlocks this area.
    Granted(VaultArea),
    /// No area matches.
    Denied,
}

impl PasskeyCheck {
    /// Whether access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// The unlocked area, if any.
    pub fn area(&self) -> Option<VaultArea> {
        match self {
            Self::Granted(area) => Some(*area),
            Self::Denied => None,
        }
    }
}

/// Fixed table of area secrets, normalised once at construction.
#[derive(Clone, Default)]
pub struct PasskeyRegistry {
    entries: Vec<(VaultArea, String)>,
}

impl std::fmt::Debug for PasskeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let areas: Vec<_> = self.entries.iter().map(|(area, _)| *area).collect();
        f.debug_struct("PasskeyRegistry")
            .field("areas", &areas)
            .finish_non_exhaustive()
    }
}

impl PasskeyRegistry {
    /// Build a registry from `(area, secret)` pairs. Blank secrets are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (VaultArea, S)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(area, secret)| {
                let secret = normalize(secret.as_ref());
                (!secret.is_empty()).then_some((area, secret))
            })
            .collect();
        Self { entries }
    }

    /// Build a registry from configuration, in [`VaultArea::ALL`] order.
    pub fn from_passkeys(passkeys: &VaultPasskeys) -> Self {
        let registry = Self::new(
            VaultArea::ALL
                .into_iter()
                .filter_map(|area| passkeys.get(area).map(|secret| (area, secret))),
        );
        for area in VaultArea::ALL {
            if !registry.has(area) {
                log::warn!("No passkey configured for vault area '{area}'");
            }
        }
        registry
    }

    /// Whether `area` has a secret.
    pub fn has(&self, area: VaultArea) -> bool {
        self.entries.iter().any(|(a, _)| *a == area)
    }

    /// Number of unlockable areas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no area can be unlocked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check `candidate` against the table.
    ///
    /// The candidate is trimmed and uppercased; the first area whose secret
    /// matches wins.
    pub fn check(&self, candidate: &str) -> PasskeyCheck {
        let candidate = normalize(candidate);
        if candidate.is_empty() {
            return PasskeyCheck::Denied;
        }

        self.entries
            .iter()
            .find(|(_, secret)| *secret == candidate)
            .map_or(PasskeyCheck::Denied, |(area, _)| PasskeyCheck::Granted(*area))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
