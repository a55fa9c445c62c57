//! Vault areas.

use std::fmt;
use std::str::FromStr;

use lumen_core::Error;
use serde::{Deserialize, Serialize};

/// A protected section of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultArea {
    /// Investor materials.
    Investors,
    /// Hiring materials.
    Talent,
    /// Community partner materials.
    Community,
}

impl VaultArea {
    /// Every area, in registry order.
    pub const ALL: [VaultArea; 3] = [Self::Investors, Self::Talent, Self::Community];

    /// Identifier used in URLs and grants.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Investors => "investors",
            Self::Talent => "talent",
            Self::Community => "community",
        }
    }

    /// Site path of the area's landing page.
    pub fn path(self) -> String {
        format!("/vault/{}", self.as_str())
    }
}

impl fmt::Display for VaultArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultArea {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| Error::invalid_data(format!("unknown vault area: {s}")))
    }
}
