//! Urgency tiers and their presentation labels.

use pantry_core::FreshnessState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finer-grained urgency within the freshness buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    /// Past expiry
    Expired,
    /// Expires today
    ExpiresToday,
    /// Expires tomorrow
    ExpiresTomorrow,
    /// Later inside the near-expiry window
    NearExpiry,
    /// Outside the near-expiry window
    Fresh,
}

impl Urgency {
    /// Freshness bucket this tier belongs to.
    pub fn state(&self) -> FreshnessState {
        match self {
            Urgency::Expired => FreshnessState::Expired,
            Urgency::ExpiresToday | Urgency::ExpiresTomorrow | Urgency::NearExpiry => {
                FreshnessState::NearExpiry
            }
            Urgency::Fresh => FreshnessState::Fresh,
        }
    }

    /// Long label, e.g. "Expires in 3 days".
    pub fn label(&self, days_left: i64) -> String {
        match self {
            Urgency::Expired => "Expired".to_string(),
            Urgency::ExpiresToday => "Expires Today".to_string(),
            Urgency::ExpiresTomorrow => "Expires Tomorrow".to_string(),
            Urgency::NearExpiry => format!("Expires in {} days", days_left),
            Urgency::Fresh => "Fresh".to_string(),
        }
    }

    /// Short badge label, e.g. "3d left".
    pub fn short_label(&self, days_left: i64) -> String {
        match self {
            Urgency::Expired => "Expired".to_string(),
            Urgency::ExpiresToday => "Today".to_string(),
            Urgency::ExpiresTomorrow => "Tomorrow".to_string(),
            Urgency::NearExpiry => format!("{}d left", days_left),
            Urgency::Fresh => "Fresh".to_string(),
        }
    }

    /// Stable kebab-case class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            Urgency::Expired => "expired",
            Urgency::ExpiresToday => "expires-today",
            Urgency::ExpiresTomorrow => "expires-tomorrow",
            Urgency::NearExpiry => "near-expiry",
            Urgency::Fresh => "fresh",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
