//! Expiry thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds shared by classification, alerting and donation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryPolicy {
    /// Items with `0 <= days_left <= near_expiry_days` are near expiry
    pub near_expiry_days: i64,

    /// Items with `days_left <= donation_window_days` may be donated
    pub donation_window_days: i64,

    /// Whether items expiring today are still offered for donation
    pub donate_same_day: bool,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            near_expiry_days: 3,
            donation_window_days: 7,
            donate_same_day: false,
        }
    }
}

/// Rejected policy values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Near-expiry window below one day
    #[error("near_expiry_days must be at least 1, got {0}")]
    NearExpiryWindow(i64),

    /// Donation window below one day
    #[error("donation_window_days must be at least 1, got {0}")]
    DonationWindow(i64),
}

impl ExpiryPolicy {
    /// Check the windows are usable.
    ///
    /// Today and tomorrow always sit inside the near-expiry bucket, so the
    /// window cannot be shorter than one day.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.near_expiry_days < 1 {
            return Err(PolicyError::NearExpiryWindow(self.near_expiry_days));
        }
        if self.donation_window_days < 1 {
            return Err(PolicyError::DonationWindow(self.donation_window_days));
        }
        Ok(())
    }

    /// Parse a policy from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
