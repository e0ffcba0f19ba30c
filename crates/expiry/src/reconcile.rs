//! Checking server-supplied expiry fields against local classification.
//!
//! Some API variants precompute `expiry_state`/`days_left`. Those values
//! go stale as soon as the day rolls over, so the local classification is
//! always the one returned; the server copy is only compared.

use chrono::NaiveDate;
use pantry_core::{FoodItem, FreshnessState};
use serde::Serialize;
use tracing::debug;

use crate::classifier::{ExpiryClassification, ExpiryClassifier};

/// Outcome of comparing a cached classification with the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheCheck {
    /// The item carried no server classification
    Absent,
    /// Every field the server sent matches
    Consistent,
    /// At least one field disagrees
    Stale {
        /// Server's days until expiry
        server_days_left: Option<i64>,
        /// Server's bucket
        server_state: Option<FreshnessState>,
    },
}

/// Local classification plus the cache verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    /// Authoritative classification
    pub classification: ExpiryClassification,
    /// What happened to the server copy
    pub cache: CacheCheck,
}

impl ExpiryClassifier {
    /// Classify `item` locally and compare against any cached fields.
    pub fn reconcile(&self, item: &FoodItem, today: NaiveDate) -> Reconciled {
        let classification = self.classify_item(item, today);

        let cache = match item.cached {
            None => CacheCheck::Absent,
            Some(cached) => {
                let days_ok = cached
                    .days_left
                    .map_or(true, |d| d == classification.days_left);
                let state_ok = cached.state.map_or(true, |s| s == classification.state);
                if days_ok && state_ok {
                    CacheCheck::Consistent
                } else {
                    debug!(
                        item = %item.id,
                        server_days_left = ?cached.days_left,
                        server_state = ?cached.state,
                        local_days_left = classification.days_left,
                        local_state = %classification.state,
                        "Server expiry classification is stale, using local"
                    );
                    CacheCheck::Stale {
                        server_days_left: cached.days_left,
                        server_state: cached.state,
                    }
                }
            }
        };

        Reconciled {
            classification,
            cache,
        }
    }
}
