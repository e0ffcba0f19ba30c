//! Status-change requests.
//!
//! Only AVAILABLE items may change status, and only to a terminal status.
//! A reason travels with WASTED updates and is dropped otherwise.

use pantry_core::{FoodItem, ItemId, ItemStatus};
use serde::{Deserialize, Serialize};

use crate::trait_::{Result, SourceError};

/// A status change ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Target item
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ItemId>,

    /// New status
    pub status: ItemStatus,

    /// Waste reason
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl StatusUpdate {
    /// Build an update for `item`, enforcing the transition policy.
    pub fn new(item: &FoodItem, target: ItemStatus, reason: Option<&str>) -> Result<Self> {
        if item.status.is_terminal() {
            return Err(SourceError::NotAvailable {
                id: item.id.to_string(),
                status: item.status.to_string(),
            });
        }
        if !target.is_terminal() {
            return Err(SourceError::InvalidTarget(target.to_string()));
        }

        let reason = match target {
            ItemStatus::Wasted => reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            _ => None,
        };

        Ok(Self {
            id: Some(item.id.clone()),
            status: target,
            reason,
        })
    }

    /// JSON body for `PATCH /food/{id}/status`; the id lives in the path.
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({ "status": self.status });
        if let Some(reason) = &self.reason {
            body["reason"] = serde_json::Value::String(reason.clone());
        }
        body
    }
}
