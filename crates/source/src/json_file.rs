//! JSON export file source.
//!
//! Reads an item list exported from the remote API. Three layouts are
//! accepted:
//! - a bare array of items
//! - `{ "items": [...], "food_logs": [...] }`
//! - the list endpoint's bucketed response (`available_items`,
//!   `expired_items`, `used_items`, `donated_items`, `wasted_items`)
//!
//! Status changes are not written into the export. They are appended to a
//! sibling `<name>.updates.json` file for later replay against the API.

use async_trait::async_trait;
use pantry_core::{FoodLogRecord, FoodRecord};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::{InventorySource, Result, SourceError, StatusUpdate};

const BUCKET_KEYS: [&str; 5] = [
    "available_items",
    "expired_items",
    "used_items",
    "donated_items",
    "wasted_items",
];

/// File-based JSON inventory source.
pub struct JsonFileSource {
    path: PathBuf,
    updates_path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for the export at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pantry".to_string());
        let updates_path = path.with_file_name(format!("{}.updates.json", stem));
        Self { path, updates_path }
    }

    /// Where submitted updates are appended.
    pub fn updates_path(&self) -> &Path {
        &self.updates_path
    }

    async fn read_document(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path).await?;
        debug!(path = %self.path.display(), bytes = content.len(), "Read inventory export");
        Ok(serde_json::from_str(&content)?)
    }

    /// Updates submitted so far.
    pub async fn pending_updates(&self) -> Result<Vec<StatusUpdate>> {
        match fs::read_to_string(&self.updates_path).await {
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn elements(value: Value) -> Result<Vec<Value>> {
    Ok(serde_json::from_value(value)?)
}

/// Raw item elements from any accepted layout, in document order.
fn item_values(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(values) => Ok(values),
        Value::Object(mut map) => {
            if let Some(items) = map.remove("items") {
                return elements(items);
            }
            let mut values = Vec::new();
            for key in BUCKET_KEYS {
                // The bucketed response also carries counts under some keys
                if let Some(Value::Array(bucket)) = map.remove(key) {
                    values.extend(bucket);
                }
            }
            Ok(values)
        }
        _ => Ok(Vec::new()),
    }
}

fn items_from(document: Value) -> Result<Vec<FoodRecord>> {
    Ok(item_values(document)?
        .into_iter()
        .map(FoodRecord::from_value)
        .collect())
}

/// Overlay queued updates so the export reads as it will after replay.
fn apply_pending(records: &mut [FoodRecord], pending: &[StatusUpdate]) {
    for update in pending {
        let Some(id) = update.id.as_ref() else {
            continue;
        };
        if let Some(record) = records.iter_mut().find(|r| r.id.as_ref() == Some(id)) {
            record.status = Some(update.status.to_string());
            if update.reason.is_some() {
                record.waste_reason = update.reason.clone();
            }
        }
    }
}

#[async_trait]
impl InventorySource for JsonFileSource {
    async fn fetch_items(&self) -> Result<Vec<FoodRecord>> {
        let mut records = items_from(self.read_document().await?)?;
        let pending = self.pending_updates().await?;
        if !pending.is_empty() {
            debug!(pending = pending.len(), "Applying queued status updates");
            apply_pending(&mut records, &pending);
        }
        Ok(records)
    }

    async fn fetch_logs(&self) -> Result<Vec<FoodLogRecord>> {
        match self.read_document().await? {
            Value::Object(mut map) => match map.remove("food_logs") {
                Some(logs) => Ok(elements(logs)?
                    .into_iter()
                    .map(FoodLogRecord::from_value)
                    .collect()),
                None => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    async fn submit(&self, update: &StatusUpdate) -> Result<()> {
        let id = update
            .id
            .clone()
            .ok_or_else(|| SourceError::NotFound("update without item id".to_string()))?;

        let items = items_from(self.read_document().await?)?;
        if !items.iter().any(|r| r.id.as_ref() == Some(&id)) {
            return Err(SourceError::NotFound(id.to_string()));
        }

        let mut pending = self.pending_updates().await?;
        if let Some(queued) = pending.iter().find(|u| u.id.as_ref() == Some(&id)) {
            return Err(SourceError::NotAvailable {
                id: id.to_string(),
                status: queued.status.to_string(),
            });
        }
        pending.push(update.clone());
        let json = serde_json::to_string_pretty(&pending)?;
        fs::write(&self.updates_path, json.as_bytes()).await?;

        info!(item = %id, status = %update.status, "Queued status update");
        Ok(())
    }
}
