//! In-memory source.

use async_trait::async_trait;
use pantry_core::{FoodLogRecord, FoodRecord, ItemStatus};
use tokio::sync::Mutex;

use super::{InventorySource, Result, SourceError, StatusUpdate};

/// Holds records in memory and applies submitted updates to them.
#[derive(Default)]
pub struct MemorySource {
    items: Mutex<Vec<FoodRecord>>,
    logs: Vec<FoodLogRecord>,
    submitted: Mutex<Vec<StatusUpdate>>,
}

impl MemorySource {
    /// Create a source serving `items`.
    pub fn new(items: Vec<FoodRecord>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    /// Builder: serve `logs` too.
    pub fn with_logs(mut self, logs: Vec<FoodLogRecord>) -> Self {
        self.logs = logs;
        self
    }

    /// Updates received so far, in order.
    pub async fn submitted(&self) -> Vec<StatusUpdate> {
        self.submitted.lock().await.clone()
    }
}

#[async_trait]
impl InventorySource for MemorySource {
    async fn fetch_items(&self) -> Result<Vec<FoodRecord>> {
        Ok(self.items.lock().await.clone())
    }

    async fn fetch_logs(&self) -> Result<Vec<FoodLogRecord>> {
        Ok(self.logs.clone())
    }

    async fn submit(&self, update: &StatusUpdate) -> Result<()> {
        let id = update
            .id
            .as_ref()
            .ok_or_else(|| SourceError::NotFound("update without item id".to_string()))?;

        let mut items = self.items.lock().await;
        let record = items
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;

        if let Some(current) = record.status.as_deref() {
            if matches!(current.parse::<ItemStatus>(), Ok(s) if s.is_terminal()) {
                return Err(SourceError::NotAvailable {
                    id: id.to_string(),
                    status: current.to_string(),
                });
            }
        }

        record.status = Some(update.status.to_string());
        if update.reason.is_some() {
            record.waste_reason = update.reason.clone();
        }

        self.submitted.lock().await.push(update.clone());
        Ok(())
    }
}
