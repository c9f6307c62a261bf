use std::io::Write;
use std::path::Path;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::activity::ActivityLog;
use super::entries::Entries;
use crate::error::{InventoryError, Result};
use crate::parser::snapshot::{self, SnapshotError};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub struct Store {
    data: RwLock<Entries>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Entries::new()),
        }
    }

    pub fn with_entries(entries: Entries) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }

    /// Adds `quantity` to `item`, creating it at zero first if needed.
    ///
    /// An empty item name is ignored. Negative quantities are accepted and
    /// the result is stored as-is, even when it drops to zero or below.
    pub async fn add(&self, item: &str, quantity: i64, log: Option<&mut ActivityLog>) {
        if item.is_empty() {
            debug!("ignoring add with empty item name");
            return;
        }

        {
            let mut data = self.data.write().await;
            let current = data.get(item).unwrap_or(0);
            data.insert(item, current.saturating_add(quantity));
        }
        debug!(item, quantity, "added stock");

        if let Some(log) = log {
            log.record_added(item, quantity);
        }
    }

    /// Takes `quantity` away from `item`; the entry is dropped once it reaches zero or below.
    pub async fn remove(&self, item: &str, quantity: i64) {
        let mut data = self.data.write().await;
        let Some(current) = data.get(item) else {
            warn!("Attempted to remove non-existent item: {}", item);
            return;
        };

        let remaining = current.saturating_sub(quantity);
        if remaining <= 0 {
            data.remove(item);
            debug!(item, "removed item");
        } else {
            data.insert(item, remaining);
            debug!(item, remaining, "removed stock");
        }
    }

    pub async fn get_quantity(&self, item: &str) -> Result<i64> {
        let data = self.data.read().await;
        data.get(item)
            .ok_or_else(|| InventoryError::ItemNotFound(item.to_string()))
    }

    /// Replaces the whole inventory with the contents of `path`.
    ///
    /// Never fails: unreadable or malformed files leave the store empty.
    pub async fn load(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let loaded = match snapshot::read(path).await {
            Ok(entries) => {
                info!(path = %path.display(), items = entries.len(), "loaded inventory");
                entries
            }
            Err(SnapshotError::NotFound(_)) => {
                warn!("Data file not found: {}", path.display());
                Entries::new()
            }
            Err(SnapshotError::InvalidJson(_, e)) => {
                warn!("Invalid JSON in data file: {} ({})", path.display(), e);
                Entries::new()
            }
            Err(e) => {
                warn!("{}", e);
                Entries::new()
            }
        };

        *self.data.write().await = loaded;
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.data.read().await;
        snapshot::write(path, &data).await?;
        info!(path = %path.display(), items = data.len(), "saved inventory");
        Ok(())
    }

    /// Writes the items report: a header, then `<item> -> <quantity>` per item.
    pub async fn report<W: Write>(&self, out: &mut W) -> Result<()> {
        let data = self.data.read().await;
        writeln!(out, "Items Report")?;
        for (item, quantity) in data.iter() {
            writeln!(out, "{} -> {}", item, quantity)?;
        }
        Ok(())
    }

    /// Items whose quantity is strictly below `threshold`, in inventory order.
    pub async fn low_stock_items(&self, threshold: i64) -> Vec<String> {
        let data = self.data.read().await;
        data.iter()
            .filter(|(_, quantity)| *quantity < threshold)
            .map(|(item, _)| item.to_string())
            .collect()
    }

    pub async fn snapshot(&self) -> Entries {
        self.data.read().await.clone()
    }
}
