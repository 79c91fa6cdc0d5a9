//! One-JSON-file-per-record persistence.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/workitems/<id>.json
//! <root>/sprints/<id>.json
//! ```
//!
//! Records are overwritten whole on every save. Nothing guards against another
//! process writing the same directory; the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::sprint::Sprint;
use crate::task::WorkItem;

const WORKITEM_DIR: &str = "workitems";
const SPRINT_DIR: &str = "sprints";

/// What the board needs from persistence.
pub trait ItemStore {
    /// Insert or replace `item`, assigning an id and creation time if it has
    /// none and refreshing its update time. The caller's copy is stamped too.
    fn save_item(&mut self, item: &mut WorkItem) -> Result<()>;

    /// Every stored item, in no particular order. Unreadable records are
    /// skipped.
    fn load_all_items(&self) -> Result<Vec<WorkItem>>;
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store at `root`, creating its directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [root.clone(), root.join(WORKITEM_DIR), root.join(SPRINT_DIR)] {
            fs::create_dir_all(&dir).map_err(|source| Error::StoreUnavailable {
                path: dir.clone(),
                source,
            })?;
        }
        tracing::debug!("store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workitem_dir(&self) -> PathBuf {
        self.root.join(WORKITEM_DIR)
    }

    fn sprint_dir(&self) -> PathBuf {
        self.root.join(SPRINT_DIR)
    }

    pub fn save_sprint(&mut self, sprint: &mut Sprint) -> Result<()> {
        let id = stamp(&mut sprint.id, &mut sprint.created_at, &mut sprint.updated_at);
        write_record(&self.sprint_dir(), &id, sprint)
    }

    pub fn load_all_sprints(&self) -> Result<Vec<Sprint>> {
        read_records(&self.sprint_dir())
    }
}

impl ItemStore for JsonStore {
    fn save_item(&mut self, item: &mut WorkItem) -> Result<()> {
        let id = stamp(&mut item.id, &mut item.created_at, &mut item.updated_at);
        write_record(&self.workitem_dir(), &id, item)?;
        tracing::debug!(id = %id, status = %item.status, "saved work item");
        Ok(())
    }

    fn load_all_items(&self) -> Result<Vec<WorkItem>> {
        read_records(&self.workitem_dir())
    }
}

/// Assign an id and creation time to a new record and refresh its update
/// time. Returns the record's id.
fn stamp(
    id: &mut Option<String>,
    created_at: &mut DateTime<Utc>,
    updated_at: &mut DateTime<Utc>,
) -> String {
    let now = Utc::now();
    match id {
        Some(id) => {
            *updated_at = next_stamp(*updated_at, now);
            id.clone()
        }
        None => {
            let new_id = Uuid::new_v4().to_string();
            *id = Some(new_id.clone());
            *created_at = now;
            *updated_at = now;
            new_id
        }
    }
}

/// `now`, unless the clock has not moved past `previous`.
///
/// Keeps update times strictly increasing across saves of one record.
fn next_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Write `record` to `<dir>/<id>.json` via a temporary sibling and a rename.
fn write_record<T: Serialize>(dir: &Path, id: &str, record: &T) -> Result<()> {
    let path = dir.join(format!("{id}.json"));
    let tmp = dir.join(format!("{id}.json.tmp"));
    let data = serde_json::to_string_pretty(record)?;
    fs::write(&tmp, data)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}

/// Read every `*.json` record in `dir`, skipping any that fail to read or
/// parse.
fn read_records<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::StoreUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("skipping unreadable record {}: {}", path.display(), e);
                continue;
            }
        };
        match serde_json::from_str(&data) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("skipping corrupt record {}: {}", path.display(), e),
        }
    }
    Ok(records)
}

/// Store kept entirely in memory, for exercising the board without a disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub items: std::collections::BTreeMap<String, WorkItem>,
    pub saves: usize,
}

#[cfg(test)]
impl ItemStore for MemoryStore {
    fn save_item(&mut self, item: &mut WorkItem) -> Result<()> {
        let id = stamp(&mut item.id, &mut item.created_at, &mut item.updated_at);
        self.items.insert(id, item.clone());
        self.saves += 1;
        Ok(())
    }

    fn load_all_items(&self) -> Result<Vec<WorkItem>> {
        Ok(self.items.values().cloned().collect())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
