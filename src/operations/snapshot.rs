use crate::errors::{BudgetError, Result};
use crate::models::budget::BudgetCategory;
use crate::models::snapshot::{SavedBudgets, Snapshot};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    saved: SavedBudgets,
}

impl SnapshotStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let saved = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<SavedBudgets>(&contents).map_err(|e| {
                BudgetError::LocalStorageFailed(format!("Failed to parse '{}': {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => SavedBudgets::default(),
            Err(e) => {
                return Err(BudgetError::LocalStorageFailed(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };
        Ok(Self { path, saved })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&Snapshot> {
        self.saved.saved_budgets.get(name.trim())
    }

    /// Snapshots, newest first.
    pub fn list(&self) -> Vec<&Snapshot> {
        let mut snapshots: Vec<&Snapshot> = self.saved.saved_budgets.values().collect();
        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.name.cmp(&b.name)));
        snapshots
    }

    pub fn save(&mut self, name: &str, data: &[BudgetCategory], timestamp: DateTime<Utc>) -> Result<&Snapshot> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::ValidationFailed(
                "Please enter a name for your budget".to_string(),
            ));
        }

        let snapshot = Snapshot {
            name: name.to_string(),
            timestamp,
            data: data.to_vec(),
        };
        let previous = self.saved.saved_budgets.insert(name.to_string(), snapshot);

        if let Err(err) = self.persist() {
            match previous {
                Some(previous) => self.saved.saved_budgets.insert(name.to_string(), previous),
                None => self.saved.saved_budgets.remove(name),
            };
            return Err(err);
        }

        self.saved
            .saved_budgets
            .get(name)
            .ok_or_else(|| BudgetError::LocalStorageFailed(format!("Snapshot '{}' vanished after save", name)))
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.saved)
            .map_err(|e| BudgetError::LocalStorageFailed(format!("Failed to serialize budgets: {}", e)))?;
        fs::write(&self.path, json).map_err(|e| {
            BudgetError::LocalStorageFailed(format!("Failed to write '{}': {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::BudgetItem;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn sample_budget(rent: i64) -> Vec<BudgetCategory> {
        vec![BudgetCategory::new(
            "h".to_string(),
            "Housing & Utilities".to_string(),
            vec![BudgetItem::new("r".to_string(), "Rent/Mortgage".to_string(), Decimal::from(rent), true)],
        )]
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("saved.json")).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");

        let mut store = SnapshotStore::open(&path).unwrap();
        store.save("January", &sample_budget(1500), at(1)).unwrap();

        let reopened = SnapshotStore::open(&path).unwrap();
        let snapshot = reopened.get("January").unwrap();
        assert_eq!(snapshot.timestamp, at(1));
        assert_eq!(snapshot.data, sample_budget(1500));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("savedBudgets"));
    }

    #[test]
    fn test_save_same_name_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("saved.json")).unwrap();

        store.save("Plan", &sample_budget(1500), at(1)).unwrap();
        store.save("Plan", &sample_budget(1200), at(2)).unwrap();

        assert_eq!(store.list().len(), 1);
        assert_eq!(store.get("Plan").unwrap().data, sample_budget(1200));
    }

    #[test]
    fn test_save_empty_name_rejected_without_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut store = SnapshotStore::open(&path).unwrap();

        let result = store.save("   ", &sample_budget(1500), at(1));
        assert!(matches!(result, Err(BudgetError::ValidationFailed(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_list_newest_first() {
        let dir = tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("saved.json")).unwrap();
        store.save("Old", &sample_budget(1), at(1)).unwrap();
        store.save("New", &sample_budget(2), at(3)).unwrap();
        store.save("Mid", &sample_budget(3), at(2)).unwrap();

        let names: Vec<&str> = store.list().into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_corrupt_file_reports_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        fs::write(&path, "{not json").unwrap();

        let result = SnapshotStore::open(&path);
        assert!(matches!(result, Err(BudgetError::LocalStorageFailed(_))));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("saved.json");
        let mut store = SnapshotStore::open(&path).unwrap();

        let result = store.save("Plan", &sample_budget(1500), at(1));
        assert!(matches!(result, Err(BudgetError::LocalStorageFailed(_))));
        assert!(store.get("Plan").is_none());
    }
}
