//! Per-weekday snapshot store: one JSON file per weekday under the data
//! directory, mapping restaurant identifier to its day record.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StorageError;
use crate::model::{DayRecord, Weekday};

/// Insertion-ordered mapping from restaurant identifier to day record.
/// Order is the adapter declaration order and decides downstream render
/// order, so a plain `HashMap` will not do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, DayRecord)>,
}

impl Snapshot {
    pub fn new() -> Snapshot {
        Snapshot::default()
    }

    /// Inserts or replaces an entry, keeping first-insertion order.
    pub fn insert(&mut self, name: &str, record: DayRecord) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = record,
            None => self.entries.push((name.to_string(), record)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DayRecord> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut DayRecord)> {
        self.entries.iter_mut().map(|(n, r)| (n.as_str(), r))
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of restaurant identifiers to day records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
                let mut snapshot = Snapshot::new();
                while let Some((name, record)) = access.next_entry::<String, DayRecord>()? {
                    snapshot.entries.push((name, record));
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// Flat file store for day snapshots.
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> SnapshotStore {
        SnapshotStore { data_dir: data_dir.into() }
    }

    pub fn path_for(&self, day: Weekday) -> PathBuf {
        self.data_dir.join(format!("lunch_data_{day}.json"))
    }

    pub fn exists(&self, day: Weekday) -> bool {
        self.path_for(day).exists()
    }

    pub fn load(&self, day: Weekday) -> Result<Snapshot, StorageError> {
        let raw = fs::read_to_string(self.path_for(day))?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, day: Weekday, snapshot: &Snapshot) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.path_for(day);
        fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
        Ok(path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemRecord;

    fn record(day: &str, name: &str) -> DayRecord {
        DayRecord {
            day: day.to_string(),
            items: vec![ItemRecord {
                name: name.to_string(),
                category: String::new(),
                description: String::new(),
                price: String::new(),
            }],
            emoji_tags: Vec::new(),
        }
    }

    #[test]
    fn serialization_keeps_insertion_order() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("ZetaScraper", record("monday", "A"));
        snapshot.insert("AlphaScraper", record("monday", "B"));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.find("ZetaScraper").unwrap() < json.find("AlphaScraper").unwrap());

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn insert_replaces_without_reordering() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("A", record("monday", "one"));
        snapshot.insert("B", record("monday", "two"));
        snapshot.insert("A", record("monday", "three"));

        assert_eq!(snapshot.len(), 2);
        let names: Vec<_> = snapshot.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(snapshot.get("A").unwrap().items[0].name, "three");
    }

    #[test]
    fn store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let mut snapshot = Snapshot::new();
        snapshot.insert("KooperativetScraper", record("tuesday", "Fisk"));
        store.save(Weekday::Tuesday, &snapshot).unwrap();

        assert!(store.exists(Weekday::Tuesday));
        assert!(!store.exists(Weekday::Monday));
        assert_eq!(store.load(Weekday::Tuesday).unwrap(), snapshot);
    }
}
