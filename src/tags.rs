//! Keyword-driven emoji tags.
//!
//! A data file maps keyword lists to an emoji with a priority; every
//! restaurant entry in a snapshot gets the sorted, deduplicated emoji list
//! matching its menu text. Annotation runs as a read-modify-write over the
//! snapshot file so it can be re-applied without a re-scrape.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::StorageError;
use crate::snapshot::Snapshot;

fn default_priority() -> u32 {
    100
}

/// One tagging rule: any keyword hit contributes the emoji once.
#[derive(Debug, Clone, Deserialize)]
pub struct TagRule {
    pub keywords: Vec<String>,
    pub emoji: String,
    /// Lower sorts first. Rules without an explicit priority sink to the
    /// back of the list.
    #[serde(default = "default_priority")]
    pub priority: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TagTable {
    rules: Vec<TagRule>,
}

impl TagTable {
    /// Loads the rule table. A missing or malformed file degrades to an
    /// empty table: tagging is decoration, not a reason to fail a run.
    pub fn load(path: &Path) -> TagTable {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "tag table unavailable");
                return TagTable::default();
            }
        };
        match serde_json::from_str::<std::collections::HashMap<String, TagRule>>(&raw) {
            Ok(rules) => TagTable {
                rules: rules.into_values().collect(),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "tag table malformed, ignoring");
                TagTable::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Emoji for a block of menu text, ordered by (priority, emoji) and
    /// deduplicated. The ordering makes the output deterministic regardless
    /// of rule file order.
    pub fn tags_for(&self, blob: &str) -> Vec<String> {
        let blob = blob.to_lowercase();
        let mut hits: Vec<(u32, &str)> = self
            .rules
            .iter()
            .filter(|rule| {
                rule.keywords
                    .iter()
                    .any(|kw| blob.contains(&kw.to_lowercase()))
            })
            .map(|rule| (rule.priority, rule.emoji.as_str()))
            .collect();
        hits.sort();
        let mut out: Vec<String> = Vec::new();
        for (_, emoji) in hits {
            if !out.iter().any(|e| e == emoji) {
                out.push(emoji.to_string());
            }
        }
        out
    }
}

/// Recomputes `emoji_tags` for every entry from its items' text.
pub fn annotate_snapshot(snapshot: &mut Snapshot, table: &TagTable) {
    for (_, record) in snapshot.iter_mut() {
        let mut blob = String::new();
        for item in &record.items {
            for field in [&item.name, &item.description, &item.category] {
                if !field.is_empty() {
                    blob.push_str(field);
                    blob.push(' ');
                }
            }
        }
        record.emoji_tags = table.tags_for(&blob);
    }
}

/// Read-modify-write annotation of a snapshot file. Tags are recomputed
/// from scratch, so running this twice gives the same file.
pub fn annotate_file(path: &Path, table: &TagTable) -> Result<(), StorageError> {
    let raw = fs::read_to_string(path)?;
    let mut snapshot: Snapshot = serde_json::from_str(&raw)?;
    annotate_snapshot(&mut snapshot, table);
    fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    Ok(())
}
