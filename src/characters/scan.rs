use indexmap::IndexMap;

use crate::models::Task;

/// Aggregate statistics for one character name across a task batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameStats {
    /// Owning storyboard files, in discovery order.
    pub files: Vec<String>,
    /// Total number of entries carrying this name.
    pub count: usize,
    /// Identifiers already attached to this name, in discovery order.
    pub existing_ids: Vec<String>,
}

/// Result of scanning a batch's structured character lists.
///
/// Both maps preserve discovery order. Prompt text is not a discovery source:
/// a name that only appears inside prompts never shows up here.
#[derive(Debug, Clone, Default)]
pub struct CharacterScan {
    /// File name -> name -> occurrence count within that file.
    pub per_file: IndexMap<String, IndexMap<String, usize>>,
    /// Name -> aggregate statistics.
    pub per_name: IndexMap<String, NameStats>,
}

impl CharacterScan {
    pub fn is_empty(&self) -> bool {
        self.per_name.is_empty()
    }

    /// Names by descending occurrence count; ties keep discovery order.
    pub fn ranked(&self) -> Vec<(&str, &NameStats)> {
        let mut ranked: Vec<_> = self
            .per_name
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        ranked
    }

    pub fn stats(&self, name: &str) -> Option<&NameStats> {
        self.per_name.get(name)
    }
}

/// Build per-file and per-name statistics from every task's character entries.
///
/// Entries with an empty name are ignored.
pub fn scan_characters(tasks: &[Task]) -> CharacterScan {
    let mut scan = CharacterScan::default();

    for task in tasks {
        let file = task.source_name();
        let file_bucket = scan.per_file.entry(file.clone()).or_default();

        for entry in &task.segment.asset.characters {
            let name = entry.name();
            if name.is_empty() {
                continue;
            }

            *file_bucket.entry(name.to_string()).or_insert(0) += 1;

            let stats = scan.per_name.entry(name.to_string()).or_default();
            stats.count += 1;
            if !stats.files.contains(&file) {
                stats.files.push(file.clone());
            }
            if let Some(id) = entry.id() {
                if !stats.existing_ids.iter().any(|existing| existing == id) {
                    stats.existing_ids.push(id.to_string());
                }
            }
        }
    }

    tracing::debug!(
        files = scan.per_file.len(),
        names = scan.per_name.len(),
        "Scanned character entries"
    );
    scan
}
