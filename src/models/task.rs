use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::segment::Segment;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 4;

/// A unit of generation work: one version of one segment.
///
/// Tasks are created by the loader and mutated in place during curation. The
/// `timestamp` and `random_suffix` keep output file names unique across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Storyboard file this task was expanded from.
    pub source_file: PathBuf,
    pub segment: Segment,
    /// 1-based version number within the segment.
    pub version_index: u32,
    pub output_dir: PathBuf,
    pub timestamp: String,
    pub random_suffix: String,
}

impl Task {
    pub fn new(
        source_file: impl Into<PathBuf>,
        segment: Segment,
        version_index: u32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_file: source_file.into(),
            segment,
            version_index,
            output_dir: output_dir.into(),
            timestamp: Local::now().format("%Y%m%d%H%M%S").to_string(),
            random_suffix: random_suffix(),
        }
    }

    /// File name of the source storyboard, used when grouping for display.
    pub fn source_name(&self) -> String {
        file_name(&self.source_file)
    }

    /// Base name for generated outputs, e.g. `1_v1_20231225120000_abcd`.
    pub fn output_filename_base(&self) -> String {
        format!(
            "{}_v{}_{}_{}",
            self.segment.segment_index, self.version_index, self.timestamp, self.random_suffix
        )
    }
}

/// Four characters drawn from `[a-z0-9]`.
fn random_suffix() -> String {
    Uuid::new_v4().as_bytes()[..SUFFIX_LEN]
        .iter()
        .map(|b| SUFFIX_ALPHABET[*b as usize % SUFFIX_ALPHABET.len()] as char)
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Resolution};

    fn segment() -> Segment {
        Segment {
            segment_index: 3,
            prompt_text: "A quiet harbor.".to_string(),
            image_url: None,
            asset: Asset::default(),
            is_pro: false,
            duration_seconds: 10,
            resolution: Resolution::Horizontal,
            director_intent: None,
        }
    }

    #[test]
    fn output_filename_base_format() {
        let mut task = Task::new("boards/ep1.json", segment(), 2, "out/ep1");
        task.timestamp = "20231225120000".to_string();
        task.random_suffix = "abcd".to_string();
        assert_eq!(task.output_filename_base(), "3_v2_20231225120000_abcd");
    }

    #[test]
    fn random_suffix_is_four_lowercase_alphanumerics() {
        let task = Task::new("ep1.json", segment(), 1, "out");
        assert_eq!(task.random_suffix.len(), 4);
        assert!(task
            .random_suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(task.timestamp.len(), 14);
    }

    #[test]
    fn random_suffix_uses_letters_past_hex() {
        let suffixes: String = (0..200).map(|_| random_suffix()).collect();
        assert!(suffixes.chars().any(|c| ('g'..='z').contains(&c)));
    }

    #[test]
    fn source_name_is_file_name() {
        let task = Task::new("boards/ep1.json", segment(), 1, "out");
        assert_eq!(task.source_name(), "ep1.json");
    }
}
