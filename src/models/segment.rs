use std::fmt;

use serde::{Deserialize, Serialize};

use crate::characters::parse_annotation;

/// Output orientation of a generated video.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// 16:9
    #[default]
    Horizontal,
    /// 9:16
    Vertical,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character reference inside [`Asset::characters`].
///
/// Storyboards carry either legacy strings (`"Alice"`, `"Alice@123"`,
/// `"Alice (@123 )"`) or objects (`{"name": "Alice", "id": "@123"}`). Both are
/// decoded here, once, into a name and an optional identifier. The entry keeps
/// the text it was read from so that untouched entries serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCharacter", into = "String")]
pub struct CharacterEntry {
    name: String,
    id: Option<String>,
    label: String,
}

impl CharacterEntry {
    /// Decode a legacy string annotation.
    pub fn parse(raw: &str) -> Self {
        let (name, id) = parse_annotation(raw);
        Self {
            name,
            id,
            label: raw.to_string(),
        }
    }

    /// Build the canonical `"{name}@{id} "` form.
    pub fn with_id(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: Some(id.to_string()),
            label: format!("{}@{} ", name, id),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The text this entry is written back as.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for CharacterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCharacter {
    Label(String),
    Item {
        name: String,
        #[serde(default)]
        id: Option<String>,
    },
}

impl From<RawCharacter> for CharacterEntry {
    fn from(raw: RawCharacter) -> Self {
        match raw {
            RawCharacter::Label(label) => Self::parse(&label),
            RawCharacter::Item { name, id } => {
                let name = name.trim();
                let id = id
                    .map(|id| id.trim().trim_start_matches('@').trim().to_string())
                    .filter(|id| !id.is_empty());
                match id {
                    Some(id) => Self::with_id(name, &id),
                    None => Self {
                        name: name.to_string(),
                        id: None,
                        label: name.to_string(),
                    },
                }
            }
        }
    }
}

impl From<CharacterEntry> for String {
    fn from(entry: CharacterEntry) -> Self {
        entry.label
    }
}

/// Scene references attached to a segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub characters: Vec<CharacterEntry>,
    #[serde(default)]
    pub scene: Option<String>,
    #[serde(default)]
    pub props: Vec<String>,
}

/// One shot of a storyboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_index: u32,
    pub prompt_text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub asset: Asset,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
    #[serde(default)]
    pub resolution: Resolution,
    /// Free-form note from the storyboard author. Not sent to generation.
    #[serde(default)]
    pub director_intent: Option<String>,
}

fn default_duration() -> u32 {
    10
}

/// Durations accepted for normal segments.
pub const NORMAL_DURATIONS: [u32; 2] = [10, 15];
/// Durations accepted for pro segments.
pub const PRO_DURATIONS: [u32; 3] = [10, 15, 25];

impl Segment {
    pub fn allowed_durations(&self) -> &'static [u32] {
        if self.is_pro {
            &PRO_DURATIONS
        } else {
            &NORMAL_DURATIONS
        }
    }
}

/// A storyboard file. Keys other than `segments` (e.g. `_comment`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storyboard {
    pub segments: Vec<Segment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_string_entries_keep_their_text() {
        let entry: CharacterEntry = serde_json::from_str("\"Alice (@123 )\"").unwrap();
        assert_eq!(entry.name(), "Alice");
        assert_eq!(entry.id(), Some("123"));
        assert_eq!(serde_json::to_string(&entry).unwrap(), "\"Alice (@123 )\"");
    }

    #[test]
    fn object_entries_strip_marker_from_id() {
        let entry: CharacterEntry =
            serde_json::from_str(r#"{"name": " Bob ", "id": "@42"}"#).unwrap();
        assert_eq!(entry.name(), "Bob");
        assert_eq!(entry.id(), Some("42"));
        assert_eq!(entry.label(), "Bob@42 ");
    }

    #[test]
    fn object_entries_without_id() {
        let entry: CharacterEntry = serde_json::from_str(r#"{"name": "Eve"}"#).unwrap();
        assert_eq!(entry.name(), "Eve");
        assert_eq!(entry.id(), None);
        assert_eq!(entry.label(), "Eve");
    }

    #[test]
    fn segment_defaults() {
        let segment: Segment =
            serde_json::from_str(r#"{"segment_index": 1, "prompt_text": "A street."}"#).unwrap();
        assert_eq!(segment.duration_seconds, 10);
        assert_eq!(segment.resolution, Resolution::Horizontal);
        assert!(!segment.is_pro);
        assert!(segment.asset.characters.is_empty());
    }

    #[test]
    fn resolution_round_trips_through_str() {
        for res in [Resolution::Horizontal, Resolution::Vertical] {
            assert_eq!(Resolution::from_str(res.as_str()), Some(res));
        }
        assert_eq!(Resolution::from_str("square"), None);
    }
}
