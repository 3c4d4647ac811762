//! Character name / identifier reconciliation.
//!
//! Storyboards reference characters by name inside `asset.characters`, sometimes
//! with an identifier already attached (`"Alice@123"`, `"Alice (@123 )"`). This
//! module decodes those annotations, aggregates them across a task batch, and
//! stamps an operator-supplied identifier into both the structured entries and
//! the free-text prompts.
//!
//! Identifier assignment is name-scoped and global: applying an identifier for a
//! name rewrites every task in the batch, not only the tasks it was found in.

mod parse;
mod rewrite;
mod scan;

pub use parse::parse_annotation;
pub use rewrite::{apply_character_id, prompt_tag, rewrite_prompt, RewriteOutcome};
pub use scan::{scan_characters, CharacterScan, NameStats};
