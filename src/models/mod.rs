//! Domain models for Cineflow.
//!
//! # Core Concepts
//!
//! - [`Storyboard`]: A JSON document of ordered segments, as authored upstream.
//! - [`Segment`]: One shot: prompt text, video parameters, and its [`Asset`] references.
//! - [`CharacterEntry`]: A character reference inside an asset, decoded once at load
//!   time into a name and an optional canonical identifier.
//! - [`Task`]: One unit of generation work. A segment expands into one task per
//!   requested version.
//!
//! Tasks are mutated in place during curation (resolution, prompt text, character
//! entries) and never persisted by the library itself.

mod segment;
mod task;

pub use segment::*;
pub use task::*;
