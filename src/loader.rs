//! Storyboard ingestion: JSON files to validated generation tasks.
//!
//! This is the only place character annotations are decoded from their legacy
//! string form; everything downstream works on [`CharacterEntry`] values.
//!
//! [`CharacterEntry`]: crate::models::CharacterEntry

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Segment, Storyboard, Task};

/// Storyboard loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storyboard JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: segment {segment_index}: prompt text cannot be empty", .path.display())]
    EmptyPrompt { path: PathBuf, segment_index: u32 },

    #[error(
        "{}: segment {segment_index}: {mode} mode duration must be one of {allowed:?}, got {duration}",
        .path.display()
    )]
    InvalidDuration {
        path: PathBuf,
        segment_index: u32,
        mode: &'static str,
        allowed: &'static [u32],
        duration: u32,
    },
}

/// Read, parse and validate one storyboard file.
pub fn load_storyboard(path: &Path) -> Result<Storyboard, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let storyboard: Storyboard =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    for segment in &storyboard.segments {
        validate_segment(path, segment)?;
    }
    Ok(storyboard)
}

fn validate_segment(path: &Path, segment: &Segment) -> Result<(), LoadError> {
    if segment.prompt_text.trim().is_empty() {
        return Err(LoadError::EmptyPrompt {
            path: path.to_path_buf(),
            segment_index: segment.segment_index,
        });
    }

    let allowed = segment.allowed_durations();
    if !allowed.contains(&segment.duration_seconds) {
        return Err(LoadError::InvalidDuration {
            path: path.to_path_buf(),
            segment_index: segment.segment_index,
            mode: if segment.is_pro { "pro" } else { "normal" },
            allowed,
            duration: segment.duration_seconds,
        });
    }
    Ok(())
}

/// Expand a storyboard into one task per segment per version.
pub fn expand_tasks(
    source_file: &Path,
    storyboard: &Storyboard,
    versions: u32,
    output_root: &Path,
) -> Vec<Task> {
    let stem = source_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_dir = output_root.join(stem);

    let mut tasks = Vec::with_capacity(storyboard.segments.len() * versions.max(1) as usize);
    for segment in &storyboard.segments {
        for version_index in 1..=versions.max(1) {
            tasks.push(Task::new(
                source_file,
                segment.clone(),
                version_index,
                &output_dir,
            ));
        }
    }
    tasks
}

/// Load every `*.json` storyboard directly inside `dir`, in file name order.
///
/// Files that fail to load are logged and skipped. A missing directory is an error.
pub fn scan_directory(dir: &Path, versions: u32, output_root: &Path) -> Result<Vec<Task>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();

    let mut tasks = Vec::new();
    for file in &files {
        match load_storyboard(file) {
            Ok(storyboard) => {
                let expanded = expand_tasks(file, &storyboard, versions, output_root);
                tracing::debug!(
                    file = %file.display(),
                    segments = storyboard.segments.len(),
                    tasks = expanded.len(),
                    "Loaded storyboard"
                );
                tasks.extend(expanded);
            }
            Err(e) => tracing::warn!("Skipping storyboard: {}", e),
        }
    }

    tracing::info!(
        dir = %dir.display(),
        files = files.len(),
        tasks = tasks.len(),
        "Scanned storyboard directory"
    );
    Ok(tasks)
}
