//! Batch-wide resolution override.

use crate::console::Console;
use crate::models::{Resolution, Task};

/// What the operator wants the batch's resolution to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionTarget {
    /// Leave every task as it is.
    #[default]
    Keep,
    Horizontal,
    Vertical,
}

impl ResolutionTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "keep" => Some(Self::Keep),
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }

    /// Parse the interactive menu choice: `0` keep, `1` horizontal, `2` vertical.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "0" => Some(Self::Keep),
            "1" => Some(Self::Horizontal),
            "2" => Some(Self::Vertical),
            _ => None,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            Self::Keep => None,
            Self::Horizontal => Some(Resolution::Horizontal),
            Self::Vertical => Some(Resolution::Vertical),
        }
    }
}

/// The shared resolution of the batch, or `None` if it is mixed or empty.
pub fn uniform_resolution(tasks: &[Task]) -> Option<Resolution> {
    let first = tasks.first()?.segment.resolution;
    tasks
        .iter()
        .all(|t| t.segment.resolution == first)
        .then_some(first)
}

/// Overwrite every task's resolution with `target`. Returns how many tasks changed.
pub fn normalize_resolution(tasks: &mut [Task], target: ResolutionTarget) -> usize {
    let Some(resolution) = target.resolution() else {
        return 0;
    };

    let mut count = 0;
    for task in tasks.iter_mut() {
        if task.segment.resolution != resolution {
            task.segment.resolution = resolution;
            count += 1;
        }
    }

    tracing::debug!(resolution = target.as_str(), count, "Normalized resolution");
    count
}

/// Ask the operator whether to force one resolution across the batch.
///
/// Blank input keeps the batch as it is, and so does end of input or a console
/// error. Anything other than `0`, `1` or `2` is asked again.
pub fn resolution_session<C: Console>(console: &mut C, tasks: &mut [Task]) -> usize {
    console.write_line("== Resolution Check ==");
    match uniform_resolution(tasks) {
        Some(resolution) => console.write_line(&format!(
            "All tasks currently use the same resolution: {}",
            resolution
        )),
        None if tasks.is_empty() => console.write_line("No tasks loaded."),
        None => console.write_line("Warning: the batch mixes horizontal and vertical tasks."),
    }

    console.write_line("Unify the resolution of this batch?");
    console.write_line("  [0] Keep original");
    console.write_line("  [1] Horizontal 16:9");
    console.write_line("  [2] Vertical 9:16");

    let target = loop {
        let answer = match console.read_line("Choose [0/1/2] (default 0)") {
            Ok(Some(answer)) => answer,
            Ok(None) => break ResolutionTarget::Keep,
            Err(e) => {
                tracing::warn!("Failed to read operator input: {}", e);
                break ResolutionTarget::Keep;
            }
        };
        let answer = answer.trim();
        if answer.is_empty() {
            break ResolutionTarget::Keep;
        }
        match ResolutionTarget::from_choice(answer) {
            Some(target) => break target,
            None => console.write_line("Please choose 0, 1 or 2."),
        }
    };

    if target == ResolutionTarget::Keep {
        return 0;
    }

    let count = normalize_resolution(tasks, target);
    if count > 0 {
        console.write_line(&format!(
            "Updated the resolution of {} task(s) to {}.",
            count,
            target.as_str()
        ));
    } else {
        console.write_line("Nothing to update, every task already matches.");
    }
    tracing::info!(resolution = target.as_str(), count, "Resolution override applied");
    count
}
