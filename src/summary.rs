//! Scan summary and cost estimate for a task batch.

use std::collections::HashSet;

use crate::console::Console;
use crate::models::{Resolution, Task};

/// Default generation price per second of video.
pub const DEFAULT_COST_PER_SECOND: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    /// Distinct storyboard files.
    pub files: usize,
    /// Distinct `(file, segment_index)` pairs.
    pub segments: usize,
    /// Total tasks, including version variants.
    pub tasks: usize,
    pub horizontal: usize,
    pub vertical: usize,
    pub total_duration_seconds: u64,
    pub estimated_cost: f64,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task], cost_per_second: f64) -> Self {
        let files: HashSet<_> = tasks.iter().map(|t| &t.source_file).collect();
        let segments: HashSet<_> = tasks
            .iter()
            .map(|t| (&t.source_file, t.segment.segment_index))
            .collect();
        let horizontal = tasks
            .iter()
            .filter(|t| t.segment.resolution == Resolution::Horizontal)
            .count();
        let total_duration_seconds: u64 = tasks
            .iter()
            .map(|t| u64::from(t.segment.duration_seconds))
            .sum();

        Self {
            files: files.len(),
            segments: segments.len(),
            tasks: tasks.len(),
            horizontal,
            vertical: tasks.len() - horizontal,
            total_duration_seconds,
            estimated_cost: total_duration_seconds as f64 * cost_per_second,
        }
    }

    /// Item / value rows for display.
    pub fn rows(&self, source: &str) -> Vec<Vec<String>> {
        vec![
            vec!["Source".to_string(), source.to_string()],
            vec!["Files".to_string(), self.files.to_string()],
            vec!["Segments".to_string(), self.segments.to_string()],
            vec![
                "Total Tasks".to_string(),
                format!("{} (incl. versions)", self.tasks),
            ],
            vec![
                "Resolution".to_string(),
                format!("H:{} / V:{}", self.horizontal, self.vertical),
            ],
            vec![
                "Duration".to_string(),
                format!("{} s", self.total_duration_seconds),
            ],
            vec![
                "Est. Cost".to_string(),
                format!("${:.2}", self.estimated_cost),
            ],
        ]
    }
}

pub fn show_summary<C: Console>(console: &mut C, summary: &TaskSummary, source: &str) {
    console.write_table("Scan Summary", &["Item", "Value"], &summary.rows(source));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Segment};

    fn task(file: &str, index: u32, version: u32, duration: u32, resolution: Resolution) -> Task {
        let segment = Segment {
            segment_index: index,
            prompt_text: "p".to_string(),
            image_url: None,
            asset: Asset::default(),
            is_pro: duration == 25,
            duration_seconds: duration,
            resolution,
            director_intent: None,
        };
        Task::new(file, segment, version, "out")
    }

    #[test]
    fn counts_files_segments_and_versions() {
        let tasks = vec![
            task("a.json", 1, 1, 10, Resolution::Horizontal),
            task("a.json", 1, 2, 10, Resolution::Horizontal),
            task("a.json", 2, 1, 15, Resolution::Vertical),
            task("b.json", 1, 1, 25, Resolution::Horizontal),
        ];
        let summary = TaskSummary::from_tasks(&tasks, DEFAULT_COST_PER_SECOND);

        assert_eq!(summary.files, 2);
        assert_eq!(summary.segments, 3);
        assert_eq!(summary.tasks, 4);
        assert_eq!(summary.horizontal, 3);
        assert_eq!(summary.vertical, 1);
        assert_eq!(summary.total_duration_seconds, 60);
        assert!((summary.estimated_cost - 0.30).abs() < 1e-9);
    }

    #[test]
    fn rows_format_cost_and_resolution() {
        let tasks = vec![task("a.json", 1, 1, 15, Resolution::Vertical)];
        let rows = TaskSummary::from_tasks(&tasks, 0.01).rows("boards");
        assert_eq!(rows[0], vec!["Source", "boards"]);
        assert_eq!(rows[4], vec!["Resolution", "H:0 / V:1"]);
        assert_eq!(rows[6], vec!["Est. Cost", "$0.15"]);
    }

    #[test]
    fn empty_batch() {
        let summary = TaskSummary::from_tasks(&[], DEFAULT_COST_PER_SECOND);
        assert_eq!(summary.tasks, 0);
        assert_eq!(summary.estimated_cost, 0.0);
    }
}
