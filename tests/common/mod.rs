//! Shared fixtures for integration specs.

#![allow(dead_code)]

use cineflow::models::*;

pub fn make_segment(index: u32, prompt: &str, characters: &[&str]) -> Segment {
    Segment {
        segment_index: index,
        prompt_text: prompt.to_string(),
        image_url: None,
        asset: Asset {
            characters: characters.iter().map(|c| CharacterEntry::parse(c)).collect(),
            scene: None,
            props: vec![],
        },
        is_pro: false,
        duration_seconds: 10,
        resolution: Resolution::Horizontal,
        director_intent: None,
    }
}

pub fn make_task(file: &str, prompt: &str, characters: &[&str]) -> Task {
    Task::new(file, make_segment(1, prompt, characters), 1, "output")
}

pub fn labels(task: &Task) -> Vec<String> {
    task.segment
        .asset
        .characters
        .iter()
        .map(|c| c.label().to_string())
        .collect()
}

pub fn prompts(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.segment.prompt_text.clone()).collect()
}
