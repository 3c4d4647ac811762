mod common;

use cineflow::console::ScriptedConsole;
use cineflow::models::*;
use cineflow::resolution::*;
use common::make_task;
use speculate2::speculate;

fn with_resolutions(resolutions: &[Resolution]) -> Vec<Task> {
    resolutions
        .iter()
        .map(|&resolution| {
            let mut task = make_task("ep1.json", "A shot.", &[]);
            task.segment.resolution = resolution;
            task
        })
        .collect()
}

fn all(tasks: &[Task]) -> Vec<Resolution> {
    tasks.iter().map(|t| t.segment.resolution).collect()
}

speculate! {
    before {
        let mut tasks = with_resolutions(&[
            Resolution::Horizontal,
            Resolution::Vertical,
            Resolution::Horizontal,
        ]);
    }

    describe "normalize_resolution" {
        it "forces the target and counts changed tasks" {
            let count = normalize_resolution(&mut tasks, ResolutionTarget::Vertical);

            assert_eq!(count, 2);
            assert_eq!(all(&tasks), vec![Resolution::Vertical; 3]);
        }

        it "does nothing for keep" {
            let count = normalize_resolution(&mut tasks, ResolutionTarget::Keep);

            assert_eq!(count, 0);
            assert_eq!(
                all(&tasks),
                vec![Resolution::Horizontal, Resolution::Vertical, Resolution::Horizontal]
            );
        }

        it "handles an empty batch" {
            let mut empty: Vec<Task> = Vec::new();
            assert_eq!(normalize_resolution(&mut empty, ResolutionTarget::Horizontal), 0);
        }
    }

    describe "uniform_resolution" {
        it "detects mixed, uniform and empty batches" {
            assert_eq!(uniform_resolution(&tasks), None);
            normalize_resolution(&mut tasks, ResolutionTarget::Horizontal);
            assert_eq!(uniform_resolution(&tasks), Some(Resolution::Horizontal));
            assert_eq!(uniform_resolution(&[]), None);
        }
    }

    describe "resolution targets" {
        it "parses menu choices and words" {
            assert_eq!(ResolutionTarget::from_choice("0"), Some(ResolutionTarget::Keep));
            assert_eq!(ResolutionTarget::from_choice("2"), Some(ResolutionTarget::Vertical));
            assert_eq!(ResolutionTarget::from_choice("3"), None);
            assert_eq!(ResolutionTarget::from_str("horizontal"), Some(ResolutionTarget::Horizontal));
            assert_eq!(ResolutionTarget::from_str("square"), None);
        }
    }

    describe "resolution_session" {
        it "applies the chosen target" {
            let mut console = ScriptedConsole::new(["2"]);

            let count = resolution_session(&mut console, &mut tasks);

            assert_eq!(count, 2);
            let transcript = console.transcript();
            assert!(transcript.contains("mixes horizontal and vertical"));
            assert!(transcript.contains("Updated the resolution of 2 task(s) to vertical."));
        }

        it "keeps the batch on blank input" {
            let mut console = ScriptedConsole::new([""]);

            assert_eq!(resolution_session(&mut console, &mut tasks), 0);
            assert_eq!(uniform_resolution(&tasks), None);
        }

        it "asks again on an invalid choice" {
            let mut console = ScriptedConsole::new(["9", "1"]);

            assert_eq!(resolution_session(&mut console, &mut tasks), 1);
            assert!(console.transcript().contains("Please choose 0, 1 or 2."));
        }

        it "reports when nothing needs updating" {
            let mut uniform = with_resolutions(&[Resolution::Vertical, Resolution::Vertical]);
            let mut console = ScriptedConsole::new(["2"]);

            assert_eq!(resolution_session(&mut console, &mut uniform), 0);
            let transcript = console.transcript();
            assert!(transcript.contains("same resolution: vertical"));
            assert!(transcript.contains("Nothing to update"));
        }
    }
}
