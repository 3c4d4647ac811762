use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cineflow::config::Config;
use cineflow::console::{Console, TerminalConsole};
use cineflow::loader;
use cineflow::models::Task;
use cineflow::resolution::{normalize_resolution, resolution_session, ResolutionTarget};
use cineflow::session::CharacterSession;
use cineflow::summary::{show_summary, TaskSummary};

#[derive(Parser)]
#[command(name = "cineflow")]
#[command(about = "Curate storyboard video generation tasks before submission")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scan summary for a storyboard directory
    Summary {
        /// Directory containing storyboard JSON files
        #[arg(short, long)]
        input: PathBuf,

        /// Tasks to create per segment
        #[arg(short, long)]
        versions: Option<u32>,
    },
    /// Load storyboards and curate resolution and character ids interactively
    Curate {
        /// Directory containing storyboard JSON files
        #[arg(short, long)]
        input: PathBuf,

        /// Tasks to create per segment
        #[arg(short, long)]
        versions: Option<u32>,

        /// Root directory for generated outputs
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Apply this resolution without asking (keep, horizontal, vertical)
        #[arg(long, value_parser = parse_resolution_target)]
        resolution: Option<ResolutionTarget>,

        /// Skip the character id pass
        #[arg(long)]
        skip_characters: bool,

        /// Write the curated tasks to this JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn parse_resolution_target(s: &str) -> Result<ResolutionTarget, String> {
    ResolutionTarget::from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("Invalid resolution '{}'. Must be: keep, horizontal, or vertical", s))
}

/// Logs go to stderr so that stdout stays with the operator dialogue.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "cineflow=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_tasks(input: &Path, config: &Config) -> anyhow::Result<Vec<Task>> {
    loader::scan_directory(input, config.versions_per_segment, &config.output_root)
        .with_context(|| format!("Failed to scan {}", input.display()))
}

fn export_tasks(path: &Path, tasks: &[Task]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create export directory")?;
    }
    let content = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
    fs::write(path, content).context("Failed to write export file")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load();

    match cli.command {
        Some(Commands::Summary { input, versions }) => {
            if let Some(versions) = versions {
                config.versions_per_segment = versions.max(1);
            }
            let tasks = load_tasks(&input, &config)?;
            let mut console = TerminalConsole::new();
            let summary = TaskSummary::from_tasks(&tasks, config.cost_per_second);
            show_summary(&mut console, &summary, &input.display().to_string());
        }
        Some(Commands::Curate {
            input,
            versions,
            output_root,
            resolution,
            skip_characters,
            export,
        }) => {
            if let Some(versions) = versions {
                config.versions_per_segment = versions.max(1);
            }
            if let Some(output_root) = output_root {
                config.output_root = output_root;
            }

            let mut tasks = load_tasks(&input, &config)?;
            let mut console = TerminalConsole::new();

            if tasks.is_empty() {
                console.write_line("No tasks found. Check the input directory.");
                return Ok(());
            }

            let summary = TaskSummary::from_tasks(&tasks, config.cost_per_second);
            show_summary(&mut console, &summary, &input.display().to_string());

            match resolution {
                Some(target) => {
                    let count = normalize_resolution(&mut tasks, target);
                    tracing::info!("Resolution set to {} on {} task(s)", target.as_str(), count);
                }
                None => {
                    resolution_session(&mut console, &mut tasks);
                }
            }

            if !skip_characters {
                let report = CharacterSession::new(&mut console)
                    .with_max_files_shown(config.max_files_shown)
                    .run(&mut tasks);
                tracing::info!(
                    outcome = report.outcome.as_str(),
                    applied = report.applied.len(),
                    skipped = report.skipped.len(),
                    "Character session ended"
                );
            }

            if let Some(path) = export {
                export_tasks(&path, &tasks)?;
                console.write_line(&format!(
                    "Exported {} task(s) to {}",
                    tasks.len(),
                    path.display()
                ));
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
