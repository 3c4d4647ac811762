//! Interactive character id assignment.
//!
//! The session scans every task's character entries, reports what it found,
//! then walks the names from most to least frequent and asks the operator for an
//! identifier for each. A blank answer skips the name, `q` ends the session, and
//! anything else is applied verbatim (after trimming) across the whole batch.

use crate::characters::{apply_character_id, scan_characters, CharacterScan, RewriteOutcome};
use crate::console::Console;
use crate::models::Task;
use crate::render::{render_file_characters, render_truncated};

/// Answer that ends the session early.
pub const QUIT_SENTINEL: &str = "q";

/// Default number of owning files listed per name.
pub const DEFAULT_MAX_FILES_SHOWN: usize = 3;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator declined to start.
    Cancelled,
    /// No character entries were found.
    NoCharacters,
    /// Every candidate name was offered.
    Completed,
    /// The operator quit (or input ended) before the last candidate.
    Quit,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::NoCharacters => "no_characters",
            Self::Completed => "completed",
            Self::Quit => "quit",
        }
    }
}

/// An identifier the operator assigned during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedId {
    pub name: String,
    pub id: String,
    pub outcome: RewriteOutcome,
}

/// Summary of what a session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    /// Names presented to the operator, in order.
    pub offered: Vec<String>,
    /// Names the operator skipped with a blank answer.
    pub skipped: Vec<String>,
    pub applied: Vec<AppliedId>,
}

impl SessionReport {
    fn new(outcome: SessionOutcome) -> Self {
        Self {
            outcome,
            offered: Vec::new(),
            skipped: Vec::new(),
            applied: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Scanning,
    Reporting,
    /// Waiting for an answer for the candidate at this rank.
    AwaitingInput(usize),
    Done(SessionOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OperatorInput {
    Skip,
    Quit,
    Assign(String),
}

/// Interpret an operator answer. End of input counts as quitting.
fn classify(answer: Option<&str>) -> OperatorInput {
    let Some(answer) = answer else {
        return OperatorInput::Quit;
    };
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        OperatorInput::Skip
    } else if trimmed.eq_ignore_ascii_case(QUIT_SENTINEL) {
        OperatorInput::Quit
    } else {
        OperatorInput::Assign(trimmed.to_string())
    }
}

/// Drives one character id assignment pass over a task batch.
pub struct CharacterSession<'a, C: Console> {
    console: &'a mut C,
    max_files_shown: usize,
}

impl<'a, C: Console> CharacterSession<'a, C> {
    pub fn new(console: &'a mut C) -> Self {
        Self {
            console,
            max_files_shown: DEFAULT_MAX_FILES_SHOWN,
        }
    }

    pub fn with_max_files_shown(mut self, max_files_shown: usize) -> Self {
        self.max_files_shown = max_files_shown;
        self
    }

    /// Run the session to completion. Never fails; console errors end the
    /// session as if the operator had quit.
    pub fn run(&mut self, tasks: &mut [Task]) -> SessionReport {
        let mut state = SessionState::Idle;
        let mut scan = CharacterScan::default();
        let mut candidates: Vec<String> = Vec::new();
        let mut report = SessionReport::new(SessionOutcome::Completed);

        loop {
            tracing::debug!(?state, "Character session transition");
            state = match state {
                SessionState::Idle => {
                    self.console.write_line("== Character ID Injection ==");
                    self.console.write_line(
                        "Scans character names defined in asset.characters and helps assign canonical ids.",
                    );
                    if self.confirm_start() {
                        SessionState::Scanning
                    } else {
                        SessionState::Done(SessionOutcome::Cancelled)
                    }
                }
                SessionState::Scanning => {
                    scan = scan_characters(tasks);
                    if scan.is_empty() {
                        self.console
                            .write_line("No character definitions found in asset.characters.");
                        SessionState::Done(SessionOutcome::NoCharacters)
                    } else {
                        SessionState::Reporting
                    }
                }
                SessionState::Reporting => {
                    self.console.write_line("");
                    self.console.write_line("Characters by file:");
                    for line in render_file_characters(&scan).lines() {
                        self.console.write_line(line);
                    }
                    self.console.write_line("");
                    self.console.write_line(
                        "Enter a new id to apply it. Press Enter to keep the current state, or 'q' to finish.",
                    );
                    candidates = scan
                        .ranked()
                        .into_iter()
                        .map(|(name, _)| name.to_string())
                        .collect();
                    SessionState::AwaitingInput(0)
                }
                SessionState::AwaitingInput(rank) => match candidates.get(rank) {
                    None => SessionState::Done(SessionOutcome::Completed),
                    Some(name) => {
                        report.offered.push(name.clone());
                        match self.ask_for_id(name, &scan) {
                            OperatorInput::Quit => SessionState::Done(SessionOutcome::Quit),
                            OperatorInput::Skip => {
                                self.console.write_line("  skipped, left unchanged");
                                report.skipped.push(name.clone());
                                SessionState::AwaitingInput(rank + 1)
                            }
                            OperatorInput::Assign(id) => {
                                let outcome = apply_character_id(tasks, name, &id);
                                self.announce(&id, outcome);
                                tracing::info!(
                                    name = name.as_str(),
                                    id = id.as_str(),
                                    prompts = outcome.prompts_rewritten,
                                    assets = outcome.assets_rewritten,
                                    "Assigned character id"
                                );
                                report.applied.push(AppliedId {
                                    name: name.clone(),
                                    id,
                                    outcome,
                                });
                                SessionState::AwaitingInput(rank + 1)
                            }
                        }
                    }
                },
                SessionState::Done(outcome) => {
                    if outcome != SessionOutcome::Cancelled {
                        self.console.write_line("Character id injection finished.");
                    }
                    report.outcome = outcome;
                    return report;
                }
            };
        }
    }

    fn confirm_start(&mut self) -> bool {
        loop {
            let answer = match self.console.read_line("Start scanning? [Y/n]") {
                Ok(Some(answer)) => answer,
                Ok(None) => return false,
                Err(e) => {
                    tracing::warn!("Failed to read operator input: {}", e);
                    return false;
                }
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.console.write_line("Please answer y or n."),
            }
        }
    }

    fn ask_for_id(&mut self, name: &str, scan: &CharacterScan) -> OperatorInput {
        let (count, files, existing_ids) = match scan.stats(name) {
            Some(stats) => (stats.count, stats.files.as_slice(), stats.existing_ids.as_slice()),
            None => (0, &[][..], &[][..]),
        };

        self.console.write_line("");
        self.console
            .write_line(&format!("Character: {} ({} segments)", name, count));
        self.console.write_line(&format!(
            "  Files: {}",
            render_truncated(files, self.max_files_shown)
        ));
        let current = if existing_ids.is_empty() {
            "none".to_string()
        } else {
            existing_ids.join(", ")
        };
        self.console.write_line(&format!("  Current id: {}", current));

        let prompt = if existing_ids.is_empty() {
            format!("Enter id for '{}'", name)
        } else {
            format!("Enter new id for '{}'", name)
        };
        match self.console.read_line(&prompt) {
            Ok(answer) => classify(answer.as_deref()),
            Err(e) => {
                tracing::warn!("Failed to read operator input: {}", e);
                OperatorInput::Quit
            }
        }
    }

    fn announce(&mut self, id: &str, outcome: RewriteOutcome) {
        let message = if outcome.prompts_rewritten > 0 {
            format!(
                "  -> updated {} prompt(s) (id: {})",
                outcome.prompts_rewritten, id
            )
        } else if outcome.assets_rewritten > 0 {
            format!("  -> updated asset definitions only (id: {})", id)
        } else {
            format!("  -> nothing to change, already up to date (id: {})", id)
        };
        self.console.write_line(&message);
    }
}
