//! Operator display and input.
//!
//! Curation logic talks to the operator only through [`Console`], so it runs the
//! same against a terminal and against a scripted transcript in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::render::render_table;

pub trait Console {
    /// Show one line of output.
    fn write_line(&mut self, line: &str);

    /// Ask for one line of input. `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        for line in render_table(title, headers, rows).lines() {
            self.write_line(line);
        }
    }
}

/// Console over the process's stdin and stdout.
pub struct TerminalConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn write_line(&mut self, line: &str) {
        let mut out = self.stdout.lock();
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::warn!("Failed to write to stdout: {}", e);
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.stdout.lock();
            write!(out, "{}: ", prompt)?;
            out.flush()?;
        }

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Console that replays queued input and records everything shown.
///
/// Prompts are recorded as `"{prompt}: {answer}"` so a transcript reads like a
/// terminal session.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Inputs that were queued but never read.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = self.inputs.pop_front();
        self.output.push(format!(
            "{}: {}",
            prompt,
            answer.as_deref().unwrap_or("<eof>")
        ));
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_inputs_then_reports_eof() {
        let mut console = ScriptedConsole::new(["first", ""]);
        assert_eq!(console.read_line("A").unwrap(), Some("first".to_string()));
        assert_eq!(console.read_line("B").unwrap(), Some(String::new()));
        assert_eq!(console.read_line("C").unwrap(), None);
        assert_eq!(console.output(), ["A: first", "B: ", "C: <eof>"]);
    }

    #[test]
    fn write_table_goes_through_write_line() {
        let mut console = ScriptedConsole::default();
        console.write_table("T", &["K"], &[vec!["v".to_string()]]);
        assert_eq!(console.output()[0], "T");
        assert_eq!(console.output().len(), 6);
    }
}
