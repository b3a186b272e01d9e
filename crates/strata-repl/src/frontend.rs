//! Terminal front end helpers
//!
//! Everything the binary needs beyond the interpreter itself: meta
//! commands (lines starting with `:`), output classification for
//! colouring, and the welcome banner.

use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// OUTPUT CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════

/// How an output line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Nothing to show
    Empty,

    /// `RuntimeError`, `NameError` or `Error` result
    Error,

    /// Quoted string, object or list
    Structured,

    /// Numbers, booleans, `None`, help text
    Scalar,
}

impl OutputKind {
    /// Classify interpreter output by its prefix.
    pub fn classify(output: &str) -> Self {
        if output.is_empty() {
            OutputKind::Empty
        } else if output.starts_with("RuntimeError")
            || output.starts_with("Error")
            || output.starts_with("NameError")
        {
            OutputKind::Error
        } else if output.starts_with('\'') || output.starts_with('{') || output.starts_with('[') {
            OutputKind::Structured
        } else {
            OutputKind::Scalar
        }
    }

    /// ANSI colour escape for this kind.
    pub fn color_code(&self) -> &'static str {
        match self {
            OutputKind::Empty => "",
            OutputKind::Error => "\x1b[31m",      // Red
            OutputKind::Structured => "\x1b[32m", // Green
            OutputKind::Scalar => "\x1b[33m",     // Yellow
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Wrap output in the colour for its kind.
pub fn paint(output: &str) -> String {
    match OutputKind::classify(output) {
        OutputKind::Empty => String::new(),
        kind => format!("{}{}{}", kind.color_code(), output, RESET),
    }
}

/// Lines printed when an interactive session starts.
pub const BANNER: &str = "StrataDB REPL (simulated)\nType help() for available commands";

// ═══════════════════════════════════════════════════════════════════════
// META COMMANDS
// ═══════════════════════════════════════════════════════════════════════

/// Metadata for a `:` command.
#[derive(Debug, Clone)]
pub struct ReplCommand {
    /// Command name (without leading colon)
    pub name: String,

    /// Short description of what the command does
    pub description: String,
}

impl ReplCommand {
    /// Create a new REPL command.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for ReplCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  :{:<10}{}", self.name, self.description)
    }
}

/// Every meta command the terminal understands.
pub fn repl_commands() -> Vec<ReplCommand> {
    vec![
        ReplCommand::new("reset", "Discard all state and scrollback"),
        ReplCommand::new("status", "Show key count and current branch"),
        ReplCommand::new("history", "Show everything entered so far"),
        ReplCommand::new("help", "Show these commands"),
        ReplCommand::new("quit", "Leave the REPL"),
    ]
}

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `:reset`
    Reset,
    /// `:status`
    Status,
    /// `:history`
    History,
    /// `:help`
    Help,
    /// `:quit` / `:q` / `:exit`
    Quit,
    /// Any other `:` word
    Unknown(String),
}

impl MetaCommand {
    /// Parse a line as a meta command. Returns `None` if it is not one.
    pub fn parse(line: &str) -> Option<Self> {
        let name = line.trim().strip_prefix(':')?.trim();
        Some(match name {
            "reset" => MetaCommand::Reset,
            "status" => MetaCommand::Status,
            "history" => MetaCommand::History,
            "help" | "?" => MetaCommand::Help,
            "quit" | "q" | "exit" => MetaCommand::Quit,
            other => MetaCommand::Unknown(other.to_string()),
        })
    }
}

/// Text printed by `:help`.
pub fn meta_help() -> String {
    let mut text = String::from("REPL commands:");
    for cmd in repl_commands() {
        text.push('\n');
        text.push_str(&cmd.to_string());
    }
    text
}
