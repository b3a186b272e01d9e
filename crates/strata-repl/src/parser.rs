//! Line parser
//!
//! A line is matched against an ordered dispatch table of call shapes.
//! Each shape is a literal prefix plus a permissive pattern that pulls out
//! quoted arguments and a trailing value expression. A shape whose prefix
//! matches but whose pattern does not simply passes the line on to the
//! next shape, so a malformed call ends up as an assignment or a
//! `NameError` rather than a parse failure.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

use crate::command::Command;
use crate::error::{ReplError, Result};
use crate::value::{parse_cas_value, parse_cell_value, parse_event_payload, parse_put_value};

/// Classification of one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Empty or `#` comment: no output, no state change
    Blank,

    /// A recognised call
    Command(Command),

    /// `name = expr`; only `expr` is evaluated
    Assignment {
        /// Left-hand side, unused beyond display
        target: String,
        /// Right-hand side to evaluate
        expr: String,
    },

    /// Nothing matched; carries the token before the first `(`
    Unknown(String),
}

// ═══════════════════════════════════════════════════════════════════════
// Patterns
// ═══════════════════════════════════════════════════════════════════════

type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: Pattern = LazyLock::new(|| Regex::new($re));
    };
}

pattern!(KV_PUT, r#"db\.kv_put\(["']([^"']+)["'],\s*(.+)\)$"#);
pattern!(KV_GET, r#"db\.kv_get\(["']([^"']+)["']\)"#);
pattern!(KV_DELETE, r#"db\.kv_delete\(["']([^"']+)["']\)"#);
pattern!(BRANCH_CREATE, r#"db\.branch_create\(["']([^"']+)["']\)"#);
pattern!(BRANCH_USE, r#"db\.branch_use\(["']([^"']+)["']\)"#);
pattern!(
    BRANCH_FORK,
    r#"db\.branch_fork\(["']([^"']+)["'],\s*["']([^"']+)["']\)"#
);
pattern!(STATE_SET, r#"db\.state_set\(["']([^"']+)["'],\s*(.+)\)$"#);
pattern!(STATE_GET, r#"db\.state_get\(["']([^"']+)["']\)"#);
pattern!(
    STATE_CAS,
    r#"db\.state_cas\(["']([^"']+)["'],\s*([^,]+),\s*expected=([0-9]+)\)"#
);
pattern!(EVENT_APPEND, r#"db\.event_append\(["']([^"']+)["'],\s*(.+)\)$"#);
pattern!(EVENT_LIST, r#"db\.event_list\(["']([^"']+)["']"#);
pattern!(
    VECTOR_CREATE,
    r#"db\.vector_create_collection\(["']([^"']+)["'],\s*([0-9]+)"#
);

/// Match `text` against a pattern, surfacing a bad pattern as an internal error.
fn captures<'t>(pattern: &'static Pattern, text: &'t str) -> Result<Option<Captures<'t>>> {
    let regex = LazyLock::force(pattern).as_ref().map_err(ReplError::internal)?;
    Ok(regex.captures(text))
}

/// Text of capture group `i`, empty if it did not participate.
fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Digits that do not fit in a `u64` can never name a real version.
fn parse_version(digits: &str) -> Option<u64> {
    digits.parse::<u64>().ok()
}

/// Oversized dimensions clamp to `u64::MAX`; creation never fails.
fn parse_dimension(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

// ═══════════════════════════════════════════════════════════════════════
// Dispatch Table
// ═══════════════════════════════════════════════════════════════════════

type ShapeParser = fn(&str) -> Result<Option<Command>>;

/// One recognised call shape.
struct CallShape {
    /// Literal the line must start with (or equal, when `exact`)
    prefix: &'static str,

    /// Whether the whole line must equal `prefix`
    exact: bool,

    /// Extract arguments; `Ok(None)` means "not this shape after all"
    parse: ShapeParser,
}

impl CallShape {
    const fn prefix(prefix: &'static str, parse: ShapeParser) -> Self {
        Self {
            prefix,
            exact: false,
            parse,
        }
    }

    const fn exact(prefix: &'static str, parse: ShapeParser) -> Self {
        Self {
            prefix,
            exact: true,
            parse,
        }
    }

    fn applies_to(&self, line: &str) -> bool {
        if self.exact {
            line == self.prefix
        } else {
            line.starts_with(self.prefix)
        }
    }
}

static SHAPES: &[CallShape] = &[
    CallShape::prefix("db.kv_put(", parse_kv_put),
    CallShape::prefix("db.kv_get(", parse_kv_get),
    CallShape::prefix("db.kv_list(", parse_kv_list),
    CallShape::prefix("db.kv_delete(", parse_kv_delete),
    CallShape::prefix("db.branch_create(", parse_branch_create),
    CallShape::prefix("db.branch_use(", parse_branch_use),
    CallShape::prefix("db.branch_list(", parse_branch_list),
    CallShape::prefix("db.branch_fork(", parse_branch_fork),
    CallShape::prefix("db.current_branch(", parse_current_branch),
    CallShape::prefix("db.state_set(", parse_state_set),
    CallShape::prefix("db.state_get(", parse_state_get),
    CallShape::prefix("db.state_cas(", parse_state_cas),
    CallShape::prefix("db.event_append(", parse_event_append),
    CallShape::prefix("db.event_list(", parse_event_list),
    CallShape::prefix("db.event_len(", parse_event_len),
    CallShape::prefix("db.vector_create_collection(", parse_vector_create),
    CallShape::prefix("db.vector_list_collections(", parse_vector_list),
    CallShape::exact("help()", parse_help),
    CallShape::exact("db.help()", parse_help),
];

// Shapes without arguments match on their prefix alone.

fn parse_kv_list(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::KvList))
}

fn parse_branch_list(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::BranchList))
}

fn parse_current_branch(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::CurrentBranch))
}

fn parse_event_len(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::EventLen))
}

fn parse_vector_list(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::VectorListCollections))
}

fn parse_help(_: &str) -> Result<Option<Command>> {
    Ok(Some(Command::Help))
}

fn parse_kv_put(line: &str) -> Result<Option<Command>> {
    Ok(captures(&KV_PUT, line)?.map(|c| Command::KvPut {
        key: group(&c, 1).to_string(),
        value: parse_put_value(group(&c, 2)),
    }))
}

fn parse_kv_get(line: &str) -> Result<Option<Command>> {
    Ok(captures(&KV_GET, line)?.map(|c| Command::KvGet {
        key: group(&c, 1).to_string(),
    }))
}

fn parse_kv_delete(line: &str) -> Result<Option<Command>> {
    Ok(captures(&KV_DELETE, line)?.map(|c| Command::KvDelete {
        key: group(&c, 1).to_string(),
    }))
}

fn parse_branch_create(line: &str) -> Result<Option<Command>> {
    Ok(captures(&BRANCH_CREATE, line)?.map(|c| Command::BranchCreate {
        name: group(&c, 1).to_string(),
    }))
}

fn parse_branch_use(line: &str) -> Result<Option<Command>> {
    Ok(captures(&BRANCH_USE, line)?.map(|c| Command::BranchUse {
        name: group(&c, 1).to_string(),
    }))
}

fn parse_branch_fork(line: &str) -> Result<Option<Command>> {
    Ok(captures(&BRANCH_FORK, line)?.map(|c| Command::BranchFork {
        source: group(&c, 1).to_string(),
        destination: group(&c, 2).to_string(),
    }))
}

fn parse_state_set(line: &str) -> Result<Option<Command>> {
    Ok(captures(&STATE_SET, line)?.map(|c| Command::StateSet {
        cell: group(&c, 1).to_string(),
        value: parse_cell_value(group(&c, 2)),
    }))
}

fn parse_state_get(line: &str) -> Result<Option<Command>> {
    Ok(captures(&STATE_GET, line)?.map(|c| Command::StateGet {
        cell: group(&c, 1).to_string(),
    }))
}

fn parse_state_cas(line: &str) -> Result<Option<Command>> {
    let Some(c) = captures(&STATE_CAS, line)? else {
        return Ok(None);
    };
    Ok(Some(Command::StateCas {
        cell: group(&c, 1).to_string(),
        value: parse_cas_value(group(&c, 2)),
        expected: parse_version(group(&c, 3)),
    }))
}

fn parse_event_append(line: &str) -> Result<Option<Command>> {
    Ok(captures(&EVENT_APPEND, line)?.map(|c| Command::EventAppend {
        event_type: group(&c, 1).to_string(),
        payload: parse_event_payload(group(&c, 2)),
    }))
}

fn parse_event_list(line: &str) -> Result<Option<Command>> {
    Ok(captures(&EVENT_LIST, line)?.map(|c| Command::EventList {
        event_type: group(&c, 1).to_string(),
    }))
}

fn parse_vector_create(line: &str) -> Result<Option<Command>> {
    let Some(c) = captures(&VECTOR_CREATE, line)? else {
        return Ok(None);
    };
    Ok(Some(Command::VectorCreateCollection {
        name: group(&c, 1).to_string(),
        dimension: parse_dimension(group(&c, 2)),
    }))
}

// ═══════════════════════════════════════════════════════════════════════
// Entry Point
// ═══════════════════════════════════════════════════════════════════════

/// Classify one input line.
///
/// Only an internal fault (a pattern that failed to build) is an `Err`;
/// everything else is a [`Line`].
pub fn parse_line(input: &str) -> Result<Line> {
    let line = input.trim();

    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }

    for shape in SHAPES.iter().filter(|s| s.applies_to(line)) {
        if let Some(command) = (shape.parse)(line)? {
            return Ok(Line::Command(command));
        }
        trace!(prefix = shape.prefix, "call shape did not match, falling through");
    }

    if line.contains(" = ") {
        let mut parts = line.split(" = ");
        let target = parts.next().unwrap_or_default().trim().to_string();
        let expr = parts.next().unwrap_or_default().trim().to_string();
        return Ok(Line::Assignment { target, expr });
    }

    let token = line.split('(').next().unwrap_or(line);
    Ok(Line::Unknown(token.to_string()))
}
