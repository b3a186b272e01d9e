//! # strata-repl
//!
//! A simulated StrataDB command interpreter.
//!
//! The interpreter understands a small, fixed set of `db.*` pseudo-method
//! calls (branch-scoped key/value, versioned state cells, per-type event
//! logs, vector collection metadata) and evaluates them against an
//! in-memory [`SessionState`]. Nothing is persisted; the point is a
//! believable playground, not a database.
//!
//! ## Architecture
//!
//! - **Parser**: ordered dispatch table of call shapes, producing a [`Command`]
//! - **Interpreter**: `execute(line, &state) -> Evaluation`, never mutating its input
//! - **Session**: current state plus the echoed transcript, with reset
//! - **Frontend**: meta commands and output colouring for the terminal binary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod error;
pub mod frontend;
pub mod interpreter;
pub mod parser;
pub mod session;
pub mod state;
pub mod value;

// Re-export main types
pub use command::{Command, HELP_TEXT};
pub use config::ReplConfig;
pub use error::{ReplError, Result};
pub use frontend::{MetaCommand, OutputKind, ReplCommand};
pub use interpreter::{eval_command, execute, Evaluation};
pub use parser::{parse_line, Line};
pub use session::{Entry, Session};
pub use state::{Branch, Cell, Collection, CollectionSummary, EventRecord, SessionState};
pub use value::Value;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
