//! Command evaluation
//!
//! [`execute`] is the whole interpreter boundary: one line and a state in,
//! one display string and a replacement state out. Failures never escape
//! as `Err`; they are rendered into the output string and the input state
//! is returned unchanged.

use tracing::{debug, warn};

use crate::command::{Command, HELP_TEXT};
use crate::error::{ReplError, Result};
use crate::parser::{parse_line, Line};
use crate::state::SessionState;
use crate::value::{render_compact, render_plain, render_pretty};

/// Sentinel printed for "no value".
pub const NONE: &str = "None";

/// Result of evaluating one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Text to show under the echoed input (may be empty)
    pub output: String,

    /// State to use for the next line
    pub state: SessionState,
}

impl Evaluation {
    fn unchanged(output: impl Into<String>, state: &SessionState) -> Self {
        Self {
            output: output.into(),
            state: state.clone(),
        }
    }
}

/// Evaluate one input line against `state`.
///
/// # Example
///
/// ```
/// use strata_repl::{execute, SessionState};
///
/// let state = SessionState::default();
/// let put = execute("db.kv_put('greeting', 'hello')", &state);
/// assert_eq!(put.output, "1");
///
/// let get = execute("db.kv_get('greeting')", &put.state);
/// assert_eq!(get.output, "'hello'");
///
/// // the original snapshot is untouched
/// assert_eq!(execute("db.kv_get('greeting')", &state).output, "None");
/// ```
pub fn execute(input: &str, state: &SessionState) -> Evaluation {
    match try_execute(input, state) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            if let ReplError::Internal(message) = &err {
                warn!(input, %message, "internal error while evaluating line");
            } else {
                debug!(input, class = err.class(), "command failed");
            }
            Evaluation::unchanged(err.to_string(), state)
        }
    }
}

fn try_execute(input: &str, state: &SessionState) -> Result<Evaluation> {
    match parse_line(input)? {
        Line::Blank => Ok(Evaluation::unchanged("", state)),
        Line::Command(command) => eval_command(&command, state),
        Line::Assignment { target, expr } => {
            debug!(%target, "assignment, evaluating right-hand side only");
            let rhs = execute(&expr, state);
            Ok(Evaluation {
                output: String::new(),
                state: rhs.state,
            })
        }
        Line::Unknown(token) => Err(ReplError::NameNotDefined(token)),
    }
}

/// Evaluate an already parsed command.
pub fn eval_command(command: &Command, state: &SessionState) -> Result<Evaluation> {
    debug!(
        command = command.name(),
        branch = state.current_branch(),
        "evaluating command"
    );

    if !command.is_mutation() {
        return eval_query(command, state).map(|output| Evaluation::unchanged(output, state));
    }

    let mut next = state.clone();
    let output = eval_mutation(command, &mut next)?;
    Ok(Evaluation {
        output,
        state: next,
    })
}

/// Commands that only read the state.
fn eval_query(command: &Command, state: &SessionState) -> Result<String> {
    match command {
        Command::KvGet { key } => match state.kv_get(key) {
            Some(value) => render_pretty(value),
            None => Ok(NONE.to_string()),
        },
        Command::KvList => {
            let keys: Vec<&String> = state.branch().keys().collect();
            render_compact(&keys)
        }
        Command::BranchList => render_compact(&state.branch_names()),
        Command::CurrentBranch => Ok(format!("'{}'", state.current_branch())),
        Command::StateGet { cell } => match state.cell(cell) {
            Some(cell) => render_plain(&cell.value),
            None => Ok(NONE.to_string()),
        },
        Command::EventList { event_type } => render_pretty(state.events(event_type)),
        Command::EventLen => Ok(state.event_len().to_string()),
        Command::VectorListCollections => render_pretty(&state.collection_summaries()),
        Command::Help => Ok(HELP_TEXT.to_string()),
        other => Err(ReplError::Internal(format!(
            "{} is not a read-only command",
            other.name()
        ))),
    }
}

/// Commands that write to `state`. On `Err` the caller drops `state`.
fn eval_mutation(command: &Command, state: &mut SessionState) -> Result<String> {
    match command {
        Command::KvPut { key, value } => Ok(state.kv_put(key, value.clone()).to_string()),
        Command::KvDelete { key } => Ok(state.kv_delete(key).to_string()),
        Command::BranchCreate { name } => {
            state.create_branch(name)?;
            Ok(NONE.to_string())
        }
        Command::BranchUse { name } => {
            state.use_branch(name)?;
            Ok(NONE.to_string())
        }
        Command::BranchFork {
            source,
            destination,
        } => {
            let copied = state.fork_branch(source, destination)?;
            Ok(format!(
                "{{'source': '{}', 'destination': '{}', 'keys_copied': {}}}",
                source, destination, copied
            ))
        }
        Command::StateSet { cell, value } => Ok(state.cell_set(cell, value.clone()).to_string()),
        Command::StateCas {
            cell,
            value,
            expected,
        } => {
            let expected = expected.ok_or(ReplError::CasFailed)?;
            Ok(state.cell_cas(cell, value.clone(), expected)?.to_string())
        }
        Command::EventAppend {
            event_type,
            payload,
        } => Ok(state.event_append(event_type, payload.clone()).to_string()),
        Command::VectorCreateCollection { name, dimension } => {
            state.create_collection(name, *dimension);
            Ok("1".to_string())
        }
        other => eval_query(other, state),
    }
}
