//! Interactive session: current state plus the echoed transcript

use tracing::debug;

use crate::config::ReplConfig;
use crate::interpreter::execute;
use crate::state::SessionState;

/// One echoed input line and its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Line as the user typed it
    pub input: String,

    /// Interpreter output (may be empty)
    pub output: String,
}

/// A playground session.
///
/// Owns the current [`SessionState`] and the scrollback of everything
/// submitted so far. Blank submissions are ignored entirely, the same way
/// an empty form submit is.
///
/// # Example
///
/// ```
/// use strata_repl::Session;
///
/// let mut session = Session::default();
/// session.submit("db.kv_put('a', 1)");
/// session.submit("db.branch_fork('main', 'dev')");
/// assert_eq!(session.status(), "1 keys in main");
///
/// session.reset();
/// assert!(session.history().is_empty());
/// assert_eq!(session.status(), "0 keys in main");
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: ReplConfig,
    state: SessionState,
    history: Vec<Entry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ReplConfig::default())
    }
}

impl Session {
    /// Start a session from a configuration.
    pub fn new(config: ReplConfig) -> Self {
        let state = SessionState::new(config.main_branch.clone());
        Self {
            config,
            state,
            history: Vec::new(),
        }
    }

    /// Evaluate a line, commit its state and record it.
    ///
    /// Returns `None` for a submission that is only whitespace.
    pub fn submit(&mut self, input: &str) -> Option<&Entry> {
        if input.trim().is_empty() {
            return None;
        }

        let evaluation = execute(input, &self.state);
        self.state = evaluation.state;
        self.history.push(Entry {
            input: input.to_string(),
            output: evaluation.output,
        });
        self.history.last()
    }

    /// Discard state and transcript, back to the initial snapshot.
    pub fn reset(&mut self) {
        debug!(entries = self.history.len(), "resetting session");
        self.state = SessionState::new(self.config.main_branch.clone());
        self.history.clear();
    }

    /// Current state snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Everything submitted so far, oldest first.
    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    /// Configuration this session was started with.
    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    /// Status line, e.g. `3 keys in main`.
    pub fn status(&self) -> String {
        format!(
            "{} keys in {}",
            self.state.branch().len(),
            self.state.current_branch()
        )
    }
}
