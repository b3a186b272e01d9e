//! Recognised playground commands

use std::fmt;

use crate::value::Value;

/// One parsed `db.*` call (or `help()`).
///
/// Arguments are already extracted and literal values already coerced,
/// so evaluating a command never touches the input text again.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `db.kv_put(key, value)`
    KvPut {
        /// Key to write
        key: String,
        /// Parsed value
        value: Value,
    },

    /// `db.kv_get(key)`
    KvGet {
        /// Key to read
        key: String,
    },

    /// `db.kv_list()`
    KvList,

    /// `db.kv_delete(key)`
    KvDelete {
        /// Key to remove
        key: String,
    },

    /// `db.branch_create(name)`
    BranchCreate {
        /// New branch name
        name: String,
    },

    /// `db.branch_use(name)`
    BranchUse {
        /// Branch to switch to
        name: String,
    },

    /// `db.branch_list()`
    BranchList,

    /// `db.branch_fork(source, destination)`
    BranchFork {
        /// Branch to copy from
        source: String,
        /// Branch to create or overwrite
        destination: String,
    },

    /// `db.current_branch()`
    CurrentBranch,

    /// `db.state_set(cell, value)`
    StateSet {
        /// Cell name
        cell: String,
        /// Parsed value
        value: Value,
    },

    /// `db.state_get(cell)`
    StateGet {
        /// Cell name
        cell: String,
    },

    /// `db.state_cas(cell, value, expected=N)`
    StateCas {
        /// Cell name
        cell: String,
        /// Candidate value
        value: Value,
        /// Version the caller believes is current; `None` if it overflowed
        expected: Option<u64>,
    },

    /// `db.event_append(type, payload)`
    EventAppend {
        /// Event type
        event_type: String,
        /// Parsed payload
        payload: Value,
    },

    /// `db.event_list(type)`
    EventList {
        /// Event type
        event_type: String,
    },

    /// `db.event_len()`
    EventLen,

    /// `db.vector_create_collection(name, dimension)`
    VectorCreateCollection {
        /// Collection name
        name: String,
        /// Vector dimension
        dimension: u64,
    },

    /// `db.vector_list_collections()`
    VectorListCollections,

    /// `help()` or `db.help()`
    Help,
}

impl Command {
    /// Method name as typed at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Command::KvPut { .. } => "kv_put",
            Command::KvGet { .. } => "kv_get",
            Command::KvList => "kv_list",
            Command::KvDelete { .. } => "kv_delete",
            Command::BranchCreate { .. } => "branch_create",
            Command::BranchUse { .. } => "branch_use",
            Command::BranchList => "branch_list",
            Command::BranchFork { .. } => "branch_fork",
            Command::CurrentBranch => "current_branch",
            Command::StateSet { .. } => "state_set",
            Command::StateGet { .. } => "state_get",
            Command::StateCas { .. } => "state_cas",
            Command::EventAppend { .. } => "event_append",
            Command::EventList { .. } => "event_list",
            Command::EventLen => "event_len",
            Command::VectorCreateCollection { .. } => "vector_create_collection",
            Command::VectorListCollections => "vector_list_collections",
            Command::Help => "help",
        }
    }

    /// Whether evaluating this command can change the session state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::KvPut { .. }
                | Command::KvDelete { .. }
                | Command::BranchCreate { .. }
                | Command::BranchUse { .. }
                | Command::BranchFork { .. }
                | Command::StateSet { .. }
                | Command::StateCas { .. }
                | Command::EventAppend { .. }
                | Command::VectorCreateCollection { .. }
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fixed usage text printed by `help()`.
pub const HELP_TEXT: &str = "Available methods:
  db.kv_put(key, value)     - Store a value
  db.kv_get(key)            - Get a value
  db.kv_list()              - List all keys
  db.kv_delete(key)         - Delete a key
  db.branch_create(name)    - Create a branch
  db.branch_use(name)       - Switch to a branch
  db.branch_list()          - List all branches
  db.branch_fork(src, dst)  - Fork a branch
  db.current_branch()       - Get current branch
  db.state_set(cell, value) - Set state
  db.state_get(cell)        - Get state
  db.state_cas(cell, value, expected=N) - Compare-and-swap state
  db.event_append(type, v)  - Append event
  db.event_list(type)       - List events
  db.event_len()            - Count all events
  db.vector_create_collection(name, dim)
  db.vector_list_collections()
  help()                    - Show this help";
