//! Session state threaded through every command
//!
//! A [`SessionState`] is an immutable snapshot from the interpreter's point
//! of view: each command takes one by reference and hands back a
//! replacement. Tables are `Arc`-wrapped so a replacement shares every
//! table the command did not touch, and `Arc::make_mut` copies only the
//! one it writes.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ReplError, Result};
use crate::value::Value;

/// Keys and values of one branch, in insertion order.
pub type Branch = IndexMap<String, Value>;

/// A single versioned value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Current value
    pub value: Value,

    /// Write counter, 1 after the first write
    pub version: u64,
}

/// One entry of an event log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// 0-based position in its log
    pub seq: u64,

    /// Event payload
    pub value: Value,
}

/// A vector collection. Only its shape is simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Declared vector dimension
    pub dimension: u64,

    /// Stored vectors by id
    pub vectors: IndexMap<String, Value>,
}

/// Row of `vector_list_collections` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    /// Collection name
    pub name: String,

    /// Declared vector dimension
    pub dimension: u64,

    /// Number of stored vectors
    pub count: usize,
}

/// Everything a playground session knows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    branches: Arc<IndexMap<String, Arc<Branch>>>,
    current_branch: String,
    cells: Arc<IndexMap<String, Cell>>,
    event_logs: Arc<IndexMap<String, Vec<EventRecord>>>,
    collections: Arc<IndexMap<String, Collection>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new("main")
    }
}

impl SessionState {
    /// Create the initial snapshot: one empty branch, selected.
    pub fn new(main_branch: impl Into<String>) -> Self {
        let main_branch = main_branch.into();
        let mut branches = IndexMap::new();
        branches.insert(main_branch.clone(), Arc::new(Branch::new()));
        Self {
            branches: Arc::new(branches),
            current_branch: main_branch,
            cells: Arc::default(),
            event_logs: Arc::default(),
            collections: Arc::default(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Branches
    // ═══════════════════════════════════════════════════════════════════

    /// Name of the active branch.
    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    /// Contents of the active branch.
    pub fn branch(&self) -> &Branch {
        // current_branch always names an existing branch
        &self.branches[self.current_branch.as_str()]
    }

    /// Contents of a branch by name.
    pub fn branch_named(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name).map(|b| b.as_ref())
    }

    /// Branch names in creation order.
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.keys().map(String::as_str).collect()
    }

    /// Check whether a branch exists.
    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Add an empty branch. Fails if the name is taken.
    pub fn create_branch(&mut self, name: &str) -> Result<()> {
        if self.has_branch(name) {
            return Err(ReplError::BranchExists);
        }
        Arc::make_mut(&mut self.branches).insert(name.to_string(), Arc::new(Branch::new()));
        Ok(())
    }

    /// Make an existing branch the active one.
    pub fn use_branch(&mut self, name: &str) -> Result<()> {
        if !self.has_branch(name) {
            return Err(ReplError::BranchNotFound(name.to_string()));
        }
        self.current_branch = name.to_string();
        Ok(())
    }

    /// Copy every pair of `source` into `destination`, replacing it if it
    /// exists. Returns the number of keys copied.
    pub fn fork_branch(&mut self, source: &str, destination: &str) -> Result<usize> {
        let copy: Branch = self
            .branch_named(source)
            .ok_or_else(|| ReplError::BranchNotFound(source.to_string()))?
            .clone();
        let copied = copy.len();
        Arc::make_mut(&mut self.branches).insert(destination.to_string(), Arc::new(copy));
        Ok(copied)
    }

    fn branch_mut(&mut self) -> &mut Branch {
        let branches = Arc::make_mut(&mut self.branches);
        let branch = branches
            .entry(self.current_branch.clone())
            .or_insert_with(|| Arc::new(Branch::new()));
        Arc::make_mut(branch)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Key/Value
    // ═══════════════════════════════════════════════════════════════════

    /// Store a key in the active branch. Returns the branch size afterwards.
    pub fn kv_put(&mut self, key: &str, value: Value) -> usize {
        let branch = self.branch_mut();
        branch.insert(key.to_string(), value);
        branch.len()
    }

    /// Look up a key in the active branch.
    pub fn kv_get(&self, key: &str) -> Option<&Value> {
        self.branch().get(key)
    }

    /// Remove a key from the active branch. Returns whether it existed.
    pub fn kv_delete(&mut self, key: &str) -> bool {
        if !self.branch().contains_key(key) {
            return false;
        }
        self.branch_mut().shift_remove(key).is_some()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cells
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a cell.
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    /// Write a cell unconditionally. Returns the new version.
    pub fn cell_set(&mut self, name: &str, value: Value) -> u64 {
        let version = self.cell(name).map_or(0, |c| c.version) + 1;
        Arc::make_mut(&mut self.cells).insert(name.to_string(), Cell { value, version });
        version
    }

    /// Write a cell only if its version is `expected`. Returns the new version.
    pub fn cell_cas(&mut self, name: &str, value: Value, expected: u64) -> Result<u64> {
        match self.cell(name) {
            Some(cell) if cell.version == expected => {}
            _ => return Err(ReplError::CasFailed),
        }
        let version = expected
            .checked_add(1)
            .ok_or_else(|| ReplError::internal("version overflow"))?;
        Arc::make_mut(&mut self.cells).insert(name.to_string(), Cell { value, version });
        Ok(version)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Event Logs
    // ═══════════════════════════════════════════════════════════════════

    /// Append to an event log. Returns the assigned sequence number.
    pub fn event_append(&mut self, event_type: &str, value: Value) -> u64 {
        let log = Arc::make_mut(&mut self.event_logs)
            .entry(event_type.to_string())
            .or_default();
        let seq = log.len() as u64;
        log.push(EventRecord { seq, value });
        seq
    }

    /// Entries of one event log, oldest first.
    pub fn events(&self, event_type: &str) -> &[EventRecord] {
        self.event_logs
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total entries across every event type.
    pub fn event_len(&self) -> usize {
        self.event_logs.values().map(Vec::len).sum()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Vector Collections
    // ═══════════════════════════════════════════════════════════════════

    /// Create (or replace) an empty collection.
    pub fn create_collection(&mut self, name: &str, dimension: u64) {
        Arc::make_mut(&mut self.collections).insert(
            name.to_string(),
            Collection {
                dimension,
                vectors: IndexMap::new(),
            },
        );
    }

    /// Look up a collection.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// One summary row per collection, in creation order.
    pub fn collection_summaries(&self) -> Vec<CollectionSummary> {
        self.collections
            .iter()
            .map(|(name, c)| CollectionSummary {
                name: name.clone(),
                dimension: c.dimension,
                count: c.vectors.len(),
            })
            .collect()
    }
}
