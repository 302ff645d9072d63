use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The original request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(String);

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Task {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One planned action: `Plan: <description> #E<N> = <tool>[<raw_params>]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    /// Evidence variable token as written, e.g. `#E3`.
    pub variable: String,
    /// Numeric suffix of `variable`.
    pub index: u64,
    pub tool: String,
    /// Argument text between the brackets, unresolved.
    pub raw_params: String,
}

/// The full intended execution. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub raw_text: String,
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Accumulated step results, ordered by declaration.
///
/// Append-only: a variable is written once, by the step that declares it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceStore {
    entries: IndexMap<String, String>,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a step's result. Returns `false` and leaves the store untouched
    /// when `variable` was already recorded.
    pub fn record(&mut self, variable: impl Into<String>, value: impl Into<String>) -> bool {
        let variable = variable.into();
        if self.entries.contains_key(&variable) {
            tracing::warn!(variable = variable.as_str(), "Evidence already recorded, ignoring");
            return false;
        }
        self.entries.insert(variable, value.into());
        true
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.entries.get(variable).map(String::as_str)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.entries.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were committed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Count of completed steps. Only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCursor {
    completed: usize,
}

impl ExecutionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(self) -> usize {
        self.completed
    }

    pub fn advance(&mut self) {
        self.completed += 1;
    }

    pub fn is_done(self, plan: &Plan) -> bool {
        self.completed >= plan.len()
    }
}

/// Terminal output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub task: Task,
    pub plan: Plan,
    pub evidence: EvidenceStore,
    pub steps_executed: usize,
    pub answer: String,
}
