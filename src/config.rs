//! Evaluator configuration.
use serde::{Serialize, Deserialize};

/// How `evaluate` treats nodes that cannot be reached from the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    /// Fail the evaluation with `GraphError::Unreachable`.
    Strict,
    /// Record a diagnostic per unreachable node, log it, and evaluate the rest.
    #[default]
    Diagnose,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub reachability: Reachability,
    /// Drop every cached result before a pass, so nodes the pass does not
    /// reach carry no value from an earlier run.
    pub clear_stale_results: bool,
}

impl EvalConfig {
    pub fn strict() -> Self {
        Self { reachability: Reachability::Strict, ..Self::default() }
    }

    pub fn with_clear_stale_results(mut self, clear: bool) -> Self {
        self.clear_stale_results = clear;
        self
    }
}
