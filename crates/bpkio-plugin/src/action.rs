//! Apply action classification

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Type of change an apply performs on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Update an existing resource
    Update,
    /// Delete a resource
    Delete,
    /// No changes needed
    NoOp,
}

impl ActionType {
    /// Derives the action from the prior and planned states: a missing prior
    /// state creates, a missing plan deletes, anything else updates.
    pub fn classify(prior: Option<&Json>, planned: Option<&Json>) -> Self {
        let prior = prior.filter(|v| !v.is_null());
        let planned = planned.filter(|v| !v.is_null());
        match (prior, planned) {
            (None, Some(_)) => ActionType::Create,
            (Some(_), None) => ActionType::Delete,
            (Some(p), Some(n)) if p == n => ActionType::NoOp,
            (Some(_), Some(_)) => ActionType::Update,
            (None, None) => ActionType::NoOp,
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::Delete => write!(f, "delete"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}
