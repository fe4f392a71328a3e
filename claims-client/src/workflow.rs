//! Status → action table for the claim workflow.
//!
//! The workflow is a finite-state diagram with `submitted` as its entry point and
//! no terminal state: a resolved claim can be re-opened into manual review. Each
//! edge names the action a user may trigger from a status; the target status of a
//! manual action is fixed by the action itself, while AI validation leaves the
//! outcome to the backend.

use std::fmt;

use crate::model::ClaimStatus;

/// How an action moves a claim forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Backend-decided outcome; the client sends only the claim id
    Ai,
    /// Client-chosen target status
    Manual(ClaimStatus),
}

/// An action a user can trigger on a single claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimAction {
    ValidateAi,
    Analyze,
    Resolve,
    Reopen,
}

impl ClaimAction {
    pub const ALL: [ClaimAction; 4] = [
        ClaimAction::ValidateAi,
        ClaimAction::Analyze,
        ClaimAction::Resolve,
        ClaimAction::Reopen,
    ];

    /// Button label shown next to a claim
    pub fn label(&self) -> &'static str {
        match self {
            ClaimAction::ValidateAi => "Validate (AI)",
            ClaimAction::Analyze => "Analyze (Manual)",
            ClaimAction::Resolve => "Resolve (Manual)",
            ClaimAction::Reopen => "Re-open",
        }
    }

    /// Short command word used by the terminal front end
    pub fn command(&self) -> &'static str {
        match self {
            ClaimAction::ValidateAi => "validate",
            ClaimAction::Analyze => "analyze",
            ClaimAction::Resolve => "resolve",
            ClaimAction::Reopen => "reopen",
        }
    }

    pub fn from_command(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.command() == word)
    }

    pub fn transition(&self) -> Transition {
        match self {
            ClaimAction::ValidateAi => Transition::Ai,
            ClaimAction::Analyze => Transition::Manual(ClaimStatus::RootCauseIdentified),
            ClaimAction::Resolve => Transition::Manual(ClaimStatus::Resolved),
            ClaimAction::Reopen => Transition::Manual(ClaimStatus::PendingManualReview),
        }
    }
}

impl fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Edge from a status to an action offered in that status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: ClaimStatus,
    pub action: ClaimAction,
}

/// Lookup table from the current status of a claim to the actions offered for it
#[derive(Debug, Clone)]
pub struct TransitionTable {
    edges: Vec<Edge>,
}

impl TransitionTable {
    pub fn builder() -> TransitionTableBuilder {
        TransitionTableBuilder::new()
    }

    /// Actions offered for `status`, in the order their edges were added
    pub fn actions_for(&self, status: &ClaimStatus) -> Vec<ClaimAction> {
        self.edges
            .iter()
            .filter(|edge| &edge.from == status)
            .map(|edge| edge.action)
            .collect()
    }

    pub fn is_available(&self, status: &ClaimStatus, action: ClaimAction) -> bool {
        self.edges
            .iter()
            .any(|edge| &edge.from == status && edge.action == action)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        TransitionTable::builder()
            .add_edge(ClaimStatus::Submitted, ClaimAction::ValidateAi)
            .add_edge(ClaimStatus::Validated, ClaimAction::Analyze)
            .add_edge(ClaimStatus::PendingManualReview, ClaimAction::Analyze)
            .add_edge(ClaimStatus::RootCauseIdentified, ClaimAction::Resolve)
            .add_edge(ClaimStatus::Resolved, ClaimAction::Reopen)
            .build()
    }
}

/// Builder for creating transition tables
pub struct TransitionTableBuilder {
    edges: Vec<Edge>,
}

impl TransitionTableBuilder {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Offer `action` for claims in `from`. Duplicate edges are ignored.
    pub fn add_edge(mut self, from: ClaimStatus, action: ClaimAction) -> Self {
        let edge = Edge { from, action };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
        self
    }

    pub fn build(self) -> TransitionTable {
        TransitionTable { edges: self.edges }
    }
}

impl Default for TransitionTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
