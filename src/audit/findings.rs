//! Problems an audit can report.

use thiserror::Error;

/// One authoring problem found in a state graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditFinding {
    #[error("Initial state {state} is not among the declared states")]
    MissingInitial { state: &'static str },

    #[error("State {state} is declared more than once")]
    DuplicateState { state: &'static str },

    #[error("State {state} lists undeclared predecessor {predecessor}")]
    UnknownPredecessor {
        state: &'static str,
        predecessor: &'static str,
    },

    #[error("State {state} lists itself as a predecessor; self-transitions are always ignored")]
    SelfPredecessor { state: &'static str },

    #[error("State {state} admits no predecessors and is not the initial state")]
    NoPredecessors { state: &'static str },

    #[error("State {state} cannot be reached from initial state {initial}")]
    Unreachable {
        state: &'static str,
        initial: &'static str,
    },
}

impl AuditFinding {
    /// Name of the state the finding is about.
    pub fn state(&self) -> &'static str {
        match self {
            AuditFinding::MissingInitial { state }
            | AuditFinding::DuplicateState { state }
            | AuditFinding::UnknownPredecessor { state, .. }
            | AuditFinding::SelfPredecessor { state }
            | AuditFinding::NoPredecessors { state }
            | AuditFinding::Unreachable { state, .. } => *state,
        }
    }
}
