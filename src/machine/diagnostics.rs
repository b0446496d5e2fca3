//! Transition rejections and counters.

use crate::core::StateId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a transition request was not committed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionRejected<I: StateId> {
    #[error("{} is already the current state", .state.name())]
    SelfTransition { state: I },

    #[error("{} does not accept {} as a predecessor", .to.name(), .from.name())]
    NotPermitted { from: I, to: I },
}

impl<I: StateId> TransitionRejected<I> {
    /// The state the request targeted.
    pub fn target(&self) -> I {
        match self {
            TransitionRejected::SelfTransition { state } => *state,
            TransitionRejected::NotPermitted { to, .. } => *to,
        }
    }
}

/// Running counters of what happened to transition requests.
///
/// Rejections are silent by default; these counters make a frozen state
/// graph visible without changing that behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Transitions that ran exit, enter and notification
    pub committed: u64,
    /// Requests targeting the state that was already current
    pub rejected_self: u64,
    /// Requests refused by the target's predecessor set
    pub rejected_predecessor: u64,
    /// Queued requests discarded after the chain limit was hit, or left
    /// behind by a call that unwound
    pub dropped: u64,
}

impl Diagnostics {
    pub fn rejected(&self) -> u64 {
        self.rejected_self + self.rejected_predecessor
    }

    pub(crate) fn count_rejection<I: StateId>(&mut self, rejection: &TransitionRejected<I>) {
        match rejection {
            TransitionRejected::SelfTransition { .. } => self.rejected_self += 1,
            TransitionRejected::NotPermitted { .. } => self.rejected_predecessor += 1,
        }
    }
}
