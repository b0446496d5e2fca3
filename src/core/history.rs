//! Bounded record of committed transitions.
//!
//! History is a diagnostic aid: it remembers the most recent transitions of a
//! machine so authoring bugs can be inspected or dumped. It is never used to
//! rebuild a machine.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use stance::core::StateTransition;
/// use stance::state_ids;
/// use chrono::Utc;
///
/// state_ids! {
///     enum Motion { Idle, Walk }
/// }
///
/// let transition = StateTransition {
///     from: Motion::Idle,
///     to: Motion::Walk,
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert_eq!(transition.to, Motion::Walk);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<I: StateId> {
    /// The state being left
    pub from: I,
    /// The state being entered
    pub to: I,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    /// Position of this transition among all transitions of the machine,
    /// starting at 1
    pub sequence: u64,
}

/// Ring buffer of the most recent transitions.
///
/// Once `capacity` records are held, recording drops the oldest one. A
/// history with capacity 0 records nothing.
///
/// # Example
///
/// ```rust
/// use stance::core::{StateHistory, StateTransition};
/// use stance::state_ids;
/// use chrono::Utc;
///
/// state_ids! {
///     enum Motion { Idle, Walk, Jump }
/// }
///
/// let mut history = StateHistory::with_capacity(2);
/// for (sequence, (from, to)) in [
///     (Motion::Idle, Motion::Walk),
///     (Motion::Walk, Motion::Jump),
///     (Motion::Jump, Motion::Idle),
/// ]
/// .into_iter()
/// .enumerate()
/// {
///     history.record(StateTransition {
///         from,
///         to,
///         timestamp: Utc::now(),
///         sequence: sequence as u64 + 1,
///     });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![Motion::Walk, Motion::Jump, Motion::Idle]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<I: StateId> {
    capacity: usize,
    transitions: VecDeque<StateTransition<I>>,
}

impl<I: StateId> Default for StateHistory<I> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<I: StateId> StateHistory<I> {
    /// Create a history keeping at most `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    /// Create a history that records nothing.
    pub fn disabled() -> Self {
        Self::with_capacity(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Record a transition, evicting the oldest record when full.
    pub fn record(&mut self, transition: StateTransition<I>) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed by the retained records.
    ///
    /// Returns the `from` state of the oldest record, then the `to` state of
    /// each record in order.
    pub fn get_path(&self) -> Vec<I> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|transition| transition.to));
        path
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&StateTransition<I>> {
        self.transitions.back()
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<I>> + '_ {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
