//! Static checks over an authored state graph.
//!
//! Invalid transitions are silently ignored at runtime, so a mistyped
//! predecessor set shows up only as behavior that never changes state. The
//! audit catches those mistakes up front using Stillwater's `Validation`
//! type, accumulating ALL findings instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use stance::audit::{audit, AuditFinding};
//! use stance::core::{Predecessors, StateKind};
//! use stance::state_ids;
//! use stillwater::validation::Validation;
//!
//! state_ids! {
//!     enum Motion { Idle, Walk, Attack }
//! }
//!
//! struct Node(Motion, Predecessors<Motion>);
//!
//! impl StateKind for Node {
//!     type Id = Motion;
//!     fn id(&self) -> Motion { self.0 }
//!     fn allowed_predecessors(&self) -> Predecessors<Motion> { self.1.clone() }
//! }
//!
//! let states = vec![
//!     Node(Motion::Idle, Predecessors::any()),
//!     Node(Motion::Walk, Predecessors::only([Motion::Idle])),
//!     Node(Motion::Attack, Predecessors::only([Motion::Attack])),
//! ];
//!
//! match audit(&states[0], &states) {
//!     Validation::Failure(findings) => {
//!         assert!(findings
//!             .iter()
//!             .any(|f| matches!(f, AuditFinding::SelfPredecessor { state: "Attack" })));
//!     }
//!     Validation::Success(_) => panic!("Expected findings"),
//! }
//! ```

mod findings;

pub use findings::AuditFinding;

use crate::core::{Predecessors, StateId, StateKind};
use std::collections::{HashMap, HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of an audit: success, or every finding.
pub type AuditResult = Validation<(), NonEmptyVec<AuditFinding>>;

/// Audit the graph formed by `states`, starting from `initial`.
///
/// `states` should contain one instance of every state the machine can
/// enter, the initial one included. Edges follow the same rule as
/// `change_state`: `a -> b` exists when `a != b` and `b` admits `a`.
pub fn audit<S: StateKind>(initial: &S, states: &[S]) -> AuditResult {
    let initial_id = initial.id();
    let mut checks: Vec<AuditResult> = Vec::new();

    let mut declared: Vec<(S::Id, Predecessors<S::Id>)> = Vec::with_capacity(states.len());
    let mut seen = HashSet::new();
    for state in states {
        let id = state.id();
        if seen.insert(id) {
            declared.push((id, state.allowed_predecessors()));
        } else {
            checks.push(Validation::fail(AuditFinding::DuplicateState {
                state: id.name(),
            }));
        }
    }

    if !seen.contains(&initial_id) {
        checks.push(Validation::fail(AuditFinding::MissingInitial {
            state: initial_id.name(),
        }));
        seen.insert(initial_id);
        declared.insert(0, (initial_id, initial.allowed_predecessors()));
    }

    for (id, predecessors) in &declared {
        let mut listed: Vec<S::Id> = predecessors.listed().collect();
        listed.sort_by_key(|predecessor| predecessor.name());

        for predecessor in listed {
            if predecessor == *id {
                checks.push(Validation::fail(AuditFinding::SelfPredecessor {
                    state: id.name(),
                }));
            } else if !seen.contains(&predecessor) {
                checks.push(Validation::fail(AuditFinding::UnknownPredecessor {
                    state: id.name(),
                    predecessor: predecessor.name(),
                }));
            }
        }

        if *id != initial_id && predecessors.is_empty() {
            checks.push(Validation::fail(AuditFinding::NoPredecessors {
                state: id.name(),
            }));
        }
    }

    let reachable = reachable_from(initial_id, &declared);
    for (id, predecessors) in &declared {
        if !reachable.contains(id) && !predecessors.is_empty() {
            checks.push(Validation::fail(AuditFinding::Unreachable {
                state: id.name(),
                initial: initial_id.name(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Audit and flatten the result into a list; empty when the graph is clean.
pub fn findings<S: StateKind>(initial: &S, states: &[S]) -> Vec<AuditFinding> {
    match audit(initial, states) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(findings) => findings.iter().cloned().collect(),
    }
}

fn reachable_from<I: StateId>(initial: I, declared: &[(I, Predecessors<I>)]) -> HashSet<I> {
    let admitted: HashMap<I, &Predecessors<I>> =
        declared.iter().map(|(id, predecessors)| (*id, predecessors)).collect();

    let mut reachable = HashSet::from([initial]);
    let mut frontier = VecDeque::from([initial]);

    while let Some(current) = frontier.pop_front() {
        for (id, predecessors) in &admitted {
            if *id != current && !reachable.contains(id) && predecessors.admits(current) {
                reachable.insert(*id);
                frontier.push_back(*id);
            }
        }
    }
    reachable
}
