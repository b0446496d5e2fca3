//! Predecessor policies gating transitions into a state.

use super::state::StateId;
use std::borrow::Cow;

/// Set of states from which a transition into a given state is permitted.
///
/// [`Predecessors::Any`] is the wildcard: it admits every other state. Because
/// it is a policy rather than an identity, the wildcard can never become the
/// active state of a machine.
///
/// # Example
///
/// ```rust
/// use stance::core::Predecessors;
/// use stance::state_ids;
///
/// state_ids! {
///     enum Motion { Idle, Walk, Jump }
/// }
///
/// let walk_from = Predecessors::only([Motion::Idle]);
/// assert!(walk_from.admits(Motion::Idle));
/// assert!(!walk_from.admits(Motion::Jump));
///
/// let idle_from: Predecessors<Motion> = Predecessors::any();
/// assert!(idle_from.admits(Motion::Jump));
///
/// // No allocation when the set is a constant.
/// const JUMP_FROM: Predecessors<Motion> = Predecessors::from_static(&[Motion::Idle, Motion::Walk]);
/// assert!(JUMP_FROM.admits(Motion::Walk));
/// ```
#[derive(Clone, Debug)]
pub enum Predecessors<I: StateId> {
    /// Any current state may precede this one.
    Any,
    /// Only the listed states may precede this one.
    Only(Cow<'static, [I]>),
}

impl<I: StateId> Predecessors<I> {
    /// Wildcard policy admitting every current state.
    pub fn any() -> Self {
        Predecessors::Any
    }

    /// Policy admitting only the given states. Duplicates are collapsed.
    pub fn only(ids: impl IntoIterator<Item = I>) -> Self {
        let mut unique = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Predecessors::Only(Cow::Owned(unique))
    }

    /// Policy admitting only the states in a constant slice.
    ///
    /// Borrows the slice, so returning it from
    /// [`allowed_predecessors`](super::StateKind::allowed_predecessors)
    /// costs nothing per call.
    pub const fn from_static(ids: &'static [I]) -> Self {
        Predecessors::Only(Cow::Borrowed(ids))
    }

    /// Policy admitting nothing. A state with this policy can only ever be
    /// active as the initial state.
    pub fn none() -> Self {
        Predecessors::Only(Cow::Owned(Vec::new()))
    }

    /// Add one more admitted state. Has no effect on the wildcard.
    pub fn with(mut self, id: I) -> Self {
        if let Predecessors::Only(ids) = &mut self {
            if !ids.contains(&id) {
                ids.to_mut().push(id);
            }
        }
        self
    }

    /// Check whether a transition from `current` is permitted.
    pub fn admits(&self, current: I) -> bool {
        match self {
            Predecessors::Any => true,
            Predecessors::Only(ids) => ids.contains(&current),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Predecessors::Any)
    }

    /// True for an explicit set with no members.
    pub fn is_empty(&self) -> bool {
        matches!(self, Predecessors::Only(ids) if ids.is_empty())
    }

    /// Explicitly listed states; empty for the wildcard.
    pub fn listed(&self) -> impl Iterator<Item = I> + '_ {
        let ids = match self {
            Predecessors::Any => None,
            Predecessors::Only(ids) => Some(ids.iter().copied()),
        };
        ids.into_iter().flatten()
    }
}

/// Set equality: listing order does not matter.
impl<I: StateId> PartialEq for Predecessors<I> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predecessors::Any, Predecessors::Any) => true,
            (Predecessors::Only(a), Predecessors::Only(b)) => {
                a.iter().all(|id| b.contains(id)) && b.iter().all(|id| a.contains(id))
            }
            _ => false,
        }
    }
}

impl<I: StateId> Eq for Predecessors<I> {}

impl<I: StateId> FromIterator<I> for Predecessors<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Predecessors::only(iter)
    }
}
