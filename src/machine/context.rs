//! Handle passed to state hooks.

use std::collections::VecDeque;

/// Access to the owner and the transition queue from inside a hook.
///
/// A state cannot reach the machine that is currently running its hook, so
/// transition requests go through the context instead. They are applied in
/// the order issued as soon as the running hook returns, before the
/// forwarding call that invoked the hook returns to its caller. The hook
/// itself always finishes on the state it was dispatched to.
pub struct Context<'a, O, S> {
    owner: &'a mut O,
    requests: &'a mut VecDeque<S>,
}

impl<'a, O, S> Context<'a, O, S> {
    pub(crate) fn new(owner: &'a mut O, requests: &'a mut VecDeque<S>) -> Self {
        Self { owner, requests }
    }

    pub fn owner(&self) -> &O {
        self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        self.owner
    }

    /// Request a transition to `next`.
    ///
    /// The request is validated when it is applied, against whatever state
    /// is current at that moment. Invalid requests are ignored.
    pub fn change_state(&mut self, next: S) {
        self.requests.push_back(next);
    }

    /// Number of requests issued and not yet applied.
    pub fn pending(&self) -> usize {
        self.requests.len()
    }
}
