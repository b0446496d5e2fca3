//! Builder for constructing state machines.

use crate::audit;
use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::{Listener, Listeners, MachineConfig, StateChangeEvent, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::new`], the builder can register listeners before
/// the initial state is entered and can audit the state graph first.
pub struct StateMachineBuilder<O, S: State<O>> {
    owner: Option<O>,
    initial: Option<S>,
    config: MachineConfig,
    listeners: Vec<Listener<O, S>>,
    audited: Option<Vec<S>>,
}

impl<O, S: State<O>> StateMachineBuilder<O, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            owner: None,
            initial: None,
            config: MachineConfig::default(),
            listeners: Vec::new(),
            audited: None,
        }
    }

    /// Set the owner (required).
    pub fn owner(mut self, owner: O) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn history(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn trace_rejections(mut self, enabled: bool) -> Self {
        self.config.trace_rejections = enabled;
        self
    }

    pub fn max_chained_transitions(mut self, limit: usize) -> Self {
        self.config.max_chained_transitions = limit;
        self
    }

    /// Register a change listener.
    pub fn on_state_changed<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&StateChangeEvent<'_, O, S>) + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Audit the graph formed by `states` when building.
    ///
    /// `states` holds one instance of each state the machine may enter.
    pub fn audit(mut self, states: Vec<S>) -> Self {
        self.audited = Some(states);
        self
    }

    /// Build the state machine, entering the initial state.
    /// Returns an error if required fields are missing or the audit fails.
    pub fn build(self) -> Result<StateMachine<O, S>, BuildError> {
        let owner = self.owner.ok_or(BuildError::MissingOwner)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if let Some(states) = &self.audited {
            let findings = audit::findings(&initial, states);
            if !findings.is_empty() {
                return Err(BuildError::AuditFailed { findings });
            }
        }

        let mut listeners = Listeners::default();
        for listener in self.listeners {
            listeners.add(listener);
        }

        Ok(StateMachine::assemble(owner, initial, self.config, listeners))
    }
}

impl<O, S: State<O>> Default for StateMachineBuilder<O, S> {
    fn default() -> Self {
        Self::new()
    }
}
