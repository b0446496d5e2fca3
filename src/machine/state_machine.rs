//! The engine: one active state per owner.

use super::config::MachineConfig;
use super::context::Context;
use super::diagnostics::{Diagnostics, TransitionRejected};
use super::events::{ListenerId, Listeners, StateChangeEvent};
use crate::core::{
    CollisionHooks, State, StateHistory, StateId, StateKind, StateTransition, TriggerHooks,
};
use chrono::Utc;
use std::collections::VecDeque;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifier distinguishing machines in logs.
pub type MachineId = Uuid;

/// Finite state machine driving the behavior of one owner.
///
/// Exactly one state is current at any time. Transitions are gated by the
/// target's predecessor set and run as exit, reassign, enter, notify. Ticks
/// and contact events are forwarded to the current state only.
pub struct StateMachine<O, S: State<O>> {
    id: MachineId,
    owner: O,
    current: S,
    previous: Option<S>,
    pending: VecDeque<S>,
    listeners: Listeners<O, S>,
    history: StateHistory<S::Id>,
    diagnostics: Diagnostics,
    config: MachineConfig,
}

impl<O, S: State<O>> StateMachine<O, S> {
    /// Create a machine and enter `initial` immediately.
    ///
    /// `initial.on_enter` has run by the time this returns. Requests it
    /// issued have been applied as well.
    pub fn new(owner: O, initial: S) -> Self {
        Self::with_config(owner, initial, MachineConfig::default())
    }

    /// Create a machine with explicit configuration.
    pub fn with_config(owner: O, initial: S, config: MachineConfig) -> Self {
        Self::assemble(owner, initial, config, Listeners::default())
    }

    pub(crate) fn assemble(
        owner: O,
        initial: S,
        config: MachineConfig,
        listeners: Listeners<O, S>,
    ) -> Self {
        let mut machine = Self {
            id: Uuid::new_v4(),
            owner,
            current: initial,
            previous: None,
            pending: VecDeque::new(),
            listeners,
            history: StateHistory::with_capacity(config.history_capacity),
            diagnostics: Diagnostics::default(),
            config,
        };

        debug!(
            machine = %machine.id,
            label = machine.label(),
            state = machine.current.id().name(),
            "entering initial state"
        );
        machine.dispatch(|state, ctx| state.on_enter(ctx));
        machine
    }

    /// Identifier of this machine, as it appears in logs.
    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Configuration the machine was created with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The owner whose behavior this machine drives.
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Mutable access to the owner outside of hooks.
    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    /// The active state. Never absent after construction.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// The state that was current before the last committed transition.
    ///
    /// `None` until the first transition.
    pub fn previous_state(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    /// Identity of the active state.
    pub fn current_id(&self) -> S::Id {
        self.current.id()
    }

    /// Identity of [`previous_state`](Self::previous_state).
    pub fn previous_id(&self) -> Option<S::Id> {
        self.previous.as_ref().map(StateKind::id)
    }

    /// Whether the active state has identity `id`.
    pub fn is_in(&self, id: S::Id) -> bool {
        self.current.id() == id
    }

    /// Recent committed transitions. Empty unless history is enabled.
    pub fn history(&self) -> &StateHistory<S::Id> {
        &self.history
    }

    /// Snapshot of the commit, rejection and drop counters.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Check whether `next` would be accepted from the current state.
    ///
    /// Uses the same rule as [`change_state`](Self::change_state) without
    /// running any hook.
    pub fn check_transition(&self, next: &S) -> Result<(), TransitionRejected<S::Id>> {
        let from = self.current.id();
        let to = next.id();

        if from == to {
            return Err(TransitionRejected::SelfTransition { state: to });
        }
        if !next.allowed_predecessors().admits(from) {
            return Err(TransitionRejected::NotPermitted { from, to });
        }
        Ok(())
    }

    /// Request a transition to `next`.
    ///
    /// Ignored when `next` has the current state's identity or when its
    /// predecessor set does not admit the current state. Otherwise the
    /// current state's `on_exit` runs, `next` becomes current, its
    /// `on_enter` runs, and every listener is notified, in that order,
    /// before this returns.
    pub fn change_state(&mut self, next: S) {
        self.discard_stale();
        self.pending.push_back(next);
        self.drain_pending();
    }

    /// Forward a variable-rate tick to the current state.
    pub fn update(&mut self, delta_time: f32) {
        self.dispatch(|state, ctx| state.on_update(ctx, delta_time));
    }

    /// Forward a fixed-rate tick to the current state.
    pub fn fixed_update(&mut self, fixed_delta_time: f32) {
        self.dispatch(|state, ctx| state.on_fixed_update(ctx, fixed_delta_time));
    }

    /// Register a listener for committed transitions.
    ///
    /// Listeners run synchronously, in registration order, once per
    /// transition.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&StateChangeEvent<'_, O, S>) + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn label(&self) -> &str {
        self.config.label.as_deref().unwrap_or("")
    }

    /// Run one hook on the current state, then apply what it requested.
    ///
    /// The target is borrowed once up front, so requests made by the hook
    /// only affect later calls.
    fn dispatch<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut S, &mut Context<'_, O, S>),
    {
        self.discard_stale();
        let mut ctx = Context::new(&mut self.owner, &mut self.pending);
        hook(&mut self.current, &mut ctx);
        self.drain_pending();
    }

    /// Drop requests left behind when a hook or listener unwound out of an
    /// earlier call. They belong to that call and must not leak into this one.
    fn discard_stale(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let stale = self.pending.len();
        self.pending.clear();
        self.diagnostics.dropped += stale as u64;
        warn!(
            machine = %self.id,
            label = self.label(),
            state = self.current.id().name(),
            stale,
            "discarding requests left by an interrupted transition"
        );
    }

    /// Apply queued requests in issue order.
    ///
    /// Only committed transitions count toward the chain limit.
    fn drain_pending(&mut self) {
        let limit = self.config.chain_limit();
        let mut committed = 0;

        while let Some(next) = self.pending.pop_front() {
            if committed == limit {
                let dropped = self.pending.len() + 1;
                self.pending.clear();
                self.diagnostics.dropped += dropped as u64;
                warn!(
                    machine = %self.id,
                    label = self.label(),
                    state = self.current.id().name(),
                    dropped,
                    limit,
                    "transition chain limit reached, dropping requests"
                );
                return;
            }
            if self.apply(next) {
                committed += 1;
            }
        }
    }

    /// Validate and commit one request. Returns whether it committed.
    fn apply(&mut self, next: S) -> bool {
        if let Err(rejection) = self.check_transition(&next) {
            self.diagnostics.count_rejection(&rejection);
            if self.config.trace_rejections {
                debug!(
                    machine = %self.id,
                    label = self.label(),
                    target = rejection.target().name(),
                    %rejection,
                    "transition rejected"
                );
            }
            return false;
        }

        let from = self.current.id();
        let to = next.id();

        let mut ctx = Context::new(&mut self.owner, &mut self.pending);
        self.current.on_exit(&mut ctx);

        let exited = std::mem::replace(&mut self.current, next);
        self.previous = Some(exited);

        let mut ctx = Context::new(&mut self.owner, &mut self.pending);
        self.current.on_enter(&mut ctx);

        self.diagnostics.committed += 1;
        if self.history.is_enabled() {
            self.history.record(StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                sequence: self.diagnostics.committed,
            });
        }
        debug!(
            machine = %self.id,
            label = self.label(),
            from = from.name(),
            to = to.name(),
            "state changed"
        );

        if let Some(previous) = self.previous.as_ref() {
            let event = StateChangeEvent::new(&self.owner, previous, &self.current);
            self.listeners.notify(&event);
        }
        true
    }
}

impl<O, S: State<O>> StateMachine<O, S> {
    /// Forward a collision start to the current state.
    pub fn collision_enter<C>(&mut self, other: &C)
    where
        S: CollisionHooks<O, C>,
    {
        self.dispatch(|state, ctx| state.on_collision_enter(ctx, other));
    }

    /// Forward an ongoing collision to the current state.
    pub fn collision_stay<C>(&mut self, other: &C)
    where
        S: CollisionHooks<O, C>,
    {
        self.dispatch(|state, ctx| state.on_collision_stay(ctx, other));
    }

    /// Forward a collision end to the current state.
    pub fn collision_exit<C>(&mut self, other: &C)
    where
        S: CollisionHooks<O, C>,
    {
        self.dispatch(|state, ctx| state.on_collision_exit(ctx, other));
    }

    /// Forward a trigger-volume entry to the current state.
    pub fn trigger_enter<T>(&mut self, other: &T)
    where
        S: TriggerHooks<O, T>,
    {
        self.dispatch(|state, ctx| state.on_trigger_enter(ctx, other));
    }

    /// Forward an ongoing trigger overlap to the current state.
    pub fn trigger_stay<T>(&mut self, other: &T)
    where
        S: TriggerHooks<O, T>,
    {
        self.dispatch(|state, ctx| state.on_trigger_stay(ctx, other));
    }

    /// Forward a trigger-volume exit to the current state.
    pub fn trigger_exit<T>(&mut self, other: &T)
    where
        S: TriggerHooks<O, T>,
    {
        self.dispatch(|state, ctx| state.on_trigger_exit(ctx, other));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Predecessors;
    use serde::{Deserialize, Serialize};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum BehaviorId {
        Idle,
        Walk,
        Jump,
        Attack,
    }

    impl StateId for BehaviorId {
        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "Idle",
                Self::Walk => "Walk",
                Self::Jump => "Jump",
                Self::Attack => "Attack",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum Behavior {
        Idle,
        Walk { ticks: u32 },
        Jump,
        Attack,
    }

    impl Behavior {
        fn of(id: BehaviorId) -> Self {
            match id {
                BehaviorId::Idle => Self::Idle,
                BehaviorId::Walk => Self::Walk { ticks: 0 },
                BehaviorId::Jump => Self::Jump,
                BehaviorId::Attack => Self::Attack,
            }
        }
    }

    type Journal = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct Avatar {
        journal: Journal,
        update_requests: Vec<BehaviorId>,
        enter_chain: HashMap<BehaviorId, BehaviorId>,
        exit_chain: HashMap<BehaviorId, BehaviorId>,
    }

    impl Avatar {
        fn note(&self, entry: String) {
            self.journal.borrow_mut().push(entry);
        }
    }

    struct Contact(&'static str);
    struct Contact2D(u32);
    struct Zone(&'static str);

    impl StateKind for Behavior {
        type Id = BehaviorId;

        fn id(&self) -> BehaviorId {
            match self {
                Self::Idle => BehaviorId::Idle,
                Self::Walk { .. } => BehaviorId::Walk,
                Self::Jump => BehaviorId::Jump,
                Self::Attack => BehaviorId::Attack,
            }
        }

        fn allowed_predecessors(&self) -> Predecessors<BehaviorId> {
            match self {
                Self::Idle => Predecessors::any(),
                Self::Walk { .. } => Predecessors::from_static(&[BehaviorId::Idle]),
                Self::Jump => Predecessors::from_static(&[BehaviorId::Idle, BehaviorId::Walk]),
                Self::Attack => Predecessors::from_static(&[BehaviorId::Jump]),
            }
        }
    }

    impl State<Avatar> for Behavior {
        fn on_enter(&mut self, ctx: &mut Context<'_, Avatar, Self>) {
            ctx.owner().note(format!("{}.enter", self.id().name()));
            if let Some(next) = ctx.owner_mut().enter_chain.remove(&self.id()) {
                ctx.change_state(Behavior::of(next));
            }
        }

        fn on_exit(&mut self, ctx: &mut Context<'_, Avatar, Self>) {
            ctx.owner().note(format!("{}.exit", self.id().name()));
            if let Some(next) = ctx.owner_mut().exit_chain.remove(&self.id()) {
                ctx.change_state(Behavior::of(next));
            }
        }

        fn on_update(&mut self, ctx: &mut Context<'_, Avatar, Self>, delta_time: f32) {
            if let Self::Walk { ticks } = self {
                *ticks += 1;
            }
            ctx.owner()
                .note(format!("{}.update({delta_time})", self.id().name()));
            let requests: Vec<_> = ctx.owner_mut().update_requests.drain(..).collect();
            for id in requests {
                ctx.change_state(Behavior::of(id));
            }
        }

        fn on_fixed_update(&mut self, ctx: &mut Context<'_, Avatar, Self>, fixed_delta_time: f32) {
            ctx.owner()
                .note(format!("{}.fixed({fixed_delta_time})", self.id().name()));
        }
    }

    impl CollisionHooks<Avatar, Contact> for Behavior {
        fn on_collision_enter(&mut self, ctx: &mut Context<'_, Avatar, Self>, other: &Contact) {
            ctx.owner()
                .note(format!("{}.collision_enter({})", self.id().name(), other.0));
        }

        fn on_collision_exit(&mut self, ctx: &mut Context<'_, Avatar, Self>, other: &Contact) {
            ctx.owner()
                .note(format!("{}.collision_exit({})", self.id().name(), other.0));
        }
    }

    impl CollisionHooks<Avatar, Contact2D> for Behavior {
        fn on_collision_stay(&mut self, ctx: &mut Context<'_, Avatar, Self>, other: &Contact2D) {
            ctx.owner()
                .note(format!("{}.collision_stay_2d({})", self.id().name(), other.0));
        }
    }

    impl TriggerHooks<Avatar, Zone> for Behavior {
        fn on_trigger_enter(&mut self, ctx: &mut Context<'_, Avatar, Self>, other: &Zone) {
            ctx.owner()
                .note(format!("{}.trigger_enter({})", self.id().name(), other.0));
            if other.0 == "spring" {
                ctx.change_state(Behavior::Jump);
            }
        }
    }

    fn machine() -> (StateMachine<Avatar, Behavior>, Journal) {
        let avatar = Avatar::default();
        let journal = Rc::clone(&avatar.journal);
        let mut machine = StateMachine::new(avatar, Behavior::Idle);

        let log = Rc::clone(&journal);
        machine.subscribe(move |event| {
            log.borrow_mut().push(format!(
                "notify({}->{})",
                event.previous().id().name(),
                event.current().id().name()
            ));
        });
        (machine, journal)
    }

    fn take(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.borrow_mut())
    }

    #[test]
    fn construction_enters_initial_state() {
        let (machine, journal) = machine();

        assert_eq!(take(&journal), vec!["Idle.enter"]);
        assert_eq!(machine.current_id(), BehaviorId::Idle);
        assert!(machine.previous_state().is_none());
        assert!(machine.previous_id().is_none());
    }

    #[test]
    fn permitted_transition_runs_exit_enter_notify() {
        let (mut machine, journal) = machine();
        take(&journal);

        machine.change_state(Behavior::Walk { ticks: 0 });

        assert_eq!(
            take(&journal),
            vec!["Idle.exit", "Walk.enter", "notify(Idle->Walk)"]
        );
        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(machine.previous_state(), Some(&Behavior::Idle));
        assert_eq!(machine.diagnostics().committed, 1);
    }

    #[test]
    fn self_transition_is_ignored() {
        let (mut machine, journal) = machine();
        take(&journal);

        machine.change_state(Behavior::Idle);

        assert!(take(&journal).is_empty());
        assert!(machine.previous_state().is_none());
        assert_eq!(machine.diagnostics().rejected_self, 1);
    }

    #[test]
    fn self_transition_ignores_instance_data() {
        let (mut machine, journal) = machine();
        machine.change_state(Behavior::Walk { ticks: 0 });
        machine.update(0.5);
        take(&journal);

        machine.change_state(Behavior::Walk { ticks: 99 });

        assert!(take(&journal).is_empty());
        assert_eq!(machine.current_state(), &Behavior::Walk { ticks: 1 });
    }

    #[test]
    fn unlisted_predecessor_is_ignored() {
        let (mut machine, journal) = machine();
        machine.change_state(Behavior::Walk { ticks: 0 });
        take(&journal);

        machine.change_state(Behavior::Attack);

        assert!(take(&journal).is_empty());
        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(machine.previous_id(), Some(BehaviorId::Idle));
        assert_eq!(machine.diagnostics().rejected_predecessor, 1);
    }

    #[test]
    fn wildcard_accepts_any_current_state() {
        let (mut machine, _journal) = machine();
        machine.change_state(Behavior::Jump);
        machine.change_state(Behavior::Attack);
        assert_eq!(machine.current_id(), BehaviorId::Attack);

        machine.change_state(Behavior::Idle);

        assert_eq!(machine.current_id(), BehaviorId::Idle);
        assert_eq!(machine.previous_id(), Some(BehaviorId::Attack));
    }

    #[test]
    fn check_transition_matches_change_state() {
        let (machine, _journal) = machine();

        assert_eq!(
            machine.check_transition(&Behavior::Idle),
            Err(TransitionRejected::SelfTransition {
                state: BehaviorId::Idle
            })
        );
        assert_eq!(
            machine.check_transition(&Behavior::Attack),
            Err(TransitionRejected::NotPermitted {
                from: BehaviorId::Idle,
                to: BehaviorId::Attack
            })
        );
        assert!(machine.check_transition(&Behavior::Jump).is_ok());
        assert_eq!(machine.diagnostics(), Diagnostics::default());
    }

    #[test]
    fn ticks_forward_to_current_state_only() {
        let (mut machine, journal) = machine();
        take(&journal);

        machine.update(0.016);
        machine.fixed_update(0.02);

        assert_eq!(take(&journal), vec!["Idle.update(0.016)", "Idle.fixed(0.02)"]);
        assert_eq!(machine.diagnostics().committed, 0);
    }

    #[test]
    fn hook_request_applies_after_hook_returns() {
        let (mut machine, journal) = machine();
        machine.owner_mut().update_requests.push(BehaviorId::Walk);
        take(&journal);

        machine.update(1.0);

        assert_eq!(
            take(&journal),
            vec![
                "Idle.update(1)",
                "Idle.exit",
                "Walk.enter",
                "notify(Idle->Walk)"
            ]
        );

        machine.update(1.0);
        assert_eq!(take(&journal), vec!["Walk.update(1)"]);
    }

    #[test]
    fn last_valid_request_in_a_hook_wins() {
        let (mut machine, _journal) = machine();
        machine
            .owner_mut()
            .update_requests
            .extend([BehaviorId::Walk, BehaviorId::Attack, BehaviorId::Jump]);

        machine.update(1.0);

        assert_eq!(machine.current_id(), BehaviorId::Jump);
        assert_eq!(machine.previous_id(), Some(BehaviorId::Walk));
        assert_eq!(machine.diagnostics().committed, 2);
        assert_eq!(machine.diagnostics().rejected_predecessor, 1);
    }

    #[test]
    fn enter_request_runs_after_notification() {
        let (mut machine, journal) = machine();
        machine
            .owner_mut()
            .enter_chain
            .insert(BehaviorId::Jump, BehaviorId::Attack);
        take(&journal);

        machine.change_state(Behavior::Jump);

        assert_eq!(
            take(&journal),
            vec![
                "Idle.exit",
                "Jump.enter",
                "notify(Idle->Jump)",
                "Jump.exit",
                "Attack.enter",
                "notify(Jump->Attack)"
            ]
        );
        assert_eq!(machine.previous_id(), Some(BehaviorId::Jump));
    }

    #[test]
    fn exit_request_runs_after_notification() {
        let (mut machine, journal) = machine();
        machine
            .owner_mut()
            .exit_chain
            .insert(BehaviorId::Idle, BehaviorId::Attack);
        take(&journal);

        machine.change_state(Behavior::Jump);

        assert_eq!(
            take(&journal),
            vec![
                "Idle.exit",
                "Jump.enter",
                "notify(Idle->Jump)",
                "Jump.exit",
                "Attack.enter",
                "notify(Jump->Attack)"
            ]
        );
        assert_eq!(machine.current_id(), BehaviorId::Attack);
        assert_eq!(machine.diagnostics().committed, 2);
    }

    #[test]
    fn exit_request_for_the_incoming_state_is_a_self_transition() {
        let (mut machine, journal) = machine();
        machine
            .owner_mut()
            .exit_chain
            .insert(BehaviorId::Idle, BehaviorId::Walk);
        take(&journal);

        machine.change_state(Behavior::Walk { ticks: 0 });

        assert_eq!(
            take(&journal),
            vec!["Idle.exit", "Walk.enter", "notify(Idle->Walk)"]
        );
        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(machine.previous_id(), Some(BehaviorId::Idle));
        assert_eq!(machine.diagnostics().rejected_self, 1);
    }

    #[test]
    fn initial_enter_request_is_applied_during_construction() {
        let mut avatar = Avatar::default();
        avatar.enter_chain.insert(BehaviorId::Idle, BehaviorId::Walk);
        let journal = Rc::clone(&avatar.journal);

        let machine = StateMachine::new(avatar, Behavior::Idle);

        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(take(&journal), vec!["Idle.enter", "Idle.exit", "Walk.enter"]);
    }

    #[test]
    fn chain_limit_drops_excess_requests() {
        let avatar = Avatar::default();
        let config = MachineConfig {
            max_chained_transitions: 1,
            ..MachineConfig::default()
        };
        let mut machine = StateMachine::with_config(avatar, Behavior::Idle, config);
        machine
            .owner_mut()
            .update_requests
            .extend([BehaviorId::Walk, BehaviorId::Jump, BehaviorId::Attack]);

        machine.update(1.0);

        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(machine.diagnostics().dropped, 2);

        machine.change_state(Behavior::Jump);
        assert_eq!(machine.current_id(), BehaviorId::Jump);
    }

    #[test]
    fn rejected_requests_do_not_count_toward_chain_limit() {
        let config = MachineConfig {
            max_chained_transitions: 2,
            ..MachineConfig::default()
        };
        let mut machine = StateMachine::with_config(Avatar::default(), Behavior::Idle, config);
        let requests = machine.owner_mut();
        requests.update_requests.extend([BehaviorId::Attack; 65]);
        requests.update_requests.push(BehaviorId::Walk);

        machine.update(1.0);

        assert_eq!(machine.current_id(), BehaviorId::Walk);
        assert_eq!(
            machine.diagnostics(),
            Diagnostics {
                committed: 1,
                rejected_self: 0,
                rejected_predecessor: 65,
                dropped: 0,
            }
        );
    }

    #[test]
    fn interrupted_drain_does_not_leak_into_next_call() {
        let (mut machine, journal) = machine();
        let armed = Rc::new(std::cell::Cell::new(true));
        let trip = Rc::clone(&armed);
        machine.subscribe(move |_| {
            if trip.replace(false) {
                panic!("listener failure");
            }
        });
        machine
            .owner_mut()
            .update_requests
            .extend([BehaviorId::Jump, BehaviorId::Attack]);
        take(&journal);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            machine.update(1.0);
        }));
        assert!(outcome.is_err());
        assert_eq!(machine.current_id(), BehaviorId::Jump);
        take(&journal);

        machine.fixed_update(0.02);

        assert_eq!(take(&journal), vec!["Jump.fixed(0.02)"]);
        assert_eq!(machine.current_id(), BehaviorId::Jump);
        assert_eq!(machine.diagnostics().committed, 1);
        assert_eq!(machine.diagnostics().dropped, 1);

        machine.change_state(Behavior::Attack);
        assert_eq!(machine.current_id(), BehaviorId::Attack);
    }

    #[test]
    fn collision_events_reach_matching_hooks() {
        let (mut machine, journal) = machine();
        take(&journal);

        machine.collision_enter(&Contact("wall"));
        machine.collision_stay(&Contact("wall"));
        machine.collision_stay(&Contact2D(7));
        machine.collision_exit(&Contact("wall"));
        machine.collision_enter(&Contact2D(7));

        assert_eq!(
            take(&journal),
            vec![
                "Idle.collision_enter(wall)",
                "Idle.collision_stay_2d(7)",
                "Idle.collision_exit(wall)"
            ]
        );
    }

    #[test]
    fn trigger_event_can_request_transition() {
        let (mut machine, journal) = machine();
        take(&journal);

        machine.trigger_stay(&Zone("spring"));
        assert_eq!(machine.current_id(), BehaviorId::Idle);

        machine.trigger_enter(&Zone("spring"));

        assert_eq!(
            take(&journal),
            vec![
                "Idle.trigger_enter(spring)",
                "Idle.exit",
                "Jump.enter",
                "notify(Idle->Jump)"
            ]
        );
    }

    #[test]
    fn listeners_are_notified_in_registration_order() {
        let (mut machine, journal) = machine();
        let log = Rc::clone(&journal);
        let second = machine.subscribe(move |event| {
            log.borrow_mut()
                .push(format!("second({})", event.current().id().name()));
        });
        assert_eq!(machine.listener_count(), 2);
        take(&journal);

        machine.change_state(Behavior::Jump);
        assert_eq!(take(&journal).last().map(String::as_str), Some("second(Jump)"));

        assert!(machine.unsubscribe(second));
        machine.change_state(Behavior::Idle);
        assert_eq!(
            take(&journal),
            vec!["Jump.exit", "Idle.enter", "notify(Jump->Idle)"]
        );
    }

    #[test]
    fn history_records_committed_transitions() {
        let config = MachineConfig {
            history_capacity: 8,
            ..MachineConfig::default()
        };
        let mut machine = StateMachine::with_config(Avatar::default(), Behavior::Idle, config);

        machine.change_state(Behavior::Walk { ticks: 0 });
        machine.change_state(Behavior::Attack);
        machine.change_state(Behavior::Jump);

        assert_eq!(
            machine.history().get_path(),
            vec![BehaviorId::Idle, BehaviorId::Walk, BehaviorId::Jump]
        );
        assert_eq!(machine.history().last().map(|t| t.sequence), Some(2));
    }

    #[test]
    fn history_is_off_by_default() {
        let (mut machine, _journal) = machine();
        machine.change_state(Behavior::Jump);
        assert!(machine.history().is_empty());
    }

    #[traced_test]
    #[test]
    fn rejections_are_logged_when_enabled() {
        let config = MachineConfig {
            trace_rejections: true,
            ..MachineConfig::labeled("hero")
        };
        let mut machine = StateMachine::with_config(Avatar::default(), Behavior::Idle, config);

        machine.change_state(Behavior::Attack);

        assert!(logs_contain("transition rejected"));
        assert!(logs_contain("Attack does not accept Idle as a predecessor"));
        assert!(logs_contain("hero"));
    }

    #[traced_test]
    #[test]
    fn rejections_are_silent_by_default() {
        let (mut machine, _journal) = machine();

        machine.change_state(Behavior::Attack);

        assert!(!logs_contain("transition rejected"));
        assert_eq!(machine.diagnostics().rejected(), 1);
    }

    #[test]
    fn machines_get_distinct_ids() {
        let (a, _) = machine();
        let (b, _) = machine();
        assert_ne!(a.id(), b.id());
    }
}
