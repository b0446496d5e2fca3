//! State identity and the behavior contract every state implements.
//!
//! A state is split in two layers:
//! - [`StateKind`] gives the state a stable identity and its predecessor policy.
//!   It knows nothing about the owner, so it can be inspected without a machine.
//! - [`State`] adds the owner-facing lifecycle and per-tick hooks.

use super::predecessors::Predecessors;
use crate::machine::Context;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Stable discriminant naming one state variant.
///
/// Identities are compared by value, so two separate instances of the same
/// state variant share one identity. Implement this on a fieldless enum, or
/// generate one with [`state_ids!`](crate::state_ids).
///
/// # Example
///
/// ```rust
/// use stance::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Stance {
///     Idle,
///     Walk,
/// }
///
/// impl StateId for Stance {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///         }
///     }
/// }
///
/// assert_eq!(Stance::Walk.name(), "Walk");
/// ```
pub trait StateId:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the identity's name for display/logging.
    fn name(&self) -> &'static str;
}

/// Identity and transition policy of a state.
///
/// Both methods must be pure: they are queried on every transition attempt
/// and must not depend on, or change, the owner.
pub trait StateKind {
    /// The closed set of identities this state type can take.
    type Id: StateId;

    /// Identity of this state instance.
    fn id(&self) -> Self::Id;

    /// States from which a transition into this state is permitted.
    ///
    /// Called on every transition request. Prefer
    /// [`Predecessors::from_static`] for fixed sets.
    fn allowed_predecessors(&self) -> Predecessors<Self::Id>;
}

/// Behavior hooks driven by a [`StateMachine`](crate::machine::StateMachine).
///
/// `O` is the owner type. It is opaque to the machine; states reach it
/// through the [`Context`] passed to every hook, which also accepts
/// transition requests.
///
/// # Example
///
/// ```rust
/// use stance::core::{Predecessors, State, StateKind};
/// use stance::machine::{Context, StateMachine};
/// use stance::state_ids;
///
/// state_ids! {
///     pub enum LampId { Off, On }
/// }
///
/// enum Lamp {
///     Off,
///     On { burned: f32 },
/// }
///
/// impl StateKind for Lamp {
///     type Id = LampId;
///
///     fn id(&self) -> LampId {
///         match self {
///             Self::Off => LampId::Off,
///             Self::On { .. } => LampId::On,
///         }
///     }
///
///     fn allowed_predecessors(&self) -> Predecessors<LampId> {
///         Predecessors::any()
///     }
/// }
///
/// impl State<u32> for Lamp {
///     fn on_enter(&mut self, ctx: &mut Context<'_, u32, Self>) {
///         *ctx.owner_mut() += 1;
///     }
///
///     fn on_exit(&mut self, _ctx: &mut Context<'_, u32, Self>) {}
///
///     fn on_update(&mut self, _ctx: &mut Context<'_, u32, Self>, delta_time: f32) {
///         if let Self::On { burned } = self {
///             *burned += delta_time;
///         }
///     }
///
///     fn on_fixed_update(&mut self, _ctx: &mut Context<'_, u32, Self>, _fixed_delta_time: f32) {}
/// }
///
/// let mut machine = StateMachine::new(0u32, Lamp::Off);
/// machine.change_state(Lamp::On { burned: 0.0 });
/// assert_eq!(*machine.owner(), 2);
/// ```
pub trait State<O>: StateKind + Sized {
    /// Called once when this state becomes current.
    fn on_enter(&mut self, ctx: &mut Context<'_, O, Self>);

    /// Called once when this state stops being current, before the next
    /// state's `on_enter`.
    fn on_exit(&mut self, ctx: &mut Context<'_, O, Self>);

    /// Called for every `update` forwarded while this state is current.
    fn on_update(&mut self, ctx: &mut Context<'_, O, Self>, delta_time: f32);

    /// Called for every `fixed_update` forwarded while this state is current.
    fn on_fixed_update(&mut self, ctx: &mut Context<'_, O, Self>, fixed_delta_time: f32);
}
