//! Optional collision and trigger capabilities.
//!
//! The physics collaborator supplies the payload types; the machine only
//! forwards them to the current state. A state type opts in per payload, so
//! 3D and 2D contacts are simply two implementations with different `C`.

use super::state::State;
use crate::machine::Context;

/// Collision notifications for payload type `C`.
///
/// Every hook defaults to a no-op; override only the phases you need.
pub trait CollisionHooks<O, C>: State<O> {
    fn on_collision_enter(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &C) {}

    fn on_collision_stay(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &C) {}

    fn on_collision_exit(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &C) {}
}

/// Trigger-volume notifications for payload type `T`.
///
/// Every hook defaults to a no-op; override only the phases you need.
pub trait TriggerHooks<O, T>: State<O> {
    fn on_trigger_enter(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &T) {}

    fn on_trigger_stay(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &T) {}

    fn on_trigger_exit(&mut self, _ctx: &mut Context<'_, O, Self>, _other: &T) {}
}
