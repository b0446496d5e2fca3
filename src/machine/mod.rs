//! The state machine engine.
//!
//! A [`StateMachine`] owns the active state of one owner and mediates every
//! change to it.
//!
//! # Key Concepts
//!
//! - **Transitions**: `change_state` is gated by the target's predecessor set.
//!   Self-transitions and unlisted predecessors are ignored without error.
//! - **Ordering**: a committed transition always runs exit, reassign, enter,
//!   notify, in that order, before the call returns.
//! - **Forwarding**: ticks and contact events reach the current state only.
//! - **Reentrancy**: hooks request transitions through their [`Context`];
//!   requests are applied in order once the hook returns.
//!
//! # Example
//!
//! ```rust
//! use stance::core::{Predecessors, State, StateId, StateKind};
//! use stance::machine::{Context, StateMachine};
//! use stance::state_ids;
//!
//! state_ids! {
//!     pub enum DoorId { Closed, Open, Locked }
//! }
//!
//! enum Door {
//!     Closed,
//!     Open,
//!     Locked,
//! }
//!
//! impl StateKind for Door {
//!     type Id = DoorId;
//!
//!     fn id(&self) -> DoorId {
//!         match self {
//!             Self::Closed => DoorId::Closed,
//!             Self::Open => DoorId::Open,
//!             Self::Locked => DoorId::Locked,
//!         }
//!     }
//!
//!     fn allowed_predecessors(&self) -> Predecessors<DoorId> {
//!         match self {
//!             Self::Closed => Predecessors::any(),
//!             Self::Open | Self::Locked => Predecessors::only([DoorId::Closed]),
//!         }
//!     }
//! }
//!
//! impl State<Vec<&'static str>> for Door {
//!     fn on_enter(&mut self, ctx: &mut Context<'_, Vec<&'static str>, Self>) {
//!         ctx.owner_mut().push(self.id().name());
//!     }
//!     fn on_exit(&mut self, _ctx: &mut Context<'_, Vec<&'static str>, Self>) {}
//!     fn on_update(&mut self, _ctx: &mut Context<'_, Vec<&'static str>, Self>, _dt: f32) {}
//!     fn on_fixed_update(&mut self, _ctx: &mut Context<'_, Vec<&'static str>, Self>, _dt: f32) {}
//! }
//!
//! let mut door = StateMachine::new(Vec::new(), Door::Closed);
//! door.change_state(Door::Open);
//! door.change_state(Door::Locked); // Open is not a predecessor of Locked
//!
//! assert_eq!(door.current_id(), DoorId::Open);
//! assert_eq!(door.owner(), &vec!["Closed", "Open"]);
//! ```

mod config;
mod context;
mod diagnostics;
mod events;
mod state_machine;

pub use config::{MachineConfig, DEFAULT_MAX_CHAINED_TRANSITIONS};
pub use context::Context;
pub use diagnostics::{Diagnostics, TransitionRejected};
pub use events::{Listener, ListenerId, StateChangeEvent};
pub(crate) use events::Listeners;
pub use state_machine::{MachineId, StateMachine};
