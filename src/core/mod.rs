//! Core state types.
//!
//! This module contains the data model shared by every machine:
//! - State identity and the behavior contract via `StateId`, `StateKind` and `State`
//! - Predecessor policies gating transitions
//! - Optional collision/trigger capabilities
//! - Bounded transition history
//!
//! Nothing here owns a state or drives it; that is the job of
//! [`StateMachine`](crate::machine::StateMachine).

mod history;
mod hooks;
mod predecessors;
mod state;

pub use history::{StateHistory, StateTransition};
pub use hooks::{CollisionHooks, TriggerHooks};
pub use predecessors::Predecessors;
pub use state::{State, StateId, StateKind};
