//! Stance: an owner-parameterized finite state machine
//!
//! Stance drives per-entity behavior in a real-time simulation. Each owner
//! (a game object, an agent, a device) gets one [`StateMachine`] holding
//! exactly one active state. Behavior code requests transitions freely; the
//! machine admits only those the target state's predecessor set allows and
//! silently ignores the rest.
//!
//! # Core Concepts
//!
//! - **State identity**: a closed `StateId` enum, one variant per state kind
//! - **Predecessors**: the policy naming which states may precede a state
//! - **Hooks**: lifecycle and tick hooks, plus optional collision/trigger hooks
//! - **Notifications**: synchronous listeners fired after each transition
//!
//! # Example
//!
//! ```rust
//! use stance::{state_ids, Context, Predecessors, State, StateKind, StateMachine};
//!
//! state_ids! {
//!     pub enum HeroId { Idle, Walk, Jump, Attack }
//! }
//!
//! enum Hero {
//!     Idle,
//!     Walk,
//!     Jump,
//!     Attack,
//! }
//!
//! impl StateKind for Hero {
//!     type Id = HeroId;
//!
//!     fn id(&self) -> HeroId {
//!         match self {
//!             Self::Idle => HeroId::Idle,
//!             Self::Walk => HeroId::Walk,
//!             Self::Jump => HeroId::Jump,
//!             Self::Attack => HeroId::Attack,
//!         }
//!     }
//!
//!     fn allowed_predecessors(&self) -> Predecessors<HeroId> {
//!         match self {
//!             Self::Idle => Predecessors::any(),
//!             Self::Walk => Predecessors::only([HeroId::Idle]),
//!             Self::Jump => Predecessors::only([HeroId::Idle, HeroId::Walk]),
//!             Self::Attack => Predecessors::only([HeroId::Jump]),
//!         }
//!     }
//! }
//!
//! impl State<String> for Hero {
//!     fn on_enter(&mut self, _ctx: &mut Context<'_, String, Self>) {}
//!     fn on_exit(&mut self, _ctx: &mut Context<'_, String, Self>) {}
//!     fn on_update(&mut self, _ctx: &mut Context<'_, String, Self>, _dt: f32) {}
//!     fn on_fixed_update(&mut self, _ctx: &mut Context<'_, String, Self>, _dt: f32) {}
//! }
//!
//! let mut hero = StateMachine::new("hero".to_string(), Hero::Idle);
//! hero.change_state(Hero::Walk);
//! assert_eq!(hero.current_id(), HeroId::Walk);
//! assert_eq!(hero.previous_id(), Some(HeroId::Idle));
//!
//! hero.change_state(Hero::Attack); // only Jump may precede Attack
//! assert_eq!(hero.current_id(), HeroId::Walk);
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{CollisionHooks, Predecessors, State, StateId, StateKind, TriggerHooks};
pub use machine::{Context, MachineConfig, StateChangeEvent, StateMachine};
