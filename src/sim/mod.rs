//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (customers in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod customer;
pub mod input;
pub mod layout;
pub mod service;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use input::{HeldKeys, InputLatch, TickInput};
pub use service::Interaction;
pub use spawn::{patience_ticks, spawn_interval_secs};
pub use state::{
    Avatar, CatBreed, Customer, CustomerState, Facing, GameEvent, GamePhase, GameState, ItemKind,
    MusicTrack,
};
pub use tick::{restart, start, tick};
