//! Catstaurant - serve the cats before they run out of patience
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar, customers, serving, spawning)
//! - `renderer`: Asset lookup and Canvas 2D presentation
//! - `audio`: Sound cues for simulation events
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{SpawnCurve, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical ticks per simulated second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep (one display frame)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs.max(0.0) * consts::TICK_RATE as f32).round() as u32
}

/// Convert whole simulation ticks back to seconds
#[inline]
pub fn ticks_to_secs(ticks: u32) -> f32 {
    ticks as f32 / consts::TICK_RATE as f32
}
