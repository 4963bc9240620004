//! Fixed timestep simulation tick
//!
//! One call per display frame, one `SIM_DT` step per call. Order within a
//! tick: avatar movement, proximity, interact, customers, spawner.

use super::customer::update_customers;
use super::input::TickInput;
use super::service::{interact, update_proximity};
use super::spawn::{spawn_customer, spawn_interval_secs, update_spawner};
use super::state::{Avatar, GameEvent, GamePhase, GameState, MusicTrack};

/// Start a session from the title screen
///
/// Returns false (and does nothing) unless the phase is `NotStarted`.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::NotStarted {
        return false;
    }
    reset_session(state);
    log::info!("Game started (seed {})", state.seed);
    true
}

/// Start a new session after a game over
///
/// Returns false (and does nothing) unless the phase is `GameOver`.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }
    reset_session(state);
    log::info!("Game restarted");
    true
}

/// Throw away all session state and let the first cat in
fn reset_session(state: &mut GameState) {
    state.customers.clear();
    state.score = 0;
    state.carried = None;
    state.nearby_station = None;
    state.nearby_customer = None;
    state.avatar = Avatar::default();
    state.spawn_interval_secs = spawn_interval_secs(&state.tuning, 0);
    state.last_spawn_tick = state.time_ticks;
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::Music(MusicTrack::Gameplay));
    spawn_customer(state);
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::NotStarted => {
            if input.interact_pressed {
                start(state);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.interact_pressed {
                restart(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    state.avatar.step(&input.held, state.tuning.avatar_speed);

    update_proximity(state);
    if input.interact_pressed {
        interact(state);
    }

    update_customers(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    update_spawner(state);
}
