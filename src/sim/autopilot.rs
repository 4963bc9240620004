//! Idle/demo mode - the computer plays the game
//!
//! The autopilot only reads the state and produces held keys, so it goes
//! through the same input path as a player.

use glam::Vec2;

use super::input::HeldKeys;
use super::layout::{
    BOTTOM_MARGIN, HAND_OFFSET, TABLE_SIDE_BUFFER, TABLE_START_X, station_for, station_y,
};
use super::state::{Customer, CustomerState, GamePhase, GameState};

/// Lane in front of the counter used to cross the floor
const WALKWAY_Y: f32 = 760.0;
/// Where to stand in the station column
const STATION_STAND_X: f32 = 200.0;
/// Left of this the counter cannot be bumped into
const COUNTER_SIDE_X: f32 = TABLE_START_X - TABLE_SIDE_BUFFER;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pressed_last: bool,
}

impl Autopilot {
    /// Keys to hold for the next tick
    pub fn drive(&mut self, state: &GameState) -> HeldKeys {
        let mut keys = HeldKeys::default();

        if state.phase != GamePhase::Playing {
            // Start (or restart) on our own
            keys.interact = !self.pressed_last;
            self.pressed_last = keys.interact;
            return keys;
        }

        let Some(target) = pick_target(state) else {
            self.pressed_last = false;
            return keys;
        };

        let (goal, in_reach) = if state.carried == Some(target.order) {
            (
                Vec2::new(target.target.x, WALKWAY_Y),
                state.nearby_customer == Some(target.id),
            )
        } else {
            let station = station_for(target.order);
            let y = (station_y(station) - HAND_OFFSET).min(BOTTOM_MARGIN);
            (
                Vec2::new(STATION_STAND_X, y),
                state.nearby_station == Some(station),
            )
        };

        steer(state.avatar.pos, goal, state.tuning.avatar_speed, &mut keys);

        // Release between presses so every press is an edge
        keys.interact = in_reach && !self.pressed_last;
        self.pressed_last = keys.interact;
        keys
    }
}

/// The cat to work for next
///
/// A waiting cat whose order is already in hand wins, otherwise the seated
/// cat with the least patience left, otherwise the next cat walking in.
fn pick_target(state: &GameState) -> Option<&Customer> {
    let urgency = |c: &&Customer| (c.state != CustomerState::Seated, c.timer_ticks);
    let waiting = state
        .customers
        .iter()
        .filter(|c| matches!(c.state, CustomerState::Seated | CustomerState::Entering));

    if let Some(carried) = state.carried {
        if let Some(cat) = waiting.clone().filter(|c| c.order == carried).min_by_key(urgency) {
            return Some(cat);
        }
    }
    waiting.min_by_key(urgency)
}

/// Hold the keys that move `pos` toward `goal`
///
/// Crossing between the station column and the counter goes through the
/// walkway first, then horizontal, then vertical.
fn steer(pos: Vec2, goal: Vec2, speed: f32, keys: &mut HeldKeys) {
    let crossing = (pos.x < COUNTER_SIDE_X) != (goal.x < COUNTER_SIDE_X);
    if crossing && pos.y < WALKWAY_Y - speed {
        keys.down = true;
        return;
    }

    let dx = goal.x - pos.x;
    if dx.abs() >= speed {
        keys.left = dx < 0.0;
        keys.right = dx > 0.0;
        return;
    }

    let dy = goal.y - pos.y;
    if dy.abs() >= speed {
        keys.up = dy < 0.0;
        keys.down = dy > 0.0;
    }
}
