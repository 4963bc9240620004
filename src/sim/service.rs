//! Proximity detection and interact resolution
//!
//! The avatar is either by the station column or in front of the counter,
//! never both. Proximity is recomputed every tick before interact is handled.

use super::layout::{
    HAND_OFFSET, PICKUP_LEFT, PICKUP_RIGHT, SERVE_TOLERANCE, STATION_REACH, in_table_area,
    station_count, station_item, station_y,
};
use super::spawn::spawn_interval_secs;
use super::state::{CustomerState, GameEvent, GameState};
use crate::secs_to_ticks;

/// Outcome of an interact press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Right order delivered to this customer
    Served { customer_id: u32 },
    /// Wrong order offered, nothing changed
    Rejected { customer_id: u32 },
    /// Picked up from this station
    PickedUp { station: usize },
    /// Nothing in reach
    Nothing,
}

/// Refresh `nearby_station` and `nearby_customer` for the avatar's position
pub fn update_proximity(state: &mut GameState) {
    state.nearby_station = None;
    state.nearby_customer = None;

    let pos = state.avatar.pos;
    if in_table_area(pos) {
        state.nearby_customer = state
            .customers
            .iter()
            .find(|c| {
                c.state == CustomerState::Seated && (pos.x - c.pos.x).abs() <= SERVE_TOLERANCE
            })
            .map(|c| c.id);
    } else if (PICKUP_LEFT..=PICKUP_RIGHT).contains(&pos.x) {
        let hand_y = pos.y + HAND_OFFSET;
        state.nearby_station = (0..station_count())
            .find(|&i| (hand_y - station_y(i)).abs() <= STATION_REACH);
    }
}

/// Resolve an interact press against the current proximity
///
/// Delivery is checked before pickup. A mismatched delivery keeps the
/// carried item; a pickup always replaces it.
pub fn interact(state: &mut GameState) -> Interaction {
    if let (Some(customer_id), Some(carried)) = (state.nearby_customer, state.carried) {
        let eating_ticks = secs_to_ticks(state.tuning.eating_secs);
        if let Some(customer) = state
            .customer_mut(customer_id)
            .filter(|c| c.state == CustomerState::Seated)
        {
            if customer.order == carried {
                customer.serve(eating_ticks);
                state.carried = None;
                state.score += 1;
                state.spawn_interval_secs = spawn_interval_secs(&state.tuning, state.score);
                state.emit(GameEvent::PickupOrDrop);
                state.emit(GameEvent::Happy);
                log::debug!(
                    "Served {} to cat {}, {} served",
                    carried.as_str(),
                    customer_id,
                    state.score
                );
                return Interaction::Served { customer_id };
            }
            state.emit(GameEvent::Rejected);
            return Interaction::Rejected { customer_id };
        }
    }

    if let Some(station) = state.nearby_station {
        if let Some(kind) = station_item(station) {
            state.carried = Some(kind);
            state.emit(GameEvent::PickupOrDrop);
            return Interaction::PickedUp { station };
        }
    }

    Interaction::Nothing
}
