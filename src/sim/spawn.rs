//! Customer spawning, seat allocation and difficulty curves

use glam::Vec2;
use rand::Rng;

use super::layout::{MIN_SEAT_SPACING, SEAT_Y, seat_candidates};
use super::state::{CatBreed, Customer, GameEvent, GameState, ItemKind};
use crate::secs_to_ticks;
use crate::tuning::{SpawnCurve, Tuning};

/// Past this many services the exponential curve stops changing
const MAX_DECAY_STEPS: u32 = 512;

/// Gap between spawn attempts after `served` cats have been served
///
/// Non-increasing in `served` and never below `spawn_floor_secs`.
pub fn spawn_interval_secs(tuning: &Tuning, served: u32) -> f32 {
    let initial = tuning.spawn_initial_secs;
    let floor = tuning.spawn_floor_secs;
    let span = (initial - floor).max(0.0);

    let interval = match tuning.spawn_curve {
        SpawnCurve::Exponential { decay } => {
            // Repeated multiplication keeps the sequence monotonic under rounding
            let decay = decay.clamp(0.0, 1.0);
            let factor = (0..served.min(MAX_DECAY_STEPS)).fold(1.0f32, |f, _| f * decay);
            floor + span * factor
        }
        SpawnCurve::Linear { services_to_floor } => {
            let steps = services_to_floor.max(1);
            let progress = served.min(steps) as f32 / steps as f32;
            initial - span * progress
        }
    };
    interval.max(floor)
}

/// Patience granted to a cat spawned after `served` services, in ticks
///
/// Drops by one second every `patience_drop_every` services down to the floor.
pub fn patience_ticks(tuning: &Tuning, served: u32) -> u32 {
    let drop = (served / tuning.patience_drop_every.max(1)) as f32;
    let secs = (tuning.patience_base_secs - drop).max(tuning.patience_floor_secs);
    secs_to_ticks(secs)
}

/// True if no seat-claiming cat is headed within `MIN_SEAT_SPACING` of `x`
pub fn seat_is_free(customers: &[Customer], x: f32) -> bool {
    customers
        .iter()
        .filter(|c| c.claims_seat())
        .all(|c| (x - c.target.x).abs() >= MIN_SEAT_SPACING)
}

/// Pick a free seat uniformly at random, or `None` if the counter is full
pub fn find_available_seat(state: &mut GameState) -> Option<Vec2> {
    let free: Vec<f32> = seat_candidates()
        .filter(|&x| seat_is_free(&state.customers, x))
        .collect();
    if free.is_empty() {
        return None;
    }
    let x = free[state.rng.random_range(0..free.len())];
    Some(Vec2::new(x, SEAT_Y))
}

/// Spawn a cat at the door if a seat is free
///
/// Returns the new customer's ID, or `None` when the counter is full.
pub fn spawn_customer(state: &mut GameState) -> Option<u32> {
    let Some(seat) = find_available_seat(state) else {
        log::debug!("Counter full, no cat this time");
        return None;
    };

    let order = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
    let breed = CatBreed::ALL[state.rng.random_range(0..CatBreed::ALL.len())];
    let patience = patience_ticks(&state.tuning, state.score);

    let id = state.next_customer_id();
    log::debug!(
        "Cat {} heading to seat x={} wanting {} ({:.1}s patience)",
        id,
        seat.x,
        order.as_str(),
        crate::ticks_to_secs(patience)
    );
    state
        .customers
        .push(Customer::new(id, seat, order, breed, patience));
    state.emit(GameEvent::Doorbell);
    Some(id)
}

/// Attempt a spawn if the spawn interval has elapsed
///
/// The timer restarts whether or not a seat was found, so a full counter
/// waits a whole interval before trying again.
pub fn update_spawner(state: &mut GameState) {
    let interval = secs_to_ticks(state.spawn_interval_secs) as u64;
    if state.time_ticks.saturating_sub(state.last_spawn_tick) > interval {
        spawn_customer(state);
        state.last_spawn_tick = state.time_ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CustomerState;
    use proptest::prelude::*;

    #[test]
    fn test_initial_values() {
        let tuning = Tuning::default();
        assert_eq!(spawn_interval_secs(&tuning, 0), 8.0);
        assert_eq!(patience_ticks(&tuning, 0), 720);
        assert_eq!(patience_ticks(&tuning, 3), 660);
        assert_eq!(patience_ticks(&tuning, 1000), 300);
    }

    #[test]
    fn test_linear_curve_reaches_floor() {
        let tuning = Tuning {
            spawn_curve: SpawnCurve::Linear {
                services_to_floor: 10,
            },
            ..Default::default()
        };
        assert_eq!(spawn_interval_secs(&tuning, 0), 8.0);
        assert!((spawn_interval_secs(&tuning, 5) - 6.25).abs() < 1e-4);
        assert_eq!(spawn_interval_secs(&tuning, 10), 4.5);
        assert_eq!(spawn_interval_secs(&tuning, 50), 4.5);
    }

    #[test]
    fn test_spawn_fills_counter_then_backs_off() {
        let mut state = GameState::new(42);
        let seats = seat_candidates().count();
        let mut spawned = 0;
        for _ in 0..seats * 2 {
            if spawn_customer(&mut state).is_some() {
                spawned += 1;
            }
        }
        // Seat stride is wider than the spacing, so every candidate gets a cat
        assert_eq!(spawned, seats);
        assert!(spawn_customer(&mut state).is_none());
        assert!(find_available_seat(&mut state).is_none());
    }

    #[test]
    fn test_leaving_cat_frees_its_seat() {
        let mut state = GameState::new(3);
        while spawn_customer(&mut state).is_some() {}
        assert!(find_available_seat(&mut state).is_none());

        state.customers[0].state = CustomerState::Leaving;
        assert!(find_available_seat(&mut state).is_some());
    }

    #[test]
    fn test_spawner_waits_for_interval() {
        let mut state = GameState::new(5);
        state.last_spawn_tick = 0;
        state.time_ticks = 480;
        update_spawner(&mut state);
        assert!(state.customers.is_empty());
        assert_eq!(state.last_spawn_tick, 0);

        state.time_ticks = 481;
        update_spawner(&mut state);
        assert_eq!(state.customers.len(), 1);
        assert_eq!(state.last_spawn_tick, 481);
        assert_eq!(state.drain_events(), vec![GameEvent::Doorbell]);
    }

    #[test]
    fn test_full_counter_still_resets_timer() {
        let mut state = GameState::new(11);
        while spawn_customer(&mut state).is_some() {}
        let count = state.customers.len();

        state.time_ticks = 10_000;
        update_spawner(&mut state);
        assert_eq!(state.customers.len(), count);
        assert_eq!(state.last_spawn_tick, 10_000);
    }

    proptest! {
        #[test]
        fn prop_spawn_interval_monotonic_with_floor(decay in 0.05f32..=1.0, steps in 1u32..60) {
            let exponential = SpawnCurve::Exponential { decay };
            let linear = SpawnCurve::Linear { services_to_floor: steps };
            for spawn_curve in [exponential, linear] {
                let tuning = Tuning { spawn_curve, ..Default::default() };
                let mut previous = f32::INFINITY;
                for served in 0..=100 {
                    let interval = spawn_interval_secs(&tuning, served);
                    prop_assert!(interval <= previous);
                    prop_assert!(interval >= tuning.spawn_floor_secs);
                    previous = interval;
                }
            }
        }

        #[test]
        fn prop_seats_keep_spacing(seed in any::<u64>(), attempts in 1usize..20) {
            let mut state = GameState::new(seed);
            for _ in 0..attempts {
                spawn_customer(&mut state);
            }
            let targets: Vec<f32> = state.customers.iter().map(|c| c.target.x).collect();
            for (i, a) in targets.iter().enumerate() {
                for b in &targets[i + 1..] {
                    prop_assert!((a - b).abs() >= MIN_SEAT_SPACING);
                }
            }
        }
    }
}
