//! Customer lifecycle
//!
//! entering -> seated -> eating -> leaving -> removed. Serving is the only
//! way out of `Seated`; running out of patience there ends the session.

use super::layout::DOOR_X;
use super::state::{Customer, CustomerState, GameEvent, GamePhase, GameState, MusicTrack};

/// What happened to a customer this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still going
    Continue,
    /// Crossed the impatience threshold this tick
    Impatient,
    /// Ran out of patience while seated
    OutOfPatience,
    /// Walked out of the door
    Gone,
}

impl Customer {
    /// Walk toward the target x at `speed`; true once arrived
    fn walk(&mut self, speed: f32) -> bool {
        let dx = self.target.x - self.pos.x;
        if dx.abs() > speed {
            self.pos.x += speed.copysign(dx);
            false
        } else {
            self.pos.x = self.target.x;
            true
        }
    }

    /// Take the order: start the meal timer and put the plate down
    pub fn serve(&mut self, eating_ticks: u32) {
        self.state = CustomerState::Eating;
        self.timer_ticks = eating_ticks;
        self.served_plate = Some(self.order);
    }

    /// Advance one tick
    pub fn advance(&mut self, walk_speed: f32, impatient_fraction: f32) -> Step {
        match self.state {
            CustomerState::Entering => {
                if self.walk(walk_speed) {
                    self.state = CustomerState::Seated;
                    log::debug!(
                        "Cat {} seated, wants {} ({:.1}s)",
                        self.id,
                        self.order.as_str(),
                        self.time_remaining()
                    );
                }
                Step::Continue
            }
            CustomerState::Seated => {
                let before = self.patience_fraction();
                self.timer_ticks = self.timer_ticks.saturating_sub(1);
                if self.timer_ticks == 0 {
                    return Step::OutOfPatience;
                }
                if before > impatient_fraction && self.patience_fraction() <= impatient_fraction {
                    Step::Impatient
                } else {
                    Step::Continue
                }
            }
            CustomerState::Eating => {
                self.timer_ticks = self.timer_ticks.saturating_sub(1);
                if self.timer_ticks == 0 {
                    self.state = CustomerState::Leaving;
                    self.target.x = DOOR_X;
                    self.served_plate = None;
                    log::debug!("Cat {} finished eating", self.id);
                }
                Step::Continue
            }
            CustomerState::Leaving => {
                if self.walk(walk_speed) {
                    Step::Gone
                } else {
                    Step::Continue
                }
            }
        }
    }
}

/// Advance every customer one tick
///
/// Runs back to front so departed cats can be removed in place. Stops at
/// the first cat that runs out of patience and ends the session.
pub fn update_customers(state: &mut GameState) {
    let walk_speed = state.tuning.walk_speed;
    let impatient_fraction = state.tuning.impatient_fraction;

    for i in (0..state.customers.len()).rev() {
        let step = state.customers[i].advance(walk_speed, impatient_fraction);
        match step {
            Step::Continue => {}
            Step::Impatient => {
                let customer_id = state.customers[i].id;
                state.emit(GameEvent::Impatient { customer_id });
            }
            Step::OutOfPatience => {
                log::info!(
                    "Cat {} ran out of patience. Game over with {} served",
                    state.customers[i].id,
                    state.score
                );
                state.phase = GamePhase::GameOver;
                state.emit(GameEvent::Music(MusicTrack::GameOver));
                return;
            }
            Step::Gone => {
                let cat = state.customers.remove(i);
                log::debug!("Cat {} left the cafe", cat.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::SEAT_Y;
    use crate::sim::state::{CatBreed, ItemKind};
    use glam::Vec2;

    const WALK: f32 = 2.0;
    const IMPATIENT: f32 = 0.25;

    fn cat(id: u32, seat_x: f32, patience: u32) -> Customer {
        Customer::new(
            id,
            Vec2::new(seat_x, SEAT_Y),
            ItemKind::Salmon,
            CatBreed::Tabby,
            patience,
        )
    }

    #[test]
    fn test_entering_walks_then_sits() {
        let mut c = cat(1, DOOR_X - 5.0, 600);
        assert_eq!(c.advance(WALK, IMPATIENT), Step::Continue);
        assert_eq!(c.pos.x, DOOR_X - 2.0);
        assert_eq!(c.state, CustomerState::Entering);
        c.advance(WALK, IMPATIENT);
        assert_eq!(c.pos.x, DOOR_X - 4.0);
        // Remaining distance 1 <= step: snap and sit
        c.advance(WALK, IMPATIENT);
        assert_eq!(c.pos.x, DOOR_X - 5.0);
        assert_eq!(c.state, CustomerState::Seated);
        // No patience spent while walking in
        assert_eq!(c.timer_ticks, 600);
    }

    #[test]
    fn test_seated_counts_down_and_meows_once() {
        let mut c = cat(1, DOOR_X, 8);
        c.state = CustomerState::Seated;
        let steps: Vec<Step> = (0..7).map(|_| c.advance(WALK, IMPATIENT)).collect();
        assert_eq!(c.timer_ticks, 1);
        // 8 -> 2 crosses 25%
        let meows = steps.iter().filter(|s| **s == Step::Impatient).count();
        assert_eq!(meows, 1);
        assert_eq!(steps[5], Step::Impatient);
        assert_eq!(c.advance(WALK, IMPATIENT), Step::OutOfPatience);
    }

    #[test]
    fn test_eating_then_leaving_then_gone() {
        let mut c = cat(1, DOOR_X - 3.0, 600);
        c.pos.x = c.target.x;
        c.state = CustomerState::Seated;
        c.serve(2);
        assert_eq!(c.served_plate, Some(ItemKind::Salmon));

        c.advance(WALK, IMPATIENT);
        assert_eq!(c.state, CustomerState::Eating);
        c.advance(WALK, IMPATIENT);
        assert_eq!(c.state, CustomerState::Leaving);
        assert_eq!(c.target.x, DOOR_X);
        assert_eq!(c.served_plate, None);

        assert_eq!(c.advance(WALK, IMPATIENT), Step::Continue);
        assert_eq!(c.advance(WALK, IMPATIENT), Step::Gone);
    }

    #[test]
    fn test_update_removes_departed_cats() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let mut leaving = cat(1, 500.0, 600);
        leaving.state = CustomerState::Leaving;
        leaving.target.x = DOOR_X;
        leaving.pos.x = DOOR_X - 1.0;
        state.customers.push(leaving);
        state.customers.push(cat(2, 600.0, 600));

        update_customers(&mut state);
        assert_eq!(state.customers.len(), 1);
        assert_eq!(state.customers[0].id, 2);
    }

    #[test]
    fn test_game_over_stops_the_update() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let mut early = cat(1, 500.0, 600);
        early.state = CustomerState::Seated;
        let mut expiring = cat(2, 700.0, 1);
        expiring.state = CustomerState::Seated;
        state.customers.push(early);
        state.customers.push(expiring);

        update_customers(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Cat 1 comes after cat 2 in the back-to-front pass and is not touched
        assert_eq!(state.customers[0].timer_ticks, 600);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Music(MusicTrack::GameOver)]
        );
    }
}
