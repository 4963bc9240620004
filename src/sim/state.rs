//! Game state and core simulation types
//!
//! The whole session lives in one `GameState`, owned and mutated only by
//! `tick` and the session commands.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{AVATAR_START, DOOR_X};
use crate::tuning::Tuning;
use crate::ticks_to_secs;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first interact press
    NotStarted,
    /// Active gameplay
    Playing,
    /// A seated cat ran out of patience
    GameOver,
}

/// Food and drink the stations hand out and the cats order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Salmon,
    Shrimp,
    MangoCake,
    Milk,
}

impl ItemKind {
    /// Every kind, in station order
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Salmon,
        ItemKind::Shrimp,
        ItemKind::MangoCake,
        ItemKind::Milk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Salmon => "salmon",
            ItemKind::Shrimp => "shrimp",
            ItemKind::MangoCake => "mango cake",
            ItemKind::Milk => "milk",
        }
    }
}

/// Which cat walks in. Purely cosmetic, the renderer picks a sprite from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatBreed {
    Tabby,
    Calico,
    Tuxedo,
    Ginger,
    Siamese,
}

impl CatBreed {
    pub const ALL: [CatBreed; 5] = [
        CatBreed::Tabby,
        CatBreed::Calico,
        CatBreed::Tuxedo,
        CatBreed::Ginger,
        CatBreed::Siamese,
    ];
}

/// Customer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerState {
    /// Walking from the door to its seat, patience paused
    Entering,
    /// Waiting for its order, patience counting down
    Seated,
    /// Served, finishing its plate
    Eating,
    /// Walking back out the door
    Leaving,
}

/// A cat customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub pos: Vec2,
    /// Where the cat is walking to (its seat, or the door when leaving)
    pub target: Vec2,
    pub order: ItemKind,
    pub breed: CatBreed,
    pub state: CustomerState,
    /// Ticks left on the current timer (patience while seated, meal while eating)
    pub timer_ticks: u32,
    /// Patience granted at spawn
    pub max_ticks: u32,
    /// Plate in front of the cat while it eats
    pub served_plate: Option<ItemKind>,
}

impl Customer {
    /// Create a cat at the door, headed for `seat`
    pub fn new(id: u32, seat: Vec2, order: ItemKind, breed: CatBreed, patience_ticks: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(DOOR_X, seat.y),
            target: seat,
            order,
            breed,
            state: CustomerState::Entering,
            timer_ticks: patience_ticks,
            max_ticks: patience_ticks,
            served_plate: None,
        }
    }

    /// Seconds left on the current timer
    pub fn time_remaining(&self) -> f32 {
        ticks_to_secs(self.timer_ticks)
    }

    /// Patience granted at spawn, in seconds
    pub fn max_time(&self) -> f32 {
        ticks_to_secs(self.max_ticks)
    }

    /// Remaining patience as a fraction of the initial patience
    pub fn patience_fraction(&self) -> f32 {
        if self.max_ticks == 0 {
            0.0
        } else {
            (self.timer_ticks as f32 / self.max_ticks as f32).min(1.0)
        }
    }

    /// True while the cat holds on to a seat
    pub fn claims_seat(&self) -> bool {
        matches!(
            self.state,
            CustomerState::Entering | CustomerState::Seated | CustomerState::Eating
        )
    }
}

/// Which sprite the avatar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Forward,
    Left,
    Right,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub facing: Facing,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            pos: AVATAR_START,
            facing: Facing::Forward,
        }
    }
}

/// Background music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Gameplay,
    GameOver,
}

/// Fire-and-forget notifications raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cat came in
    Doorbell,
    /// An item was picked up or set down
    PickupOrDrop,
    /// A cat got the right order
    Happy,
    /// A cat was offered the wrong order
    Rejected,
    /// A seated cat is running low on patience
    Impatient { customer_id: u32 },
    /// Phase changed, switch music
    Music(MusicTrack),
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (never reset, drives spawn timing)
    pub time_ticks: u64,
    /// Cats served this session
    pub score: u32,
    pub avatar: Avatar,
    /// Item in the avatar's hands
    pub carried: Option<ItemKind>,
    /// Active customers, in spawn order
    pub customers: Vec<Customer>,
    /// Station the avatar can reach this tick
    pub nearby_station: Option<usize>,
    /// Seated cat the avatar can serve this tick
    pub nearby_customer: Option<u32>,
    /// Tick of the last spawn attempt
    pub last_spawn_tick: u64,
    /// Current gap between spawn attempts
    pub spawn_interval_secs: f32,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next customer ID (never reused, even across restarts)
    next_id: u32,
}

impl GameState {
    /// Create a new session on the title screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session on the title screen
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let spawn_interval_secs = tuning.spawn_initial_secs;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            score: 0,
            avatar: Avatar::default(),
            carried: None,
            customers: Vec::new(),
            nearby_station: None,
            nearby_customer: None,
            last_spawn_tick: 0,
            spawn_interval_secs,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new customer ID
    pub fn next_customer_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn customer(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_mut(&mut self, id: u32) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    /// Raise a side-effect notification
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand all pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Simulated seconds since the state was created
    pub fn elapsed_secs(&self) -> f64 {
        self.time_ticks as f64 / crate::consts::TICK_RATE as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::SEAT_Y;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.customers.is_empty());
        assert_eq!(state.avatar.pos, AVATAR_START);
        assert_eq!(state.spawn_interval_secs, 8.0);
    }

    #[test]
    fn test_customer_timers() {
        let cat = Customer::new(
            1,
            Vec2::new(441.0, SEAT_Y),
            ItemKind::Milk,
            CatBreed::Calico,
            720,
        );
        assert_eq!(cat.state, CustomerState::Entering);
        assert_eq!(cat.pos.x, DOOR_X);
        assert_eq!(cat.time_remaining(), 12.0);
        assert_eq!(cat.max_time(), 12.0);
        assert_eq!(cat.patience_fraction(), 1.0);
        assert!(cat.claims_seat());
    }

    #[test]
    fn test_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_customer_id();
        let b = state.next_customer_id();
        assert!(b > a);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1);
        state.emit(GameEvent::Doorbell);
        state.emit(GameEvent::Happy);
        assert_eq!(state.drain_events(), vec![GameEvent::Doorbell, GameEvent::Happy]);
        assert!(state.events.is_empty());
    }
}
