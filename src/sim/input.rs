//! Per-tick input snapshot
//!
//! The host keeps a `HeldKeys` up to date from its key events. At the start
//! of every tick an `InputLatch` turns it into a `TickInput`, which adds the
//! interact edge so a held key serves or picks up only once.

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub interact: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Interact went from released to held since the previous tick
    pub interact_pressed: bool,
}

impl TickInput {
    /// Input with only movement keys held
    pub fn moving(held: HeldKeys) -> Self {
        Self {
            held: HeldKeys {
                interact: false,
                ..held
            },
            interact_pressed: false,
        }
    }

    /// Input for the tick on which interact goes down
    pub fn press_interact() -> Self {
        Self {
            held: HeldKeys {
                interact: true,
                ..Default::default()
            },
            interact_pressed: true,
        }
    }
}

/// Remembers the previous interact state to detect presses
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    interact_was_held: bool,
}

impl InputLatch {
    /// Sample the held keys once for this tick
    pub fn sample(&mut self, held: HeldKeys) -> TickInput {
        let interact_pressed = held.interact && !self.interact_was_held;
        self.interact_was_held = held.interact;
        TickInput {
            held,
            interact_pressed,
        }
    }

    /// Forget the previous state (e.g. after the window loses focus)
    pub fn reset(&mut self) {
        self.interact_was_held = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_triggered() {
        let mut latch = InputLatch::default();
        let held = HeldKeys {
            interact: true,
            ..Default::default()
        };

        assert!(latch.sample(held).interact_pressed);
        // Holding does not repeat
        assert!(!latch.sample(held).interact_pressed);
        assert!(!latch.sample(held).interact_pressed);

        // Release then press again
        assert!(!latch.sample(HeldKeys::default()).interact_pressed);
        assert!(latch.sample(held).interact_pressed);
    }

    #[test]
    fn test_movement_passes_through() {
        let mut latch = InputLatch::default();
        let held = HeldKeys {
            left: true,
            up: true,
            ..Default::default()
        };
        let input = latch.sample(held);
        assert_eq!(input.held, held);
        assert!(!input.interact_pressed);
    }
}
