//! Avatar movement and counter collision
//!
//! Each axis is resolved on its own. The horizontal step is tested against
//! the current y, then the vertical step against the x just committed.

use glam::Vec2;

use super::input::HeldKeys;
use super::layout::{
    BOTTOM_MARGIN, LEFT_MARGIN, RIGHT_MARGIN, SERVING_AREA_EDGE, TOP_MARGIN, collides_with_table,
};
use super::state::{Avatar, Facing};

/// -1, 0 or +1 along one axis. Opposite keys cancel.
#[inline]
fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

impl Avatar {
    /// Move one tick according to the held keys
    pub fn step(&mut self, keys: &HeldKeys, speed: f32) {
        let dx = axis(keys.left, keys.right);
        let dy = axis(keys.up, keys.down);

        self.facing = if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            Facing::Forward
        };

        let candidate = self.pos + Vec2::new(dx, dy) * speed;

        if dx != 0.0
            && (LEFT_MARGIN..=RIGHT_MARGIN).contains(&candidate.x)
            && !collides_with_table(candidate.x, self.pos.y)
        {
            self.pos.x = candidate.x;
        }

        if dy != 0.0 && self.vertical_allowed(candidate.y) {
            self.pos.y = candidate.y;
        }
    }

    /// Vertical bounds depend on which side of the counter edge we are
    fn vertical_allowed(&self, y: f32) -> bool {
        if self.pos.x < SERVING_AREA_EDGE {
            (TOP_MARGIN..=BOTTOM_MARGIN).contains(&y)
        } else {
            y <= BOTTOM_MARGIN && !collides_with_table(self.pos.x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::{AVATAR_START, TABLE_START_X};

    const SPEED: f32 = 3.0;

    fn keys(left: bool, right: bool, up: bool, down: bool) -> HeldKeys {
        HeldKeys {
            left,
            right,
            up,
            down,
            interact: false,
        }
    }

    #[test]
    fn test_moves_and_faces() {
        let mut avatar = Avatar::default();
        avatar.step(&keys(true, false, false, false), SPEED);
        assert_eq!(avatar.pos, AVATAR_START + Vec2::new(-3.0, 0.0));
        assert_eq!(avatar.facing, Facing::Left);

        avatar.step(&keys(false, true, false, false), SPEED);
        assert_eq!(avatar.pos, AVATAR_START);
        assert_eq!(avatar.facing, Facing::Right);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut avatar = Avatar::default();
        avatar.facing = Facing::Left;
        avatar.step(&keys(true, true, true, true), SPEED);
        assert_eq!(avatar.pos, AVATAR_START);
        assert_eq!(avatar.facing, Facing::Forward);
    }

    #[test]
    fn test_vertical_keeps_forward_facing() {
        let mut avatar = Avatar::default();
        avatar.facing = Facing::Right;
        avatar.step(&keys(false, false, true, false), SPEED);
        assert_eq!(avatar.pos.y, AVATAR_START.y - 3.0);
        assert_eq!(avatar.facing, Facing::Forward);
    }

    #[test]
    fn test_margins() {
        let mut avatar = Avatar {
            pos: Vec2::new(LEFT_MARGIN, BOTTOM_MARGIN),
            facing: Facing::Forward,
        };
        avatar.step(&keys(true, false, false, true), SPEED);
        assert_eq!(avatar.pos, Vec2::new(LEFT_MARGIN, BOTTOM_MARGIN));

        avatar.pos = Vec2::new(200.0, TOP_MARGIN);
        avatar.step(&keys(false, false, true, false), SPEED);
        assert_eq!(avatar.pos.y, TOP_MARGIN);
    }

    #[test]
    fn test_counter_blocks_northward_only() {
        // In the walkway just below the counter's front buffer
        let mut avatar = Avatar {
            pos: Vec2::new(600.0, 714.0),
            facing: Facing::Forward,
        };
        avatar.step(&keys(false, false, true, false), SPEED);
        assert_eq!(avatar.pos.y, 714.0);

        avatar.step(&keys(false, false, false, true), SPEED);
        assert_eq!(avatar.pos.y, 717.0);
    }

    #[test]
    fn test_counter_blocks_walking_in_from_the_side() {
        // Level with the counter, walking right from the serving area
        let mut avatar = Avatar {
            pos: Vec2::new(TABLE_START_X - 42.0, 600.0),
            facing: Facing::Forward,
        };
        avatar.step(&keys(false, true, false, false), SPEED);
        assert_eq!(avatar.pos.x, TABLE_START_X - 42.0);
        assert_eq!(avatar.facing, Facing::Right);
    }

    #[test]
    fn test_diagonal_uses_committed_x() {
        // Moving right out of the serving column while moving up: x commits
        // first (the walkway at y=716 is open), then the upward step is
        // checked against the new x and lands on the counter, so it is refused.
        let mut avatar = Avatar {
            pos: Vec2::new(SERVING_AREA_EDGE - 1.0, 716.0),
            facing: Facing::Forward,
        };
        avatar.step(&keys(false, true, true, false), SPEED);
        assert_eq!(avatar.pos.x, SERVING_AREA_EDGE + 2.0);
        assert_eq!(avatar.pos.y, 716.0);
    }
}
