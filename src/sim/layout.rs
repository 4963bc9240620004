//! Static layout of the cafe floor
//!
//! The floor is a 1024x1024 canvas split at `TABLE_START_X`: the pickup
//! stations sit in a column on the left, the counter with the seated cats
//! runs from `TABLE_START_X` to the right edge.

use glam::Vec2;

use super::state::ItemKind;

/// Canvas size in world units
pub const FLOOR_SIZE: f32 = 1024.0;

/// Counter top edge
pub const TABLE_Y: f32 = 600.0;
/// Counter sprite height after scaling (128 px at 0.45)
pub const TABLE_HEIGHT: f32 = 128.0 * 0.45;
/// Left edge of the counter, one third across the floor
pub const TABLE_START_X: f32 = 341.0;
/// Bottom edge of the counter
pub const TABLE_BOTTOM_Y: f32 = TABLE_Y + TABLE_HEIGHT / 2.0;

/// Horizontal movement bounds
pub const LEFT_MARGIN: f32 = 60.0;
pub const RIGHT_MARGIN: f32 = FLOOR_SIZE - 60.0;
/// Lowest the avatar can walk
pub const BOTTOM_MARGIN: f32 = 900.0;

/// Gap kept between the avatar and the counter's left edge when walking sideways
pub const TABLE_SIDE_BUFFER: f32 = 40.0;
/// Gap the avatar keeps below the counter
pub const TABLE_FRONT_BUFFER: f32 = 85.0;
/// Left of this the avatar moves freely up and down
pub const SERVING_AREA_EDGE: f32 = TABLE_START_X - 20.0;

/// Station column
pub const STATION_X: f32 = 80.0;
pub const STATION_SPACING: f32 = 120.0;
/// Centre of the first (topmost) station
pub const STATION_START_Y: f32 = TABLE_Y - 80.0 + 64.0;
/// Half-height of the band in which a station is reachable
pub const STATION_REACH: f32 = 60.0;
/// Horizontal band in which the avatar can reach the stations
pub const PICKUP_LEFT: f32 = STATION_X - 40.0;
pub const PICKUP_RIGHT: f32 = TABLE_START_X - 30.0;
/// Topmost avatar y, enough to reach the first station
pub const TOP_MARGIN: f32 = STATION_START_Y - 80.0;

/// Avatar hands sit this far below its position
pub const HAND_OFFSET: f32 = 16.0;
/// Avatar spawn point (serving area, level with the counter front)
pub const AVATAR_START: Vec2 = Vec2::new(200.0, 700.0);

/// Cat sprite width as drawn (64 px at 0.5)
pub const CAT_WIDTH: f32 = 64.0 * 0.5;
/// Width of the zone on each side of a cat where it can be served
pub const SERVING_ZONE: f32 = CAT_WIDTH * 0.33;
/// Minimum distance between two claimed seats
pub const MIN_SEAT_SPACING: f32 = CAT_WIDTH + SERVING_ZONE * 2.0;
/// How close the avatar must stand to a seated cat to serve it
pub const SERVE_TOLERANCE: f32 = 64.0 * 0.33;

/// Seat candidates along the counter
pub const SEAT_START_X: f32 = TABLE_START_X + 100.0;
pub const SEAT_END_X: f32 = FLOOR_SIZE - 100.0;
pub const SEAT_STRIDE: f32 = 80.0;
pub const SEAT_Y: f32 = TABLE_Y - 20.0;

/// Off-screen point where cats appear and leave
pub const DOOR_X: f32 = FLOOR_SIZE + 50.0;

/// Centre y of the station at `index`
///
/// Stations are stacked top to bottom in `ItemKind::ALL` order, so adding
/// an item kind adds a station below the last one.
#[inline]
pub fn station_y(index: usize) -> f32 {
    STATION_START_Y + STATION_SPACING * index as f32
}

/// Number of pickup stations
#[inline]
pub fn station_count() -> usize {
    ItemKind::ALL.len()
}

/// Item served by the station at `index`
#[inline]
pub fn station_item(index: usize) -> Option<ItemKind> {
    ItemKind::ALL.get(index).copied()
}

/// Station index that serves `kind`
pub fn station_for(kind: ItemKind) -> usize {
    ItemKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default()
}

/// Candidate seat x-coordinates, left to right
pub fn seat_candidates() -> impl Iterator<Item = f32> {
    let count = ((SEAT_END_X - SEAT_START_X) / SEAT_STRIDE).ceil() as usize;
    (0..count).map(|i| SEAT_START_X + SEAT_STRIDE * i as f32)
}

/// True if the avatar at (x, y) would stand on or behind the counter
///
/// The counter only blocks from the front: anything left of its side buffer
/// is open floor, anything below its front buffer is the walkway.
pub fn collides_with_table(x: f32, y: f32) -> bool {
    if x < TABLE_START_X - TABLE_SIDE_BUFFER {
        return false;
    }
    y < TABLE_BOTTOM_Y + TABLE_FRONT_BUFFER
}

/// True if the avatar is in front of the counter, where cats can be served
#[inline]
pub fn in_table_area(pos: Vec2) -> bool {
    pos.x >= TABLE_START_X && pos.y >= TABLE_Y - 80.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_placement() {
        assert_eq!(station_count(), 4);
        assert_eq!(station_y(0), 584.0);
        assert_eq!(station_y(3), 944.0);
        assert_eq!(station_item(1), Some(ItemKind::Shrimp));
        assert_eq!(station_item(4), None);
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            assert_eq!(station_for(*kind), i);
        }
    }

    #[test]
    fn test_seat_candidates() {
        let seats: Vec<f32> = seat_candidates().collect();
        assert_eq!(seats.first(), Some(&441.0));
        assert_eq!(seats.last(), Some(&921.0));
        assert_eq!(seats.len(), 7);
        assert!(seats.iter().all(|&x| x < SEAT_END_X));
    }

    #[test]
    fn test_table_collision() {
        // Open floor left of the counter
        assert!(!collides_with_table(200.0, 600.0));
        // On the counter
        assert!(collides_with_table(500.0, 650.0));
        // Walkway in front of the counter
        assert!(!collides_with_table(500.0, 720.0));
        // Side buffer
        assert!(collides_with_table(TABLE_START_X - TABLE_SIDE_BUFFER, 700.0));
    }

    #[test]
    fn test_seat_spacing_fits_serving_zones() {
        // Two cats at the closest allowed spacing never share a serving zone
        assert!(MIN_SEAT_SPACING > SERVE_TOLERANCE * 2.0);
    }
}
