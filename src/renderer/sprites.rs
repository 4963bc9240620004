//! Sprite catalogue
//!
//! Maps logical things in the state to image assets and draw scales. Kept
//! free of web types so it can be tested natively.

use glam::Vec2;

use crate::sim::{CatBreed, Facing, ItemKind};

/// Every image the renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Table,
    SpeechBubble,
    Avatar(Facing),
    /// Small icon shown in a speech bubble
    Icon(ItemKind),
    /// Full plate stacked at a station and set down in front of a cat
    Plate(ItemKind),
    Cat(CatBreed),
}

impl Sprite {
    /// Asset path, relative to the page
    pub fn path(self) -> &'static str {
        match self {
            Sprite::Background => "img/background.png",
            Sprite::Table => "img/table.png",
            Sprite::SpeechBubble => "img/speech-bubble.png",
            Sprite::Avatar(Facing::Forward) => "img/girl-forward.png",
            Sprite::Avatar(Facing::Left) => "img/girl-left.png",
            Sprite::Avatar(Facing::Right) => "img/girl-right.png",
            Sprite::Icon(ItemKind::Salmon) => "img/salmon-icon.png",
            Sprite::Icon(ItemKind::Shrimp) => "img/shrimp-icon.png",
            Sprite::Icon(ItemKind::MangoCake) => "img/mango-cake-icon.png",
            Sprite::Icon(ItemKind::Milk) => "img/milk-icon.png",
            Sprite::Plate(ItemKind::Salmon) => "img/salmon-plate.png",
            Sprite::Plate(ItemKind::Shrimp) => "img/shrimp-plate.png",
            Sprite::Plate(ItemKind::MangoCake) => "img/mango-cake-plate.png",
            Sprite::Plate(ItemKind::Milk) => "img/milk-mug.png",
            Sprite::Cat(CatBreed::Tabby) => "img/cat1.png",
            Sprite::Cat(CatBreed::Calico) => "img/cat2.png",
            Sprite::Cat(CatBreed::Tuxedo) => "img/cat3.png",
            Sprite::Cat(CatBreed::Ginger) => "img/cat4.png",
            Sprite::Cat(CatBreed::Siamese) => "img/cat5.png",
        }
    }

    /// Scale applied to the image's natural size when drawn
    pub fn scale(self) -> f32 {
        match self {
            Sprite::Background => 1.0,
            Sprite::Table => 0.45,
            Sprite::SpeechBubble => 0.35,
            Sprite::Avatar(_) => 0.4,
            Sprite::Icon(_) => 0.15,
            Sprite::Plate(_) => 0.25,
            Sprite::Cat(_) => 0.5,
        }
    }

    /// Everything to preload, each sprite once
    pub fn all() -> Vec<Sprite> {
        let mut sprites = vec![
            Sprite::Background,
            Sprite::Table,
            Sprite::SpeechBubble,
            Sprite::Avatar(Facing::Forward),
            Sprite::Avatar(Facing::Left),
            Sprite::Avatar(Facing::Right),
        ];
        for kind in ItemKind::ALL {
            sprites.push(Sprite::Icon(kind));
            sprites.push(Sprite::Plate(kind));
        }
        sprites.extend(CatBreed::ALL.map(Sprite::Cat));
        sprites
    }
}

/// Scale of the plate in the avatar's hands, smaller than at the station
pub const CARRIED_SCALE: f32 = 0.15;

/// What the avatar holds: the same plate the station hands out
pub fn carried_sprite(kind: ItemKind) -> Sprite {
    Sprite::Plate(kind)
}

/// Where the carried item is drawn relative to the avatar's centre
///
/// `avatar_height` is the drawn (scaled) sprite height.
pub fn carried_item_offset(facing: Facing, avatar_height: f32) -> Vec2 {
    let x = match facing {
        Facing::Left => -15.0,
        Facing::Right => 15.0,
        Facing::Forward => 0.0,
    };
    Vec2::new(x, avatar_height * 0.25)
}

/// Plates stacked at a station: one in front, two behind to either side
pub const STATION_STACK: [Vec2; 3] = [
    Vec2::new(-36.0, -24.0),
    Vec2::new(36.0, -24.0),
    Vec2::new(0.0, 0.0),
];

/// Format the scoreboard number, zero padded to four digits
pub fn score_text(score: u32) -> String {
    format!("{:04}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sprites_have_distinct_paths() {
        let sprites = Sprite::all();
        assert_eq!(sprites.len(), 6 + ItemKind::ALL.len() * 2 + CatBreed::ALL.len());
        let mut paths: Vec<&str> = sprites.iter().map(|s| s.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), sprites.len());
    }

    #[test]
    fn test_carried_item_follows_facing() {
        assert_eq!(carried_item_offset(Facing::Left, 100.0), Vec2::new(-15.0, 25.0));
        assert_eq!(carried_item_offset(Facing::Forward, 100.0).x, 0.0);
        assert!(carried_item_offset(Facing::Right, 100.0).x > 0.0);
    }

    #[test]
    fn test_carried_item_is_the_station_plate() {
        for kind in ItemKind::ALL {
            assert_eq!(carried_sprite(kind), Sprite::Plate(kind));
        }
        assert_eq!(carried_sprite(ItemKind::Milk).path(), "img/milk-mug.png");
        assert!(CARRIED_SCALE < Sprite::Plate(ItemKind::Milk).scale());
    }

    #[test]
    fn test_score_text_is_padded() {
        assert_eq!(score_text(7), "0007");
        assert_eq!(score_text(12345), "12345");
    }
}
