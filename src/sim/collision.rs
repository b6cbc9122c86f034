//! Axis-aligned collision for the runner
//!
//! Screen space: origin top-left, y grows downward. The character and obstacles both sit on
//! the bottom edge of the field, so their boxes are derived from the field height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityArena, EntityId};
use super::physics::Character;
use crate::tuning::RunnerTuning;

/// Axis-aligned bounding box (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect {
            pos: self.pos + offset,
            size: self.size,
        }
    }
}

/// Character box in screen space
pub fn character_rect(character: &Character, field_height: f32, tuning: &RunnerTuning) -> Rect {
    let size = tuning.character_size;
    Rect::new(
        tuning.character_x,
        field_height - size - character.y,
        size,
        size,
    )
}

/// Obstacle box in screen space (obstacles rest on the bottom edge)
pub fn obstacle_rect(pos_x: f32, size: Vec2, field_height: f32) -> Rect {
    Rect::new(pos_x, field_height - size.y, size.x, size.y)
}

/// First obstacle overlapping the character, if any
pub fn first_collision(
    character: &Character,
    obstacles: &EntityArena,
    field_height: f32,
    tuning: &RunnerTuning,
) -> Option<EntityId> {
    let body = character_rect(character, field_height, tuning);
    obstacles
        .iter()
        .find(|o| body.overlaps(&obstacle_rect(o.pos.x, o.size, field_height)))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges do not count
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_character_rect_on_ground() {
        let tuning = RunnerTuning::default();
        let r = character_rect(&Character::at_rest(), 320.0, &tuning);
        assert_eq!(r, Rect::new(20.0, 272.0, 48.0, 48.0));

        let airborne = Character { y: 100.0, vy: 0.0 };
        let r = character_rect(&airborne, 320.0, &tuning);
        assert_eq!(r.pos.y, 172.0);
    }

    #[test]
    fn test_first_collision() {
        let tuning = RunnerTuning::default();
        let mut arena = EntityArena::new();
        let size = Vec2::splat(32.0);
        arena.spawn(Vec2::new(200.0, 0.0), size, 0, None);
        let hit = arena.spawn(Vec2::new(50.0, 0.0), size, 0, None);

        let grounded = Character::at_rest();
        assert_eq!(first_collision(&grounded, &arena, 320.0, &tuning), Some(hit));

        // High enough to clear a 32-unit obstacle
        let airborne = Character { y: 40.0, vy: 0.0 };
        assert_eq!(first_collision(&airborne, &arena, 320.0, &tuning), None);
    }

    #[test]
    fn test_obstacle_just_past_character_misses() {
        let tuning = RunnerTuning::default();
        let mut arena = EntityArena::new();
        // Right edge exactly at the character's left edge
        arena.spawn(Vec2::new(20.0 - 32.0, 0.0), Vec2::splat(32.0), 0, None);
        assert_eq!(first_collision(&Character::at_rest(), &arena, 320.0, &tuning), None);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_overlap_survives_common_translation(
            a in arb_rect(),
            b in arb_rect(),
            dx in -64i32..64,
            dy in -64i32..64,
        ) {
            // Integer-valued shifts keep the float comparisons exact
            let a = Rect::new(a.pos.x.round(), a.pos.y.round(), a.size.x.round(), a.size.y.round());
            let b = Rect::new(b.pos.x.round(), b.pos.y.round(), b.size.x.round(), b.size.y.round());
            let offset = Vec2::new(dx as f32, dy as f32);
            prop_assert_eq!(a.overlaps(&b), a.translated(offset).overlaps(&b.translated(offset)));
        }
    }
}
