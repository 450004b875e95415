//! Walled arena levels for the headless driver and tests
//!
//! Layout randomness comes from its own ChaCha stream so that building a
//! level never disturbs the synchronised game RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{Level, Point};
use crate::{DMAXX, DMAXY};

/// Parameters for an arena level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaBuilder {
    pub depth: u8,
    pub origin: Point,
    pub width: i32,
    pub height: i32,
    /// Solid single-tile columns scattered over the floor
    pub pillars: u32,
    /// Split the floor in two rooms joined by a closed door
    pub divided: bool,
    /// Mark every floor tile visible and fully lit once built. Population
    /// skips visible tiles, so a level that is still to be populated should
    /// be built dark and handed to [`ArenaBuilder::light`] afterwards.
    pub lit: bool,
    pub layout_seed: u64,
}

impl Default for ArenaBuilder {
    fn default() -> Self {
        Self {
            depth: 1,
            origin: Point::new(16, 16),
            width: 40,
            height: 40,
            pillars: 0,
            divided: false,
            lit: true,
            layout_seed: 0,
        }
    }
}

impl ArenaBuilder {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn pillars(mut self, count: u32) -> Self {
        self.pillars = count;
        self
    }

    pub fn divided(mut self, divided: bool) -> Self {
        self.divided = divided;
        self
    }

    pub fn layout_seed(mut self, seed: u64) -> Self {
        self.layout_seed = seed;
        self
    }

    pub fn lit(mut self, lit: bool) -> Self {
        self.lit = lit;
        self
    }

    /// Floor rectangle, clipped to leave a solid border around the map
    fn bounds(&self) -> (Point, i32, i32) {
        let x = self.origin.x.clamp(1, DMAXX as i32 - 2);
        let y = self.origin.y.clamp(1, DMAXY as i32 - 2);
        let w = self.width.clamp(1, DMAXX as i32 - 1 - x);
        let h = self.height.clamp(1, DMAXY as i32 - 1 - y);
        (Point::new(x, y), w, h)
    }

    pub fn build(&self) -> Level {
        let mut rng = ChaCha8Rng::seed_from_u64(self.layout_seed);
        let mut level = Level::new(self.depth);
        let (origin, w, h) = self.bounds();
        level.carve_room(origin, w, h, 1);

        let split = origin.x + w / 2;
        if self.divided && w >= 5 {
            level.carve_room(Point::new(split + 1, origin.y), w - w / 2 - 1, h, 2);
            for y in origin.y..origin.y + h {
                level.set_wall(Point::new(split, y));
            }
            level.add_door(Point::new(split, origin.y + h / 2));
        }

        if w > 2 && h > 2 {
            for _ in 0..self.pillars {
                let p = Point::new(
                    rng.gen_range(origin.x + 1..origin.x + w - 1),
                    rng.gen_range(origin.y + 1..origin.y + h - 1),
                );
                if self.divided && (p.x - split).abs() <= 1 {
                    continue;
                }
                level.set_wall(p);
            }
        }

        if self.lit {
            self.light(&mut level);
        }
        level
    }

    /// Stand-in for the host's vision pass: every open tile of the arena
    /// becomes visible and fully lit
    pub fn light(&self, level: &mut Level) {
        let (origin, w, h) = self.bounds();
        for x in origin.x..origin.x + w {
            for y in origin.y..origin.y + h {
                let p = Point::new(x, y);
                if level.is_tile_walkable(p, true) {
                    level.set_visible(p, true);
                    level.set_light(p, 0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arena_is_open_and_walled() {
        let level = ArenaBuilder::new(3).size(10, 8).build();
        assert_eq!(level.depth, 3);
        assert!(level.is_tile_walkable(Point::new(16, 16), false));
        assert!(level.is_tile_walkable(Point::new(25, 23), false));
        assert!(level.is_solid(Point::new(26, 16)));
        assert!(level.is_solid(Point::new(15, 16)));
        assert!(level.is_visible(Point::new(20, 20)));
    }

    #[test]
    fn test_layout_is_reproducible() {
        let a = ArenaBuilder::default().pillars(30).layout_seed(9).build();
        let b = ArenaBuilder::default().pillars(30).layout_seed(9).build();
        for x in 16..56 {
            for y in 16..56 {
                let p = Point::new(x, y);
                assert_eq!(a.is_solid(p), b.is_solid(p));
            }
        }
    }

    #[test]
    fn test_divided_arena_has_two_rooms_and_a_door() {
        let level = ArenaBuilder::default().size(20, 10).divided(true).build();
        assert_eq!(level.room(Point::new(17, 17)), 1);
        assert_eq!(level.room(Point::new(34, 17)), 2);
        assert!(level.is_closed_door(Point::new(26, 21)));
        assert!(level.is_solid(Point::new(26, 17)));
    }

    #[test]
    fn test_dark_arena_lit_later() {
        let builder = ArenaBuilder::default().lit(false);
        let mut level = builder.build();
        assert!(!level.is_visible(Point::new(20, 20)));
        builder.light(&mut level);
        assert!(level.is_visible(Point::new(20, 20)));
        assert!(!level.is_visible(Point::new(15, 20)));
    }

    #[test]
    fn test_oversized_arena_is_clipped() {
        let level = ArenaBuilder::default().size(500, 500).build();
        assert!(level.is_solid(Point::new(DMAXX as i32 - 1, 20)));
        assert!(level.is_tile_walkable(Point::new(DMAXX as i32 - 2, 20), false));
    }
}
