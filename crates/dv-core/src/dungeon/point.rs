//! Tile coordinates and the eight isometric facings.

use core::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::{DMAXX, DMAXY};

/// A dungeon tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Difference between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when the point lies on the 112x112 grid
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < DMAXX && (self.y as usize) < DMAXY
    }

    /// Chebyshev distance, the number of steps a walker needs
    pub fn walking_distance(self, other: Point) -> i32 {
        let d = other - self;
        d.dx.abs().max(d.dy.abs())
    }

    /// Integer approximation of the euclidean distance
    pub fn approx_distance(self, other: Point) -> i32 {
        let d = other - self;
        let (a, b) = (d.dx.abs(), d.dy.abs());
        let (min, max) = if a < b { (a, b) } else { (b, a) };
        let mut approx = max * 1007 + min * 441;
        if max < (min << 4) {
            approx -= max * 40;
        }
        (approx + 512) >> 10
    }

    /// Largest absolute axis delta, used for "within N tiles" box checks
    pub fn within_box(self, other: Point, radius: i32) -> bool {
        (self.x - other.x).abs() < radius && (self.y - other.y).abs() < radius
    }

    /// Facing from `self` towards `to`
    pub fn direction_to(self, to: Point) -> Direction {
        let mut mx = to.x - self.x;
        let mut my = to.y - self.y;
        // 5x <= 2y approximates tan(22.5 degrees)
        let md;
        if mx >= 0 {
            if my >= 0 {
                if 5 * mx <= my * 2 {
                    return Direction::SouthWest;
                }
                md = Direction::South;
            } else {
                my = -my;
                if 5 * mx <= my * 2 {
                    return Direction::NorthEast;
                }
                md = Direction::East;
            }
            if 5 * my <= mx * 2 {
                return Direction::SouthEast;
            }
        } else {
            mx = -mx;
            if my >= 0 {
                if 5 * mx <= my * 2 {
                    return Direction::SouthWest;
                }
                md = Direction::West;
            } else {
                my = -my;
                if 5 * mx <= my * 2 {
                    return Direction::NorthEast;
                }
                md = Direction::North;
            }
            if 5 * my <= mx * 2 {
                return Direction::NorthWest;
            }
        }
        md
    }
}

impl Add<Displacement> for Point {
    type Output = Point;

    fn add(self, rhs: Displacement) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, rhs: Direction) -> Point {
        self + rhs.displacement()
    }
}

impl AddAssign<Direction> for Point {
    fn add_assign(&mut self, rhs: Direction) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Displacement;

    fn sub(self, rhs: Point) -> Displacement {
        Displacement {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Facing on the isometric grid, in clockwise order starting at South
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum Direction {
    #[default]
    South = 0,
    SouthWest = 1,
    West = 2,
    NorthWest = 3,
    North = 4,
    NorthEast = 5,
    East = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
    ];

    /// Direction for an index taken modulo 8
    pub fn from_index(index: i32) -> Direction {
        Self::ALL[index.rem_euclid(8) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tile step for this facing
    pub const fn displacement(self) -> Displacement {
        let (dx, dy) = match self {
            Direction::South => (1, 1),
            Direction::SouthWest => (0, 1),
            Direction::West => (-1, 1),
            Direction::NorthWest => (-1, 0),
            Direction::North => (-1, -1),
            Direction::NorthEast => (0, -1),
            Direction::East => (1, -1),
            Direction::SouthEast => (1, 0),
        };
        Displacement { dx, dy }
    }

    /// 45 degrees counter-clockwise
    pub fn left(self) -> Direction {
        Self::from_index(self as i32 + 7)
    }

    /// 45 degrees clockwise
    pub fn right(self) -> Direction {
        Self::from_index(self as i32 + 1)
    }

    pub fn opposite(self) -> Direction {
        Self::from_index(self as i32 + 4)
    }

    /// Turn 45 degrees, left when `turn_left`
    pub fn turn(self, turn_left: bool) -> Direction {
        if turn_left { self.left() } else { self.right() }
    }

    /// True for the three facings that walk towards the top of the screen
    pub fn is_northwards(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::NorthWest
        )
    }

    /// True for the two facings that move along a screen row
    pub fn is_sideways(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}
