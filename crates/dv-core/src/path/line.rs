//! Straight-line clearance checks used for line of sight and line of fire.

use crate::dungeon::{Level, Point};

/// Walk the integer line between two tiles and test every tile after the
/// start with `clear`.
///
/// The walk always steps in +x (or +y for steep lines), swapping the
/// endpoints when needed, so `line_clear(a, b)` and `line_clear(b, a)` visit
/// the same tiles. The end tile itself is not tested; only reaching it
/// matters. The start tile is never tested either.
pub fn line_clear(mut clear: impl FnMut(Point) -> bool, start: Point, end: Point) -> bool {
    let mut position = start;
    let mut end_point = end;

    let mut dx = end_point.x - position.x;
    let mut dy = end_point.y - position.y;
    if dx.abs() > dy.abs() {
        if dx < 0 {
            core::mem::swap(&mut position, &mut end_point);
            dx = -dx;
            dy = -dy;
        }
        let (mut d, dinc_d, dinc_h, yinc) = if dy > 0 {
            (2 * dy - dx, 2 * dy, 2 * (dy - dx), 1)
        } else {
            (2 * dy + dx, 2 * dy, 2 * (dx + dy), -1)
        };
        let mut done = false;
        while !done && position != end_point {
            if (d <= 0) ^ (yinc < 0) {
                d += dinc_d;
            } else {
                d += dinc_h;
                position.y += yinc;
            }
            position.x += 1;
            done = position != start && !clear(position);
        }
    } else {
        if dy < 0 {
            core::mem::swap(&mut position, &mut end_point);
            dy = -dy;
            dx = -dx;
        }
        let (mut d, dinc_d, dinc_h, xinc) = if dx > 0 {
            (2 * dx - dy, 2 * dx, 2 * (dx - dy), 1)
        } else {
            (2 * dx + dy, 2 * dx, 2 * (dy + dx), -1)
        };
        let mut done = false;
        while !done && position != end_point {
            if (d <= 0) ^ (xinc < 0) {
                d += dinc_d;
            } else {
                d += dinc_h;
                position.x += xinc;
            }
            position.y += 1;
            done = position != start && !clear(position);
        }
    }
    position == end_point
}

/// Nothing on the line stops a missile
pub fn line_clear_missile(level: &Level, start: Point, end: Point) -> bool {
    line_clear(|p| !level.blocks_missile(p), start, end)
}

/// Nothing on the line is a wall
pub fn is_line_not_solid(level: &Level, start: Point, end: Point) -> bool {
    line_clear(|p| !level.is_solid(p), start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_level() -> Level {
        let mut level = Level::new(1);
        level.carve_room(Point::new(10, 10), 20, 20, 1);
        level
    }

    #[test]
    fn test_open_room_is_clear() {
        let level = open_level();
        assert!(line_clear_missile(&level, Point::new(11, 11), Point::new(25, 18)));
        assert!(is_line_not_solid(&level, Point::new(25, 18), Point::new(11, 11)));
    }

    #[test]
    fn test_wall_blocks_both_directions() {
        let mut level = open_level();
        for y in 10..30 {
            level.set_wall(Point::new(20, y));
        }
        let a = Point::new(12, 15);
        let b = Point::new(27, 17);
        assert!(!line_clear_missile(&level, a, b));
        assert!(!line_clear_missile(&level, b, a));
    }

    #[test]
    fn test_same_tile_is_clear() {
        let level = open_level();
        let p = Point::new(15, 15);
        assert!(line_clear(|_| false, p, p));
    }

    #[test]
    fn test_adjacent_always_reaches_end() {
        // the end tile is never tested
        let p = Point::new(15, 15);
        assert!(line_clear(|_| false, p, Point::new(16, 16)));
        assert!(!line_clear(|_| false, p, Point::new(17, 17)));
    }
}
