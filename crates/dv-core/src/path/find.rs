//! Obstacle-aware pathfinding for golems and blocked walkers.

use pathfinding::prelude::astar;

use crate::MAX_PATH_LENGTH;
use crate::dungeon::{Direction, Level, Point};

/// Cost of an orthogonal step on the isometric grid
const STRAIGHT_COST: u32 = 2;
/// Cost of a diagonal step
const DIAGONAL_COST: u32 = 3;

fn step_cost(d: Direction) -> u32 {
    let disp = d.displacement();
    if disp.dx != 0 && disp.dy != 0 {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// Cheapest remaining cost assuming an empty floor
fn heuristic(from: Point, to: Point) -> u32 {
    let dx = (to.x - from.x).unsigned_abs();
    let dy = (to.y - from.y).unsigned_abs();
    let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
    min * DIAGONAL_COST + (max - min) * STRAIGHT_COST
}

/// A diagonal step may not cut the corner of a wall
fn corner_clear(level: &Level, from: Point, d: Direction) -> bool {
    let disp = d.displacement();
    if disp.dx == 0 || disp.dy == 0 {
        return true;
    }
    !level.is_solid(Point::new(from.x + disp.dx, from.y))
        && !level.is_solid(Point::new(from.x, from.y + disp.dy))
}

/// Find the steps from `start` to `destination`.
///
/// `can_step` decides whether an intermediate tile may be entered; the
/// destination is always accepted so a walker can path onto its target's
/// tile. The search is bounded to tiles within [`MAX_PATH_LENGTH`] of the
/// start and any path longer than that counts as not found. An empty path
/// means `start == destination`.
pub fn find_path(
    level: &Level,
    mut can_step: impl FnMut(Point) -> bool,
    start: Point,
    destination: Point,
) -> Option<Vec<Direction>> {
    if start == destination {
        return Some(Vec::new());
    }
    let reach = MAX_PATH_LENGTH as i32;
    if start.walking_distance(destination) > reach {
        return None;
    }

    let (nodes, _cost) = astar(
        &start,
        |&p| {
            Direction::ALL
                .into_iter()
                .filter_map(|d| {
                    let next = p + d;
                    if !next.in_bounds() || start.walking_distance(next) > reach {
                        return None;
                    }
                    if !corner_clear(level, p, d) {
                        return None;
                    }
                    if next != destination && !can_step(next) {
                        return None;
                    }
                    Some((next, step_cost(d)))
                })
                .collect::<Vec<_>>()
        },
        |&p| heuristic(p, destination),
        |&p| p == destination,
    )?;

    let steps: Vec<Direction> = nodes
        .windows(2)
        .map(|w| w[0].direction_to(w[1]))
        .collect();
    if steps.len() >= MAX_PATH_LENGTH {
        return None;
    }
    Some(steps)
}
