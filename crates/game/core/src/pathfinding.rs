//! Breadth-first shortest paths over walkable tiles.

use std::collections::VecDeque;

use crate::map::Grid;
use crate::state::Position;

/// Fixed neighbor order: `dx` outer, `dy` inner, both from -1 to 1.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Finds a shortest 8-connected path from `start` to `goal`.
///
/// The returned cells exclude `start` and end at `goal`; an empty path means
/// the two positions coincide. Returns `None` when either endpoint is not
/// walkable or no path exists. Diagonal and orthogonal steps cost the same,
/// and ties between equal-length paths resolve through the neighbor order.
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let width = grid.width() as usize;
    let index = |p: Position| p.y as usize * width + p.x as usize;

    let mut parent: Vec<Option<Position>> = vec![None; grid.dimensions().area()];
    let mut visited = vec![false; grid.dimensions().area()];
    visited[index(start)] = true;

    let mut frontier = VecDeque::from([start]);
    while let Some(current) = frontier.pop_front() {
        if current == goal {
            break;
        }
        for (dx, dy) in NEIGHBORS {
            let next = current.offset(dx, dy);
            if !grid.is_walkable(next) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = Some(current);
            frontier.push_back(next);
        }
    }

    if !visited[index(goal)] {
        return None;
    }

    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(previous) = parent[index(cursor)] {
        if previous == start {
            break;
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    Some(path)
}
