//! Carves a partition tree into a playable grid.

use rand::Rng;

use crate::config::GenerationConfig;
use crate::map::{Grid, MapDimensions, Room, TileKind};
use crate::rng::chance;
use crate::state::Position;

use super::partition::{Region, RoomCarver};

/// Neighbor order used by the door heuristic: -x, +x, -y, +y.
const CARDINALS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Level generator driven by a [`GenerationConfig`].
#[derive(Clone, Copy, Debug)]
pub struct DungeonGenerator<'a> {
    config: &'a GenerationConfig,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    /// Generates a level using the configured dimensions.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        self.generate_with(self.config.dimensions, rng)
    }

    /// Generates a level of the given size.
    ///
    /// Spawn is the center of the first room carved and the stairs sit at the
    /// center of the last one. When no room fits, spawn falls back to the grid
    /// center and the level has no stairs.
    pub fn generate_with<R: Rng + ?Sized>(&self, dimensions: MapDimensions, rng: &mut R) -> Grid {
        let mut grid = Grid::new(dimensions);

        let mut tree = Region::build(dimensions, self.config, rng);
        let mut carver = GridCarver {
            grid: &mut grid,
            door_chance: self.config.door_chance,
        };
        tree.collect_rooms(self.config, &mut carver, rng);

        let bounds = grid
            .rooms()
            .first()
            .copied()
            .zip(grid.rooms().last().copied());
        match bounds {
            Some((first, last)) => {
                grid.set_spawn(first.center());
                grid.set_stairs(last.center());
            }
            None => {
                tracing::warn!(
                    width = dimensions.width,
                    height = dimensions.height,
                    "no room fits the map; spawning at the grid center without stairs"
                );
                grid.set_spawn(dimensions.center());
            }
        }

        tracing::debug!(
            rooms = grid.rooms().len(),
            leaves = tree.leaf_count(),
            spawn = %grid.spawn(),
            stairs = ?grid.stairs(),
            "generated level"
        );

        grid
    }
}

/// Writes rooms and corridors into a grid.
struct GridCarver<'g> {
    grid: &'g mut Grid,
    door_chance: f64,
}

impl GridCarver<'_> {
    fn carve_horizontal<R: Rng + ?Sized>(&mut self, x1: i32, x2: i32, y: i32, rng: &mut R) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve_corridor_cell(Position::new(x, y), rng);
        }
    }

    fn carve_vertical<R: Rng + ?Sized>(&mut self, y1: i32, y2: i32, x: i32, rng: &mut R) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve_corridor_cell(Position::new(x, y), rng);
        }
    }

    fn carve_corridor_cell<R: Rng + ?Sized>(&mut self, position: Position, rng: &mut R) {
        self.grid.set_kind(position, TileKind::Floor);
        self.try_place_door(position, rng);
    }

    /// Local "entering a room" guess: a freshly carved floor cell with at
    /// least two wall neighbors and one floor neighbor may turn one adjacent
    /// wall into a closed door, unless that wall already touches a door.
    /// The guess is coarse and sometimes lands mid-corridor.
    fn try_place_door<R: Rng + ?Sized>(&mut self, position: Position, rng: &mut R) {
        if self.grid.kind(position) != Some(TileKind::Floor) {
            return;
        }

        let (mut walls, mut floors) = (0, 0);
        for (dx, dy) in CARDINALS {
            match self.grid.kind(position.offset(dx, dy)) {
                Some(TileKind::Wall) => walls += 1,
                Some(TileKind::Floor) => floors += 1,
                _ => {}
            }
        }
        if walls < 2 || floors < 1 {
            return;
        }

        for (dx, dy) in CARDINALS {
            let candidate = position.offset(dx, dy);
            if self.grid.kind(candidate) != Some(TileKind::Wall) {
                continue;
            }

            let touches_door = CARDINALS.iter().any(|&(ndx, ndy)| {
                self.grid
                    .kind(candidate.offset(ndx, ndy))
                    .is_some_and(TileKind::is_door)
            });
            if !touches_door && chance(rng, self.door_chance) {
                self.grid.set_kind(candidate, TileKind::DoorClosed);
                break;
            }
        }
    }
}

impl<R: Rng + ?Sized> RoomCarver<R> for GridCarver<'_> {
    fn carve_room(&mut self, room: Room) {
        for cell in room.interior() {
            self.grid.set_kind(cell, TileKind::Floor);
        }
        self.grid.push_room(room);
    }

    fn connect(&mut self, first: Room, second: Room, rng: &mut R) {
        let (a, b) = (first.center(), second.center());
        if rng.gen_bool(0.5) {
            self.carve_horizontal(a.x, b.x, a.y, rng);
            self.carve_vertical(a.y, b.y, b.x, rng);
        } else {
            self.carve_vertical(a.y, b.y, a.x, rng);
            self.carve_horizontal(a.x, b.x, b.y, rng);
        }
    }
}
