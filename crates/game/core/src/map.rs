//! Tile grid owned by the world state.
//!
//! The grid is the only mutable terrain representation: the generator carves
//! it, gameplay flips doors open, and the presentation layer reads tile
//! categories and explored flags from it.

use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// Canonical tile categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    Wall,
    Floor,
    DoorClosed,
    DoorOpen,
    Stairs,
}

impl TileKind {
    /// Default passability of the category.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::DoorOpen | Self::Stairs)
    }

    pub const fn is_door(self) -> bool {
        matches!(self, Self::DoorClosed | Self::DoorOpen)
    }
}

/// Per-cell terrain state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    kind: TileKind,
    walkable: bool,
    blocks_sight: bool,
    explored: bool,
}

impl Tile {
    /// Creates a tile whose sight blocking follows `!walkable`.
    pub const fn new(kind: TileKind) -> Self {
        let walkable = kind.is_walkable();
        Self {
            kind,
            walkable,
            blocks_sight: !walkable,
            explored: false,
        }
    }

    /// Creates a tile with an explicit sight-blocking override.
    pub const fn with_sight(kind: TileKind, blocks_sight: bool) -> Self {
        Self {
            kind,
            walkable: kind.is_walkable(),
            blocks_sight,
            explored: false,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn blocks_sight(&self) -> bool {
        self.blocks_sight
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Wall)
    }
}

/// Axis-aligned room rectangle. The carved interior is
/// `[x + 1, x + w) × [y + 1, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Cells carved as floor for this room.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y + 1..self.y + self.h)
            .flat_map(move |y| (self.x + 1..self.x + self.w).map(move |x| Position::new(x, y)))
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x > self.x
            && position.x < self.x + self.w
            && position.y > self.y
            && position.y < self.y + self.h
    }
}

/// Fixed-size tile array plus the denormalized spawn and stairs points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
    spawn: Position,
    stairs: Option<Position>,
    rooms: Vec<Room>,
}

impl Grid {
    /// Creates a grid filled with walls.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![Tile::default(); dimensions.area()],
            spawn: dimensions.center(),
            stairs: None,
            rooms: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(move |index| &mut self.tiles[index])
    }

    pub fn kind(&self, position: Position) -> Option<TileKind> {
        self.tile(position).map(Tile::kind)
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates tiles with their positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.dimensions.width as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            (
                Position::new((index % width) as i32, (index / width) as i32),
                tile,
            )
        })
    }

    /// Off-grid positions are never walkable.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_walkable)
    }

    /// Visibility stub: every in-bounds tile counts as visible.
    pub fn is_visible(&self, position: Position) -> bool {
        self.contains(position)
    }

    /// Replaces the category of a tile, applying the category's walkable and
    /// sight defaults. The explored flag is preserved.
    pub fn set_kind(&mut self, position: Position, kind: TileKind) -> bool {
        match self.tile_mut(position) {
            Some(tile) => {
                let explored = tile.explored;
                *tile = Tile::new(kind);
                tile.explored = explored;
                true
            }
            None => false,
        }
    }

    pub fn mark_explored(&mut self, position: Position) {
        if let Some(tile) = self.tile_mut(position) {
            tile.explored = true;
        }
    }

    /// Marks every visible tile inside the window around `center` as explored.
    pub fn reveal_window(&mut self, center: Position, half_width: u32, half_height: u32) {
        let (hw, hh) = (half_width as i32, half_height as i32);
        for y in center.y - hh..=center.y + hh {
            for x in center.x - hw..=center.x + hw {
                let position = Position::new(x, y);
                if self.is_visible(position) {
                    self.mark_explored(position);
                }
            }
        }
    }

    pub fn spawn(&self) -> Position {
        self.spawn
    }

    pub fn stairs(&self) -> Option<Position> {
        self.stairs
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub(crate) fn set_spawn(&mut self, spawn: Position) {
        self.spawn = spawn;
    }

    pub(crate) fn set_stairs(&mut self, stairs: Position) {
        self.set_kind(stairs, TileKind::Stairs);
        self.stairs = Some(stairs);
    }

    pub(crate) fn push_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Structural check used when restoring persisted grids.
    pub fn is_consistent(&self) -> bool {
        self.tiles.len() == self.dimensions.area()
            && self.contains(self.spawn)
            && self
                .stairs
                .is_none_or(|stairs| self.kind(stairs) == Some(TileKind::Stairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_wall_and_unexplored() {
        let grid = Grid::new(MapDimensions::new(4, 3));
        assert_eq!(grid.tiles().len(), 12);
        assert!(grid.tiles().iter().all(|tile| tile.kind() == TileKind::Wall));
        assert!(grid.tiles().iter().all(|tile| tile.blocks_sight()));
        assert!(!grid.is_walkable(Position::new(1, 1)));
        assert!(!grid.is_walkable(Position::new(-1, 0)));
    }

    #[test]
    fn set_kind_applies_category_defaults_and_keeps_explored() {
        let mut grid = Grid::new(MapDimensions::new(4, 4));
        let pos = Position::new(2, 2);
        grid.mark_explored(pos);
        grid.set_kind(pos, TileKind::DoorClosed);
        let tile = grid.tile(pos).expect("in bounds");
        assert!(!tile.is_walkable());
        assert!(tile.blocks_sight());
        assert!(tile.is_explored());

        grid.set_kind(pos, TileKind::DoorOpen);
        let tile = grid.tile(pos).expect("in bounds");
        assert!(tile.is_walkable());
        assert!(!tile.blocks_sight());
    }

    #[test]
    fn explicit_sight_override_is_kept() {
        let tile = Tile::with_sight(TileKind::Floor, true);
        assert!(tile.is_walkable());
        assert!(tile.blocks_sight());
    }

    #[test]
    fn reveal_window_clips_to_bounds() {
        let mut grid = Grid::new(MapDimensions::new(5, 5));
        grid.reveal_window(Position::new(0, 0), 1, 1);
        let explored: Vec<_> = grid
            .iter()
            .filter(|(_, tile)| tile.is_explored())
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(
            explored,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn room_interior_excludes_top_left_border() {
        let room = Room::new(2, 3, 3, 2);
        let cells: Vec<_> = room.interior().collect();
        assert_eq!(cells, vec![Position::new(3, 4), Position::new(4, 4)]);
        assert_eq!(room.center(), Position::new(3, 4));
        assert!(room.contains(room.center()));
    }
}
