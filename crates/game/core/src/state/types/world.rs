//! The single mutable aggregate of a running level.

use super::{Entity, EntityId, FloatingText, Item, ItemId, MessageLog, MessageTone, Position};
use crate::map::Grid;

/// Grid, entities, ground items and transient feedback of the current level.
///
/// The controllable entity and both id allocators survive floor transitions;
/// everything else is replaced by [`WorldState::enter_level`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub grid: Grid,
    pub player: Entity,
    /// Hostiles in insertion order, corpses included.
    pub hostiles: Vec<Entity>,
    /// Items lying on the ground.
    pub items: Vec<Item>,
    pub log: MessageLog,
    pub effects: Vec<FloatingText>,
    next_entity_id: u32,
    next_item_id: u32,
    floating_text_frames: u32,
}

impl WorldState {
    /// Places `player` on the grid's spawn point.
    pub fn new(grid: Grid, mut player: Entity, floating_text_frames: u32) -> Self {
        player.position = grid.spawn();
        Self {
            grid,
            player,
            hostiles: Vec::new(),
            items: Vec::new(),
            log: MessageLog::new(),
            effects: Vec::new(),
            next_entity_id: EntityId::PLAYER.0 + 1,
            next_item_id: 0,
            floating_text_frames,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn hostiles(&self) -> &[Entity] {
        &self.hostiles
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn floating_texts(&self) -> &[FloatingText] {
        &self.effects
    }

    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == self.player.id {
            return Some(&self.player);
        }
        self.hostiles.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id == self.player.id {
            return Some(&mut self.player);
        }
        self.hostiles.iter_mut().find(|entity| entity.id == id)
    }

    /// Living, movement-blocking entity standing on `position`.
    pub fn blocking_entity_at(&self, position: Position) -> Option<&Entity> {
        std::iter::once(&self.player)
            .chain(self.hostiles.iter())
            .find(|entity| entity.blocks_movement() && entity.position == position)
    }

    /// Index of the ground item on `position`, if any.
    pub fn item_at(&self, position: Position) -> Option<usize> {
        self.items.iter().position(|item| item.position == position)
    }

    pub fn message(&mut self, text: impl Into<String>, tone: MessageTone) {
        self.log.push(text, tone);
    }

    pub fn float_text(&mut self, text: impl Into<String>, position: Position, tone: MessageTone) {
        self.effects.push(FloatingText::new(
            text,
            position,
            tone,
            self.floating_text_frames,
        ));
    }

    /// Advances floating texts by `frames` and drops expired ones.
    pub fn tick_effects(&mut self, frames: u32) {
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(frames);
        }
        self.effects.retain(|effect| !effect.is_expired());
    }

    /// Marks the window around the controllable entity as explored.
    pub fn reveal_around_player(&mut self, half_width: u32, half_height: u32) {
        let center = self.player.position;
        self.grid.reveal_window(center, half_width, half_height);
    }

    /// Swaps in a fresh level: hostiles, ground items and effects are
    /// discarded, the controllable entity moves to the new spawn.
    pub fn enter_level(&mut self, grid: Grid) {
        self.player.position = grid.spawn();
        self.grid = grid;
        self.hostiles.clear();
        self.items.clear();
        self.effects.clear();
    }

    pub(crate) fn id_allocators(&self) -> (u32, u32) {
        (self.next_entity_id, self.next_item_id)
    }
}
