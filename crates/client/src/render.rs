//! ASCII rendering of the read-only game views.

use std::fmt::Write;

use crawl_core::{Game, Grid, Position, TileKind, WorldState};

fn tile_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Wall => '#',
        TileKind::Floor => '.',
        TileKind::DoorClosed => '+',
        TileKind::DoorOpen => '\'',
        TileKind::Stairs => '>',
    }
}

/// Glyph of whatever stands on `position`; corpses draw below living entities.
fn glyph_at(world: &WorldState, position: Position) -> Option<char> {
    if world.player.position == position {
        return Some(if world.player.is_alive() { '@' } else { '%' });
    }
    let living = world
        .hostiles
        .iter()
        .filter(|hostile| hostile.is_alive() && hostile.position == position)
        .find_map(|hostile| hostile.as_hostile().map(|h| h.kind.glyph()));
    if living.is_some() {
        return living;
    }
    if let Some(item) = world.items.iter().find(|item| item.position == position) {
        return Some(item.kind.glyph());
    }
    world
        .hostiles
        .iter()
        .any(|hostile| hostile.position == position)
        .then_some('%')
}

/// Draws the level. Unexplored tiles are blank unless `reveal_all` is set.
pub fn render_map(world: &WorldState, reveal_all: bool) -> String {
    let grid: &Grid = &world.grid;
    let mut out = String::with_capacity(grid.dimensions().area() + grid.height() as usize);
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let position = Position::new(x, y);
            let Some(tile) = grid.tile(position) else {
                continue;
            };
            let glyph = if !reveal_all && !tile.is_explored() {
                ' '
            } else {
                glyph_at(world, position).unwrap_or_else(|| tile_glyph(tile.kind()))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line status bar.
pub fn render_status(game: &Game) -> String {
    let player = &game.world().player;
    let mut line = format!(
        "Floor {}/{}  HP {}/{}  ATK {}",
        game.floor(),
        game.config().num_floors,
        player.health(),
        player.max_health(),
        player.attack_power(),
    );
    if let Some(carrier) = player.as_controllable() {
        let _ = write!(line, "  Keys {}", carrier.keys);
        for (slot, item) in carrier.inventory.iter().enumerate() {
            let marker = if carrier.equipped == Some(item.id) { "*" } else { "" };
            let _ = write!(line, "  [{}] {}{}", slot + 1, item.name(), marker);
        }
    }
    line
}

/// Message log, newest first, with the tone as a prefix.
pub fn render_log(world: &WorldState) -> String {
    world
        .log()
        .iter()
        .map(|message| format!("[{}] {}", message.tone, message.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Live floating texts, one per line, as `text @ (x, y)`.
pub fn render_effects(world: &WorldState) -> String {
    world
        .floating_texts()
        .iter()
        .map(|effect| format!("  {} @ ({}, {})", effect.text, effect.position.x, effect.position.y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::GameConfig;

    #[test]
    fn full_map_has_one_row_per_line() {
        let game = Game::new_game(GameConfig::default().with_dimensions(40, 30), 1);
        let map = render_map(game.world(), true);
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 30);
        assert!(rows.iter().all(|row| row.chars().count() == 40));
        assert_eq!(map.matches('@').count(), 1);
        assert!(map.contains('>') || game.world().grid.stairs().is_none());
    }

    #[test]
    fn unexplored_tiles_are_blank() {
        let game = Game::new_game(GameConfig::default(), 2);
        let hidden = render_map(game.world(), false);
        let full = render_map(game.world(), true);
        assert!(hidden.matches(' ').count() > full.matches(' ').count());
        assert!(hidden.contains('@'));
    }

    #[test]
    fn status_shows_floor_and_health() {
        let game = Game::new_game(GameConfig::default(), 3);
        let status = render_status(&game);
        assert!(status.starts_with("Floor 1/3  HP 100/100  ATK 10"));
        assert!(render_log(game.world()).contains("Welcome to the Dungeon!"));
        assert!(render_effects(game.world()).is_empty());
    }
}
