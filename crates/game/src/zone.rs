use engine::{Tilemap, TilemapError, Vec2};
use thiserror::Error;
use tracing::info;

use crate::catalog::{ZoneDescriptor, ENEMIES, FIELD_ITEMS, NPCS, SWORDS, TREASURES};
use crate::entity::{
    Enemy, ItemPickup, Npc, Portal, SwordPickup, TreasurePickup, ENEMY_SIZE, ITEM_SIZE, NPC_SIZE,
    PORTAL_SIZE, SWORD_SIZE, TREASURE_SIZE,
};
use crate::geometry::clamp_to_bounds;
use crate::rng::GameRng;

pub const TILE_SIZE: u32 = 32;
pub const TREASURE_COUNT: usize = 40;
pub const ENEMY_COUNT: usize = 25;
pub const ITEM_COUNT: usize = 15;

const PICKUP_PADDING: f32 = 25.0;
const ENEMY_PADDING: f32 = 50.0;
const MIN_ZONE_EXTENT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneTheme {
    Grass,
    Forest,
    Ruins,
    Cave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Grass,
    Stone,
    Tree,
    DarkTree,
    Water,
    RuinsWall,
    RuinsFloor,
    CaveWall,
    CaveFloor,
    Lava,
}

impl ZoneTheme {
    /// Cumulative roll thresholds and the fallback tile for rolls past the
    /// last threshold.
    fn tile_table(self) -> (&'static [(f32, TileKind)], TileKind) {
        match self {
            ZoneTheme::Grass => (
                &[
                    (0.10, TileKind::Stone),
                    (0.15, TileKind::Tree),
                    (0.18, TileKind::Water),
                ],
                TileKind::Grass,
            ),
            ZoneTheme::Forest => (
                &[
                    (0.40, TileKind::Tree),
                    (0.50, TileKind::DarkTree),
                    (0.60, TileKind::Stone),
                ],
                TileKind::Grass,
            ),
            ZoneTheme::Ruins => (
                &[
                    (0.30, TileKind::Stone),
                    (0.40, TileKind::RuinsWall),
                    (0.50, TileKind::RuinsFloor),
                ],
                TileKind::Grass,
            ),
            ZoneTheme::Cave => (
                &[
                    (0.50, TileKind::CaveWall),
                    (0.60, TileKind::CaveFloor),
                    (0.70, TileKind::Lava),
                ],
                TileKind::Stone,
            ),
        }
    }
}

/// Maps a uniform roll in `[0, 1)` onto the theme's tile distribution.
pub fn pick_tile(theme: ZoneTheme, roll: f32) -> TileKind {
    let (table, fallback) = theme.tile_table();
    table
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|(_, tile)| *tile)
        .unwrap_or(fallback)
}

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone index {index} out of range (have {count} zones)")]
    UnknownZone { index: usize, count: usize },
    #[error("zone {name} is too small to populate ({width}x{height})")]
    Degenerate {
        name: &'static str,
        width: u32,
        height: u32,
    },
    #[error("failed to build tile grid: {0}")]
    Tilemap(#[from] TilemapError),
}

/// Everything that belongs to the active zone. Built in one piece by
/// [`generate_zone`] and replaced wholesale on travel.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneState {
    pub index: usize,
    pub descriptor: &'static ZoneDescriptor,
    pub tiles: Tilemap<TileKind>,
    pub swords: Vec<SwordPickup>,
    pub treasures: Vec<TreasurePickup>,
    pub enemies: Vec<Enemy>,
    pub npcs: Vec<Npc>,
    pub items: Vec<ItemPickup>,
    pub portals: Vec<Portal>,
}

impl ZoneState {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.descriptor.width as f32, self.descriptor.height as f32)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| enemy.alive)
    }
}

pub fn generate_zone(
    atlas: &'static [ZoneDescriptor],
    index: usize,
    rng: &mut GameRng,
) -> Result<ZoneState, ZoneError> {
    let Some(descriptor) = atlas.get(index) else {
        return Err(ZoneError::UnknownZone {
            index,
            count: atlas.len(),
        });
    };
    if descriptor.width < MIN_ZONE_EXTENT || descriptor.height < MIN_ZONE_EXTENT {
        return Err(ZoneError::Degenerate {
            name: descriptor.name,
            width: descriptor.width,
            height: descriptor.height,
        });
    }

    let width = descriptor.width as f32;
    let height = descriptor.height as f32;
    let bounds = Vec2::new(width, height);

    let columns = descriptor.width.div_ceil(TILE_SIZE);
    let rows = descriptor.height.div_ceil(TILE_SIZE);
    let tile_kinds = (0..columns as usize * rows as usize)
        .map(|_| pick_tile(descriptor.theme, rng.unit()))
        .collect();
    let tiles = Tilemap::new(columns, rows, TILE_SIZE, tile_kinds)?;

    let swords = SWORDS
        .iter()
        .enumerate()
        .map(|(tier, template)| {
            let tier = tier as f32;
            let raw = Vec2::new(
                200.0 + tier * 300.0 + rng.unit() * 200.0,
                200.0 + tier * 200.0 + rng.unit() * 200.0,
            );
            let size = Vec2::new(SWORD_SIZE, SWORD_SIZE);
            SwordPickup::new(template, clamp_to_bounds(raw, size, bounds), SWORD_SIZE)
        })
        .collect();

    let mut treasures = Vec::with_capacity(TREASURE_COUNT);
    for _ in 0..TREASURE_COUNT {
        let position = padded_position(rng, bounds, PICKUP_PADDING);
        if let Some(template) = rng.choose(&TREASURES) {
            treasures.push(TreasurePickup::new(template, position, TREASURE_SIZE));
        }
    }

    let mut enemies = Vec::with_capacity(ENEMY_COUNT);
    for _ in 0..ENEMY_COUNT {
        let position = padded_position(rng, bounds, ENEMY_PADDING);
        let Some(template) = rng.choose(&ENEMIES) else {
            continue;
        };
        let heading = rng.angle();
        enemies.push(Enemy::spawn(template, position, heading));
    }

    let npcs = NPCS
        .iter()
        .enumerate()
        .map(|(slot, template)| Npc {
            template,
            position: Vec2::new(100.0 + slot as f32 * 400.0, 100.0),
            size: Vec2::new(NPC_SIZE, NPC_SIZE),
        })
        .collect();

    let mut items = Vec::with_capacity(ITEM_COUNT);
    for _ in 0..ITEM_COUNT {
        let position = padded_position(rng, bounds, PICKUP_PADDING);
        if let Some(template) = rng.choose(&FIELD_ITEMS) {
            items.push(ItemPickup::new(template, position, ITEM_SIZE));
        }
    }

    let mut portals = Vec::new();
    if let Some(next) = atlas.get(index + 1) {
        portals.push(Portal {
            target_zone: index + 1,
            name: format!("Portal to {}", next.name),
            position: Vec2::new(width - 100.0, height / 2.0),
            size: Vec2::new(PORTAL_SIZE, PORTAL_SIZE),
        });
    }
    if let Some(previous) = index.checked_sub(1).and_then(|prev| atlas.get(prev)) {
        portals.push(Portal {
            target_zone: index - 1,
            name: format!("Portal to {}", previous.name),
            position: Vec2::new(50.0, height / 2.0),
            size: Vec2::new(PORTAL_SIZE, PORTAL_SIZE),
        });
    }

    info!(
        zone = descriptor.name,
        index,
        columns,
        rows,
        enemies = ENEMY_COUNT,
        portals = portals.len(),
        "zone_generated"
    );

    Ok(ZoneState {
        index,
        descriptor,
        tiles,
        swords,
        treasures,
        enemies,
        npcs,
        items,
        portals,
    })
}

/// Uniform position in `[padding, extent - padding)` on each axis.
fn padded_position(rng: &mut GameRng, bounds: Vec2, padding: f32) -> Vec2 {
    Vec2::new(
        rng.unit() * (bounds.x - padding * 2.0) + padding,
        rng.unit() * (bounds.y - padding * 2.0) + padding,
    )
}
