//! Read-only view of one frame, handed to the renderer after each tick.

use engine::{Camera2D, TileRange, Tilemap, Vec2};

use crate::effects::{AttackKind, DamageNumber, Particle};
use crate::item::Rarity;
use crate::player::{Health, Stats};
use crate::quest::QuestProgress;
use crate::state::GamePhase;
use crate::zone::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Sword,
    Treasure,
    Item,
    Npc,
    Portal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite<'a> {
    pub kind: SpriteKind,
    pub position: Vec2,
    pub size: Vec2,
    pub icon: &'static str,
    pub label: &'a str,
    pub rarity: Option<Rarity>,
    pub health_fraction: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus<'a> {
    pub health: Health,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub gold: i32,
    pub score: u64,
    pub stats: Stats,
    pub weapon: Option<&'a str>,
    pub attack_cooldown: f32,
    pub hurt: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLine {
    pub icon: &'static str,
    pub name: &'static str,
    pub summary: String,
    pub equipped: bool,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatStatus {
    pub nearby_enemies: usize,
}

impl CombatStatus {
    pub fn in_combat(&self) -> bool {
        self.nearby_enemies > 0
    }

    pub fn text(&self) -> String {
        if self.in_combat() {
            format!("{} enemies nearby - Ready to fight!", self.nearby_enemies)
        } else {
            "Safe area - No enemies nearby".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub zone_index: usize,
    pub zone_name: &'static str,
    pub zone_icon: &'static str,
    pub zone_size: Vec2,
    pub camera: Camera2D,
    pub tiles: &'a Tilemap<TileKind>,
    pub visible_tiles: Option<TileRange>,
    /// Every live entity in the zone, the player last. Off-screen sprites are
    /// included so the minimap can use them.
    pub sprites: Vec<Sprite<'a>>,
    pub attack_kind: Option<AttackKind>,
    pub attack_particles: &'a [Particle],
    pub particles: &'a [Particle],
    pub damage_numbers: &'a [DamageNumber],
    pub player: PlayerStatus<'a>,
    pub quests: Vec<QuestProgress>,
    pub inventory: Vec<InventoryLine>,
    pub inventory_capacity: usize,
    pub combat: CombatStatus,
    pub near_portal: Option<&'a str>,
}

impl FrameSnapshot<'_> {
    pub fn player_sprite(&self) -> Option<&Sprite<'_>> {
        self.sprites
            .iter()
            .rev()
            .find(|sprite| sprite.kind == SpriteKind::Player)
    }

    pub fn sprites_of(&self, kind: SpriteKind) -> impl Iterator<Item = &Sprite<'_>> {
        self.sprites.iter().filter(move |sprite| sprite.kind == kind)
    }
}

pub trait FrameSink {
    fn present(&mut self, frame: &FrameSnapshot<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_status_text_reflects_enemy_count() {
        assert_eq!(
            CombatStatus { nearby_enemies: 0 }.text(),
            "Safe area - No enemies nearby"
        );
        assert_eq!(
            CombatStatus { nearby_enemies: 3 }.text(),
            "3 enemies nearby - Ready to fight!"
        );
    }
}
