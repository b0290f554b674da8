use engine::Vec2;
use thiserror::Error;

use crate::catalog::STARTING_WEAPON;
use crate::effects::AttackAnimation;
use crate::geometry::Aabb;
use crate::item::Item;

pub const PLAYER_SIZE: f32 = 32.0;
pub const PLAYER_START: Vec2 = Vec2::new(400.0, 300.0);
pub const PLAYER_ZONE_ENTRY: Vec2 = Vec2::new(100.0, 100.0);
pub const DEFAULT_PLAYER_SPEED: f32 = 180.0;
pub const DEFAULT_INVENTORY_CAPACITY: usize = 20;
pub const STARTING_GOLD: i32 = 50;
pub const STARTING_HP: i32 = 100;
pub const STARTING_EXPERIENCE_TO_NEXT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub strength: i32,
    pub defense: i32,
    pub agility: i32,
    pub magic: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 10,
            defense: 5,
            agility: 8,
            magic: 5,
        }
    }
}

/// Hit points. `current` is signed so a lethal hit can drive it below zero
/// before defeat is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Heals up to `max` and returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount.max(0)).min(self.max);
        self.current - before
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn take(&mut self, damage: i32) {
        self.current = self.current.saturating_sub(damage.max(0));
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current.max(0) as f32 / self.max as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: ItemId,
    pub item: Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory full ({capacity} slots)")]
    Full { capacity: usize },
}

/// Ordered, bounded item list. Entries get a stable [`ItemId`] so equipment
/// can refer to them without aliasing the item value.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    pub fn add(&mut self, item: Item) -> Result<ItemId, InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.capacity,
            });
        }
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.entries.push(InventoryEntry { id, item });
        Ok(id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).item)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.item)
    }

    pub fn find(&self, predicate: impl Fn(&Item) -> bool) -> Option<ItemId> {
        self.entries
            .iter()
            .find(|entry| predicate(&entry.item))
            .map(|entry| entry.id)
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equipment {
    pub weapon: Option<ItemId>,
    pub armor: Option<ItemId>,
    pub accessory: Option<ItemId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub move_intent: Vec2,
    pub health: Health,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub gold: i32,
    pub score: u64,
    pub stats: Stats,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub attack_cooldown: f32,
    /// Short flash after the player takes a hit.
    pub combat_cooldown: f32,
    pub attack_animation: AttackAnimation,
}

impl PlayerProfile {
    /// Fresh level-1 hero carrying and wielding the starting weapon.
    pub fn new(speed: f32, inventory_capacity: usize) -> Self {
        let mut inventory = Inventory::with_capacity(inventory_capacity);
        let weapon = inventory.add(STARTING_WEAPON).ok();
        Self {
            position: PLAYER_START,
            size: Vec2::new(PLAYER_SIZE, PLAYER_SIZE),
            speed,
            move_intent: Vec2::ZERO,
            health: Health::full(STARTING_HP),
            level: 1,
            experience: 0,
            experience_to_next: STARTING_EXPERIENCE_TO_NEXT,
            gold: STARTING_GOLD,
            score: 0,
            stats: Stats::default(),
            equipment: Equipment {
                weapon,
                ..Equipment::default()
            },
            inventory,
            attack_cooldown: 0.0,
            combat_cooldown: 0.0,
            attack_animation: AttackAnimation::default(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            position: self.position,
            size: self.size,
        }
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.equipment
            .weapon
            .and_then(|id| self.inventory.get(id))
    }

    pub fn weapon_damage(&self) -> Option<i32> {
        self.equipped_weapon().and_then(Item::weapon_damage)
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_cooldown <= 0.0
    }

    /// Adds experience and resolves every level threshold it crosses.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<LevelUp> {
        self.experience = self.experience.saturating_add(amount);
        let mut level_ups = Vec::new();
        while self.experience_to_next > 0 && self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            self.experience_to_next = self.experience_to_next * 6 / 5;
            self.health.max += 20;
            self.health.restore();
            self.stats.strength += 3;
            self.stats.defense += 2;
            self.stats.agility += 1;
            self.stats.magic += 1;
            level_ups.push(LevelUp { level: self.level });
        }
        level_ups
    }
}

#[cfg(test)]
mod tests {
    use crate::item::{ItemKind, PotionEffect, Rarity};

    use super::*;

    fn potion() -> Item {
        Item {
            name: "Health Potion",
            icon: "",
            kind: ItemKind::Potion {
                effect: PotionEffect::Heal,
                potency: 50,
            },
            rarity: Rarity::Common,
            value: 50,
        }
    }

    #[test]
    fn new_player_starts_with_rusty_sword_equipped() {
        let player = PlayerProfile::new(DEFAULT_PLAYER_SPEED, DEFAULT_INVENTORY_CAPACITY);

        assert_eq!(player.level, 1);
        assert_eq!(player.health, Health::full(100));
        assert_eq!(player.gold, 50);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.equipped_weapon().map(|item| item.name), Some("Rusty Sword"));
        assert_eq!(player.weapon_damage(), Some(15));
    }

    #[test]
    fn exact_threshold_levels_once_and_zeroes_experience() {
        let mut player = PlayerProfile::new(DEFAULT_PLAYER_SPEED, DEFAULT_INVENTORY_CAPACITY);

        let level_ups = player.gain_experience(100);

        assert_eq!(level_ups, vec![LevelUp { level: 2 }]);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 0);
        assert_eq!(player.experience_to_next, 120);
        assert_eq!(player.health, Health::full(120));
        assert_eq!(
            player.stats,
            Stats {
                strength: 13,
                defense: 7,
                agility: 9,
                magic: 6
            }
        );
    }

    #[test]
    fn large_grant_crosses_multiple_thresholds() {
        let mut player = PlayerProfile::new(DEFAULT_PLAYER_SPEED, DEFAULT_INVENTORY_CAPACITY);

        let level_ups = player.gain_experience(250);

        assert_eq!(level_ups.len(), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 30);
        assert_eq!(player.experience_to_next, 144);
    }

    #[test]
    fn level_up_fully_heals() {
        let mut player = PlayerProfile::new(DEFAULT_PLAYER_SPEED, DEFAULT_INVENTORY_CAPACITY);
        player.health.take(70);

        player.gain_experience(100);

        assert_eq!(player.health.current, player.health.max);
    }

    #[test]
    fn inventory_rejects_item_beyond_capacity() {
        let mut inventory = Inventory::with_capacity(3);
        for _ in 0..3 {
            inventory.add(potion()).expect("slot available");
        }

        let result = inventory.add(potion());

        assert_eq!(result, Err(InventoryError::Full { capacity: 3 }));
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut inventory = Inventory::with_capacity(2);
        let first = inventory.add(potion()).expect("first");
        inventory.remove(first).expect("removed");

        let second = inventory.add(potion()).expect("second");

        assert_ne!(first, second);
        assert!(inventory.get(first).is_none());
    }

    #[test]
    fn heal_caps_at_max_and_reports_restored_amount() {
        let mut health = Health::full(100);
        health.take(30);

        assert_eq!(health.heal(50), 30);
        assert!(health.is_full());
    }

    #[test]
    fn lethal_damage_goes_below_zero() {
        let mut health = Health::full(10);
        health.take(15);

        assert_eq!(health.current, -5);
        assert!(health.is_depleted());
        assert_eq!(health.fraction(), 0.0);
    }
}
