//! Static templates. Zone entities hold `&'static` references into these
//! tables and never mutate them.

use crate::item::{Item, ItemKind, PotionEffect, Rarity};
use crate::zone::ZoneTheme;

#[derive(Debug, Clone, PartialEq)]
pub struct SwordTemplate {
    pub name: &'static str,
    pub icon: &'static str,
    pub damage: i32,
    pub special: &'static str,
    pub value: i32,
    pub rarity: Rarity,
    pub points: u32,
}

impl SwordTemplate {
    pub fn item(&self) -> Item {
        Item {
            name: self.name,
            icon: self.icon,
            kind: ItemKind::Weapon {
                damage: self.damage,
                special: Some(self.special),
            },
            rarity: self.rarity,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreasureTemplate {
    pub name: &'static str,
    pub icon: &'static str,
    pub value: i32,
    pub rarity: Rarity,
    pub points: u32,
}

impl TreasureTemplate {
    pub fn item(&self) -> Item {
        Item {
            name: self.name,
            icon: self.icon,
            kind: ItemKind::Treasure,
            rarity: self.rarity,
            value: self.value,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub icon: &'static str,
    pub hp: i32,
    pub damage: i32,
    pub xp: u32,
    pub gold: i32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcRole {
    Merchant,
    QuestGiver,
    Healer,
}

#[derive(Debug, PartialEq)]
pub struct NpcTemplate {
    pub name: &'static str,
    pub icon: &'static str,
    pub role: NpcRole,
    pub dialogue: &'static str,
}

#[derive(Debug, PartialEq)]
pub struct ShopEntry {
    pub item: Item,
    pub price: i32,
}

#[derive(Debug, PartialEq)]
pub struct ZoneDescriptor {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub theme: ZoneTheme,
    pub icon: &'static str,
    pub difficulty: u8,
    pub description: &'static str,
    pub rewards: &'static str,
}

pub const HEALER_COST: i32 = 30;

pub static SWORDS: [SwordTemplate; 5] = [
    SwordTemplate {
        name: "Iron Sword",
        icon: "⚔️",
        damage: 25,
        special: "Power Strike",
        value: 100,
        rarity: Rarity::Uncommon,
        points: 500,
    },
    SwordTemplate {
        name: "Silver Blade",
        icon: "🗡️",
        damage: 35,
        special: "Lightning Cut",
        value: 200,
        rarity: Rarity::Rare,
        points: 800,
    },
    SwordTemplate {
        name: "Enchanted Sword",
        icon: "✨",
        damage: 50,
        special: "Magic Slash",
        value: 350,
        rarity: Rarity::Epic,
        points: 1200,
    },
    SwordTemplate {
        name: "Dragon Slayer",
        icon: "🐲",
        damage: 75,
        special: "Dragon's Wrath",
        value: 500,
        rarity: Rarity::Legendary,
        points: 2000,
    },
    SwordTemplate {
        name: "Excalibur",
        icon: "👑",
        damage: 100,
        special: "Divine Strike",
        value: 1000,
        rarity: Rarity::Mythic,
        points: 5000,
    },
];

pub static TREASURES: [TreasureTemplate; 5] = [
    TreasureTemplate {
        name: "Gold Coin",
        icon: "🪙",
        value: 10,
        rarity: Rarity::Common,
        points: 50,
    },
    TreasureTemplate {
        name: "Silver Chalice",
        icon: "🏆",
        value: 50,
        rarity: Rarity::Uncommon,
        points: 200,
    },
    TreasureTemplate {
        name: "Ancient Scroll",
        icon: "📜",
        value: 75,
        rarity: Rarity::Rare,
        points: 300,
    },
    TreasureTemplate {
        name: "Magic Crystal",
        icon: "💎",
        value: 100,
        rarity: Rarity::Epic,
        points: 500,
    },
    TreasureTemplate {
        name: "Dragon Egg",
        icon: "🥚",
        value: 200,
        rarity: Rarity::Legendary,
        points: 1000,
    },
];

pub static ENEMIES: [EnemyTemplate; 4] = [
    EnemyTemplate {
        name: "Goblin",
        icon: "👹",
        hp: 30,
        damage: 8,
        xp: 25,
        gold: 15,
        speed: 50.0,
    },
    EnemyTemplate {
        name: "Orc Warrior",
        icon: "👺",
        hp: 50,
        damage: 12,
        xp: 40,
        gold: 25,
        speed: 40.0,
    },
    EnemyTemplate {
        name: "Skeleton",
        icon: "💀",
        hp: 35,
        damage: 10,
        xp: 30,
        gold: 20,
        speed: 45.0,
    },
    EnemyTemplate {
        name: "Dark Knight",
        icon: "🖤",
        hp: 80,
        damage: 18,
        xp: 60,
        gold: 50,
        speed: 35.0,
    },
];

pub static NPCS: [NpcTemplate; 3] = [
    NpcTemplate {
        name: "Village Merchant",
        icon: "🧙‍♂️",
        role: NpcRole::Merchant,
        dialogue: "Welcome! I sell weapons, armor, and potions!",
    },
    NpcTemplate {
        name: "Wise Elder",
        icon: "👴",
        role: NpcRole::QuestGiver,
        dialogue: "Find the legendary swords to save our kingdom!",
    },
    NpcTemplate {
        name: "Healer",
        icon: "🧙‍♀️",
        role: NpcRole::Healer,
        dialogue: "I can restore your health for gold.",
    },
];

/// Consumables scattered across every zone.
pub static FIELD_ITEMS: [Item; 3] = [
    Item {
        name: "Health Potion",
        icon: "🧪",
        kind: ItemKind::Potion {
            effect: PotionEffect::Heal,
            potency: 50,
        },
        rarity: Rarity::Common,
        value: 50,
    },
    Item {
        name: "Iron Armor",
        icon: "🛡️",
        kind: ItemKind::Armor { defense: 10 },
        rarity: Rarity::Common,
        value: 80,
    },
    Item {
        name: "Magic Ring",
        icon: "💍",
        kind: ItemKind::Accessory { magic: 5 },
        rarity: Rarity::Common,
        value: 120,
    },
];

pub static SHOP_ITEMS: [ShopEntry; 4] = [
    ShopEntry {
        item: Item {
            name: "Iron Sword",
            icon: "⚔️",
            kind: ItemKind::Weapon {
                damage: 25,
                special: None,
            },
            rarity: Rarity::Common,
            value: 150,
        },
        price: 150,
    },
    ShopEntry {
        item: Item {
            name: "Steel Armor",
            icon: "🛡️",
            kind: ItemKind::Armor { defense: 15 },
            rarity: Rarity::Common,
            value: 200,
        },
        price: 200,
    },
    ShopEntry {
        item: Item {
            name: "Health Potion",
            icon: "🧪",
            kind: ItemKind::Potion {
                effect: PotionEffect::Heal,
                potency: 50,
            },
            rarity: Rarity::Common,
            value: 50,
        },
        price: 30,
    },
    ShopEntry {
        item: Item {
            name: "Mana Potion",
            icon: "💙",
            kind: ItemKind::Potion {
                effect: PotionEffect::Mana,
                potency: 30,
            },
            rarity: Rarity::Common,
            value: 30,
        },
        price: 40,
    },
];

pub static ZONES: [ZoneDescriptor; 4] = [
    ZoneDescriptor {
        name: "Village Outskirts",
        width: 1600,
        height: 1200,
        theme: ZoneTheme::Grass,
        icon: "🏘️",
        difficulty: 1,
        description: "The peaceful village outskirts where your adventure begins",
        rewards: "Basic equipment and starting resources",
    },
    ZoneDescriptor {
        name: "Dark Forest",
        width: 2000,
        height: 1600,
        theme: ZoneTheme::Forest,
        icon: "🌲",
        difficulty: 2,
        description: "A mysterious forest filled with dangerous creatures",
        rewards: "Enhanced weapons and forest treasures",
    },
    ZoneDescriptor {
        name: "Ancient Ruins",
        width: 1800,
        height: 1400,
        theme: ZoneTheme::Ruins,
        icon: "🏛️",
        difficulty: 3,
        description: "Crumbling ruins that hold ancient secrets",
        rewards: "Rare artifacts and enchanted items",
    },
    ZoneDescriptor {
        name: "Dragon's Lair",
        width: 2400,
        height: 1800,
        theme: ZoneTheme::Cave,
        icon: "🐉",
        difficulty: 5,
        description: "The final challenge - face the ancient dragon",
        rewards: "Legendary equipment and ultimate glory",
    },
];

pub const STARTING_WEAPON: Item = Item {
    name: "Rusty Sword",
    icon: "🗡️",
    kind: ItemKind::Weapon {
        damage: 15,
        special: Some("Quick Strike"),
    },
    rarity: Rarity::Common,
    value: 25,
};

const REWARD_HEALTH_POTION: Item = Item {
    name: "Health Potion",
    icon: "🧪",
    kind: ItemKind::Potion {
        effect: PotionEffect::Heal,
        potency: 50,
    },
    rarity: Rarity::Common,
    value: 50,
};

/// Quest reward items by name. Unknown names fall back to a Health Potion.
pub fn reward_item(name: &str) -> Item {
    match name {
        "Magic Ring" => Item {
            name: "Magic Ring",
            icon: "💍",
            kind: ItemKind::Accessory { magic: 10 },
            rarity: Rarity::Common,
            value: 200,
        },
        "Iron Armor" => Item {
            name: "Iron Armor",
            icon: "🛡️",
            kind: ItemKind::Armor { defense: 15 },
            rarity: Rarity::Common,
            value: 150,
        },
        _ => REWARD_HEALTH_POTION,
    }
}

/// Difficulty rendered as five stars, filled `*` and empty `-`.
pub fn difficulty_stars(difficulty: u8) -> String {
    let filled = difficulty.clamp(1, 5) as usize;
    format!("{}{}", "*".repeat(filled), "-".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sword_tiers_grow_in_damage() {
        assert!(SWORDS.windows(2).all(|pair| pair[0].damage < pair[1].damage));
    }

    #[test]
    fn sword_item_carries_special_attack() {
        let item = SWORDS[4].item();

        assert_eq!(item.weapon_damage(), Some(100));
        assert_eq!(item.special_attack(), Some("Divine Strike"));
        assert_eq!(item.rarity, Rarity::Mythic);
    }

    #[test]
    fn unknown_reward_falls_back_to_health_potion() {
        assert_eq!(reward_item("Crown of Nowhere"), REWARD_HEALTH_POTION);
        assert_eq!(reward_item("Iron Armor").kind, ItemKind::Armor { defense: 15 });
    }

    #[test]
    fn reward_items_differ_from_field_variants() {
        let field_ring = FIELD_ITEMS
            .iter()
            .find(|item| item.name == "Magic Ring")
            .expect("field ring");

        assert_ne!(reward_item("Magic Ring").kind, field_ring.kind);
    }

    #[test]
    fn difficulty_stars_clamp_to_five() {
        assert_eq!(difficulty_stars(2), "**---");
        assert_eq!(difficulty_stars(9), "*****");
    }

    #[test]
    fn zones_are_large_enough_for_spawn_padding() {
        for zone in &ZONES {
            assert!(zone.width >= 200 && zone.height >= 200, "{}", zone.name);
        }
    }
}
