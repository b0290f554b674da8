use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PotionEffect {
    Heal,
    Mana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Weapon {
        damage: i32,
        special: Option<&'static str>,
    },
    Armor {
        defense: i32,
    },
    Accessory {
        magic: i32,
    },
    Potion {
        effect: PotionEffect,
        potency: i32,
    },
    Treasure,
}

impl ItemKind {
    pub fn category(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Accessory { .. } => "accessory",
            ItemKind::Potion { .. } => "potion",
            ItemKind::Treasure => "treasure",
        }
    }
}

/// An owned item value. Inventory entries are copies; nothing aliases a
/// catalog template after pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub name: &'static str,
    pub icon: &'static str,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub value: i32,
}

impl Item {
    pub fn weapon_damage(&self) -> Option<i32> {
        match self.kind {
            ItemKind::Weapon { damage, .. } => Some(damage),
            _ => None,
        }
    }

    pub fn special_attack(&self) -> Option<&'static str> {
        match self.kind {
            ItemKind::Weapon { special, .. } => special,
            _ => None,
        }
    }

    pub fn heal_amount(&self) -> Option<i32> {
        match self.kind {
            ItemKind::Potion {
                effect: PotionEffect::Heal,
                potency,
            } => Some(potency),
            _ => None,
        }
    }

    /// Short stat line for shop and inventory listings.
    pub fn summary(&self) -> String {
        match self.kind {
            ItemKind::Weapon { damage, .. } => format!("damage {damage}"),
            ItemKind::Armor { defense } => format!("defense {defense}"),
            ItemKind::Accessory { magic } => format!("magic +{magic}"),
            ItemKind::Potion { effect, potency } => {
                let what = match effect {
                    PotionEffect::Heal => "hp",
                    PotionEffect::Mana => "mana",
                };
                format!("restores {potency} {what}")
            }
            ItemKind::Treasure => format!("worth {} gold", self.value),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion(effect: PotionEffect) -> Item {
        Item {
            name: "Test Potion",
            icon: "",
            kind: ItemKind::Potion {
                effect,
                potency: 30,
            },
            rarity: Rarity::Common,
            value: 10,
        }
    }

    #[test]
    fn only_heal_potions_report_heal_amount() {
        assert_eq!(potion(PotionEffect::Heal).heal_amount(), Some(30));
        assert_eq!(potion(PotionEffect::Mana).heal_amount(), None);
    }

    #[test]
    fn display_includes_category() {
        assert_eq!(
            potion(PotionEffect::Mana).to_string(),
            "Test Potion (potion)"
        );
    }

    #[test]
    fn rarity_orders_by_tier() {
        assert!(Rarity::Common < Rarity::Mythic);
        assert_eq!(Rarity::Epic.label(), "epic");
    }
}
