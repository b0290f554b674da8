use engine::Vec2;

use crate::catalog::{EnemyTemplate, NpcTemplate, SwordTemplate, TreasureTemplate};
use crate::geometry::Aabb;
use crate::item::Item;

pub const ENEMY_SIZE: f32 = 32.0;
pub const NPC_SIZE: f32 = 32.0;
pub const SWORD_SIZE: f32 = 24.0;
pub const TREASURE_SIZE: f32 = 20.0;
pub const ITEM_SIZE: f32 = 20.0;
pub const PORTAL_SIZE: f32 = 40.0;

/// Live monster instance. Stats come from the shared template; only the
/// fields below change during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub template: &'static EnemyTemplate,
    pub position: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub alive: bool,
    pub heading: f32,
    pub wander_timer: f32,
    pub last_attack_ms: Option<u64>,
}

impl Enemy {
    pub fn spawn(template: &'static EnemyTemplate, position: Vec2, heading: f32) -> Self {
        Self {
            template,
            position,
            size: Vec2::new(ENEMY_SIZE, ENEMY_SIZE),
            hp: template.hp,
            alive: true,
            heading,
            wander_timer: 0.0,
            last_attack_ms: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            position: self.position,
            size: self.size,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.template.hp
    }

    pub fn health_fraction(&self) -> f32 {
        if self.template.hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.template.hp as f32).min(1.0)
    }

    /// Applies damage and reports whether this hit killed the enemy. A dead
    /// enemy ignores further damage and keeps `hp == 0`.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount.max(0));
        if self.hp <= 0 {
            self.hp = 0;
            self.alive = false;
            return true;
        }
        false
    }
}

/// Collectible lying in the world, referencing its catalog template.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup<T: 'static> {
    pub template: &'static T,
    pub position: Vec2,
    pub size: Vec2,
    pub collected: bool,
}

impl<T> Pickup<T> {
    pub fn new(template: &'static T, position: Vec2, size: f32) -> Self {
        Self {
            template,
            position,
            size: Vec2::new(size, size),
            collected: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            position: self.position,
            size: self.size,
        }
    }
}

pub type SwordPickup = Pickup<SwordTemplate>;
pub type TreasurePickup = Pickup<TreasureTemplate>;
pub type ItemPickup = Pickup<Item>;

#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub template: &'static NpcTemplate,
    pub position: Vec2,
    pub size: Vec2,
}

impl Npc {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            position: self.position,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub target_zone: usize,
    pub name: String,
    pub position: Vec2,
    pub size: Vec2,
}

impl Portal {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            position: self.position,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::ENEMIES;

    use super::*;

    #[test]
    fn enemy_defeat_is_reported_once_and_hp_clamps() {
        let mut goblin = Enemy::spawn(&ENEMIES[0], Vec2::ZERO, 0.0);

        assert!(!goblin.take_damage(20));
        assert!(goblin.take_damage(25));
        assert_eq!(goblin.hp, 0);
        assert!(!goblin.alive);
        assert!(!goblin.take_damage(10));
        assert_eq!(goblin.hp, 0);
    }

    #[test]
    fn enemy_health_fraction_uses_template_max() {
        let mut knight = Enemy::spawn(&ENEMIES[3], Vec2::ZERO, 0.0);
        knight.take_damage(20);

        assert!((knight.health_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn fresh_enemy_has_never_attacked() {
        let skeleton = Enemy::spawn(&ENEMIES[2], Vec2::new(5.0, 6.0), 1.0);

        assert_eq!(skeleton.last_attack_ms, None);
        assert_eq!(skeleton.bounds(), Aabb::new(5.0, 6.0, 32.0, 32.0));
    }
}
