//! Attack resolution between the player and zone enemies.

use tracing::{debug, info};

use crate::catalog::EnemyTemplate;
use crate::effects::{hit_burst, AttackKind, DamageNumber};
use crate::error::ActionError;
use crate::notify::{Notification, UiSink};
use crate::player::PlayerProfile;
use crate::rng::GameRng;
use crate::store::EntityStore;
use crate::zone::ZoneState;

pub const PLAYER_ATTACK_RANGE: f32 = 60.0;
pub const SPECIAL_ATTACK_RANGE: f32 = 80.0;
pub const COMBAT_STATUS_RANGE: f32 = 80.0;
pub const ENEMY_ATTACK_RANGE: f32 = 50.0;
pub const ENEMY_ATTACK_INTERVAL_MS: u64 = 2000;
pub const CRITICAL_CHANCE: f64 = 0.2;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
pub const SPECIAL_MULTIPLIER: f64 = 1.5;
pub const ATTACK_COOLDOWN_SECONDS: f32 = 1.0;
pub const SPECIAL_COOLDOWN_SECONDS: f32 = 3.0;
pub const HURT_FLASH_SECONDS: f32 = 0.3;
pub const UNARMED_DAMAGE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub target: usize,
    pub damage: i32,
    pub critical: bool,
    pub defeated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialOutcome {
    pub name: &'static str,
    pub damage: i32,
    pub hits: usize,
    pub defeated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStrike {
    pub damage: i32,
    pub player_defeated: bool,
}

pub fn roll_critical(rng: &mut GameRng) -> bool {
    rng.random_bool(CRITICAL_CHANCE)
}

pub fn attack_damage(weapon_damage: Option<i32>, strength: i32, critical: bool) -> i32 {
    let base = f64::from(weapon_damage.unwrap_or(UNARMED_DAMAGE) + strength);
    let multiplier = if critical { CRITICAL_MULTIPLIER } else { 1.0 };
    ((base * multiplier).floor() as i32).max(0)
}

pub fn special_damage(weapon_damage: i32, strength: i32) -> i32 {
    ((f64::from(weapon_damage) * SPECIAL_MULTIPLIER + f64::from(strength)).floor() as i32).max(0)
}

/// Enemy hits always land for at least one point.
pub fn enemy_strike_damage(enemy_damage: i32, defense: i32) -> i32 {
    enemy_damage.saturating_sub(defense).max(1)
}

/// Index of the closest living enemy strictly inside `range`. Ties keep the
/// earlier enemy.
pub fn nearest_enemy_in_range(zone: &ZoneState, player: &PlayerProfile, range: f32) -> Option<usize> {
    let origin = player.bounds();
    let mut nearest: Option<(usize, f32)> = None;
    for (index, enemy) in zone.enemies.iter().enumerate() {
        if !enemy.alive {
            continue;
        }
        let distance = origin.center_distance(&enemy.bounds());
        let closer = nearest.map_or(true, |(_, best)| distance < best);
        if distance < range && closer {
            nearest = Some((index, distance));
        }
    }
    nearest.map(|(index, _)| index)
}

pub fn enemies_in_range(zone: &ZoneState, player: &PlayerProfile, range: f32) -> Vec<usize> {
    let origin = player.bounds();
    zone.enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy.alive && origin.center_distance(&enemy.bounds()) < range)
        .map(|(index, _)| index)
        .collect()
}

pub fn player_attack(
    store: &mut EntityStore,
    rng: &mut GameRng,
    ui: &mut dyn UiSink,
) -> Result<AttackOutcome, ActionError> {
    if !store.player.attack_ready() {
        return Err(ActionError::CooldownNotReady {
            remaining: store.player.attack_cooldown,
        });
    }
    let target = nearest_enemy_in_range(&store.zone, &store.player, PLAYER_ATTACK_RANGE)
        .ok_or(ActionError::NoTargetInRange)?;

    let critical = roll_critical(rng);
    let damage = attack_damage(store.player.weapon_damage(), store.player.stats.strength, critical);
    store.player.attack_cooldown = ATTACK_COOLDOWN_SECONDS;

    let kind = if critical {
        AttackKind::Critical
    } else {
        AttackKind::Normal
    };
    let origin = store.player.bounds().center();
    let weapon_icon = store.player.equipped_weapon().map(|item| item.icon);
    store
        .player
        .attack_animation
        .start(kind, origin, weapon_icon, rng);

    let enemy = &mut store.zone.enemies[target];
    let defeated = enemy.take_damage(damage);
    let name = enemy.template.name;
    let anchor = enemy.position;
    let center = enemy.bounds().center();
    store
        .damage_numbers
        .push(DamageNumber::spawn(anchor, damage, critical, rng));
    store.particles.extend(hit_burst(center, rng));

    if critical {
        ui.notify(Notification::warning(format!(
            "CRITICAL HIT! {name} for {damage} damage!"
        )));
    } else {
        ui.notify(Notification::success(format!("Hit {name} for {damage} damage!")));
    }
    debug!(enemy = name, damage, critical, "player_attack");

    if defeated {
        reward_defeat(store, target, ui);
    }
    Ok(AttackOutcome {
        target,
        damage,
        critical,
        defeated,
    })
}

pub fn special_attack(
    store: &mut EntityStore,
    rng: &mut GameRng,
    ui: &mut dyn UiSink,
) -> Result<SpecialOutcome, ActionError> {
    let Some((weapon_damage, name)) = store
        .player
        .equipped_weapon()
        .and_then(|weapon| Some((weapon.weapon_damage()?, weapon.special_attack()?)))
    else {
        return Err(ActionError::NoSpecialAvailable);
    };
    if !store.player.attack_ready() {
        return Err(ActionError::CooldownNotReady {
            remaining: store.player.attack_cooldown,
        });
    }
    let targets = enemies_in_range(&store.zone, &store.player, SPECIAL_ATTACK_RANGE);
    if targets.is_empty() {
        return Err(ActionError::NoTargetInRange);
    }

    let damage = special_damage(weapon_damage, store.player.stats.strength);
    let mut defeated = Vec::new();
    for &index in &targets {
        let enemy = &mut store.zone.enemies[index];
        if enemy.take_damage(damage) {
            defeated.push(index);
        }
        let anchor = enemy.position;
        store
            .damage_numbers
            .push(DamageNumber::spawn(anchor, damage, false, rng));
    }
    store.player.attack_cooldown = SPECIAL_COOLDOWN_SECONDS;
    for &index in &defeated {
        reward_defeat(store, index, ui);
    }
    ui.notify(Notification::success(format!(
        "{name}! Hit {} enemies!",
        targets.len()
    )));
    debug!(special = name, hits = targets.len(), damage, "special_attack");

    Ok(SpecialOutcome {
        name,
        damage,
        hits: targets.len(),
        defeated: defeated.len(),
    })
}

pub fn enemy_attacks_player(
    player: &mut PlayerProfile,
    attacker: &EnemyTemplate,
    ui: &mut dyn UiSink,
) -> EnemyStrike {
    let damage = enemy_strike_damage(attacker.damage, player.stats.defense);
    player.health.take(damage);
    player.combat_cooldown = HURT_FLASH_SECONDS;
    ui.notify(Notification::error(format!(
        "{} attacks for {damage} damage!",
        attacker.name
    )));
    EnemyStrike {
        damage,
        player_defeated: player.health.is_depleted(),
    }
}

/// Pays out for an enemy that has just died.
fn reward_defeat(store: &mut EntityStore, index: usize, ui: &mut dyn UiSink) {
    let template = store.zone.enemies[index].template;
    store.player.gold += template.gold;
    store.player.score += u64::from(template.xp) * 10;
    store.counters.monsters_defeated += 1;
    ui.notify(Notification::success(format!(
        "Defeated {}! +{} XP, +{} gold",
        template.name, template.xp, template.gold
    )));
    info!(enemy = template.name, xp = template.xp, gold = template.gold, "enemy_defeated");
    store.award_experience(template.xp, ui);
}
