//! Per-tick world advance. Steps run in [`TICK_ORDER`]; movement resolves
//! before collisions and collisions before quest evaluation, so a pickup can
//! complete a quest within the same tick.

use engine::Vec2;
use tracing::debug;

use crate::catalog::reward_item;
use crate::combat::{self, COMBAT_STATUS_RANGE, ENEMY_ATTACK_INTERVAL_MS, ENEMY_ATTACK_RANGE};
use crate::effects::{advance_damage_numbers, advance_particles};
use crate::error::ActionError;
use crate::geometry::clamp_to_bounds;
use crate::input::Controls;
use crate::notify::{Notification, UiSink};
use crate::state::{GamePhase, GameState};

pub const WANDER_INTERVAL_SECONDS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStep {
    Cooldowns,
    Effects,
    Movement,
    Camera,
    Enemies,
    Collisions,
    CombatStatus,
    Quests,
}

impl TickStep {
    pub fn name(self) -> &'static str {
        match self {
            Self::Cooldowns => "Cooldowns",
            Self::Effects => "Effects",
            Self::Movement => "Movement",
            Self::Camera => "Camera",
            Self::Enemies => "Enemies",
            Self::Collisions => "Collisions",
            Self::CombatStatus => "CombatStatus",
            Self::Quests => "Quests",
        }
    }
}

pub const TICK_ORDER: [TickStep; 8] = [
    TickStep::Cooldowns,
    TickStep::Effects,
    TickStep::Movement,
    TickStep::Camera,
    TickStep::Enemies,
    TickStep::Collisions,
    TickStep::CombatStatus,
    TickStep::Quests,
];

/// Advances the world by `dt_seconds`. A defeated game does not advance; a
/// defeat during the tick stops the remaining steps.
pub fn tick(state: &mut GameState, dt_seconds: f32, controls: Controls) {
    state.last_tick_order.clear();
    if state.phase == GamePhase::Defeated {
        return;
    }
    let dt = if dt_seconds.is_finite() {
        dt_seconds.max(0.0)
    } else {
        0.0
    };
    state.simulation_seconds += f64::from(dt);

    for step in TICK_ORDER {
        if state.phase == GamePhase::Defeated {
            break;
        }
        state.last_tick_order.push(step);
        match step {
            TickStep::Cooldowns => decay_cooldowns(state, dt),
            TickStep::Effects => advance_effects(state, dt),
            TickStep::Movement => move_player(state, dt, controls),
            TickStep::Camera => state.follow_player(),
            TickStep::Enemies => advance_enemies(state, dt),
            TickStep::Collisions => resolve_collisions(state),
            TickStep::CombatStatus => {
                state.nearby_enemies =
                    combat::enemies_in_range(&state.store.zone, &state.store.player, COMBAT_STATUS_RANGE)
                        .len();
            }
            TickStep::Quests => evaluate_quests(state),
        }
    }
}

fn decay_cooldowns(state: &mut GameState, dt: f32) {
    let player = &mut state.store.player;
    player.attack_cooldown = (player.attack_cooldown - dt).max(0.0);
    player.combat_cooldown = (player.combat_cooldown - dt).max(0.0);
}

fn advance_effects(state: &mut GameState, dt: f32) {
    state.store.player.attack_animation.advance(dt);
    advance_particles(&mut state.store.particles, dt);
    advance_damage_numbers(&mut state.store.damage_numbers, dt);
}

fn move_player(state: &mut GameState, dt: f32, controls: Controls) {
    let bounds = state.store.zone.size();
    let player = &mut state.store.player;
    let direction = controls.direction();
    player.move_intent = direction;
    let moved = player.position + direction * (player.speed * dt);
    player.position = clamp_to_bounds(moved, player.size, bounds);
}

fn advance_enemies(state: &mut GameState, dt: f32) {
    let now = state.attack_clock_ms();
    let bounds = state.store.zone.size();
    let player_bounds = state.store.player.bounds();

    for index in 0..state.store.zone.enemies.len() {
        let enemy = &mut state.store.zone.enemies[index];
        if !enemy.alive {
            continue;
        }
        enemy.wander_timer += dt;
        if enemy.wander_timer > WANDER_INTERVAL_SECONDS {
            enemy.heading = state.rng.angle();
            enemy.wander_timer = 0.0;
        }
        let step = Vec2::from_angle(enemy.heading) * (enemy.template.speed * dt);
        enemy.position = clamp_to_bounds(enemy.position + step, enemy.size, bounds);

        let in_reach = player_bounds.center_distance(&enemy.bounds()) < ENEMY_ATTACK_RANGE;
        let ready = enemy
            .last_attack_ms
            .map_or(true, |last| now.saturating_sub(last) >= ENEMY_ATTACK_INTERVAL_MS);
        if !(in_reach && ready) {
            continue;
        }
        enemy.last_attack_ms = Some(now);
        let attacker = enemy.template;
        let strike = combat::enemy_attacks_player(&mut state.store.player, attacker, &mut state.outbox);
        debug!(enemy = attacker.name, damage = strike.damage, "enemy_attack");
        if strike.player_defeated {
            state.defeat();
            return;
        }
    }
}

fn resolve_collisions(state: &mut GameState) {
    let reach = state.store.player.bounds();
    let zone = &state.store.zone;
    let swords: Vec<usize> = zone
        .swords
        .iter()
        .enumerate()
        .filter(|(_, pickup)| !pickup.collected && pickup.bounds().overlaps(&reach))
        .map(|(index, _)| index)
        .collect();
    let treasures: Vec<usize> = zone
        .treasures
        .iter()
        .enumerate()
        .filter(|(_, pickup)| !pickup.collected && pickup.bounds().overlaps(&reach))
        .map(|(index, _)| index)
        .collect();
    let items: Vec<usize> = zone
        .items
        .iter()
        .enumerate()
        .filter(|(_, pickup)| !pickup.collected && pickup.bounds().overlaps(&reach))
        .map(|(index, _)| index)
        .collect();

    for index in swords {
        let result = state.store.collect_sword(index, &mut state.outbox);
        report_pickup(&mut state.outbox, result);
    }
    for index in treasures {
        let result = state.store.collect_treasure(index, &mut state.outbox);
        report_pickup(&mut state.outbox, result);
    }
    for index in items {
        let result = state.store.collect_item(index, &mut state.outbox);
        report_pickup(&mut state.outbox, result);
    }

    state.near_portal = state
        .store
        .zone
        .portals
        .iter()
        .position(|portal| portal.bounds().overlaps(&reach));
    if let Some(portal) = state.near_portal() {
        let prompt = Notification::info(format!("Press SPACE to travel to {}", portal.name))
            .deduped("portal_prompt");
        state.outbox.notify(prompt);
    }
}

fn report_pickup(ui: &mut dyn UiSink, result: Result<bool, ActionError>) {
    if let Err(error) = result {
        ui.notify(error.to_notification());
    }
}

fn evaluate_quests(state: &mut GameState) {
    let completed = state.quests.evaluate(&state.store.counters);
    for quest in completed {
        let reward = quest.reward;
        state.store.player.gold += reward.gold;
        state.outbox.notify(Notification::success(format!(
            "Quest Completed: {}!",
            quest.title
        )));
        state.outbox.notify(Notification::success(format!(
            "Received: {} gold, {} XP",
            reward.gold, reward.experience
        )));
        state.store.award_experience(reward.experience, &mut state.outbox);
        if let Some(name) = reward.item {
            match state.store.player.inventory.add(reward_item(name)) {
                Ok(_) => state
                    .outbox
                    .notify(Notification::success(format!("Received: {name}!"))),
                Err(error) => state
                    .outbox
                    .notify(ActionError::from(error).to_notification()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::catalog::{ENEMIES, SWORDS, TREASURES};
    use crate::clock::ManualClock;
    use crate::config::{AttackClock, GameConfig};
    use crate::entity::{Enemy, SwordPickup, TreasurePickup, SWORD_SIZE, TREASURE_SIZE};
    use crate::input::{Command, InputFrame, InputSource, ScriptedInput};
    use crate::player::{Health, PLAYER_SIZE};
    use crate::rng::GameRng;

    use super::*;

    fn quiet_state(config: GameConfig, clock: ManualClock) -> GameState {
        let mut state =
            GameState::with_parts(config, GameRng::new(11), Box::new(clock)).expect("state");
        let zone = &mut state.store.zone;
        zone.enemies.clear();
        zone.swords.clear();
        zone.treasures.clear();
        zone.items.clear();
        state.outbox.clear();
        state
    }

    fn default_state() -> GameState {
        quiet_state(GameConfig::default(), ManualClock::new(0))
    }

    fn adjacent_enemy(state: &mut GameState, template: usize) {
        let position = state.store.player.position + Vec2::new(10.0, 0.0);
        state
            .store
            .zone
            .enemies
            .push(Enemy::spawn(&ENEMIES[template], position, 0.0));
    }

    fn right() -> Controls {
        Controls {
            right: true,
            ..Controls::default()
        }
    }

    #[test]
    fn steps_run_in_declared_order() {
        let mut state = default_state();

        tick(&mut state, 0.016, Controls::default());

        assert_eq!(state.last_tick_order(), &TICK_ORDER);
        let names: Vec<_> = state.last_tick_order().iter().map(|step| step.name()).collect();
        assert_eq!(names.join(">"), "Cooldowns>Effects>Movement>Camera>Enemies>Collisions>CombatStatus>Quests");
    }

    #[test]
    fn diagonal_speed_matches_axial_speed() {
        let mut axial = default_state();
        let mut diagonal = default_state();
        let start = axial.player().position;

        tick(&mut axial, 0.1, right());
        tick(
            &mut diagonal,
            0.1,
            Controls {
                right: true,
                down: true,
                ..Controls::default()
            },
        );

        let axial_distance = axial.player().position.distance(start);
        let diagonal_distance = diagonal.player().position.distance(start);
        assert!((axial_distance - 18.0).abs() < 1e-3);
        assert!((axial_distance - diagonal_distance).abs() < 1e-3);
    }

    #[test]
    fn blocked_axis_does_not_block_the_other() {
        let mut state = default_state();
        state.store.player.position = Vec2::new(0.0, 300.0);

        tick(
            &mut state,
            0.5,
            Controls {
                left: true,
                down: true,
                ..Controls::default()
            },
        );

        assert_eq!(state.player().position.x, 0.0);
        assert!(state.player().position.y > 300.0);
    }

    #[test]
    fn cooldowns_decay_to_zero() {
        let mut state = default_state();
        state.store.player.attack_cooldown = 1.0;

        tick(&mut state, 0.4, Controls::default());
        assert!((state.player().attack_cooldown - 0.6).abs() < 1e-6);

        tick(&mut state, 5.0, Controls::default());
        assert_eq!(state.player().attack_cooldown, 0.0);
        assert!(state.player().attack_ready());
    }

    #[test]
    fn enemy_attack_cadence_follows_wall_clock() {
        let clock = ManualClock::new(10_000);
        let mut state = quiet_state(GameConfig::default(), clock.clone());
        adjacent_enemy(&mut state, 0);

        tick(&mut state, 0.0, Controls::default());
        assert_eq!(state.player().health.current, 97);

        clock.advance(1_999);
        tick(&mut state, 0.0, Controls::default());
        assert_eq!(state.player().health.current, 97);

        clock.advance(1);
        tick(&mut state, 0.0, Controls::default());
        assert_eq!(state.player().health.current, 94);
        assert!(state.player().combat_cooldown > 0.0);
    }

    #[test]
    fn simulation_clock_ignores_wall_time() {
        let config = GameConfig {
            attack_clock: AttackClock::Simulation,
            ..GameConfig::default()
        };
        let clock = ManualClock::new(0);
        let mut state = quiet_state(config, clock.clone());
        adjacent_enemy(&mut state, 0);

        for _ in 0..5 {
            let position = state.store.player.position + Vec2::new(10.0, 0.0);
            state.store.zone.enemies[0].position = position;
            clock.advance(60_000);
            tick(&mut state, 0.5, Controls::default());
        }

        assert_eq!(state.player().health.current, 100 - 2 * 3);
    }

    #[test]
    fn lethal_hit_ends_the_game_and_freezes_ticks() {
        let mut state = default_state();
        state.store.player.health.current = 1;
        adjacent_enemy(&mut state, 3);

        tick(&mut state, 0.0, Controls::default());

        assert_eq!(state.phase(), GamePhase::Defeated);
        assert_eq!(state.last_tick_order().last(), Some(&TickStep::Enemies));
        assert!(state
            .outbox
            .iter()
            .any(|n| n.text == "Game Over! You have been defeated."));

        let frozen = state.player().position;
        tick(&mut state, 1.0, right());
        assert_eq!(state.player().position, frozen);
        assert!(state.last_tick_order().is_empty());
    }

    #[test]
    fn sword_pickup_completes_quest_in_same_tick() {
        let mut state = default_state();
        let position = state.player().position;
        state
            .store
            .zone
            .swords
            .push(SwordPickup::new(&SWORDS[0], position, SWORD_SIZE));

        tick(&mut state, 0.0, Controls::default());

        assert!(state.counters().sword_found);
        assert_eq!(state.quest_log().completed_ids(), &["sword_quest"]);
        assert_eq!(state.player().gold, 50 + 100 + 200);
        assert_eq!(state.player().level, 2);
        assert_eq!(state.player().experience, 0);
        let names: Vec<_> = state
            .player()
            .inventory
            .entries()
            .iter()
            .map(|entry| entry.item.name)
            .collect();
        assert!(names.contains(&"Iron Sword"));
        assert!(names.contains(&"Health Potion"));
        assert!(state.outbox.iter().any(|n| n.text == "Quest Completed: Find the Lost Sword!"));
    }

    #[test]
    fn quest_reward_is_granted_once() {
        let mut state = default_state();
        state.store.counters.monsters_defeated = 5;

        tick(&mut state, 0.0, Controls::default());
        let gold = state.player().gold;
        assert_eq!(gold, 50 + 300);

        state.store.counters.monsters_defeated = 12;
        tick(&mut state, 0.0, Controls::default());
        tick(&mut state, 0.0, Controls::default());

        assert_eq!(state.player().gold, gold);
        assert_eq!(state.quest_log().completed_ids().len(), 1);
    }

    #[test]
    fn full_inventory_skips_pickup_and_warns() {
        let config = GameConfig {
            inventory_capacity: 1,
            ..GameConfig::default()
        };
        let mut state = quiet_state(config, ManualClock::new(0));
        let position = state.player().position;
        state
            .store
            .zone
            .treasures
            .push(TreasurePickup::new(&TREASURES[0], position, TREASURE_SIZE));

        tick(&mut state, 0.0, Controls::default());

        assert!(!state.store.zone.treasures[0].collected);
        assert_eq!(state.player().inventory.len(), 1);
        let warning = state
            .outbox
            .iter()
            .find(|n| n.dedupe_key == Some("inventory_full"))
            .expect("inventory warning");
        assert!(warning.text.starts_with("Inventory full!"));
    }

    #[test]
    fn standing_on_portal_prompts_travel() {
        let mut state = default_state();
        state.store.player.position = state.store.zone.portals[0].position;

        tick(&mut state, 0.0, Controls::default());

        assert_eq!(
            state.near_portal().map(|portal| portal.target_zone),
            Some(1)
        );
        let prompt = state.outbox.last().expect("prompt");
        assert_eq!(prompt.text, "Press SPACE to travel to Portal to Dark Forest");
        assert_eq!(prompt.dedupe_key, Some("portal_prompt"));

        state.store.player.position = Vec2::new(400.0, 300.0);
        tick(&mut state, 0.0, Controls::default());
        assert!(state.near_portal().is_none());
    }

    #[test]
    fn combat_status_counts_enemies_within_reach() {
        let mut state = default_state();
        adjacent_enemy(&mut state, 0);
        adjacent_enemy(&mut state, 1);
        let far = state.store.player.position + Vec2::new(300.0, 0.0);
        state
            .store
            .zone
            .enemies
            .push(Enemy::spawn(&ENEMIES[2], far, 0.0));
        state.store.zone.enemies[1].take_damage(1_000);

        tick(&mut state, 0.0, Controls::default());

        assert_eq!(state.combat_status().nearby_enemies, 1);
    }

    #[test]
    fn enemies_wander_inside_bounds() {
        let mut state = GameState::with_parts(
            GameConfig::default(),
            GameRng::new(3),
            Box::new(ManualClock::new(0)),
        )
        .expect("state");
        state.store.player.position = Vec2::new(0.0, 0.0);
        state.store.player.health = Health::full(1_000_000);
        let size = state.zone().size();

        for _ in 0..600 {
            tick(&mut state, 0.1, Controls::default());
        }

        for enemy in &state.zone().enemies {
            assert!(enemy.position.x >= 0.0 && enemy.position.x <= size.x - enemy.size.x);
            assert!(enemy.position.y >= 0.0 && enemy.position.y <= size.y - enemy.size.y);
        }
    }

    #[test]
    fn scripted_walk_moves_player_right() {
        let mut state = default_state();
        let mut input = ScriptedInput::new((0..10).map(|_| InputFrame::holding(right())));

        for _ in 0..12 {
            let frame = input.next_frame();
            state.step(0.1, &frame);
        }

        assert!((state.player().position.x - 580.0).abs() < 1e-2);
        assert_eq!(state.player().position.y, 300.0);
        assert!(state.camera().position.x > 0.0);
    }

    #[test]
    fn scripted_attack_defeats_adjacent_enemy() {
        let mut state = default_state();
        adjacent_enemy(&mut state, 0);
        state.store.zone.enemies[0].hp = 1;

        let outcomes = state.step(0.0, &InputFrame::idle().with_command(Command::Attack));

        assert_eq!(outcomes.len(), 1);
        assert_eq!(state.counters().monsters_defeated, 1);
        assert_eq!(state.combat_status().nearby_enemies, 0);
    }

    proptest! {
        #[test]
        fn player_stays_inside_zone(
            start_x in 0.0f32..1568.0,
            start_y in 0.0f32..1168.0,
            dt in 0.0f32..1000.0,
            up in any::<bool>(),
            down in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
        ) {
            let mut state = default_state();
            state.store.player.position = Vec2::new(start_x, start_y);

            tick(&mut state, dt, Controls { up, down, left, right });

            let size = state.zone().size();
            let position = state.player().position;
            prop_assert!(position.x >= 0.0 && position.x <= size.x - PLAYER_SIZE);
            prop_assert!(position.y >= 0.0 && position.y <= size.y - PLAYER_SIZE);
        }
    }
}
