use engine::Camera2D;
use tracing::{debug, info, warn};

use crate::catalog::{NpcRole, NpcTemplate, HEALER_COST, SHOP_ITEMS, ZONES};
use crate::clock::{Clock, SystemClock};
use crate::combat::{self, AttackOutcome, SpecialOutcome};
use crate::config::{AttackClock, GameConfig};
use crate::entity::Portal;
use crate::error::ActionError;
use crate::input::{Command, InputFrame};
use crate::notify::{Notification, UiSink};
use crate::player::PlayerProfile;
use crate::quest::{QuestCounters, QuestLog};
use crate::rng::GameRng;
use crate::snapshot::{
    CombatStatus, FrameSnapshot, InventoryLine, PlayerStatus, Sprite, SpriteKind,
};
use crate::store::EntityStore;
use crate::update::{self, TickStep};
use crate::zone::{generate_zone, ZoneError, ZoneState};

pub const NPC_INTERACT_RANGE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal until an explicit restart.
    Defeated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Attacked(AttackOutcome),
    SpecialAttack(SpecialOutcome),
    PotionUsed { restored: i32 },
    ShopOpened,
    Healed,
    Dialogue {
        speaker: &'static str,
        text: &'static str,
    },
    Traveled { zone: usize },
    Purchased { name: &'static str, price: i32 },
    Restarted,
    /// Interact with nothing in reach.
    Idle,
}

/// The whole simulation: entity store, quest log, random source and the
/// clocks, owned in one place and advanced by [`GameState::step`].
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) rng: GameRng,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) store: EntityStore,
    pub(crate) quests: QuestLog,
    pub(crate) phase: GamePhase,
    pub(crate) camera: Camera2D,
    pub(crate) simulation_seconds: f64,
    pub(crate) nearby_enemies: usize,
    pub(crate) near_portal: Option<usize>,
    pub(crate) outbox: Vec<Notification>,
    pub(crate) last_tick_order: Vec<TickStep>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, ZoneError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_parts(config, rng, Box::new(SystemClock::new()))
    }

    pub fn with_parts(
        config: GameConfig,
        mut rng: GameRng,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ZoneError> {
        let zone = generate_zone(&ZONES, 0, &mut rng)?;
        let player = PlayerProfile::new(config.player_speed, config.inventory_capacity);
        let camera = Camera2D::new(
            config.viewport.width as f32,
            config.viewport.height as f32,
        );
        let mut state = Self {
            config,
            rng,
            clock,
            store: EntityStore::new(player, zone),
            quests: QuestLog::default(),
            phase: GamePhase::Playing,
            camera,
            simulation_seconds: 0.0,
            nearby_enemies: 0,
            near_portal: None,
            outbox: Vec::new(),
            last_tick_order: Vec::new(),
        };
        state.follow_player();
        state.welcome();
        info!(
            seed = state.rng.seed(),
            attack_clock = ?state.config.attack_clock,
            "game_started"
        );
        Ok(state)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerProfile {
        &self.store.player
    }

    pub fn zone(&self) -> &ZoneState {
        &self.store.zone
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn counters(&self) -> &QuestCounters {
        &self.store.counters
    }

    pub fn quest_log(&self) -> &QuestLog {
        &self.quests
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn combat_status(&self) -> CombatStatus {
        CombatStatus {
            nearby_enemies: self.nearby_enemies,
        }
    }

    pub fn near_portal(&self) -> Option<&Portal> {
        self.near_portal
            .and_then(|index| self.store.zone.portals.get(index))
    }

    pub fn last_tick_order(&self) -> &[TickStep] {
        &self.last_tick_order
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.viewport = engine::Vec2::new(width as f32, height as f32);
        self.follow_player();
    }

    /// Applies this frame's commands, then advances the world by
    /// `dt_seconds`. Rejected commands become notifications.
    pub fn step(&mut self, dt_seconds: f32, frame: &InputFrame) -> Vec<CommandOutcome> {
        let mut outcomes = Vec::new();
        for &command in &frame.commands {
            match self.execute(command) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    debug!(?command, error = %error, "command_rejected");
                    self.outbox.notify(error.to_notification());
                }
            }
        }
        update::tick(self, dt_seconds, frame.controls);
        outcomes
    }

    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, ActionError> {
        if self.phase == GamePhase::Defeated && command != Command::Restart {
            return Err(ActionError::GameOver);
        }
        match command {
            Command::Attack => combat::player_attack(&mut self.store, &mut self.rng, &mut self.outbox)
                .map(CommandOutcome::Attacked),
            Command::SpecialAttack => {
                combat::special_attack(&mut self.store, &mut self.rng, &mut self.outbox)
                    .map(CommandOutcome::SpecialAttack)
            }
            Command::UsePotion => self.use_potion(),
            Command::Interact => self.interact(),
            Command::TravelTo(index) => self.travel_to(index),
            Command::Purchase(index) => self.purchase(index),
            Command::Restart => self.restart(),
        }
    }

    pub fn drain_notifications(&mut self, sink: &mut dyn UiSink) {
        for notification in self.outbox.drain(..) {
            sink.notify(notification);
        }
    }

    fn use_potion(&mut self) -> Result<CommandOutcome, ActionError> {
        let player = &mut self.store.player;
        let Some(id) = player.inventory.find(|item| item.heal_amount().is_some()) else {
            return Err(ActionError::NoPotionAvailable);
        };
        if player.health.is_full() {
            return Err(ActionError::AlreadyAtFullHealth);
        }
        let Some(potion) = player.inventory.remove(id) else {
            return Err(ActionError::NoPotionAvailable);
        };
        let restored = player.health.heal(potion.heal_amount().unwrap_or_default());
        self.outbox.notify(Notification::success(format!(
            "Used {}! Restored {restored} HP",
            potion.name
        )));
        Ok(CommandOutcome::PotionUsed { restored })
    }

    fn interact(&mut self) -> Result<CommandOutcome, ActionError> {
        let reach = self.store.player.bounds();
        let npc = self
            .store
            .zone
            .npcs
            .iter()
            .find(|npc| reach.center_distance(&npc.bounds()) < NPC_INTERACT_RANGE)
            .map(|npc| npc.template);
        if let Some(template) = npc {
            return self.talk_to(template);
        }

        let target = self
            .store
            .zone
            .portals
            .iter()
            .find(|portal| portal.bounds().overlaps(&reach))
            .map(|portal| portal.target_zone);
        match target {
            Some(zone) => self.travel_to(zone),
            None => Ok(CommandOutcome::Idle),
        }
    }

    fn talk_to(&mut self, npc: &'static NpcTemplate) -> Result<CommandOutcome, ActionError> {
        match npc.role {
            NpcRole::Merchant => {
                self.outbox.notify(Notification::info(npc.dialogue));
                Ok(CommandOutcome::ShopOpened)
            }
            NpcRole::Healer => self.heal_at_healer(),
            NpcRole::QuestGiver => {
                self.outbox.notify(Notification::info(npc.dialogue));
                Ok(CommandOutcome::Dialogue {
                    speaker: npc.name,
                    text: npc.dialogue,
                })
            }
        }
    }

    fn heal_at_healer(&mut self) -> Result<CommandOutcome, ActionError> {
        let player = &mut self.store.player;
        if player.health.is_full() {
            return Err(ActionError::AlreadyAtFullHealth);
        }
        if player.gold < HEALER_COST {
            return Err(ActionError::InsufficientGold {
                needed: HEALER_COST,
                available: player.gold,
            });
        }
        player.gold -= HEALER_COST;
        player.health.restore();
        self.outbox.notify(Notification::success(format!(
            "Fully healed! -{HEALER_COST} gold"
        )));
        Ok(CommandOutcome::Healed)
    }

    fn travel_to(&mut self, index: usize) -> Result<CommandOutcome, ActionError> {
        let Some(descriptor) = ZONES.get(index) else {
            return Err(ActionError::UnknownZone { index });
        };
        if index == self.store.zone.index {
            return Err(ActionError::AlreadyInZone {
                name: descriptor.name,
            });
        }
        let zone = generate_zone(&ZONES, index, &mut self.rng)?;
        self.store.enter_zone(zone);
        self.near_portal = None;
        self.nearby_enemies = 0;
        self.follow_player();
        self.outbox.notify(Notification::success(format!(
            "Traveled to {}!",
            descriptor.name
        )));
        self.outbox.notify(Notification::info(descriptor.description));
        Ok(CommandOutcome::Traveled { zone: index })
    }

    fn purchase(&mut self, index: usize) -> Result<CommandOutcome, ActionError> {
        let Some(entry) = SHOP_ITEMS.get(index) else {
            return Err(ActionError::UnknownShopItem { index });
        };
        let player = &mut self.store.player;
        if player.inventory.is_full() {
            return Err(ActionError::InventoryFull {
                capacity: player.inventory.capacity(),
            });
        }
        if player.gold < entry.price {
            return Err(ActionError::InsufficientGold {
                needed: entry.price,
                available: player.gold,
            });
        }
        player.inventory.add(entry.item)?;
        player.gold -= entry.price;
        info!(item = entry.item.name, price = entry.price, "item_purchased");
        self.outbox.notify(Notification::success(format!(
            "Purchased {}!",
            entry.item.name
        )));
        Ok(CommandOutcome::Purchased {
            name: entry.item.name,
            price: entry.price,
        })
    }

    fn restart(&mut self) -> Result<CommandOutcome, ActionError> {
        if self.phase != GamePhase::Defeated {
            return Err(ActionError::NotDefeated);
        }
        let zone = generate_zone(&ZONES, 0, &mut self.rng)?;
        let player = PlayerProfile::new(self.config.player_speed, self.config.inventory_capacity);
        self.store = EntityStore::new(player, zone);
        self.quests = QuestLog::default();
        self.phase = GamePhase::Playing;
        self.nearby_enemies = 0;
        self.near_portal = None;
        self.follow_player();
        info!("game_restarted");
        self.welcome();
        Ok(CommandOutcome::Restarted)
    }

    pub(crate) fn defeat(&mut self) {
        if self.phase == GamePhase::Defeated {
            return;
        }
        self.phase = GamePhase::Defeated;
        warn!(
            level = self.store.player.level,
            score = self.store.player.score,
            zone = self.store.zone.descriptor.name,
            "player_defeated"
        );
        self.outbox
            .notify(Notification::error("Game Over! You have been defeated."));
    }

    /// Current reading of the enemy attack cadence clock in milliseconds.
    pub(crate) fn attack_clock_ms(&self) -> u64 {
        match self.config.attack_clock {
            AttackClock::WallClock => self.clock.now_ms(),
            AttackClock::Simulation => (self.simulation_seconds * 1000.0) as u64,
        }
    }

    pub(crate) fn follow_player(&mut self) {
        let target = self.store.player.bounds().center();
        let world = self.store.zone.size();
        self.camera.follow_clamped(target, world);
    }

    fn welcome(&mut self) {
        self.outbox.notify(Notification::success(
            "Welcome to Kingdom Quest! Find swords, defeat monsters, and collect treasures!",
        ));
        self.outbox.notify(Notification::info(
            "Press TAB to attack enemies, F for special attacks, Q to use potions",
        ));
        self.outbox.notify(Notification::info(
            "You start with a Rusty Sword! Press TAB to attack enemies.",
        ));
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let zone = &self.store.zone;
        let player = &self.store.player;
        let mut sprites = Vec::new();

        sprites.extend(zone.treasures.iter().filter(|p| !p.collected).map(|p| Sprite {
            kind: SpriteKind::Treasure,
            position: p.position,
            size: p.size,
            icon: p.template.icon,
            label: p.template.name,
            rarity: Some(p.template.rarity),
            health_fraction: None,
        }));
        sprites.extend(zone.swords.iter().filter(|p| !p.collected).map(|p| Sprite {
            kind: SpriteKind::Sword,
            position: p.position,
            size: p.size,
            icon: p.template.icon,
            label: p.template.name,
            rarity: Some(p.template.rarity),
            health_fraction: None,
        }));
        sprites.extend(zone.items.iter().filter(|p| !p.collected).map(|p| Sprite {
            kind: SpriteKind::Item,
            position: p.position,
            size: p.size,
            icon: p.template.icon,
            label: p.template.name,
            rarity: Some(p.template.rarity),
            health_fraction: None,
        }));
        sprites.extend(zone.npcs.iter().map(|npc| Sprite {
            kind: SpriteKind::Npc,
            position: npc.position,
            size: npc.size,
            icon: npc.template.icon,
            label: npc.template.name,
            rarity: None,
            health_fraction: None,
        }));
        sprites.extend(zone.portals.iter().map(|portal| Sprite {
            kind: SpriteKind::Portal,
            position: portal.position,
            size: portal.size,
            icon: "🌀",
            label: portal.name.as_str(),
            rarity: None,
            health_fraction: None,
        }));
        sprites.extend(zone.living_enemies().map(|enemy| Sprite {
            kind: SpriteKind::Enemy,
            position: enemy.position,
            size: enemy.size,
            icon: enemy.template.icon,
            label: enemy.template.name,
            rarity: None,
            health_fraction: Some(enemy.health_fraction()),
        }));
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            position: player.position,
            size: player.size,
            icon: "🛡️",
            label: "You",
            rarity: None,
            health_fraction: Some(player.health.fraction()),
        });

        let inventory = player
            .inventory
            .entries()
            .iter()
            .map(|entry| InventoryLine {
                icon: entry.item.icon,
                name: entry.item.name,
                summary: entry.item.summary(),
                equipped: [
                    player.equipment.weapon,
                    player.equipment.armor,
                    player.equipment.accessory,
                ]
                .contains(&Some(entry.id)),
                rarity: entry.item.rarity,
            })
            .collect();

        let animation = &player.attack_animation;
        FrameSnapshot {
            phase: self.phase,
            zone_index: zone.index,
            zone_name: zone.descriptor.name,
            zone_icon: zone.descriptor.icon,
            zone_size: zone.size(),
            camera: self.camera,
            tiles: &zone.tiles,
            visible_tiles: zone.tiles.visible_range(&self.camera),
            sprites,
            attack_kind: animation.active.then_some(animation.kind),
            attack_particles: &animation.particles,
            particles: &self.store.particles,
            damage_numbers: &self.store.damage_numbers,
            player: PlayerStatus {
                health: player.health,
                level: player.level,
                experience: player.experience,
                experience_to_next: player.experience_to_next,
                gold: player.gold,
                score: player.score,
                stats: player.stats,
                weapon: player.equipped_weapon().map(|item| item.name),
                attack_cooldown: player.attack_cooldown.max(0.0),
                hurt: player.combat_cooldown > 0.0,
            },
            quests: self.quests.progress(&self.store.counters),
            inventory,
            inventory_capacity: player.inventory.capacity(),
            combat: self.combat_status(),
            near_portal: self.near_portal().map(|portal| portal.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::Vec2;

    use crate::catalog::ENEMIES;
    use crate::clock::ManualClock;
    use crate::entity::Enemy;
    use crate::notify::Severity;

    use super::*;

    fn seeded() -> GameState {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        GameState::with_parts(config, GameRng::new(7), Box::new(ManualClock::new(0)))
            .expect("state")
    }

    fn clear_enemies(state: &mut GameState) {
        state.store.zone.enemies.clear();
    }

    #[test]
    fn new_game_starts_at_level_one_in_first_zone() {
        let state = seeded();
        let player = state.player();

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(player.level, 1);
        assert_eq!((player.health.current, player.health.max), (100, 100));
        assert_eq!(player.gold, 50);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory.entries()[0].item.name, "Rusty Sword");
        assert_eq!(player.equipped_weapon().map(|item| item.name), Some("Rusty Sword"));
        assert!(state.quest_log().completed_ids().is_empty());
        assert_eq!(state.zone().index, 0);
        assert_eq!(state.outbox.len(), 3);
    }

    #[test]
    fn potion_heals_and_is_consumed() {
        let mut state = seeded();
        state.store.player.health.take(70);
        state
            .store
            .player
            .inventory
            .add(SHOP_ITEMS[2].item)
            .expect("potion");

        let outcome = state.execute(Command::UsePotion).expect("drink");

        assert_eq!(outcome, CommandOutcome::PotionUsed { restored: 50 });
        assert_eq!(state.player().health.current, 80);
        assert_eq!(state.player().inventory.len(), 1);
    }

    #[test]
    fn potion_errors_leave_inventory_untouched() {
        let mut state = seeded();

        assert!(matches!(
            state.execute(Command::UsePotion),
            Err(ActionError::NoPotionAvailable)
        ));

        state
            .store
            .player
            .inventory
            .add(SHOP_ITEMS[2].item)
            .expect("potion");
        assert!(matches!(
            state.execute(Command::UsePotion),
            Err(ActionError::AlreadyAtFullHealth)
        ));
        assert_eq!(state.player().inventory.len(), 2);
    }

    #[test]
    fn mana_potion_does_not_count_as_healing() {
        let mut state = seeded();
        state.store.player.health.take(10);
        state
            .store
            .player
            .inventory
            .add(SHOP_ITEMS[3].item)
            .expect("mana");

        assert!(matches!(
            state.execute(Command::UsePotion),
            Err(ActionError::NoPotionAvailable)
        ));
    }

    #[test]
    fn purchase_checks_space_and_gold_before_debiting() {
        let mut state = seeded();
        state.store.player.gold = 100;

        let bought = state.execute(Command::Purchase(2)).expect("potion");
        assert_eq!(
            bought,
            CommandOutcome::Purchased {
                name: "Health Potion",
                price: 30
            }
        );
        assert_eq!(state.player().gold, 70);

        let poor = state.execute(Command::Purchase(1));
        assert!(matches!(
            poor,
            Err(ActionError::InsufficientGold {
                needed: 200,
                available: 70
            })
        ));
        assert_eq!(state.player().gold, 70);
        assert_eq!(state.player().inventory.len(), 2);
    }

    #[test]
    fn purchase_with_full_inventory_keeps_gold() {
        let config = GameConfig {
            inventory_capacity: 1,
            ..GameConfig::default()
        };
        let mut state =
            GameState::with_parts(config, GameRng::new(1), Box::new(ManualClock::new(0)))
                .expect("state");

        let result = state.execute(Command::Purchase(2));

        assert!(matches!(result, Err(ActionError::InventoryFull { capacity: 1 })));
        assert_eq!(state.player().gold, 50);
    }

    #[test]
    fn unknown_shop_item_is_rejected() {
        let mut state = seeded();

        assert!(matches!(
            state.execute(Command::Purchase(99)),
            Err(ActionError::UnknownShopItem { index: 99 })
        ));
    }

    #[test]
    fn merchant_opens_shop_and_healer_charges() {
        let mut state = seeded();
        state.store.player.position = Vec2::new(110.0, 110.0);

        assert_eq!(
            state.execute(Command::Interact).expect("merchant"),
            CommandOutcome::ShopOpened
        );

        state.store.player.position = Vec2::new(900.0, 110.0);
        assert!(matches!(
            state.execute(Command::Interact),
            Err(ActionError::AlreadyAtFullHealth)
        ));

        state.store.player.health.take(40);
        assert_eq!(
            state.execute(Command::Interact).expect("healer"),
            CommandOutcome::Healed
        );
        assert_eq!(state.player().gold, 20);
        assert!(state.player().health.is_full());

        state.store.player.health.take(40);
        assert!(matches!(
            state.execute(Command::Interact),
            Err(ActionError::InsufficientGold { needed: 30, .. })
        ));
    }

    #[test]
    fn elder_shares_dialogue() {
        let mut state = seeded();
        state.store.player.position = Vec2::new(505.0, 95.0);

        let outcome = state.execute(Command::Interact).expect("elder");

        assert!(matches!(
            outcome,
            CommandOutcome::Dialogue {
                speaker: "Wise Elder",
                ..
            }
        ));
    }

    #[test]
    fn interact_on_portal_travels() {
        let mut state = seeded();
        let portal = state.zone().portals[0].clone();
        state.store.player.position = portal.position;

        let outcome = state.execute(Command::Interact).expect("travel");

        assert_eq!(outcome, CommandOutcome::Traveled { zone: 1 });
        assert_eq!(state.zone().index, 1);
        assert_eq!(state.zone().descriptor.name, "Dark Forest");
    }

    #[test]
    fn travel_to_current_zone_is_refused() {
        let mut state = seeded();

        let result = state.execute(Command::TravelTo(0));

        assert!(matches!(
            result,
            Err(ActionError::AlreadyInZone {
                name: "Village Outskirts"
            })
        ));
        assert_eq!(
            ActionError::AlreadyInZone { name: "x" }.severity(),
            Severity::Info
        );
    }

    #[test]
    fn travel_replaces_zone_and_keeps_profile() {
        let mut state = seeded();
        state.store.player.gold = 321;
        state.store.player.gain_experience(150);
        state.store.zone.enemies[0].take_damage(1000);
        let old_enemies = state.zone().enemies.clone();
        let player_before = state.player().clone();

        state.execute(Command::TravelTo(2)).expect("travel");

        assert_eq!(state.zone().index, 2);
        assert_ne!(state.zone().enemies, old_enemies);
        assert!(state.zone().enemies.iter().all(|enemy| enemy.alive));
        assert!(state.zone().treasures.iter().all(|t| !t.collected));
        assert_eq!(state.player().level, player_before.level);
        assert_eq!(state.player().gold, 321);
        assert_eq!(state.player().inventory, player_before.inventory);
        assert_eq!(state.player().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn defeated_state_refuses_everything_but_restart() {
        let mut state = seeded();
        state.defeat();

        assert!(matches!(
            state.execute(Command::Attack),
            Err(ActionError::GameOver)
        ));

        let outcome = state.execute(Command::Restart).expect("restart");

        assert_eq!(outcome, CommandOutcome::Restarted);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.player().level, 1);
        assert_eq!(state.player().gold, 50);
    }

    #[test]
    fn restart_while_playing_is_refused() {
        let mut state = seeded();

        assert!(matches!(
            state.execute(Command::Restart),
            Err(ActionError::NotDefeated)
        ));
    }

    #[test]
    fn rejected_command_surfaces_as_notification() {
        let mut state = seeded();
        clear_enemies(&mut state);
        state.outbox.clear();

        let outcomes = state.step(0.0, &InputFrame::idle().with_command(Command::Attack));

        assert!(outcomes.is_empty());
        let mut sink: Vec<Notification> = Vec::new();
        state.drain_notifications(&mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].text, "No enemies in range!");
        assert!(state.outbox.is_empty());
    }

    #[test]
    fn snapshot_lists_player_last_and_marks_equipment() {
        let mut state = seeded();
        clear_enemies(&mut state);
        let position = state.player().position + Vec2::new(20.0, 0.0);
        state
            .store
            .zone
            .enemies
            .push(Enemy::spawn(&ENEMIES[0], position, 0.0));

        let snapshot = state.snapshot();

        assert_eq!(snapshot.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
        assert_eq!(snapshot.sprites_of(SpriteKind::Enemy).count(), 1);
        assert_eq!(snapshot.sprites_of(SpriteKind::Portal).count(), 1);
        assert!(snapshot.inventory[0].equipped);
        assert_eq!(snapshot.quests.len(), 3);
        assert!(snapshot.visible_tiles.is_some());
    }
}
