use tracing::{debug, info};

use crate::effects::{DamageNumber, Particle};
use crate::error::ActionError;
use crate::notify::{Notification, UiSink};
use crate::player::{PlayerProfile, PLAYER_ZONE_ENTRY};
use crate::quest::QuestCounters;
use crate::zone::ZoneState;

/// Live world data: the persistent player profile plus everything scoped to
/// the active zone. Zone-scoped data is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore {
    pub player: PlayerProfile,
    pub counters: QuestCounters,
    pub zone: ZoneState,
    pub particles: Vec<Particle>,
    pub damage_numbers: Vec<DamageNumber>,
}

impl EntityStore {
    pub fn new(player: PlayerProfile, zone: ZoneState) -> Self {
        Self {
            player,
            counters: QuestCounters::default(),
            zone,
            particles: Vec::new(),
            damage_numbers: Vec::new(),
        }
    }

    /// Swaps in a freshly generated zone and drops every transient effect
    /// from the old one. The player profile is untouched apart from being
    /// moved to the zone entry point.
    pub fn enter_zone(&mut self, zone: ZoneState) {
        info!(from = self.zone.index, to = zone.index, "zone_entered");
        self.zone = zone;
        self.particles.clear();
        self.damage_numbers.clear();
        self.player.position = PLAYER_ZONE_ENTRY;
        self.player.move_intent = engine::Vec2::ZERO;
    }

    /// Adds experience, announcing every level gained.
    pub fn award_experience(&mut self, amount: u32, ui: &mut dyn UiSink) {
        for level_up in self.player.gain_experience(amount) {
            info!(level = level_up.level, "player_leveled_up");
            ui.notify(Notification::success(format!(
                "Level Up! Now level {}!",
                level_up.level
            )));
        }
    }

    /// Picks up the sword at `index`. Returns `Ok(false)` when there is
    /// nothing left to collect there.
    pub fn collect_sword(&mut self, index: usize, ui: &mut dyn UiSink) -> Result<bool, ActionError> {
        let Some(pickup) = self.zone.swords.get(index).filter(|pickup| !pickup.collected) else {
            return Ok(false);
        };
        let template = pickup.template;
        let item = template.item();
        let id = self.player.inventory.add(item)?;
        self.zone.swords[index].collected = true;

        self.player.gold += template.value;
        self.player.score += u64::from(template.points);
        self.counters.sword_found = true;
        ui.notify(Notification::success(format!(
            "Found {}! +{} points",
            template.name, template.points
        )));

        let upgrade = self
            .player
            .weapon_damage()
            .map_or(true, |current| template.damage > current);
        if upgrade {
            self.player.equipment.weapon = Some(id);
            ui.notify(Notification::info(format!("Equipped {}!", template.name)));
        }
        debug!(sword = template.name, equipped = upgrade, "sword_collected");
        Ok(true)
    }

    pub fn collect_treasure(
        &mut self,
        index: usize,
        ui: &mut dyn UiSink,
    ) -> Result<bool, ActionError> {
        let Some(pickup) = self
            .zone
            .treasures
            .get(index)
            .filter(|pickup| !pickup.collected)
        else {
            return Ok(false);
        };
        let template = pickup.template;
        self.player.inventory.add(template.item())?;
        self.zone.treasures[index].collected = true;

        self.player.gold += template.value;
        self.player.score += u64::from(template.points);
        self.counters.treasures_collected += 1;
        ui.notify(Notification::success(format!(
            "Found {}! +{} points",
            template.name, template.points
        )));
        self.award_experience(template.points / 10, ui);
        Ok(true)
    }

    pub fn collect_item(&mut self, index: usize, ui: &mut dyn UiSink) -> Result<bool, ActionError> {
        let Some(pickup) = self.zone.items.get(index).filter(|pickup| !pickup.collected) else {
            return Ok(false);
        };
        let item = *pickup.template;
        self.player.inventory.add(item)?;
        self.zone.items[index].collected = true;
        ui.notify(Notification::info(format!("Found {}!", item.name)));
        Ok(true)
    }
}
