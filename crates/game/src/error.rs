use thiserror::Error;

use crate::notify::{Notification, Severity};
use crate::player::InventoryError;
use crate::zone::ZoneError;

/// Soft failures of player-triggered actions. An action that returns one of
/// these has not mutated any state.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Inventory full! ({capacity} slots)")]
    InventoryFull { capacity: usize },
    #[error("Not enough gold! Need {needed}, have {available}")]
    InsufficientGold { needed: i32, available: i32 },
    #[error("No enemies in range!")]
    NoTargetInRange,
    #[error("No special attack available!")]
    NoSpecialAvailable,
    #[error("No healing potions available!")]
    NoPotionAvailable,
    #[error("Already at full health!")]
    AlreadyAtFullHealth,
    #[error("Attack not ready ({remaining:.1}s)")]
    CooldownNotReady { remaining: f32 },
    #[error("Already in {name}!")]
    AlreadyInZone { name: &'static str },
    #[error("Nothing to restart, the adventure is still going")]
    NotDefeated,
    #[error("Game Over! Press R to restart")]
    GameOver,
    #[error("No zone with index {index}")]
    UnknownZone { index: usize },
    #[error("No shop item with index {index}")]
    UnknownShopItem { index: usize },
    #[error("zone generation failed: {0}")]
    Zone(#[from] ZoneError),
}

impl From<InventoryError> for ActionError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::Full { capacity } => ActionError::InventoryFull { capacity },
        }
    }
}

impl ActionError {
    pub fn severity(&self) -> Severity {
        match self {
            ActionError::AlreadyAtFullHealth
            | ActionError::AlreadyInZone { .. }
            | ActionError::NotDefeated => Severity::Info,
            ActionError::NoTargetInRange
            | ActionError::NoSpecialAvailable
            | ActionError::NoPotionAvailable
            | ActionError::CooldownNotReady { .. } => Severity::Warning,
            ActionError::InventoryFull { .. }
            | ActionError::InsufficientGold { .. }
            | ActionError::GameOver
            | ActionError::UnknownZone { .. }
            | ActionError::UnknownShopItem { .. }
            | ActionError::Zone(_) => Severity::Error,
        }
    }

    /// Repeats of these collapse in the message log.
    fn dedupe_key(&self) -> Option<&'static str> {
        match self {
            ActionError::CooldownNotReady { .. } => Some("cooldown_not_ready"),
            ActionError::InventoryFull { .. } => Some("inventory_full"),
            ActionError::GameOver => Some("game_over"),
            _ => None,
        }
    }

    pub fn to_notification(&self) -> Notification {
        let notification = Notification::new(self.severity(), self.to_string());
        match self.dedupe_key() {
            Some(key) => notification.deduped(key),
            None => notification,
        }
    }
}
