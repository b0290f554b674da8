use engine::{Canvas, InputAction, InputSnapshot, LoopMetricsSnapshot, Scene, SceneCommand};
use kingdom_quest::catalog::{SHOP_ITEMS, ZONES};
use kingdom_quest::{
    Command, CommandOutcome, Controls, FrameSink, GamePhase, GameState, InputFrame, MessageLog,
};
use tracing::{debug, info};

use super::hud::HudPainter;

/// Modal panel drawn over the world. While one is open the digit keys pick
/// entries from it and combat keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overlay {
    None,
    Shop,
    ZoneSelect,
}

pub(crate) struct RpgScene {
    state: GameState,
    messages: MessageLog,
    overlay: Overlay,
    window_size: (u32, u32),
    last_metrics: Option<LoopMetricsSnapshot>,
}

impl RpgScene {
    pub(crate) fn new(state: GameState) -> Self {
        Self {
            state,
            messages: MessageLog::default(),
            overlay: Overlay::None,
            window_size: (0, 0),
            last_metrics: None,
        }
    }

    fn translate_input(&mut self, input: &InputSnapshot) -> InputFrame {
        let mut frame = InputFrame::holding(Controls {
            up: input.is_down(InputAction::MoveUp),
            down: input.is_down(InputAction::MoveDown),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
        });

        if self.state.phase() == GamePhase::Defeated {
            self.overlay = Overlay::None;
            if input.was_pressed(InputAction::Restart) {
                frame.commands.push(Command::Restart);
            }
            return frame;
        }

        if input.was_pressed(InputAction::Cancel) {
            self.overlay = Overlay::None;
        }
        if input.was_pressed(InputAction::ToggleZoneSelect) {
            self.overlay = match self.overlay {
                Overlay::ZoneSelect => Overlay::None,
                _ => Overlay::ZoneSelect,
            };
        }

        let selection = InputAction::SELECTIONS
            .iter()
            .position(|&action| input.was_pressed(action));
        match (self.overlay, selection) {
            (Overlay::Shop, Some(index)) if index < SHOP_ITEMS.len() => {
                frame.commands.push(Command::Purchase(index));
            }
            (Overlay::ZoneSelect, Some(index)) if index < ZONES.len() => {
                frame.commands.push(Command::TravelTo(index));
                self.overlay = Overlay::None;
            }
            _ => {}
        }

        if self.overlay == Overlay::None {
            let bindings = [
                (InputAction::Attack, Command::Attack),
                (InputAction::SpecialAttack, Command::SpecialAttack),
                (InputAction::UsePotion, Command::UsePotion),
                (InputAction::Interact, Command::Interact),
            ];
            frame.commands.extend(
                bindings
                    .into_iter()
                    .filter(|(action, _)| input.was_pressed(*action))
                    .map(|(_, command)| command),
            );
        }
        frame
    }

    fn apply_outcome(&mut self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::ShopOpened => self.overlay = Overlay::Shop,
            CommandOutcome::Traveled { zone } => {
                self.overlay = Overlay::None;
                info!(zone, "zone_travel");
            }
            CommandOutcome::Restarted => {
                self.overlay = Overlay::None;
                self.messages.clear();
            }
            _ => {}
        }
    }
}

impl Scene for RpgScene {
    fn load(&mut self) {
        self.state.drain_notifications(&mut self.messages);
        info!(
            zone = self.state.zone().descriptor.name,
            seed = self.state.seed(),
            "rpg_scene_loaded"
        );
    }

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        let window_size = input.window_size();
        if window_size != self.window_size && window_size.0 > 0 && window_size.1 > 0 {
            self.window_size = window_size;
            self.state.set_viewport(window_size.0, window_size.1);
            debug!(width = window_size.0, height = window_size.1, "viewport_resized");
        }

        let frame = self.translate_input(input);
        let outcomes = self.state.step(dt_seconds, &frame);
        for outcome in &outcomes {
            self.apply_outcome(outcome);
        }
        self.messages.advance(dt_seconds);
        self.state.drain_notifications(&mut self.messages);
        SceneCommand::None
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let snapshot = self.state.snapshot();
        let mut painter = HudPainter::new(canvas, &self.messages, self.overlay);
        painter.present(&snapshot);
    }

    fn unload(&mut self) {
        info!(
            level = self.state.player().level,
            score = self.state.player().score,
            "rpg_scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let player = self.state.player();
        let fps = self
            .last_metrics
            .map(|metrics| format!(" | {:.0} fps", metrics.fps))
            .unwrap_or_default();
        Some(format!(
            "Kingdom Quest | {} | Lv {} | {} gold{fps}",
            self.state.zone().descriptor.name,
            player.level,
            player.gold
        ))
    }

    fn metrics_updated(&mut self, metrics: LoopMetricsSnapshot) {
        self.last_metrics = Some(metrics);
    }
}
