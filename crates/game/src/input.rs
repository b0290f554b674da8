use std::collections::VecDeque;
use std::f32::consts::FRAC_1_SQRT_2;

use engine::Vec2;

/// Held movement keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// Unit-length (or zero) movement direction. Opposite keys cancel and
    /// diagonals are scaled so their speed matches axial movement.
    pub fn direction(&self) -> Vec2 {
        let x = f32::from(i8::from(self.right) - i8::from(self.left));
        let y = f32::from(i8::from(self.down) - i8::from(self.up));
        if x != 0.0 && y != 0.0 {
            Vec2::new(x * FRAC_1_SQRT_2, y * FRAC_1_SQRT_2)
        } else {
            Vec2::new(x, y)
        }
    }
}

/// Discrete player intents, applied before the tick that receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Attack,
    SpecialAttack,
    UsePotion,
    Interact,
    TravelTo(usize),
    Purchase(usize),
    Restart,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub controls: Controls,
    pub commands: Vec<Command>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(controls: Controls) -> Self {
        Self {
            controls,
            commands: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

pub trait InputSource {
    fn next_frame(&mut self) -> InputFrame;
}

/// Replays a fixed sequence of frames, then reports idle input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_frame(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_direction_has_unit_length() {
        let controls = Controls {
            up: true,
            right: true,
            ..Controls::default()
        };

        let direction = controls.direction();

        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!(direction.x > 0.0 && direction.y < 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let controls = Controls {
            up: true,
            down: true,
            left: true,
            right: false,
        };

        assert_eq!(controls.direction(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn scripted_input_runs_dry_into_idle_frames() {
        let mut source = ScriptedInput::new([InputFrame::idle().with_command(Command::Attack)]);

        assert_eq!(source.next_frame().commands, vec![Command::Attack]);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.next_frame(), InputFrame::idle());
    }
}
