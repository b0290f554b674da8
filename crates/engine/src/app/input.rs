#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Attack,
    SpecialAttack,
    UsePotion,
    Interact,
    ToggleZoneSelect,
    Cancel,
    Restart,
    Select1,
    Select2,
    Select3,
    Select4,
}

const ACTION_COUNT: usize = 15;

impl InputAction {
    pub const SELECTIONS: [InputAction; 4] = [
        InputAction::Select1,
        InputAction::Select2,
        InputAction::Select3,
        InputAction::Select4,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Attack => 4,
            InputAction::SpecialAttack => 5,
            InputAction::UsePotion => 6,
            InputAction::Interact => 7,
            InputAction::ToggleZoneSelect => 8,
            InputAction::Cancel => 9,
            InputAction::Restart => 10,
            InputAction::Select1 => 11,
            InputAction::Select2 => 12,
            InputAction::Select3 => 13,
            InputAction::Select4 => 14,
        }
    }
}

/// Held state plus press edges for every action. An edge is raised on the
/// up-to-down transition only, so key repeat does not retrigger it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed[index] = true;
        }
        self.down[index] = is_down;
    }

    pub(crate) fn set_pressed(&mut self, action: InputAction, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }

    /// Releases every held action but keeps edges that have not been
    /// consumed yet.
    pub(crate) fn release_all(&mut self) {
        self.down = [false; ACTION_COUNT];
    }

    pub(crate) fn clear_pressed(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}
