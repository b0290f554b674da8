use std::ops::{Add, AddAssign, Mul, Sub};

use thiserror::Error;
use tracing::info;

use super::input::ActionStates;
use super::{Canvas, InputAction, LoopMetricsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    window_size: (u32, u32),
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(actions: ActionStates, window_size: (u32, u32)) -> Self {
        Self {
            actions,
            window_size,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only for the single update that follows the key going down.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.actions.was_pressed(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self.actions.set_pressed(action, false);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.set_pressed(action, true);
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector for an angle measured from +x toward +y (screen down).
    pub fn from_angle(radians: f32) -> Self {
        Self {
            x: radians.cos(),
            y: radians.sin(),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Screen-space camera. `position` is the world coordinate drawn at the
/// top-left pixel of the viewport; one world unit is one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Centres the view on `target` without showing anything outside
    /// `[0, world]`. A world smaller than the viewport pins that axis to 0.
    pub fn follow_clamped(&mut self, target: Vec2, world: Vec2) {
        self.position = Vec2 {
            x: clamp_axis(target.x - self.viewport.x / 2.0, world.x - self.viewport.x),
            y: clamp_axis(target.y - self.viewport.y / 2.0, world.y - self.viewport.y),
        };
    }

    pub fn world_to_screen(&self, world: Vec2) -> (i32, i32) {
        let offset = world - self.position;
        (offset.x.floor() as i32, offset.y.floor() as i32)
    }

    pub fn is_visible(&self, position: Vec2, size: Vec2) -> bool {
        position.x + size.x >= self.position.x
            && position.x <= self.position.x + self.viewport.x
            && position.y + size.y >= self.position.y
            && position.y <= self.position.y + self.viewport.y
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    value.min(max.max(0.0)).max(0.0)
}

/// Row-major tile grid. Tile `(x, y)` covers
/// `[x * tile_size, (x + 1) * tile_size)` on each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap<T> {
    width: u32,
    height: u32,
    tile_size: u32,
    tiles: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TilemapError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("tile size must be non-zero")]
    ZeroTileSize,
}

impl<T: Copy> Tilemap<T> {
    pub fn new(width: u32, height: u32, tile_size: u32, tiles: Vec<T>) -> Result<Self, TilemapError> {
        if tile_size == 0 {
            return Err(TilemapError::ZeroTileSize);
        }
        let expected = width as usize * height as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(TilemapError::TileCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<T> {
        self.index_of(x, y)
            .and_then(|index| self.tiles.get(index).copied())
    }

    pub fn tiles(&self) -> &[T] {
        &self.tiles
    }

    /// Inclusive tile range overlapping the camera view, or `None` when the
    /// view misses the grid entirely.
    pub fn visible_range(&self, camera: &Camera2D) -> Option<TileRange> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let size = self.tile_size as f32;
        let min_x = (camera.position.x / size).floor().max(0.0) as u32;
        let min_y = (camera.position.y / size).floor().max(0.0) as u32;
        let max_x = ((camera.position.x + camera.viewport.x) / size).floor().max(0.0) as u32;
        let max_y = ((camera.position.y + camera.viewport.y) / size).floor().max(0.0) as u32;
        if min_x >= self.width || min_y >= self.height {
            return None;
        }
        Some(TileRange {
            x_min: min_x,
            x_max: max_x.min(self.width - 1),
            y_min: min_y,
            y_max: max_y.min(self.height - 1),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn render(&self, canvas: &mut Canvas<'_>);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
    fn metrics_updated(&mut self, _metrics: LoopMetricsSnapshot) {}
}

pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load();
        self.is_loaded = true;
        info!("scene_loaded");
    }

    pub(crate) fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if !self.is_loaded {
            return SceneCommand::None;
        }
        self.scene.update(dt_seconds, input)
    }

    pub(crate) fn render(&self, canvas: &mut Canvas<'_>) {
        if self.is_loaded {
            self.scene.render(canvas);
        }
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title()
    }

    pub(crate) fn metrics_updated(&mut self, metrics: LoopMetricsSnapshot) {
        self.scene.metrics_updated(metrics);
    }

    pub(crate) fn shutdown(&mut self) {
        if !self.is_loaded {
            return;
        }
        self.scene.unload();
        self.is_loaded = false;
        info!("scene_unloaded");
    }
}
