mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    glyph_advance, line_height, text_width, with_alpha, Canvas, Renderer, Rgba,
};
pub use scene::{
    Camera2D, InputSnapshot, Scene, SceneCommand, TileRange, Tilemap, TilemapError, Vec2,
};
