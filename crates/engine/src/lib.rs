//! Platform layer: window and event loop, keyboard input collection, a
//! software RGBA canvas and loop metrics. Games plug in through [`Scene`].

pub mod app;

pub use app::{
    glyph_advance, line_height, run_app, text_width, with_alpha, AppError, Camera2D, Canvas,
    InputAction, InputSnapshot, LoopConfig, LoopMetricsSnapshot, Renderer, Rgba, Scene,
    SceneCommand, TileRange, Tilemap, TilemapError, Vec2,
};
