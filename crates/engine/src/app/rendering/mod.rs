mod canvas;
mod font;
mod renderer;

pub use canvas::{glyph_advance, line_height, text_width, with_alpha, Canvas, Rgba};
pub use renderer::Renderer;
