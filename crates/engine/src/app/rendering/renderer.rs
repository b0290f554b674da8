use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::canvas::Canvas;

/// Owns the pixel surface for one window. The logical frame matches the
/// window's physical size; a zero-sized window skips drawing.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            width: size.width,
            height: size.height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn draw_frame(&mut self, draw: impl FnOnce(&mut Canvas<'_>)) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let (width, height) = (self.width, self.height);
        let mut canvas = Canvas::new(self.pixels.frame_mut(), width, height);
        draw(&mut canvas);
        self.pixels.render()
    }
}
