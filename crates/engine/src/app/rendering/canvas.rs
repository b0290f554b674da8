use super::font::{glyph_pixel_set, glyph_rows, GLYPH_HEIGHT, GLYPH_WIDTH};

pub type Rgba = [u8; 4];

/// Scales the alpha channel of `color` by `alpha` in `[0, 1]`.
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    let alpha = alpha.clamp(0.0, 1.0);
    [
        color[0],
        color[1],
        color[2],
        (color[3] as f32 * alpha).round() as u8,
    ]
}

/// Immediate-mode drawing over an RGBA8 frame. Every primitive clips to the
/// frame bounds, so callers may pass off-screen coordinates freely.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let offset = self.byte_offset(x, y)?;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(out)
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(offset) = self.byte_offset(x, y) else {
            return;
        };
        let dst = &mut self.frame[offset..offset + 4];
        match color[3] {
            0 => {}
            255 => dst.copy_from_slice(&color),
            alpha => {
                let a = alpha as u16;
                let inv = 255 - a;
                for channel in 0..3 {
                    let blended = (color[channel] as u16 * a + dst[channel] as u16 * inv) / 255;
                    dst[channel] = blended as u8;
                }
                dst[3] = 255;
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, rect_width: i32, rect_height: i32, color: Rgba) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(rect_width).min(self.width as i32);
        let end_y = y.saturating_add(rect_height).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub fn rect_outline(&mut self, x: i32, y: i32, rect_width: i32, rect_height: i32, color: Rgba) {
        if rect_width <= 1 || rect_height <= 1 {
            return;
        }
        self.fill_rect(x, y, rect_width, 1, color);
        self.fill_rect(x, y + rect_height - 1, rect_width, 1, color);
        self.fill_rect(x, y + 1, 1, rect_height - 2, color);
        self.fill_rect(x + rect_width - 1, y + 1, 1, rect_height - 2, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            self.blend_pixel(cx, cy, color);
            return;
        }
        let radius_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`; `'\n'` is not
    /// interpreted.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: i32, color: Rgba) {
        let scale = scale.max(1);
        let mut pen_x = x;
        for ch in text.chars() {
            let rows = glyph_rows(ch);
            for row in 0..GLYPH_HEIGHT as usize {
                for col in 0..GLYPH_WIDTH {
                    if glyph_pixel_set(&rows, col, row) {
                        self.fill_rect(
                            pen_x + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += glyph_advance(scale);
        }
    }

    pub fn draw_text_centered(&mut self, center_x: i32, y: i32, text: &str, scale: i32, color: Rgba) {
        let left = center_x - text_width(text, scale) / 2;
        self.draw_text(left, y, text, scale, color);
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let pixel = (y as usize).checked_mul(self.width as usize)?.checked_add(x as usize)?;
        let offset = pixel.checked_mul(4)?;
        (offset + 4 <= self.frame.len()).then_some(offset)
    }
}

pub fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * scale.max(1)
}

pub fn line_height(scale: i32) -> i32 {
    (GLYPH_HEIGHT + 2) * scale.max(1)
}

pub fn text_width(text: &str, scale: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * glyph_advance(scale) - scale.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut buffer = frame(4, 4);
        let mut canvas = Canvas::new(&mut buffer, 4, 4);

        canvas.fill_rect(-2, -2, 4, 4, [255, 0, 0, 255]);

        assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(-1, 0), None);
    }

    #[test]
    fn half_alpha_blends_toward_source() {
        let mut buffer = frame(1, 1);
        let mut canvas = Canvas::new(&mut buffer, 1, 1);
        canvas.clear([0, 0, 0, 255]);

        canvas.blend_pixel(0, 0, [200, 100, 0, 128]);

        let pixel = canvas.pixel(0, 0).expect("pixel");
        assert_eq!(pixel[0], 100);
        assert_eq!(pixel[1], 50);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn transparent_color_leaves_pixel_untouched() {
        let mut buffer = frame(1, 1);
        let mut canvas = Canvas::new(&mut buffer, 1, 1);
        canvas.clear([10, 20, 30, 255]);

        canvas.blend_pixel(0, 0, with_alpha([255, 255, 255, 255], 0.0));

        assert_eq!(canvas.pixel(0, 0), Some([10, 20, 30, 255]));
    }

    #[test]
    fn outline_leaves_interior_clear() {
        let mut buffer = frame(5, 5);
        let mut canvas = Canvas::new(&mut buffer, 5, 5);

        canvas.rect_outline(0, 0, 5, 5, [1, 2, 3, 255]);

        assert_eq!(canvas.pixel(0, 4), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(4, 2), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn text_draws_scaled_glyph_pixels() {
        let mut buffer = frame(16, 16);
        let mut canvas = Canvas::new(&mut buffer, 16, 16);

        canvas.draw_text(0, 0, "T", 2, [9, 9, 9, 255]);

        assert_eq!(canvas.pixel(5, 1), Some([9, 9, 9, 255]));
        assert_eq!(canvas.pixel(0, 4), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(2, 9), Some([9, 9, 9, 255]));
    }

    #[test]
    fn text_width_excludes_trailing_gap() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("AB", 1), 7);
        assert_eq!(text_width("AB", 2), 14);
    }
}
