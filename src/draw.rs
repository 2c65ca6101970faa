// Window + software drawing utilities.
// Everything on screen is drawn here: stroke segments, the menu band
// rectangles, the marker highlight ring, and the 5x7 HUD/label text.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Create a window sized to the canvas.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this tick to the screen. This is also the bounded
    /// input poll: minifb refreshes key state during the update.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// False once the user closes the window (so the loop can stop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// The quit key.
    pub fn q_pressed(&self) -> bool {
        self.window.is_key_down(Key::Q)
    }

    /// Toggle between the live preview and the binary mask view.
    pub fn mask_toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::M, KeyRepeat::No)
    }

    /// Cycle the highlighted HSV bound component.
    pub fn tune_next_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Tab, KeyRepeat::No)
    }

    // Bound adjustment repeats while held, one step per tick.
    pub fn tune_up_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Up, KeyRepeat::Yes)
    }

    pub fn tune_down_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Down, KeyRepeat::Yes)
    }

    /// Keys 1..=3 reseed the threshold from a named preset; returns the
    /// zero-based preset index.
    pub fn preset_pressed(&self) -> Option<usize> {
        for (i, key) in [Key::Key1, Key::Key2, Key::Key3].into_iter().enumerate() {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                return Some(i);
            }
        }
        None
    }
}

/* ---------- Software drawing: pixels, lines, shapes, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Fill a small disc centered at (cx,cy); the stamp behind thick strokes.
pub fn fill_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a stroke segment with round caps by stamping discs along the
/// Bresenham path. Thickness is the stroke width in pixels.
pub fn draw_segment(fb: &mut FrameBuffer, from: Point, to: Point, color: u32, thickness: u32) {
    let radius = (thickness as i32) / 2;
    let (mut x0, mut y0, x1, y1) = (from.x, from.y, to.x, to.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        fill_circle(fb, x0, y0, radius, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Circle outline via the midpoint algorithm; rings the detected marker.
pub fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (cx + x, cy + y), (cx - x, cy + y), (cx + x, cy - y), (cx - x, cy - y),
            (cx + y, cy + x), (cx - y, cy + x), (cx + y, cy - x), (cx - y, cy - x),
        ] {
            put_pixel(fb, px, py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// 1-pixel rectangle outline, corners inclusive.
pub fn draw_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x0, y1, x1, y1, color);
    draw_line(fb, x0, y0, x0, y1, color);
    draw_line(fb, x1, y0, x1, y1, color);
}

/// Filled rectangle, corners inclusive, clipped to the buffer.
pub fn fill_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let xa = x0.max(0);
    let xb = x1.min(fb.width as i32 - 1);
    let ya = y0.max(0);
    let yb = y1.min(fb.height as i32 - 1);
    for y in ya..=yb {
        let row = y as usize * fb.width;
        for x in xa..=xb {
            fb.pixels[row + x as usize] = color;
        }
    }
}

/* ---------- 5x7 bitmap font (A-Z, digits, HUD punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the
/// pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon, dot, dash, slash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00001,0b00010,0b00100,0b01000,0b10000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel shadow for contrast
/// against live video.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; each glyph is 5 pixels wide with
/// 1 pixel spacing. Lowercase input is rendered with the uppercase table.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch.to_ascii_uppercase(), color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 4, 0);
        put_pixel(&mut fb, -1, 0, 0xFF);
        put_pixel(&mut fb, 0, -1, 0xFF);
        put_pixel(&mut fb, 4, 0, 0xFF);
        put_pixel(&mut fb, 0, 4, 0xFF);
        assert!(fb.pixels.iter().all(|&p| p == 0));
        put_pixel(&mut fb, 3, 3, 0xFF);
        assert_eq!(fb.pixels[3 * 4 + 3], 0xFF);
    }

    #[test]
    fn line_colors_both_endpoints() {
        let mut fb = FrameBuffer::new(16, 16, 0);
        draw_line(&mut fb, 2, 3, 12, 9, 0xABCDEF);
        assert_eq!(fb.pixels[3 * 16 + 2], 0xABCDEF);
        assert_eq!(fb.pixels[9 * 16 + 12], 0xABCDEF);
    }

    #[test]
    fn thick_segment_is_wider_than_one_pixel() {
        let mut fb = FrameBuffer::new(16, 16, 0);
        draw_segment(&mut fb, Point::new(2, 8), Point::new(13, 8), 0x11, 2);
        // A horizontal stroke of thickness 2 paints the rows above and below.
        assert_eq!(fb.pixels[7 * 16 + 8], 0x11);
        assert_eq!(fb.pixels[8 * 16 + 8], 0x11);
        assert_eq!(fb.pixels[9 * 16 + 8], 0x11);
    }

    #[test]
    fn filled_rect_clips_to_buffer() {
        let mut fb = FrameBuffer::new(8, 8, 0);
        fill_rect(&mut fb, 6, 6, 20, 20, 0x22);
        assert_eq!(fb.pixels[7 * 8 + 7], 0x22);
        assert_eq!(fb.pixels[5 * 8 + 5], 0);
    }

    #[test]
    fn text_marks_pixels() {
        let mut fb = FrameBuffer::new(64, 16, 0);
        draw_text_5x7(&mut fb, 1, 1, "CLEAR", 0xFFFFFF);
        assert!(fb.pixels.iter().any(|&p| p == 0xFFFFFF));
    }
}
