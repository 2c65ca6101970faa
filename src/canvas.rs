//! The persistent board. Strokes are stamped on additively, one segment per
//! tick; nothing below the menu band is ever redrawn except on an explicit
//! clear.

use crate::draw;
use crate::menu::{self, MenuLayout};
use crate::tracker::Channel;
use crate::types::{FrameBuffer, Segment};

const BACKGROUND: u32 = 0x00FF_FFFF;

pub struct Canvas {
    fb: FrameBuffer,
    band_height: i32,
    thickness: u32,
}

impl Canvas {
    /// Fresh white board with the menu band painted across the top.
    pub fn new(width: usize, height: usize, layout: &MenuLayout, thickness: u32) -> Self {
        let mut fb = FrameBuffer::new(width, height, BACKGROUND);
        menu::draw_menu(&mut fb, layout);
        Self { fb, band_height: layout.band_height, thickness }
    }

    /// Stamp one stroke segment in the channel's display color.
    pub fn stamp(&mut self, channel: Channel, segment: Segment) {
        draw::draw_segment(&mut self.fb, segment.from, segment.to, channel.color(), self.thickness);
    }

    /// Wipe the drawing area back to the background. The menu band keeps
    /// its pixels.
    pub fn clear_below_band(&mut self) {
        let first_row = (self.band_height + 1).max(0) as usize;
        for y in first_row..self.fb.height {
            let row = y * self.fb.width;
            self.fb.pixels[row..row + self.fb.width].fill(BACKGROUND);
        }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.fb
    }
}
