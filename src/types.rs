// Core pixel-space types shared by the whole pipeline.

/// One RGB image; each entry is 0x00RRGGBB, ready for minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Overwrite every pixel with the source buffer (sizes must match).
    pub fn copy_from(&mut self, src: &FrameBuffer) {
        debug_assert_eq!(self.pixels.len(), src.pixels.len());
        self.pixels.copy_from_slice(&src.pixels);
    }
}

/// Binary detection mask; 255 = pixel passed the HSV threshold, 0 = not.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0; width * height] }
    }
}

/// Integer 2D coordinate in canvas pixel space. "No detection this tick"
/// is modeled as `Option<Point>` at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One straight stroke piece between two consecutive points of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}
