//! Marker detection. Each tick the live frame is thresholded in HSV space,
//! the binary mask is cleaned up with a morphology pass, and the surviving
//! connected regions are scanned; the largest one that clears the area gate
//! becomes the marker.

use crate::hsv::{self, HsvRange};
use crate::types::{FrameBuffer, Mask, Point};

/// Radius of the square morphology kernel (5x5).
const KERNEL_RADIUS: i32 = 2;

/// One detected marker blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Centroid of the region, integer division of the pixel sums.
    pub center: Point,
    /// Half the bounding-box diagonal; sizes the ring on the preview.
    pub radius: i32,
    pub area: usize,
}

/// Paint `mask` with 255 where the pixel's hue/saturation/value all sit
/// inside `range`, 0 elsewhere. Bounds are inclusive on both ends. The two
/// buffers must share dimensions.
pub fn threshold(frame: &FrameBuffer, range: &HsvRange, mask: &mut Mask) {
    debug_assert_eq!((frame.width, frame.height), (mask.width, mask.height));
    for (px, m) in frame.pixels.iter().zip(mask.data.iter_mut()) {
        let r = ((px >> 16) & 0xFF) as u8;
        let g = ((px >> 8) & 0xFF) as u8;
        let b = (px & 0xFF) as u8;
        *m = if range.contains(hsv::rgb_to_hsv(r, g, b)) { 255 } else { 0 };
    }
}

/* ---- Separable 5x5 morphology ----
   A square kernel min/max filter splits into a 1x5 row pass and a 5x1
   column pass. The window is clipped to the frame, so pixels outside it
   never vote: erosion cannot eat a blob pressed against the border, and
   dilation cannot grow one out of nothing. */

fn row_extreme(src: &Mask, dst: &mut Mask, pick: fn(u8, u8) -> u8) {
    let w = src.width as i32;
    for y in 0..src.height {
        let row = y * src.width;
        for x in 0..w {
            let lo = (x - KERNEL_RADIUS).max(0) as usize;
            let hi = (x + KERNEL_RADIUS).min(w - 1) as usize;
            let mut v = src.data[row + lo];
            for xx in lo + 1..=hi {
                v = pick(v, src.data[row + xx]);
            }
            dst.data[row + x as usize] = v;
        }
    }
}

fn col_extreme(src: &Mask, dst: &mut Mask, pick: fn(u8, u8) -> u8) {
    let w = src.width;
    let h = src.height as i32;
    for y in 0..h {
        let lo = (y - KERNEL_RADIUS).max(0) as usize;
        let hi = (y + KERNEL_RADIUS).min(h - 1) as usize;
        for x in 0..w {
            let mut v = src.data[lo * w + x];
            for yy in lo + 1..=hi {
                v = pick(v, src.data[yy * w + x]);
            }
            dst.data[y as usize * w + x] = v;
        }
    }
}

fn erode_5x5(src: &Mask, tmp: &mut Mask, dst: &mut Mask) {
    row_extreme(src, tmp, u8::min);
    col_extreme(tmp, dst, u8::min);
}

fn dilate_5x5(src: &Mask, tmp: &mut Mask, dst: &mut Mask) {
    row_extreme(src, tmp, u8::max);
    col_extreme(tmp, dst, u8::max);
}

/// Finds the marker in a frame. Owns its mask and scratch buffers so the
/// per-tick pipeline allocates nothing once warmed up.
pub struct MarkerLocator {
    min_area: usize,
    mask: Mask,
    tmp: Mask,
    morph: Mask,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl MarkerLocator {
    pub fn new(min_area: usize) -> Self {
        Self {
            min_area,
            mask: Mask::new(0, 0),
            tmp: Mask::new(0, 0),
            morph: Mask::new(0, 0),
            visited: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Run the full detection pass: threshold, then erode / open / dilate
    /// with the 5x5 kernel, then pick the largest 8-connected region with
    /// at least `min_area` pixels. Ties keep the first region found in
    /// row-major scan order.
    pub fn locate(&mut self, frame: &FrameBuffer, range: &HsvRange) -> Option<Marker> {
        self.ensure_size(frame.width, frame.height);
        threshold(frame, range, &mut self.mask);
        erode_5x5(&self.mask, &mut self.tmp, &mut self.morph);
        erode_5x5(&self.morph, &mut self.tmp, &mut self.mask);
        dilate_5x5(&self.mask, &mut self.tmp, &mut self.morph);
        dilate_5x5(&self.morph, &mut self.tmp, &mut self.mask);
        self.largest_region()
    }

    /// Copy the mask left by the last `locate` into `fb` as a black and
    /// white view. Visual: the marker shows as a solid white blob.
    pub fn render_mask(&self, fb: &mut FrameBuffer) {
        for (px, m) in fb.pixels.iter_mut().zip(self.mask.data.iter()) {
            *px = if *m != 0 { 0x00FF_FFFF } else { 0 };
        }
    }

    fn ensure_size(&mut self, w: usize, h: usize) {
        if self.mask.width != w || self.mask.height != h {
            self.mask = Mask::new(w, h);
            self.tmp = Mask::new(w, h);
            self.morph = Mask::new(w, h);
        }
    }

    fn largest_region(&mut self) -> Option<Marker> {
        let w = self.mask.width;
        let h = self.mask.height;
        self.visited.clear();
        self.visited.resize(w * h, false);

        let mut best: Option<Marker> = None;
        for start in 0..w * h {
            if self.mask.data[start] == 0 || self.visited[start] {
                continue;
            }

            // Flood fill one region, accumulating its moments and bbox.
            self.stack.clear();
            self.stack.push(start);
            self.visited[start] = true;
            let mut count = 0usize;
            let (mut sum_x, mut sum_y) = (0u64, 0u64);
            let (mut min_x, mut max_x) = (usize::MAX, 0usize);
            let (mut min_y, mut max_y) = (usize::MAX, 0usize);

            while let Some(idx) = self.stack.pop() {
                let x = idx % w;
                let y = idx / w;
                count += 1;
                sum_x += x as u64;
                sum_y += y as u64;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);

                let x1 = (x + 1).min(w - 1);
                let y1 = (y + 1).min(h - 1);
                for ny in y.saturating_sub(1)..=y1 {
                    for nx in x.saturating_sub(1)..=x1 {
                        let nidx = ny * w + nx;
                        if !self.visited[nidx] && self.mask.data[nidx] != 0 {
                            self.visited[nidx] = true;
                            self.stack.push(nidx);
                        }
                    }
                }
            }

            if count < self.min_area {
                continue;
            }
            let bigger = match &best {
                Some(m) => count > m.area,
                None => true,
            };
            if bigger {
                let bw = (max_x - min_x + 1) as f32;
                let bh = (max_y - min_y + 1) as f32;
                best = Some(Marker {
                    center: Point::new(
                        (sum_x / count as u64) as i32,
                        (sum_y / count as u64) as i32,
                    ),
                    radius: ((bw * bw + bh * bh).sqrt() * 0.5) as i32,
                    area: count,
                });
            }
        }
        best
    }
}
