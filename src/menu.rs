// The reserved top strip of the frame acts as a row of buttons: one clear
// button and one per color channel. A marker centroid inside the band is a
// menu input, never a drawing input.

use serde::{Deserialize, Serialize};

use crate::draw;
use crate::error::Error;
use crate::tracker::Channel;
use crate::types::{FrameBuffer, Point};

/// Inclusive horizontal pixel range of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, x: i32) -> bool {
        self.min <= x && x <= self.max
    }
}

/// What a menu hit asks the tracker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Clear,
    Select(Channel),
}

/// Static button table: band height plus the disjoint horizontal spans of
/// the clear button and the four channel buttons (left to right, matching
/// `Channel::ALL` order).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLayout {
    pub band_height: i32,
    pub clear: Span,
    pub channels: [Span; Channel::COUNT],
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            band_height: 60,
            clear: Span::new(25, 135),
            channels: [
                Span::new(145, 255),
                Span::new(265, 375),
                Span::new(385, 495),
                Span::new(505, 615),
            ],
        }
    }
}

impl MenuLayout {
    /// Points at or above the band line are menu input.
    pub fn in_band(&self, p: Point) -> bool {
        p.y <= self.band_height
    }

    /// Map an in-band point to its button, or None for the gaps between
    /// buttons. Pure function of the point and the span table.
    pub fn hit_test(&self, p: Point) -> Option<MenuAction> {
        if self.clear.contains(p.x) {
            return Some(MenuAction::Clear);
        }
        for (span, channel) in self.channels.iter().zip(Channel::ALL) {
            if span.contains(p.x) {
                return Some(MenuAction::Select(channel));
            }
        }
        None
    }

    /// Spans must be well formed and pairwise disjoint; checked once at
    /// config load so `hit_test` can stay branch-simple.
    pub fn validate(&self) -> Result<(), Error> {
        if self.band_height <= 0 {
            return Err(Error::Config("menu band height must be positive".into()));
        }
        let mut spans: Vec<Span> = Vec::with_capacity(1 + self.channels.len());
        spans.push(self.clear);
        spans.extend_from_slice(&self.channels);
        for s in &spans {
            if s.min > s.max {
                return Err(Error::Config(format!(
                    "menu span [{}, {}] is misordered",
                    s.min, s.max
                )));
            }
        }
        spans.sort_by_key(|s| s.min);
        for pair in spans.windows(2) {
            if pair[0].max >= pair[1].min {
                return Err(Error::Config(format!(
                    "menu spans [{}, {}] and [{}, {}] overlap",
                    pair[0].min, pair[0].max, pair[1].min, pair[1].max
                )));
            }
        }
        Ok(())
    }
}

/// Paint the button row: the clear button as a thin outline, each channel
/// button filled with its display color, labels on top. Drawn over the live
/// preview every tick and onto the canvas once at startup.
pub fn draw_menu(fb: &mut FrameBuffer, layout: &MenuLayout) {
    const LABEL_Y: i32 = 26; // vertically centers the 7 px glyphs in the band
    const WHITE: u32 = 0x00FF_FFFF;
    const BLACK: u32 = 0x0000_0000;

    draw::draw_rect(fb, layout.clear.min, 0, layout.clear.max, layout.band_height, BLACK);
    draw::draw_text_5x7(fb, layout.clear.min + 15, LABEL_Y, "CLEAR", BLACK);

    for (span, channel) in layout.channels.iter().zip(Channel::ALL) {
        draw::fill_rect(fb, span.min, 0, span.max, layout.band_height, channel.color());
        draw::draw_text_5x7(fb, span.min + 15, LABEL_Y, channel.label(), WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MenuLayout {
        MenuLayout::default()
    }

    #[test]
    fn boundary_pixels_belong_to_their_inclusive_span() {
        let l = layout();
        assert_eq!(l.hit_test(Point::new(145, 10)), Some(MenuAction::Select(Channel::Red)));
        assert_eq!(l.hit_test(Point::new(255, 10)), Some(MenuAction::Select(Channel::Red)));
        assert_eq!(l.hit_test(Point::new(25, 10)), Some(MenuAction::Clear));
        assert_eq!(l.hit_test(Point::new(135, 10)), Some(MenuAction::Clear));
        assert_eq!(l.hit_test(Point::new(615, 10)), Some(MenuAction::Select(Channel::Purple)));
    }

    #[test]
    fn gap_pixels_yield_no_action() {
        let l = layout();
        assert_eq!(l.hit_test(Point::new(256, 10)), None);
        assert_eq!(l.hit_test(Point::new(24, 10)), None);
        assert_eq!(l.hit_test(Point::new(140, 10)), None);
        assert_eq!(l.hit_test(Point::new(616, 10)), None);
    }

    #[test]
    fn every_channel_has_a_button() {
        let l = layout();
        assert_eq!(l.hit_test(Point::new(300, 5)), Some(MenuAction::Select(Channel::Green)));
        assert_eq!(l.hit_test(Point::new(440, 5)), Some(MenuAction::Select(Channel::Blue)));
    }

    #[test]
    fn band_membership_is_inclusive_at_the_line() {
        let l = layout();
        assert!(l.in_band(Point::new(100, 60)));
        assert!(!l.in_band(Point::new(100, 61)));
    }

    #[test]
    fn default_layout_validates() {
        assert!(layout().validate().is_ok());
    }

    #[test]
    fn overlapping_spans_fail_validation() {
        let mut l = layout();
        l.channels[1] = Span::new(200, 300); // collides with [145, 255]
        assert!(l.validate().is_err());
    }

    #[test]
    fn misordered_span_fails_validation() {
        let mut l = layout();
        l.clear = Span::new(135, 25);
        assert!(l.validate().is_err());
    }
}
