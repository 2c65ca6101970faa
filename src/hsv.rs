// HSV color math for marker thresholding.
//
// Components use the OpenCV scale the original tooling was tuned against:
// hue 0..=180 (degrees halved), saturation and value 0..=255. Thresholding
// by hue keeps detection stable when lighting changes brightness but not
// color.

/// One HSV triple on the OpenCV scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8, // 0..=180
    pub s: u8, // 0..=255
    pub v: u8, // 0..=255
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Inclusive lower/upper bound pair used by the threshold stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    /// Inclusive on both ends, per component (the inRange contract).
    pub fn contains(&self, c: Hsv) -> bool {
        self.lower.h <= c.h
            && c.h <= self.upper.h
            && self.lower.s <= c.s
            && c.s <= self.upper.s
            && self.lower.v <= c.v
            && c.v <= self.upper.v
    }

    /// Move one bound component by `delta`, clamped to its legal range
    /// (hue 0..=180, saturation/value 0..=255).
    pub fn adjust(&mut self, field: BoundField, delta: i16) {
        let (slot, max) = match field {
            BoundField::MinH => (&mut self.lower.h, HUE_MAX),
            BoundField::MinS => (&mut self.lower.s, u8::MAX),
            BoundField::MinV => (&mut self.lower.v, u8::MAX),
            BoundField::MaxH => (&mut self.upper.h, HUE_MAX),
            BoundField::MaxS => (&mut self.upper.s, u8::MAX),
            BoundField::MaxV => (&mut self.upper.v, u8::MAX),
        };
        *slot = (*slot as i16 + delta).clamp(0, max as i16) as u8;
    }
}

pub const HUE_MAX: u8 = 180;

/// The six adjustable bound components, in the order the tuner cycles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundField {
    MinH,
    MinS,
    MinV,
    MaxH,
    MaxS,
    MaxV,
}

impl BoundField {
    pub fn next(self) -> Self {
        match self {
            Self::MinH => Self::MinS,
            Self::MinS => Self::MinV,
            Self::MinV => Self::MaxH,
            Self::MaxH => Self::MaxS,
            Self::MaxS => Self::MaxV,
            Self::MaxV => Self::MinH,
        }
    }

    /// Short tag shown in the HUD next to the current value.
    pub fn label(self) -> &'static str {
        match self {
            Self::MinH => "MIN H",
            Self::MinS => "MIN S",
            Self::MinV => "MIN V",
            Self::MaxH => "MAX H",
            Self::MaxS => "MAX S",
            Self::MaxV => "MAX V",
        }
    }
}

/// Named seed ranges for common marker colors. Red sits at the top of the
/// hue wheel (the wrap-around band), so only its upper band is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Red,
    Yellow,
    Blue,
}

impl Preset {
    pub fn bounds(self) -> HsvRange {
        match self {
            Preset::Red => HsvRange {
                lower: Hsv::new(170, 100, 50),
                upper: Hsv::new(180, 255, 255),
            },
            Preset::Yellow => HsvRange {
                lower: Hsv::new(20, 75, 75),
                upper: Hsv::new(30, 255, 255),
            },
            Preset::Blue => HsvRange {
                lower: Hsv::new(110, 80, 80),
                upper: Hsv::new(130, 255, 255),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Red => "red",
            Preset::Yellow => "yellow",
            Preset::Blue => "blue",
        }
    }
}

/// Convert one 8-bit RGB pixel to the OpenCV HSV scale.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h_deg = if delta == 0.0 {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        60.0 * (((g - b) / delta) % 6.0)
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    if h_deg < 0.0 {
        h_deg += 360.0;
    }

    let h = (h_deg / 2.0).round() as u8; // 0..=180
    let s = if max == 0.0 { 0.0 } else { delta / max * 255.0 };
    let v = max * 255.0;
    Hsv::new(h, s.round() as u8, v.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_convert_to_opencv_scale() {
        assert_eq!(rgb_to_hsv(255, 0, 0), Hsv::new(0, 255, 255)); // red
        assert_eq!(rgb_to_hsv(0, 255, 0), Hsv::new(60, 255, 255)); // green
        assert_eq!(rgb_to_hsv(0, 0, 255), Hsv::new(120, 255, 255)); // blue
    }

    #[test]
    fn grays_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(255, 255, 255), Hsv::new(0, 0, 255));
        assert_eq!(rgb_to_hsv(0, 0, 0), Hsv::new(0, 0, 0));
        let mid = rgb_to_hsv(128, 128, 128);
        assert_eq!((mid.h, mid.s), (0, 0));
    }

    #[test]
    fn presets_capture_their_own_primary() {
        assert!(Preset::Blue.bounds().contains(rgb_to_hsv(0, 0, 255)));
        assert!(Preset::Yellow.bounds().contains(rgb_to_hsv(230, 210, 40)));
        // Pure red converts to hue 0, which the wrap-around preset covers at
        // its 180 end only for slightly bluish reds; a crimson marker does.
        assert!(Preset::Red.bounds().contains(rgb_to_hsv(220, 10, 40)));
    }

    #[test]
    fn range_test_is_inclusive_on_both_ends() {
        let range = Preset::Blue.bounds();
        assert!(range.contains(Hsv::new(110, 80, 80)));
        assert!(range.contains(Hsv::new(130, 255, 255)));
        assert!(!range.contains(Hsv::new(109, 255, 255)));
        assert!(!range.contains(Hsv::new(131, 255, 255)));
    }

    #[test]
    fn adjust_clamps_at_legal_limits() {
        let mut range = Preset::Blue.bounds();
        range.adjust(BoundField::MaxH, 200);
        assert_eq!(range.upper.h, HUE_MAX);
        range.adjust(BoundField::MinS, -300);
        assert_eq!(range.lower.s, 0);
        range.adjust(BoundField::MaxV, 5);
        assert_eq!(range.upper.v, 255);
    }

    #[test]
    fn tuner_cycle_visits_all_six_fields() {
        let mut field = BoundField::MinH;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(field);
            field = field.next();
        }
        assert_eq!(field, BoundField::MinH); // wrapped around
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }
}
