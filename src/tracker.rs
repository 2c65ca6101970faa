//! Stroke bookkeeping. One tracker owns the polyline histories of all four
//! color channels, the current selection, and the tick-by-tick rules that
//! turn marker detections and menu actions into strokes.

use std::collections::VecDeque;

use crate::menu::MenuAction;
use crate::types::{Point, Segment};

/// The four drawable colors. Each owns an independent stroke history; the
/// menu selects which one new points feed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
    Purple,
}

impl Channel {
    pub const COUNT: usize = 4;
    pub const ALL: [Channel; Channel::COUNT] =
        [Channel::Red, Channel::Green, Channel::Blue, Channel::Purple];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Purple => 3,
        }
    }

    /// Display color used for this channel's strokes and its menu button.
    pub fn color(self) -> u32 {
        match self {
            Channel::Red => 0x00FF_0000,
            Channel::Green => 0x0000_FF00,
            Channel::Blue => 0x0000_00FF,
            Channel::Purple => 0x0080_0080,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "RED",
            Channel::Green => "GREEN",
            Channel::Blue => "BLUE",
            Channel::Purple => "PURPLE",
        }
    }
}

/// A connected run of marker positions, oldest first. Bounded: once `cap`
/// points are held, each push evicts the oldest. Eviction only shortens the
/// preview overlay; segments already stamped onto the canvas stay.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: VecDeque<Point>,
    cap: usize,
}

impl Polyline {
    pub fn new(cap: usize) -> Self {
        Self { points: VecDeque::with_capacity(cap.min(64)), cap }
    }

    pub fn push(&mut self, p: Point) {
        if self.points.len() == self.cap {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recently pushed point, if any.
    pub fn newest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Adjacent point pairs, oldest first. A polyline with fewer than two
    /// points yields nothing.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| Segment { from: *a, to: *b })
    }
}

/// What one tick asked of the canvas: at most one fresh segment to stamp in
/// the owning channel's color, and whether the drawing area must be wiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEffect {
    pub segment: Option<(Channel, Segment)>,
    pub cleared: bool,
}

/// Per-tick stroke state machine.
///
/// Rules, in precedence order:
/// - a channel button hit switches the selection and nothing else
/// - a clear hit resets every history and the selection
/// - a detection below the band extends the selected channel's newest
///   polyline and emits the segment joining it to the previous point
/// - a detection inside the band that missed every button is inert
/// - no detection at all terminates the open polyline of every channel
pub struct StrokeTracker {
    histories: [Vec<Polyline>; Channel::COUNT],
    selected: Channel,
    band_height: i32,
    cap: usize,
}

impl StrokeTracker {
    pub fn new(band_height: i32, cap: usize) -> Self {
        Self {
            histories: std::array::from_fn(|_| vec![Polyline::new(cap)]),
            selected: Channel::default(),
            band_height,
            cap,
        }
    }

    pub fn selected(&self) -> Channel {
        self.selected
    }

    /// Full stroke history of one channel, oldest polyline first. The last
    /// entry is the one new points feed into.
    pub fn polylines(&self, channel: Channel) -> &[Polyline] {
        &self.histories[channel.index()]
    }

    /// Feed one tick of input. `action` is the menu hit for an in-band
    /// detection (None below the band, in a gap, or with no detection);
    /// `detection` is the marker centroid if one was found.
    pub fn advance(&mut self, action: Option<MenuAction>, detection: Option<Point>) -> TickEffect {
        match (action, detection) {
            (Some(MenuAction::Select(channel)), _) => {
                self.selected = channel;
                TickEffect::default()
            }
            (Some(MenuAction::Clear), _) => {
                self.reset();
                TickEffect { segment: None, cleared: true }
            }
            (None, Some(p)) if p.y > self.band_height => {
                let line = self.current_mut();
                let prev = line.newest();
                line.push(p);
                TickEffect {
                    segment: prev.map(|from| (self.selected, Segment { from, to: p })),
                    cleared: false,
                }
            }
            // In the band but on no button: the open stroke stays open.
            (None, Some(_)) => TickEffect::default(),
            (None, None) => {
                self.break_all();
                TickEffect::default()
            }
        }
    }

    fn current_mut(&mut self) -> &mut Polyline {
        let history = &mut self.histories[self.selected.index()];
        // new(), reset() and break_all() keep every history non-empty
        if history.is_empty() {
            history.push(Polyline::new(self.cap));
        }
        let last = history.len() - 1;
        &mut history[last]
    }

    /// A tick without a detection ends the open polyline of every channel,
    /// so the next detection starts a fresh stroke instead of joining
    /// across the gap.
    fn break_all(&mut self) {
        for history in &mut self.histories {
            history.push(Polyline::new(self.cap));
        }
    }

    fn reset(&mut self) {
        self.histories = std::array::from_fn(|_| vec![Polyline::new(self.cap)]);
        self.selected = Channel::default();
    }
}
