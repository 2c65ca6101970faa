// End-to-end ticks: synthetic camera frames in, stroke histories and canvas
// pixels out. Each test drives the same per-tick chain the binary runs —
// locate the marker in a frame, route its centroid through the menu hit
// test, feed one tracker tick, apply the effect to the board.

use air_canvas::canvas::Canvas;
use air_canvas::config::AppConfig;
use air_canvas::hsv::Preset;
use air_canvas::tracker::{Channel, StrokeTracker, TickEffect};
use air_canvas::types::{FrameBuffer, Point};
use air_canvas::vision::MarkerLocator;

const W: usize = 640;
const H: usize = 360;
const PURE_BLUE: u32 = 0x0000_00FF; // inside the blue preset range
const BACKGROUND: u32 = 0x00FF_FFFF;

/// Half-width of the planted marker blob. 21x21 is comfortably past the
/// default area gate and survives the morphology pass with its centroid
/// exactly at the planted center.
const MARKER_HALF: i32 = 10;

fn frame_with_marker(at: Option<Point>) -> FrameBuffer {
    let mut fb = FrameBuffer::new(W, H, 0);
    if let Some(p) = at {
        for y in (p.y - MARKER_HALF)..=(p.y + MARKER_HALF) {
            for x in (p.x - MARKER_HALF)..=(p.x + MARKER_HALF) {
                fb.pixels[y as usize * W + x as usize] = PURE_BLUE;
            }
        }
    }
    fb
}

/// The whole pipeline minus the camera and the windows.
struct Rig {
    config: AppConfig,
    locator: MarkerLocator,
    tracker: StrokeTracker,
    board: Canvas,
}

impl Rig {
    fn new() -> Self {
        let config = AppConfig::load(None).unwrap();
        let locator = MarkerLocator::new(config.tracking.min_area);
        let tracker = StrokeTracker::new(config.menu.band_height, config.tracking.polyline_cap);
        let board = Canvas::new(
            config.canvas.width,
            config.canvas.height,
            &config.menu,
            config.tracking.stroke_thickness,
        );
        Self { config, locator, tracker, board }
    }

    /// One full tick with a marker planted at `marker` (or an empty frame).
    fn tick(&mut self, marker: Option<Point>) -> TickEffect {
        let frame = frame_with_marker(marker);
        let detection = self
            .locator
            .locate(&frame, &Preset::Blue.bounds())
            .map(|m| m.center);
        assert_eq!(detection, marker, "locator must recover the planted centroid");

        let action = detection
            .filter(|p| self.config.menu.in_band(*p))
            .and_then(|p| self.config.menu.hit_test(p));

        let effect = self.tracker.advance(action, detection);
        if effect.cleared {
            self.board.clear_below_band();
        }
        if let Some((channel, segment)) = effect.segment {
            self.board.stamp(channel, segment);
        }
        effect
    }

    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.board.buffer().pixels[y * W + x]
    }
}

#[test]
fn five_red_points_then_a_green_one() {
    let mut rig = Rig::new();

    // Five consecutive detections sliding right along y=100.
    let mut segments = 0;
    for x in 100..105 {
        if rig.tick(Some(Point::new(x, 100))).segment.is_some() {
            segments += 1;
        }
    }
    let red = rig.tracker.polylines(Channel::Red);
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].len(), 5);
    assert_eq!(segments, 4);

    // Press the GREEN button (span [265, 375]), then draw one point.
    rig.tick(Some(Point::new(300, 30)));
    assert_eq!(rig.tracker.selected(), Channel::Green);
    let effect = rig.tick(Some(Point::new(200, 200)));
    assert_eq!(effect.segment, None);

    let green = rig.tracker.polylines(Channel::Green);
    assert_eq!(green.len(), 1);
    assert_eq!(green[0].len(), 1);
    // The red stroke is untouched by green drawing.
    assert_eq!(rig.tracker.polylines(Channel::Red)[0].len(), 5);

    // The red stroke landed on the board in red.
    assert_eq!(rig.pixel(102, 100), Channel::Red.color());
}

#[test]
fn empty_frames_draw_nothing() {
    let mut rig = Rig::new();
    for _ in 0..5 {
        let effect = rig.tick(None);
        assert_eq!(effect, TickEffect::default());
    }
    for channel in Channel::ALL {
        assert!(rig.tracker.polylines(channel).iter().all(|l| l.is_empty()));
    }
    assert_eq!(rig.pixel(320, 200), BACKGROUND);
}

#[test]
fn a_detection_gap_never_bridges_strokes() {
    let mut rig = Rig::new();
    rig.tick(Some(Point::new(100, 100)));
    rig.tick(Some(Point::new(110, 100)));
    rig.tick(None); // marker occluded for one frame
    let effect = rig.tick(Some(Point::new(300, 250)));
    assert_eq!(effect.segment, None, "post-gap point must start a fresh stroke");

    let red = rig.tracker.polylines(Channel::Red);
    assert_eq!(red.len(), 2);
    assert_eq!(red[0].len(), 2);
    assert_eq!(red[1].len(), 1);

    // No paint along the straight line the bridge would have taken.
    assert_eq!(rig.pixel(205, 175), BACKGROUND);
    // The first stroke did land.
    assert_eq!(rig.pixel(105, 100), Channel::Red.color());
}

#[test]
fn the_clear_button_wipes_the_board_and_the_histories() {
    let mut rig = Rig::new();
    rig.tick(Some(Point::new(300, 30))); // select green
    rig.tick(Some(Point::new(100, 100)));
    rig.tick(Some(Point::new(140, 100)));
    assert_eq!(rig.pixel(120, 100), Channel::Green.color());

    // Press CLEAR (span [25, 135]).
    let effect = rig.tick(Some(Point::new(80, 30)));
    assert!(effect.cleared);
    assert_eq!(rig.tracker.selected(), Channel::Red);
    for channel in Channel::ALL {
        let history = rig.tracker.polylines(channel);
        assert_eq!(history.len(), 1);
        assert!(history[0].is_empty());
    }
    assert_eq!(rig.pixel(120, 100), BACKGROUND);
    // The band keeps its buttons.
    assert_eq!(rig.pixel(300, 40), Channel::Green.color());
}

#[test]
fn a_press_between_buttons_does_nothing() {
    let mut rig = Rig::new();
    rig.tick(Some(Point::new(100, 100)));
    // x=256 sits in the gap between the first and second channel buttons.
    let effect = rig.tick(Some(Point::new(256, 30)));
    assert_eq!(effect, TickEffect::default());
    // The open stroke is still open: the next point joins it.
    let effect = rig.tick(Some(Point::new(110, 100)));
    assert!(effect.segment.is_some());
    assert_eq!(rig.tracker.polylines(Channel::Red).len(), 1);
}

#[test]
fn a_boundary_pixel_press_selects_its_button() {
    let mut rig = Rig::new();
    rig.tick(Some(Point::new(300, 30))); // move off the default first
    assert_eq!(rig.tracker.selected(), Channel::Green);
    // x=145 is the inclusive left edge of the first channel button.
    rig.tick(Some(Point::new(145, 30)));
    assert_eq!(rig.tracker.selected(), Channel::Red);
    rig.tick(Some(Point::new(505, 30)));
    assert_eq!(rig.tracker.selected(), Channel::Purple);
}

#[test]
fn drawing_routes_only_into_the_selected_channel() {
    let mut rig = Rig::new();
    rig.tick(Some(Point::new(440, 30))); // select blue
    rig.tick(Some(Point::new(200, 150)));
    rig.tick(Some(Point::new(220, 150)));

    assert_eq!(rig.tracker.polylines(Channel::Blue)[0].len(), 2);
    for channel in [Channel::Red, Channel::Green, Channel::Purple] {
        assert!(rig.tracker.polylines(channel).iter().all(|l| l.is_empty()));
    }
    assert_eq!(rig.pixel(210, 150), Channel::Blue.color());
}
