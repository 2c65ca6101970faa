// What you SEE when this runs:
// • "Tracker" window: the live (mirrored) camera feed with the menu band,
//   your strokes so far, and a ring around the detected marker.
// • "Board" window: the persistent white canvas the strokes land on.
// • Hold a colored marker up to the camera and move it: below the band it
//   draws; inside the band it presses the buttons (CLEAR / colors).
// • Keys on the tracker window: M mask view, TAB + Up/Down threshold tuner,
//   1/2/3 preset reseed, Q quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use air_canvas::camera::CameraCapture;
use air_canvas::canvas::Canvas;
use air_canvas::config::AppConfig;
use air_canvas::draw::{self, Drawer};
use air_canvas::hsv::{BoundField, Preset};
use air_canvas::menu;
use air_canvas::tracker::{Channel, StrokeTracker};
use air_canvas::types::FrameBuffer;
use air_canvas::vision::MarkerLocator;

use nokhwa::utils::ApiBackend;

const MARKER_RING: u32 = 0x00FF_FF00;
const HUD_TEXT: u32 = 0x00FF_FFFF;

/// Draw in the air with a colored marker held up to the webcam.
#[derive(Parser, Debug)]
#[command(name = "air-canvas", version, about)]
struct Args {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Marker color preset that seeds the HSV threshold
    #[arg(long, value_enum, default_value = "blue")]
    preset: Preset,

    /// Optional JSON config file (canvas size, menu layout, tracking)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show the camera image as-is instead of mirrored
    #[arg(long)]
    no_mirror: bool,

    /// List available cameras and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    if args.list {
        return list_cameras();
    }

    let config = AppConfig::load(args.config.as_deref())?;
    let (width, height) = (config.canvas.width, config.canvas.height);

    /* --- Camera + the two windows ---
       Visual: both windows open; the tracker one shows live video. */
    let mut cam = CameraCapture::new(args.camera, width as u32, height as u32, !args.no_mirror)?;
    let (src_w, src_h) = cam.resolution();
    log::info!("camera {} streams {}x{}, canvas {}x{}", args.camera, src_w, src_h, width, height);

    let mut tracker_win = Drawer::new("Air Canvas - Tracker", width, height)?;
    let mut board_win = Drawer::new("Air Canvas - Board", width, height)?;

    /* --- Pipeline state --- */
    let mut range = args.preset.bounds();
    let mut locator = MarkerLocator::new(config.tracking.min_area);
    let mut tracker = StrokeTracker::new(config.menu.band_height, config.tracking.polyline_cap);
    let mut board = Canvas::new(width, height, &config.menu, config.tracking.stroke_thickness);
    let mut preview = FrameBuffer::new(width, height, 0);
    let thickness = config.tracking.stroke_thickness;

    log::info!(
        "marker preset {}, min area {} px",
        args.preset.name(),
        config.tracking.min_area
    );

    /* --- HUD / tuner state --- */
    let mut show_mask = false;
    let mut field = BoundField::MinH;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps = String::from("FPS 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while tracker_win.is_open()
        && board_win.is_open()
        && !tracker_win.q_pressed()
        && !board_win.q_pressed()
    {
        /* 1) Keyboard: mask view toggle, threshold tuner, preset reseeds. */
        if tracker_win.mask_toggle_pressed() {
            show_mask = !show_mask;
        }
        if tracker_win.tune_next_pressed() {
            field = field.next();
        }
        if tracker_win.tune_up_pressed() {
            range.adjust(field, 1);
        }
        if tracker_win.tune_down_pressed() {
            range.adjust(field, -1);
        }
        if let Some(i) = tracker_win.preset_pressed() {
            let preset = [Preset::Red, Preset::Yellow, Preset::Blue][i];
            range = preset.bounds();
            log::info!("threshold reseeded from the {} preset", preset.name());
        }

        /* 2) Fresh frame, already canvas-sized and mirrored. */
        let frame = cam.next_frame()?;

        /* 3) Find the marker (threshold + morphology + largest region). */
        let marker = locator.locate(&frame, &range);

        /* 4) In the band the centroid is a menu press, below it a pen tip. */
        let detection = marker.map(|m| m.center);
        let action = detection
            .filter(|p| config.menu.in_band(*p))
            .and_then(|p| config.menu.hit_test(p));

        /* 5) One tick of stroke bookkeeping; apply its effects to the board.
           Visual: the board gains at most one new segment per frame. */
        let effect = tracker.advance(action, detection);
        if effect.cleared {
            board.clear_below_band();
        }
        if let Some((channel, segment)) = effect.segment {
            board.stamp(channel, segment);
        }

        /* 6) Rebuild the preview: live video (or mask view), menu band,
           the full stroke history, and a ring around the marker. */
        if show_mask {
            locator.render_mask(&mut preview);
        } else {
            preview.copy_from(&frame);
            menu::draw_menu(&mut preview, &config.menu);
            for channel in Channel::ALL {
                for line in tracker.polylines(channel) {
                    for seg in line.segments() {
                        draw::draw_segment(&mut preview, seg.from, seg.to, channel.color(), thickness);
                    }
                }
            }
            if let Some(m) = marker {
                draw::draw_circle(&mut preview, m.center.x, m.center.y, m.radius, MARKER_RING);
            }
        }

        let hud = format!(
            "PEN {} | TUNE {} | LO {} {} {} | HI {} {} {} | {}",
            tracker.selected().label(),
            field.label(),
            range.lower.h,
            range.lower.s,
            range.lower.v,
            range.upper.h,
            range.upper.s,
            range.upper.v,
            hud_fps,
        );
        draw::draw_text_5x7(&mut preview, 8, config.menu.band_height + 6, &hud, HUD_TEXT);
        draw::draw_text_5x7(
            &mut preview,
            8,
            config.menu.band_height + 16,
            "TAB: FIELD  UP/DOWN: ADJUST  1/2/3: PRESET  M: MASK  Q: QUIT",
            HUD_TEXT,
        );

        /* 7) Present both windows (this also polls their input). */
        tracker_win.present(&preview)?;
        board_win.present(board.buffer())?;

        /* 8) FPS, once per second. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("{fps:.1} fps");
            hud_fps = format!("FPS {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

fn list_cameras() -> Result<()> {
    let cameras = nokhwa::query(ApiBackend::Auto)?;
    if cameras.is_empty() {
        println!("no cameras found");
    }
    for info in cameras {
        println!("{}: {}", info.index(), info.human_name());
    }
    Ok(())
}
