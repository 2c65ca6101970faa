// Opens a camera and converts frames into a buffer suitable for the window
// and the detector: Vec<u32> where each pixel is 0x00RRGGBB, already resized
// to the canvas resolution and mirrored so the preview behaves like a mirror.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use image::imageops::{self, FilterType};

// A small wrapper around nokhwa::Camera so the main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    target_w: u32,
    target_h: u32,
    mirror: bool,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` and start streaming. The stream may pick a
    /// resolution near the request; `next_frame` scales every frame to
    /// exactly `target_w` x `target_h` either way.
    pub fn new(index: u32, target_w: u32, target_h: u32, mirror: bool) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(target_w, target_h),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );

        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam =
            Camera::new(idx, req).map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();

        Ok(Self {
            cam,
            target_w,
            target_h,
            mirror,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame, decode it to RGB, scale it to the canvas size,
    /// mirror it if asked, and pack it as 0x00RRGGBB pixels.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        // Blocks until the camera has a new frame for us.
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let rgb_img = if rgb_img.dimensions() != (self.target_w, self.target_h) {
            imageops::resize(&rgb_img, self.target_w, self.target_h, FilterType::Triangle)
        } else {
            rgb_img
        };

        let rgb_img = if self.mirror {
            imageops::flip_horizontal(&rgb_img)
        } else {
            rgb_img
        };

        let (w, h) = rgb_img.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for pixel in rgb_img.pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            out.push((r << 16) | (g << 8) | b);
        }

        Ok(FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels: out,
        })
    }

    /// The resolution the stream actually delivers, before scaling.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
