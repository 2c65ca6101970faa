//! Air canvas: draw in the air with a colored marker held up to the webcam.
//!
//! Every tick one camera frame is thresholded in HSV space, the largest
//! matching blob becomes the marker, and its centroid either drives the
//! on-screen menu (top band) or extends a stroke on a persistent canvas
//! (everywhere else). The pipeline is plain single-threaded software
//! processing over `Vec<u32>` framebuffers; no GPU, no OpenCV.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod hsv;
pub mod menu;
pub mod tracker;
pub mod types;
pub mod vision;
