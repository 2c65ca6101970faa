//! Optional JSON configuration. Every field has a default, so a config file
//! only needs the keys it wants to change; no file at all runs the stock
//! setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::menu::MenuLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasSize,
    pub menu: MenuLayout,
    pub tracking: Tracking,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracking {
    /// Smallest connected region accepted as the marker, in pixels.
    pub min_area: usize,
    /// Points held per polyline before the oldest is dropped.
    pub polyline_cap: usize,
    pub stroke_thickness: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: 640, height: 360 }
    }
}

impl Default for Tracking {
    fn default() -> Self {
        Self { min_area: 64, polyline_cap: 1024, stroke_thickness: 2 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            menu: MenuLayout::default(),
            tracking: Tracking::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or the defaults when no file is given. Missing
    /// keys fall back to their defaults; a file that does not parse is an
    /// error. Sanity checks run either way.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let config = match path {
            Some(p) => {
                let content = fs::read_to_string(p)
                    .map_err(|e| Error::Config(format!("read {}: {e}", p.display())))?;
                serde_json::from_str::<AppConfig>(&content)
                    .map_err(|e| Error::Config(format!("parse {}: {e}", p.display())))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::Config("canvas size must be non-zero".into()));
        }
        if self.menu.band_height as usize >= self.canvas.height {
            return Err(Error::Config("menu band is taller than the canvas".into()));
        }
        let rightmost = self
            .menu
            .channels
            .iter()
            .chain(std::iter::once(&self.menu.clear))
            .map(|s| s.max)
            .max()
            .unwrap_or(0);
        if rightmost as usize >= self.canvas.width {
            return Err(Error::Config("menu spans extend past the canvas width".into()));
        }
        if self.tracking.polyline_cap < 2 {
            return Err(Error::Config("polyline cap must hold at least two points".into()));
        }
        if self.tracking.min_area == 0 {
            return Err(Error::Config("min area must be at least 1".into()));
        }
        self.menu.validate()
    }
}
