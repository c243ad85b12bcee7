//! Inbound options and the render configuration derived from them.

use crate::constants::*;
use crate::error::GlobeError;

pub type Rgb = [f32; 3];

/// Options recognized from the hosting page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobeOptions {
    /// Square drawing-surface dimension in CSS pixels.
    pub size: u32,
    pub dark_mode: bool,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE_PX,
            dark_mode: true,
        }
    }
}

impl GlobeOptions {
    pub fn new(size: u32, dark_mode: bool) -> Result<Self, GlobeError> {
        let opts = Self { size, dark_mode };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), GlobeError> {
        if self.size == 0 || self.size > MAX_SIZE_PX {
            return Err(GlobeError::InvalidOption {
                name: "size",
                value: self.size.to_string(),
            });
        }
        Ok(())
    }

    /// Parse `data-size` / `data-dark` style attribute values.
    ///
    /// Missing attributes fall back to the defaults; present but unparsable
    /// values are rejected.
    pub fn from_attrs(size: Option<&str>, dark: Option<&str>) -> Result<Self, GlobeError> {
        let defaults = Self::default();
        let size = match size.map(str::trim) {
            None | Some("") => defaults.size,
            Some(s) => s
                .trim_end_matches("px")
                .parse::<u32>()
                .map_err(|_| GlobeError::InvalidOption {
                    name: "size",
                    value: s.to_string(),
                })?,
        };
        let dark_mode = match dark.map(str::trim) {
            None | Some("") => defaults.dark_mode,
            Some(d) => match d.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "dark" => true,
                "false" | "0" | "no" | "light" => false,
                _ => {
                    return Err(GlobeError::InvalidOption {
                        name: "dark",
                        value: d.to_string(),
                    })
                }
            },
        };
        Self::new(size, dark_mode)
    }
}

/// Measured layout of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl SurfaceMetrics {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Whether the surface has a usable, non-zero layout size.
    pub fn is_laid_out(&self) -> bool {
        self.css_width.is_finite()
            && self.css_height.is_finite()
            && self.css_width >= 1.0
            && self.css_height >= 1.0
    }

    /// Side of the square globe area in CSS pixels.
    pub fn pixel_size(&self) -> u32 {
        self.css_width.min(self.css_height).max(0.0).floor() as u32
    }

    pub fn dpr(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio as f32
        } else {
            1.0
        }
    }
}

/// Everything the rasterizer needs besides the per-frame angle.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub pixel_size: u32,
    pub device_pixel_ratio: f32,
    pub base_color: Rgb,
    pub marker_color: Rgb,
    pub glow_color: Rgb,
    pub land_color: Rgb,
    pub map_brightness: f32,
    pub map_sample_density: u32,
    pub diffuse_strength: f32,
    pub tilt: f32,
    pub opacity: f32,
    pub dark_mode: bool,
}

// #2f7f34 in normalized RGB
const MARKER_GREEN: Rgb = [0.184, 0.498, 0.204];

impl RenderConfig {
    pub fn dark() -> Self {
        Self {
            pixel_size: DEFAULT_SIZE_PX,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
            base_color: [0.15, 0.22, 0.15],
            marker_color: MARKER_GREEN,
            glow_color: [0.08, 0.2, 0.08],
            land_color: [0.3, 0.62, 0.32],
            map_brightness: 4.0,
            map_sample_density: DEFAULT_MAP_SAMPLES,
            diffuse_strength: DEFAULT_DIFFUSE,
            tilt: DEFAULT_TILT,
            opacity: DEFAULT_OPACITY,
            dark_mode: true,
        }
    }

    pub fn light() -> Self {
        Self {
            base_color: [0.9, 0.95, 0.9],
            glow_color: [0.85, 0.95, 0.85],
            land_color: [0.38, 0.62, 0.4],
            map_brightness: 6.0,
            dark_mode: false,
            ..Self::dark()
        }
    }

    pub fn from_options(options: &GlobeOptions) -> Self {
        let preset = if options.dark_mode {
            Self::dark()
        } else {
            Self::light()
        };
        Self {
            pixel_size: options.size,
            ..preset
        }
    }

    /// Copy of this config re-targeted to a freshly measured surface.
    pub fn with_metrics(&self, metrics: &SurfaceMetrics) -> Self {
        Self {
            pixel_size: metrics.pixel_size().clamp(1, MAX_SIZE_PX),
            device_pixel_ratio: metrics.dpr(),
            ..self.clone()
        }
    }

    /// Side of the backing store in device pixels, at most `MAX_BACKING_PX`.
    pub fn backing_size(&self) -> u32 {
        let side = (self.pixel_size as f32 * self.device_pixel_ratio).round() as u32;
        side.clamp(1, MAX_BACKING_PX)
    }

    /// Land dot opacity derived from the map brightness.
    pub fn land_alpha(&self) -> f32 {
        let b = self.map_brightness.max(0.0);
        self.opacity * (b / (b + 1.0))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::dark()
    }
}
