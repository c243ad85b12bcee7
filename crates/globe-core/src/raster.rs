//! Software rasterizer: lit sphere, glow halo, land dots and markers into an
//! RGBA8 (straight alpha) frame buffer.

use crate::config::{RenderConfig, Rgb};
use crate::constants::*;
use crate::markers::Marker;
use crate::motion::PulseRings;
use crate::projection::{project_markers, unit_to_geo, Orientation, Viewport};
use crate::world_map::LandMask;
use glam::{Vec2, Vec3};

/// Row-major RGBA8 pixels, straight (non-premultiplied) alpha.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Both sides are capped at `MAX_BACKING_PX`.
    pub fn new(width: u32, height: u32) -> Self {
        let mut fb = Self::default();
        fb.resize(width, height);
        fb
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.min(MAX_BACKING_PX), height.min(MAX_BACKING_PX));
        if self.width == width && self.height == height {
            return;
        }
        let Some(len) = byte_len(width, height) else {
            log::warn!("[raster] {width}x{height} frame does not fit in memory");
            *self = Self::default();
            return;
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![0; len];
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn copy_from(&mut self, other: &FrameBuffer) {
        self.resize(other.width, other.height);
        self.pixels.copy_from_slice(&other.pixels);
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, rgb: Rgb, alpha: f32) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        blend_over(&mut self.pixels[i..i + 4], rgb, alpha);
    }

    /// Anti-aliased filled disc.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, rgb: Rgb, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 || !center.is_finite() {
            return;
        }
        let x0 = (center.x - radius - 1.0).floor().max(0.0) as u32;
        let y0 = (center.y - radius - 1.0).floor().max(0.0) as u32;
        let x1 = ((center.x + radius + 1.0).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((center.y + radius + 1.0).ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius - p.distance(center) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, rgb, alpha * coverage);
                }
            }
        }
    }

    /// Anti-aliased circle outline of stroke `width`. Only the rows' annulus
    /// spans are visited.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, rgb: Rgb, alpha: f32) {
        if radius <= 0.0 || width <= 0.0 || alpha <= 0.0 || !center.is_finite() {
            return;
        }
        let half_w = width * 0.5;
        let outer = radius + half_w + 1.0;
        let inner = (radius - half_w - 1.0).max(0.0);
        let y0 = (center.y - outer).floor().max(0.0) as u32;
        let y1 = ((center.y + outer).ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            let dy = y as f32 + 0.5 - center.y;
            let xo = (outer * outer - dy * dy).max(0.0).sqrt();
            let xi = if dy.abs() < inner {
                (inner * inner - dy * dy).sqrt()
            } else {
                0.0
            };
            let spans = if xi > 0.0 {
                [(center.x - xo, center.x - xi), (center.x + xi, center.x + xo)]
            } else {
                [(center.x - xo, center.x + xo), (0.0, 0.0)]
            };
            // right span never revisits a pixel of the left one
            let mut next = 0;
            for (a, b) in spans {
                let x0 = (a.floor().max(0.0) as u32).max(next);
                let x1 = (b.ceil().max(0.0) as u32).min(self.width);
                for x in x0..x1 {
                    let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                    let coverage = (half_w - (d - radius).abs() + 0.5).clamp(0.0, 1.0);
                    if coverage > 0.0 {
                        self.blend(x, y, rgb, alpha * coverage);
                    }
                }
                next = next.max(x1);
            }
        }
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Straight-alpha "over" composite of `rgb`/`alpha` onto one RGBA8 pixel.
#[inline]
pub fn blend_over(px: &mut [u8], rgb: Rgb, alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst_a = px[3] as f32 / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    if out_a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let src = rgb[c].clamp(0.0, 1.0);
        let dst = px[c] as f32 / 255.0;
        px[c] = to_u8((src * a + dst * dst_a * (1.0 - a)) / out_a);
    }
    px[3] = to_u8(out_a);
}

/// Body-space sample points of the dotted land layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapSamples {
    density: u32,
    points: Vec<Vec3>,
}

impl MapSamples {
    /// Fibonacci lattice of `density` points, keeping those over land.
    pub fn fibonacci(density: u32, mask: &LandMask) -> Self {
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        let n = density.max(1) as f32;
        let points = (0..density)
            .filter_map(|i| {
                let y = 1.0 - (i as f32 + 0.5) * 2.0 / n;
                let r = (1.0 - y * y).max(0.0).sqrt();
                let phi = i as f32 * golden_angle;
                let p = Vec3::new(phi.cos() * r, y, phi.sin() * r);
                let (lat, lon) = unit_to_geo(p);
                mask.is_land(lat, lon).then_some(p)
            })
            .collect();
        Self { density, points }
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean angular spacing of the full lattice on the unit sphere.
    pub fn spacing(&self) -> f32 {
        (4.0 * std::f32::consts::PI / self.density.max(1) as f32).sqrt()
    }
}

/// One pulsing ring outline at a point of its cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingPulse {
    /// Radius as a fraction of half the backing size.
    pub radius_fraction: f32,
    pub alpha: f32,
}

impl RingPulse {
    pub const HIDDEN: RingPulse = RingPulse {
        radius_fraction: 0.0,
        alpha: 0.0,
    };
}

/// Per-frame inputs besides the render config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub composite_angle: f64,
    /// Halo boost, eased between the idle and hovered levels.
    pub glow_strength: f32,
    pub rings: [RingPulse; 2],
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            composite_angle: 0.0,
            glow_strength: HOVER_GLOW_IDLE,
            rings: PulseRings::new().rings(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub visible_markers: usize,
    pub land_dots: usize,
}

pub struct Rasterizer {
    config: RenderConfig,
    samples: MapSamples,
    light: Vec3,
    // Angle-independent layer (halo + lit body), keyed by size and glow level
    base: FrameBuffer,
    base_key: Option<(u32, u32)>,
    base_repaints: u64,
}

impl Rasterizer {
    pub fn new(config: RenderConfig, mask: &LandMask) -> Self {
        let samples = MapSamples::fibonacci(config.map_sample_density, mask);
        log::debug!(
            "[raster] {} land samples out of {}",
            samples.len(),
            config.map_sample_density
        );
        Self {
            config,
            samples,
            light: Vec3::from(LIGHT_DIR).normalize(),
            base: FrameBuffer::default(),
            base_key: None,
            base_repaints: 0,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn samples(&self) -> &MapSamples {
        &self.samples
    }

    /// How many times the cached base layer has been repainted.
    pub fn base_repaints(&self) -> u64 {
        self.base_repaints
    }

    /// Swap in a re-measured config. Land samples are rebuilt only when the
    /// sample density changes.
    pub fn set_config(&mut self, config: RenderConfig, mask: &LandMask) {
        if config.map_sample_density != self.config.map_sample_density {
            self.samples = MapSamples::fibonacci(config.map_sample_density, mask);
        }
        if config != self.config {
            self.base_key = None;
        }
        self.config = config;
    }

    #[inline]
    fn shade(&self, normal: Vec3) -> f32 {
        let lambert = normal.dot(self.light).max(0.0);
        (AMBIENT_LIGHT + self.config.diffuse_strength * lambert * (1.0 - AMBIENT_LIGHT))
            .min(MAX_LIGHT_INTENSITY)
    }

    /// Render one frame. The output depends only on the config, the markers
    /// and `params`.
    pub fn render(
        &mut self,
        markers: &[Marker],
        params: &FrameParams,
        target: &mut FrameBuffer,
    ) -> FrameStats {
        let size = self.config.backing_size();
        let viewport = Viewport::square(size);
        self.ensure_base(&viewport, params.glow_strength);
        target.copy_from(&self.base);
        self.paint_rings(target, &viewport, &params.rings);

        let orientation = Orientation::new(params.composite_angle, self.config.tilt);
        let land_dots = self.paint_land(target, &orientation, &viewport);

        let projected = project_markers(markers, &orientation, &viewport);
        for m in &projected {
            target.fill_disc(
                m.screen,
                m.radius_px,
                self.config.marker_color,
                self.config.opacity,
            );
        }

        FrameStats {
            visible_markers: projected.len(),
            land_dots,
        }
    }

    fn ensure_base(&mut self, viewport: &Viewport, glow_strength: f32) {
        // The halo is painted at a quantized strength so an easing glow
        // reuses the layer for several frames.
        let level = (glow_strength.max(0.0) * GLOW_CACHE_LEVELS).round() as u32;
        let key = (viewport.size, level);
        if self.base_key == Some(key) {
            return;
        }
        let mut base = std::mem::take(&mut self.base);
        base.resize(viewport.size, viewport.size);
        base.clear();
        self.paint_body(&mut base, viewport, level as f32 / GLOW_CACHE_LEVELS);
        self.base = base;
        self.base_key = Some(key);
        self.base_repaints += 1;
    }

    fn paint_rings(&self, target: &mut FrameBuffer, viewport: &Viewport, rings: &[RingPulse]) {
        let half = viewport.size as f32 * 0.5;
        let width = PULSE_RING_WIDTH_PX * self.config.device_pixel_ratio;
        for ring in rings {
            target.stroke_circle(
                viewport.center,
                ring.radius_fraction * half,
                width,
                self.config.marker_color,
                ring.alpha,
            );
        }
    }

    fn paint_body(&self, buf: &mut FrameBuffer, viewport: &Viewport, glow_strength: f32) {
        let r = viewport.radius;
        if r <= 0.0 {
            return;
        }
        let edge = 1.0 / r;
        let glow_alpha = GLOW_BASE_ALPHA + glow_strength.max(0.0);
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let dx = (x as f32 + 0.5 - viewport.center.x) / r;
                let dy = (viewport.center.y - (y as f32 + 0.5)) / r;
                let d2 = dx * dx + dy * dy;
                let d = d2.sqrt();
                if d > 1.0 - edge && d < 1.0 + GLOW_WIDTH_FRACTION {
                    let t = ((d - 1.0) / GLOW_WIDTH_FRACTION).clamp(0.0, 1.0);
                    let falloff = (1.0 - t) * (1.0 - t);
                    buf.blend(x, y, self.config.glow_color, glow_alpha * falloff);
                }
                let coverage = ((1.0 - d) * r + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let normal = Vec3::new(dx, dy, (1.0 - d2).max(0.0).sqrt());
                    let s = self.shade(normal);
                    let rgb = scale_rgb(self.config.base_color, s);
                    buf.blend(x, y, rgb, self.config.opacity * coverage);
                }
            }
        }
    }

    fn paint_land(
        &self,
        target: &mut FrameBuffer,
        orientation: &Orientation,
        viewport: &Viewport,
    ) -> usize {
        let dot_radius =
            (self.samples.spacing() * viewport.radius * LAND_DOT_SPACING_FILL).max(LAND_DOT_MIN_RADIUS_PX);
        let alpha = self.config.land_alpha();
        let mut drawn = 0;
        for p in self.samples.points() {
            let view = orientation.to_view(*p);
            if view.z < 0.0 {
                continue;
            }
            let rgb = scale_rgb(self.config.land_color, self.shade(view));
            target.fill_disc(viewport.to_screen(view), dot_radius, rgb, alpha);
            drawn += 1;
        }
        drawn
    }
}

#[inline]
fn scale_rgb(rgb: Rgb, s: f32) -> Rgb {
    [
        (rgb[0] * s).min(1.0),
        (rgb[1] * s).min(1.0),
        (rgb[2] * s).min(1.0),
    ]
}
