//! Rotation, interaction and rendering tuning constants.
//!
//! These constants express intended behavior (rates, time constants, clamp
//! limits) and keep magic numbers out of the code.

// Auto-rotation: 0.003 rad per frame at the 60 Hz reference refresh rate
pub const AUTO_ROTATE_RATE_PER_SEC: f64 = 0.18;
pub const REFERENCE_FRAME_SEC: f64 = 1.0 / 60.0;

// Longest frame step accepted (seconds); longer stalls are clamped
pub const MAX_FRAME_DT_SEC: f64 = 0.1;

// Drag sensitivity divisor K: pixels of pointer travel per radian of spin
pub const DRAG_PX_PER_RADIAN: f64 = 100.0;
// Hard cap on the drag-derived angle (radians)
pub const MAX_DRAG_ANGLE: f64 = std::f64::consts::TAU;

// Spring that returns the drag angle to rest after release
pub const SPRING_OMEGA: f64 = 12.0; // natural frequency (rad/s)
pub const SPRING_DAMPING_RATIO: f64 = 1.0; // critical at 1
pub const SPRING_MAX_SUBSTEP_SEC: f64 = 1.0 / 240.0;
pub const SPRING_REST_EPSILON: f64 = 1e-5;

// Hover glow ring intensity
pub const HOVER_GLOW_IDLE: f32 = 0.25;
pub const HOVER_GLOW_ACTIVE: f32 = 0.6;
pub const HOVER_GLOW_TAU_SEC: f32 = 0.15; // settles within ~0.6 s
pub const HOVER_GLOW_SNAP: f32 = 1e-3;

// Base layer cache steps per unit of glow strength (0.05 apart)
pub const GLOW_CACHE_LEVELS: f32 = 20.0;

// Pulsing rings: one 4 s breathing cycle, the second ring 2 s behind.
// Rest radius is a fraction of half the backing size; tint scales the
// animated opacity into the stroke alpha.
pub const PULSE_PERIOD_SEC: f64 = 4.0;
pub const PULSE_RING_DELAY_SEC: [f64; 2] = [0.0, 2.0];
pub const PULSE_RING_RADIUS_FRACTION: [f32; 2] = [0.86, 0.88];
pub const PULSE_RING_PEAK_SCALE: [f32; 2] = [1.08, 1.12];
pub const PULSE_RING_OPACITY: [(f32, f32); 2] = [(0.15, 0.05), (0.1, 0.02)]; // rest, peak
pub const PULSE_RING_TINT: [f32; 2] = [0.2, 0.1];
pub const PULSE_RING_WIDTH_PX: f32 = 1.0; // css px

// One-time canvas fade-in after the first presented frame
pub const FADE_IN_SEC: f32 = 1.0;

// Viewport layout (fractions of half the backing size)
pub const GLOBE_RADIUS_FRACTION: f32 = 0.8;
pub const GLOW_WIDTH_FRACTION: f32 = 0.2; // of the globe radius
pub const GLOW_BASE_ALPHA: f32 = 0.5; // halo alpha at the silhouette before hover boost

// Lighting
pub const LIGHT_DIR: [f32; 3] = [-0.35, 0.45, 1.0]; // view space, normalized at use
pub const AMBIENT_LIGHT: f32 = 0.35;
pub const MAX_LIGHT_INTENSITY: f32 = 1.6;

// Land dots
pub const LAND_DOT_SPACING_FILL: f32 = 0.32; // dot radius as a share of lattice spacing
pub const LAND_DOT_MIN_RADIUS_PX: f32 = 0.75;

// Marker disc radius as a share of (marker size * globe radius)
pub const MARKER_RADIUS_SCALE: f32 = 0.35;

// Largest accepted surface (css px) and backing store side (device px).
// 8192^2 RGBA8 still fits a 32-bit address space.
pub const MAX_SIZE_PX: u32 = 4096;
pub const MAX_BACKING_PX: u32 = 8192;

// Defaults taken from the landing page globe
pub const DEFAULT_SIZE_PX: u32 = 600;
pub const DEFAULT_DEVICE_PIXEL_RATIO: f32 = 2.0;
pub const DEFAULT_TILT: f32 = 0.25;
pub const DEFAULT_DIFFUSE: f32 = 1.8;
pub const DEFAULT_MAP_SAMPLES: u32 = 20_000;
pub const DEFAULT_OPACITY: f32 = 0.85;
