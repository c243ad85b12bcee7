//! Per-frame motion: gesture tracking feeding the rotation controller, plus
//! the eased hover glow and the pulsing rings.

use crate::constants::*;
use crate::gesture::{Cursor, GestureTracker, PointerInput, SurfaceBounds};
use crate::raster::{FrameParams, RingPulse};
use crate::rotation::{sanitize_dt, RotationController, RotationParams, RotationState};

/// Glow ring intensity easing toward the idle or hovered level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverGlow {
    value: f32,
}

impl Default for HoverGlow {
    fn default() -> Self {
        Self {
            value: HOVER_GLOW_IDLE,
        }
    }
}

impl HoverGlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn step(&mut self, dt_sec: f32, hovered: bool) -> f32 {
        let target = if hovered {
            HOVER_GLOW_ACTIVE
        } else {
            HOVER_GLOW_IDLE
        };
        if dt_sec > 0.0 {
            // exponential approach, frame-rate independent
            let k = 1.0 - (-dt_sec / HOVER_GLOW_TAU_SEC).exp();
            self.value += (target - self.value) * k;
        }
        if (target - self.value).abs() < HOVER_GLOW_SNAP {
            self.value = target;
        }
        self.value
    }
}

/// Two rings breathing outward and fading on a shared period, the second
/// one starting later.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PulseRings {
    elapsed: f64,
}

impl PulseRings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step(&mut self, dt_sec: f64) -> [RingPulse; 2] {
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.elapsed += dt_sec;
        }
        // Keep the clock bounded; every ring is past its delay by then.
        let settled = PULSE_RING_DELAY_SEC[1] + PULSE_PERIOD_SEC;
        while self.elapsed >= settled {
            self.elapsed -= PULSE_PERIOD_SEC;
        }
        self.rings()
    }

    pub fn rings(&self) -> [RingPulse; 2] {
        [self.ring(0), self.ring(1)]
    }

    fn ring(&self, i: usize) -> RingPulse {
        let local = self.elapsed - PULSE_RING_DELAY_SEC[i];
        // rest -> peak -> rest, eased in and out on each half
        let u = if local <= 0.0 {
            0.0
        } else {
            let p = (local % PULSE_PERIOD_SEC) / PULSE_PERIOD_SEC;
            let tri = if p < 0.5 { 2.0 * p } else { 2.0 - 2.0 * p };
            (tri * tri * (3.0 - 2.0 * tri)) as f32
        };
        let scale = 1.0 + (PULSE_RING_PEAK_SCALE[i] - 1.0) * u;
        let (rest, peak) = PULSE_RING_OPACITY[i];
        let opacity = rest + (peak - rest) * u;
        RingPulse {
            radius_fraction: PULSE_RING_RADIUS_FRACTION[i] * scale,
            alpha: opacity * PULSE_RING_TINT[i],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Motion {
    tracker: GestureTracker,
    rotation: RotationController,
    hover: HoverGlow,
    pulse: PulseRings,
}

impl Motion {
    pub fn new(params: RotationParams) -> Self {
        Self {
            tracker: GestureTracker::new(),
            rotation: RotationController::new(params),
            hover: HoverGlow::new(),
            pulse: PulseRings::new(),
        }
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn rotation(&self) -> &RotationState {
        self.rotation.state()
    }

    pub fn controller(&self) -> &RotationController {
        &self.rotation
    }

    pub fn composite_angle(&self) -> f64 {
        self.rotation.composite_angle()
    }

    pub fn glow_strength(&self) -> f32 {
        self.hover.value()
    }

    pub fn pulse(&self) -> &PulseRings {
        &self.pulse
    }

    /// Route a pointer event to the tracker. Returns a cursor change, if any.
    pub fn pointer(&mut self, input: PointerInput, bounds: Option<SurfaceBounds>) -> Option<Cursor> {
        let resume = self.rotation.drag_offset_px();
        self.tracker.handle(input, bounds, resume)
    }

    /// Advance rotation, hover easing and the ring pulse by one frame.
    pub fn advance(&mut self, dt_sec: f64) -> FrameParams {
        let dt = sanitize_dt(dt_sec);
        let composite_angle = self.rotation.advance(dt, self.tracker.drag_delta());
        let glow_strength = self.hover.step(dt as f32, self.tracker.is_hovered());
        let rings = self.pulse.step(dt);
        FrameParams {
            composite_angle,
            glow_strength,
            rings,
        }
    }
}
