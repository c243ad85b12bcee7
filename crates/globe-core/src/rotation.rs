//! Rotation state: constant auto-rotation blended with a spring-damped drag angle.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationParams {
    pub auto_rate_per_sec: f64,
    /// Pixels of drag per radian (the sensitivity divisor K).
    pub drag_px_per_radian: f64,
    pub max_drag_angle: f64,
    pub spring_omega: f64,
    pub spring_damping_ratio: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            auto_rate_per_sec: AUTO_ROTATE_RATE_PER_SEC,
            drag_px_per_radian: DRAG_PX_PER_RADIAN,
            max_drag_angle: MAX_DRAG_ANGLE,
            spring_omega: SPRING_OMEGA,
            spring_damping_ratio: SPRING_DAMPING_RATIO,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub auto_angle: f64,
    pub drag_angle: f64,
    pub drag_velocity: f64,
    pub is_dragging: bool,
}

impl RotationState {
    /// The only angle the renderer ever sees.
    #[inline]
    pub fn composite(&self) -> f64 {
        self.auto_angle + self.drag_angle
    }
}

#[derive(Clone, Debug)]
pub struct RotationController {
    params: RotationParams,
    state: RotationState,
}

impl RotationController {
    pub fn new(params: RotationParams) -> Self {
        Self {
            params,
            state: RotationState::default(),
        }
    }

    pub fn params(&self) -> &RotationParams {
        &self.params
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn composite_angle(&self) -> f64 {
        self.state.composite()
    }

    /// Current drag angle expressed as pointer travel, used to resume a grab
    /// mid-glide without a jump.
    pub fn drag_offset_px(&self) -> f64 {
        self.state.drag_angle * self.params.drag_px_per_radian
    }

    /// Map a pointer offset to a bounded drag angle.
    pub fn drag_angle_for(&self, delta_px: f64) -> f64 {
        if !delta_px.is_finite() || self.params.drag_px_per_radian <= 0.0 {
            return 0.0;
        }
        let limit = self.params.max_drag_angle.abs();
        (delta_px / self.params.drag_px_per_radian).clamp(-limit, limit)
    }

    /// Advance one frame and return the composite angle.
    ///
    /// `drag_delta` is `Some(offset_px)` while a drag session is active.
    pub fn advance(&mut self, dt_sec: f64, drag_delta: Option<f64>) -> f64 {
        let dt = sanitize_dt(dt_sec);
        match drag_delta {
            Some(delta) => {
                self.state.is_dragging = true;
                self.state.drag_angle = self.drag_angle_for(delta);
                self.state.drag_velocity = 0.0;
            }
            None => {
                if self.state.is_dragging {
                    // Release: the frozen angle seeds the spring from rest.
                    self.state.is_dragging = false;
                    self.state.drag_velocity = 0.0;
                }
                self.state.auto_angle += self.params.auto_rate_per_sec * dt;
                self.step_spring(dt);
            }
        }
        self.state.composite()
    }

    pub fn is_settled(&self) -> bool {
        !self.state.is_dragging && self.state.drag_angle == 0.0 && self.state.drag_velocity == 0.0
    }

    fn step_spring(&mut self, dt: f64) {
        if dt <= 0.0 || (self.state.drag_angle == 0.0 && self.state.drag_velocity == 0.0) {
            return;
        }
        let steps = (dt / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / steps as f64;
        let omega = self.params.spring_omega;
        let k = omega * omega;
        let c = 2.0 * omega * self.params.spring_damping_ratio;
        let mut x = self.state.drag_angle;
        let mut v = self.state.drag_velocity;
        for _ in 0..steps {
            // semi-implicit Euler toward rest at 0
            v += (-k * x - c * v) * h;
            x += v * h;
        }
        if x.abs() < SPRING_REST_EPSILON && v.abs() < SPRING_REST_EPSILON {
            x = 0.0;
            v = 0.0;
        }
        self.state.drag_angle = x;
        self.state.drag_velocity = v;
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationParams::default())
    }
}

/// Non-finite or negative steps count as zero; long stalls are capped.
#[inline]
pub fn sanitize_dt(dt_sec: f64) -> f64 {
    if dt_sec.is_finite() && dt_sec > 0.0 {
        dt_sec.min(MAX_FRAME_DT_SEC)
    } else {
        0.0
    }
}
