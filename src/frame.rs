use globe_core::GlobeError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::host::{with_globe, WeakGlobe};

/// The `requestAnimationFrame` callback. Created once per globe and kept for
/// the globe's whole lifetime, so a frame in flight never outlives it.
pub struct FrameLoop {
    tick: Closure<dyn FnMut(f64)>,
}

impl FrameLoop {
    pub fn new(globe: WeakGlobe) -> Self {
        let tick = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            with_globe(&globe, |g| {
                if let Err(e) = g.on_frame(timestamp_ms) {
                    log::error!("[frame] render loop stopped: {e}");
                }
            });
        }) as Box<dyn FnMut(f64)>);
        Self { tick }
    }

    pub fn request(&self) -> Result<i32, GlobeError> {
        let window = web::window().ok_or_else(|| GlobeError::Scheduling("no window".into()))?;
        window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .map_err(|e| GlobeError::Scheduling(format!("{e:?}")))
    }

    pub fn cancel(&self, handle: i32) {
        if let Some(window) = web::window() {
            if let Err(e) = window.cancel_animation_frame(handle) {
                log::warn!("[frame] cancel failed: {e:?}");
            }
        }
    }
}
