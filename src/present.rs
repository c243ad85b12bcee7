use globe_core::{FrameBuffer, GlobeError, Presenter, RenderConfig};
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

use crate::constants::{FADE_EASING, INITIAL_OPACITY};
use crate::dom;

/// Copies finished frames into the canvas through its 2D context.
pub struct CanvasPresenter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPresenter {
    pub fn new(canvas: &web::HtmlCanvasElement, config: &RenderConfig) -> Result<Self, GlobeError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| GlobeError::ContextUnavailable(format!("{e:?}")))?
            .ok_or_else(|| GlobeError::ContextUnavailable("2d context unavailable".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| GlobeError::ContextUnavailable("unexpected context type".into()))?;
        let size = config.backing_size();
        dom::sync_canvas_backing_size(canvas, size, size);
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), GlobeError> {
        let (w, h) = (frame.width(), frame.height());
        dom::sync_canvas_backing_size(&self.canvas, w, h);
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(Clamped(frame.as_bytes()), w, h)
            .map_err(|e| GlobeError::Present(format!("{e:?}")))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| GlobeError::Present(format!("{e:?}")))
    }

    fn resize(&mut self, width: u32, height: u32) {
        dom::sync_canvas_backing_size(&self.canvas, width, height);
    }

    fn reveal(&mut self, duration_sec: f32) {
        dom::set_style(
            &self.canvas,
            "transition",
            &format!("opacity {duration_sec}s {FADE_EASING}"),
        );
        dom::set_style(&self.canvas, "opacity", "1");
    }
}

impl Drop for CanvasPresenter {
    fn drop(&mut self) {
        // Hidden again so a rebuilt globe fades in like the first one.
        dom::set_style(&self.canvas, "transition", "none");
        dom::set_style(&self.canvas, "opacity", INITIAL_OPACITY);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}
