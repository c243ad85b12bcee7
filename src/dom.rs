use globe_core::{GlobeError, SurfaceBounds, SurfaceMetrics};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::INITIAL_OPACITY;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> Result<web::HtmlCanvasElement, GlobeError> {
    let document = window_document()
        .ok_or_else(|| GlobeError::ContextUnavailable("no document".into()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| GlobeError::ContextUnavailable(format!("missing #{id}")))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| GlobeError::ContextUnavailable(format!("#{id} is not a canvas")))
}

#[inline]
pub fn set_style(canvas: &web::HtmlCanvasElement, property: &str, value: &str) {
    if let Err(e) = canvas.style().set_property(property, value) {
        log::warn!("[dom] failed to set {property}: {e:?}");
    }
}

/// CSS box of the canvas: a `size` px square that may shrink with its container.
pub fn apply_size(canvas: &web::HtmlCanvasElement, size: u32) {
    let px = format!("{size}px");
    set_style(canvas, "width", &px);
    set_style(canvas, "height", &px);
}

pub fn apply_initial_style(canvas: &web::HtmlCanvasElement, size: u32) {
    apply_size(canvas, size);
    set_style(canvas, "max-width", "100%");
    set_style(canvas, "aspect-ratio", "1");
    set_style(canvas, "contain", "layout paint size");
    set_style(canvas, "touch-action", "none");
    set_style(canvas, "cursor", globe_core::Cursor::Grab.css_name());
    set_style(canvas, "opacity", INITIAL_OPACITY);
}

pub fn measure_canvas(canvas: &web::HtmlCanvasElement) -> Option<SurfaceMetrics> {
    let window = web::window()?;
    let rect = canvas.get_bounding_client_rect();
    Some(SurfaceMetrics::new(
        rect.width(),
        rect.height(),
        window.device_pixel_ratio(),
    ))
}

pub fn canvas_bounds(canvas: &web::HtmlCanvasElement) -> Option<SurfaceBounds> {
    let rect = canvas.get_bounding_client_rect();
    let bounds = SurfaceBounds::new(rect.left(), rect.top(), rect.width(), rect.height());
    (!bounds.is_empty()).then_some(bounds)
}

/// Match the canvas backing store to `width` x `height` device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    if canvas.width() != width {
        canvas.set_width(width.max(1));
    }
    if canvas.height() != height {
        canvas.set_height(height.max(1));
    }
}
