#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;

use globe_core::{GlobeError, GlobeOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod present;

use host::Globe;

thread_local! {
    // Globe mounted by `start()` from the page markup
    static AUTO_GLOBE: RefCell<Option<GlobeHandle>> = const { RefCell::new(None) };
}

fn to_js(e: GlobeError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// JS-facing handle for one mounted globe.
#[wasm_bindgen]
pub struct GlobeHandle {
    globe: Globe,
}

#[wasm_bindgen]
impl GlobeHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, size: u32, dark_mode: bool) -> Result<GlobeHandle, JsValue> {
        let options = GlobeOptions::new(size, dark_mode).map_err(to_js)?;
        let canvas = dom::canvas_by_id(canvas_id).map_err(to_js)?;
        let globe = host::mount_globe(canvas, options).map_err(to_js)?;
        Ok(GlobeHandle { globe })
    }

    /// Rebuild with new options; rotation restarts from zero.
    pub fn set_options(&self, size: u32, dark_mode: bool) -> Result<(), JsValue> {
        let options = GlobeOptions::new(size, dark_mode).map_err(to_js)?;
        let mut g = self
            .globe
            .try_borrow_mut()
            .map_err(|_| JsValue::from(js_sys::Error::new("globe is busy")))?;
        dom::apply_size(g.host().canvas(), options.size);
        g.set_options(options).map_err(to_js)
    }

    pub fn composite_angle(&self) -> f64 {
        self.globe
            .try_borrow()
            .map(|g| g.composite_angle())
            .unwrap_or_default()
    }

    pub fn destroy(&self) {
        match self.globe.try_borrow_mut() {
            Ok(mut g) => g.teardown(),
            Err(_) => log::warn!("[web] destroy while busy ignored"),
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(el) = document.get_element_by_id(constants::AUTO_CANVAS_ID) else {
        log::info!(
            "no #{} on the page; waiting for GlobeHandle",
            constants::AUTO_CANVAS_ID
        );
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let options = GlobeOptions::from_attrs(
        canvas.get_attribute(constants::DATA_SIZE_ATTR).as_deref(),
        canvas.get_attribute(constants::DATA_DARK_ATTR).as_deref(),
    )?;
    let globe = host::mount_globe(canvas, options)?;
    AUTO_GLOBE.with(|slot| *slot.borrow_mut() = Some(GlobeHandle { globe }));
    Ok(())
}
