use std::cell::RefCell;
use std::rc::{Rc, Weak};

use globe_core::{
    Cursor, GlobeError, GlobeOptions, Host, Lifecycle, MarkerCatalog, RenderConfig, SurfaceBounds,
    SurfaceMetrics,
};
use wasm_bindgen::closure::Closure;
use web_sys as web;

use crate::dom;
use crate::events::{self, pointer::PointerKind, EventClosure, ListenerSet};
use crate::frame::FrameLoop;
use crate::present::CanvasPresenter;

pub type Globe = Rc<RefCell<Lifecycle<WebHost>>>;
pub type WeakGlobe = Weak<RefCell<Lifecycle<WebHost>>>;

/// Run `f` against the globe if it is still alive and not already borrowed.
pub fn with_globe(globe: &WeakGlobe, f: impl FnOnce(&mut Lifecycle<WebHost>)) {
    let Some(globe) = globe.upgrade() else {
        return;
    };
    let Ok(mut g) = globe.try_borrow_mut() else {
        log::debug!("[host] globe busy, event dropped");
        return;
    };
    f(&mut g);
}

pub struct WebHost {
    canvas: web::HtmlCanvasElement,
    globe: WeakGlobe,
    frames: FrameLoop,
    // Detached listener closures; a callback may still be on the stack.
    retired: Vec<EventClosure>,
}

impl WebHost {
    fn new(canvas: web::HtmlCanvasElement, globe: WeakGlobe) -> Self {
        Self {
            canvas,
            frames: FrameLoop::new(globe.clone()),
            globe,
            retired: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    fn release_retired(&mut self) {
        if !self.retired.is_empty() {
            log::debug!("[host] dropping {} retired listeners", self.retired.len());
            self.retired.clear();
        }
    }

    // No pointer capture: leaving the canvas has to end a drag.
    fn pointer_closure(&self, kind: PointerKind) -> EventClosure {
        let globe = self.globe.clone();
        Closure::wrap(Box::new(move |ev: web::Event| {
            let Some(input) = kind.input(&ev) else {
                return;
            };
            if kind == PointerKind::Down {
                // no text selection or native image drag
                ev.prevent_default();
            }
            with_globe(&globe, |g| {
                g.pointer(input);
            });
        }) as Box<dyn FnMut(web::Event)>)
    }

    fn resize_closure(&self) -> EventClosure {
        let globe = self.globe.clone();
        Closure::wrap(Box::new(move |_ev: web::Event| {
            with_globe(&globe, |g| {
                if let Err(e) = g.on_resize() {
                    log::error!("[host] resize failed: {e}");
                }
            });
        }) as Box<dyn FnMut(web::Event)>)
    }

    fn attach_all(&self, set: &mut ListenerSet) -> Result<(), GlobeError> {
        let canvas_target: &web::EventTarget = self.canvas.as_ref();
        for kind in PointerKind::ALL {
            set.push(events::listen(
                canvas_target,
                kind.event_name(),
                self.pointer_closure(kind),
            )?);
        }
        let window = web::window().ok_or_else(|| GlobeError::Listener("no window".into()))?;
        let window_target: &web::EventTarget = window.as_ref();
        set.push(events::listen(window_target, "resize", self.resize_closure())?);
        Ok(())
    }
}

impl Host for WebHost {
    type Instance = CanvasPresenter;
    type Frame = i32;
    type Listeners = ListenerSet;

    fn measure(&self) -> Option<SurfaceMetrics> {
        dom::measure_canvas(&self.canvas)
    }

    fn surface_bounds(&self) -> Option<SurfaceBounds> {
        dom::canvas_bounds(&self.canvas)
    }

    fn create_instance(&mut self, config: &RenderConfig) -> Result<CanvasPresenter, GlobeError> {
        CanvasPresenter::new(&self.canvas, config)
    }

    fn attach_listeners(&mut self) -> Result<ListenerSet, GlobeError> {
        // Mounting never runs inside one of our listener callbacks, so the
        // closures retired by the previous teardown are finished.
        self.release_retired();
        let mut set = ListenerSet::new();
        if let Err(e) = self.attach_all(&mut set) {
            self.detach_listeners(set);
            return Err(e);
        }
        Ok(set)
    }

    fn detach_listeners(&mut self, listeners: ListenerSet) {
        self.retired
            .extend(listeners.into_iter().map(events::Listener::detach));
    }

    fn request_frame(&mut self) -> Result<i32, GlobeError> {
        self.frames.request()
    }

    fn cancel_frame(&mut self, frame: i32) {
        self.frames.cancel(frame);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        dom::set_style(&self.canvas, "cursor", cursor.css_name());
    }
}

/// Style the canvas, build the globe around it and mount it.
pub fn mount_globe(
    canvas: web::HtmlCanvasElement,
    options: GlobeOptions,
) -> Result<Globe, GlobeError> {
    options.validate()?;
    dom::apply_initial_style(&canvas, options.size);
    let globe: Globe = Rc::new_cyclic(|weak: &WeakGlobe| {
        RefCell::new(Lifecycle::new(
            WebHost::new(canvas, weak.clone()),
            options,
            MarkerCatalog::carbon_hubs(),
        ))
    });
    globe.borrow_mut().mount()?;
    Ok(globe)
}
