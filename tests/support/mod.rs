// Shared mock host for lifecycle tests. Counts every acquisition and release.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use globe_core::{
    Cursor, FrameBuffer, GlobeError, GlobeOptions, Host, Lifecycle, MarkerCatalog, Presenter,
    RenderConfig, SurfaceBounds, SurfaceMetrics,
};

pub const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Default)]
pub struct Counters {
    pub instances_created: usize,
    pub instances_released: usize,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub listeners_attached: usize,
    pub listeners_detached: usize,
    pub presents: usize,
    pub resizes: Vec<(u32, u32)>,
    pub reveals: Vec<f32>,
    pub cursors: Vec<Cursor>,
    pub last_present_size: Option<(u32, u32)>,
}

pub type Shared = Rc<RefCell<Counters>>;

pub struct MockPresenter {
    counters: Shared,
    fail_present: bool,
}

impl Presenter for MockPresenter {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), GlobeError> {
        if self.fail_present {
            return Err(GlobeError::Present("device lost".into()));
        }
        let mut c = self.counters.borrow_mut();
        c.presents += 1;
        c.last_present_size = Some((frame.width(), frame.height()));
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.counters.borrow_mut().resizes.push((width, height));
    }

    fn reveal(&mut self, duration_sec: f32) {
        self.counters.borrow_mut().reveals.push(duration_sec);
    }
}

impl Drop for MockPresenter {
    fn drop(&mut self) {
        self.counters.borrow_mut().instances_released += 1;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockFrame(pub u32);

pub struct MockListeners;

pub struct MockHost {
    pub counters: Shared,
    pub metrics: Option<SurfaceMetrics>,
    pub bounds: Option<SurfaceBounds>,
    pub fail_context: bool,
    pub fail_present: bool,
    next_frame: u32,
}

impl MockHost {
    /// Square surface of `css` CSS pixels at device pixel ratio `dpr`.
    pub fn new(css: f64, dpr: f64) -> Self {
        Self {
            counters: Shared::default(),
            metrics: Some(SurfaceMetrics::new(css, css, dpr)),
            bounds: Some(SurfaceBounds::new(0.0, 0.0, css, css)),
            fail_context: false,
            fail_present: false,
            next_frame: 0,
        }
    }

    /// A surface that has not been laid out yet.
    pub fn not_laid_out() -> Self {
        Self {
            metrics: Some(SurfaceMetrics::new(0.0, 0.0, 1.0)),
            bounds: None,
            ..Self::new(0.0, 1.0)
        }
    }

    pub fn counters(&self) -> Shared {
        Rc::clone(&self.counters)
    }

    pub fn set_size(&mut self, css: f64, dpr: f64) {
        self.metrics = Some(SurfaceMetrics::new(css, css, dpr));
        self.bounds = Some(SurfaceBounds::new(0.0, 0.0, css, css));
    }
}

impl Host for MockHost {
    type Instance = MockPresenter;
    type Frame = MockFrame;
    type Listeners = MockListeners;

    fn measure(&self) -> Option<SurfaceMetrics> {
        self.metrics
    }

    fn surface_bounds(&self) -> Option<SurfaceBounds> {
        self.bounds
    }

    fn create_instance(&mut self, _config: &RenderConfig) -> Result<MockPresenter, GlobeError> {
        if self.fail_context {
            return Err(GlobeError::ContextUnavailable("no context".into()));
        }
        self.counters.borrow_mut().instances_created += 1;
        Ok(MockPresenter {
            counters: Rc::clone(&self.counters),
            fail_present: self.fail_present,
        })
    }

    fn attach_listeners(&mut self) -> Result<MockListeners, GlobeError> {
        self.counters.borrow_mut().listeners_attached += 1;
        Ok(MockListeners)
    }

    fn detach_listeners(&mut self, _listeners: MockListeners) {
        self.counters.borrow_mut().listeners_detached += 1;
    }

    fn request_frame(&mut self) -> Result<MockFrame, GlobeError> {
        self.next_frame += 1;
        self.counters.borrow_mut().frames_requested += 1;
        Ok(MockFrame(self.next_frame))
    }

    fn cancel_frame(&mut self, _frame: MockFrame) {
        self.counters.borrow_mut().frames_cancelled += 1;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.counters.borrow_mut().cursors.push(cursor);
    }
}

/// Small surface keeps software rendering cheap in debug test builds.
pub fn small_host() -> MockHost {
    MockHost::new(64.0, 1.0)
}

pub fn globe_with(host: MockHost, options: GlobeOptions) -> Lifecycle<MockHost> {
    Lifecycle::new(host, options, MarkerCatalog::carbon_hubs())
}

pub fn mounted(host: MockHost) -> Lifecycle<MockHost> {
    let mut globe = globe_with(host, GlobeOptions::new(64, true).unwrap());
    globe.mount().unwrap();
    globe
}

/// Drive `n` frames at 60 Hz, advancing `clock_ms`.
pub fn run_frames(globe: &mut Lifecycle<MockHost>, clock_ms: &mut f64, n: usize) {
    for _ in 0..n {
        *clock_ms += FRAME_MS;
        globe.on_frame(*clock_ms).unwrap();
    }
}
