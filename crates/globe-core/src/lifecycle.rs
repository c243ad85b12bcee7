//! Render loop and resource lifecycle, independent of the hosting platform.
//!
//! A `Lifecycle` owns everything that lives between mount and teardown: the
//! listener registration, the pending frame request, the presenter and the
//! motion state. Hosts only forward events and timestamps into it.

use crate::config::{GlobeOptions, RenderConfig, SurfaceMetrics};
use crate::constants::{FADE_IN_SEC, REFERENCE_FRAME_SEC};
use crate::error::GlobeError;
use crate::gesture::{Cursor, PointerInput, SurfaceBounds};
use crate::markers::MarkerCatalog;
use crate::motion::Motion;
use crate::raster::{FrameBuffer, FrameStats, Rasterizer};
use crate::rotation::{RotationParams, RotationState};
use crate::world_map::LandMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    /// Listeners attached, waiting for a non-zero layout.
    Initializing,
    Running,
    TearingDown,
}

/// Puts finished frames on screen.
pub trait Presenter {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), GlobeError>;
    fn resize(&mut self, width: u32, height: u32);
    /// Start the one-time fade-in.
    fn reveal(&mut self, duration_sec: f32);
}

/// Platform services the lifecycle drives.
///
/// Handles returned by `create_instance`, `attach_listeners` and
/// `request_frame` are handed back exactly once (dropped, detached or
/// cancelled) by teardown.
pub trait Host {
    type Instance: Presenter;
    type Frame;
    type Listeners;

    fn measure(&self) -> Option<SurfaceMetrics>;
    fn surface_bounds(&self) -> Option<SurfaceBounds>;
    fn create_instance(&mut self, config: &RenderConfig) -> Result<Self::Instance, GlobeError>;
    fn attach_listeners(&mut self) -> Result<Self::Listeners, GlobeError>;
    fn detach_listeners(&mut self, listeners: Self::Listeners);
    fn request_frame(&mut self) -> Result<Self::Frame, GlobeError>;
    fn cancel_frame(&mut self, frame: Self::Frame);
    fn set_cursor(&mut self, cursor: Cursor);
}

struct Instance<P> {
    presenter: P,
    rasterizer: Rasterizer,
    buffer: FrameBuffer,
    revealed: bool,
    last_frame_ms: Option<f64>,
    frames: u64,
}

pub struct Lifecycle<H: Host> {
    host: H,
    options: GlobeOptions,
    markers: MarkerCatalog,
    params: RotationParams,
    phase: Phase,
    config: RenderConfig,
    motion: Motion,
    listeners: Option<H::Listeners>,
    pending_frame: Option<H::Frame>,
    instance: Option<Instance<H::Instance>>,
    last_stats: FrameStats,
}

impl<H: Host> Lifecycle<H> {
    pub fn new(host: H, options: GlobeOptions, markers: MarkerCatalog) -> Self {
        Self {
            host,
            options,
            markers,
            params: RotationParams::default(),
            phase: Phase::Unmounted,
            config: RenderConfig::from_options(&options),
            motion: Motion::default(),
            listeners: None,
            pending_frame: None,
            instance: None,
            last_stats: FrameStats::default(),
        }
    }

    pub fn with_rotation_params(mut self, params: RotationParams) -> Self {
        self.params = params;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &GlobeOptions {
        &self.options
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn markers(&self) -> &MarkerCatalog {
        &self.markers
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn rotation(&self) -> &RotationState {
        self.motion.rotation()
    }

    pub fn composite_angle(&self) -> f64 {
        self.motion.composite_angle()
    }

    /// Last rasterized frame, while an instance exists.
    pub fn frame(&self) -> Option<&FrameBuffer> {
        self.instance.as_ref().map(|i| &i.buffer)
    }

    pub fn frames_presented(&self) -> u64 {
        self.instance.as_ref().map_or(0, |i| i.frames)
    }

    pub fn is_revealed(&self) -> bool {
        self.instance.as_ref().is_some_and(|i| i.revealed)
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Attach listeners and start rendering once the surface has a size.
    pub fn mount(&mut self) -> Result<(), GlobeError> {
        if self.phase != Phase::Unmounted {
            return Ok(());
        }
        self.options.validate()?;
        self.config = RenderConfig::from_options(&self.options);
        self.motion = Motion::new(self.params);
        self.last_stats = FrameStats::default();

        let listeners = self.host.attach_listeners()?;
        self.listeners = Some(listeners);
        self.phase = Phase::Initializing;
        log::info!(
            "[globe] mounted (size {}, dark {})",
            self.options.size,
            self.options.dark_mode
        );
        self.try_instantiate()
    }

    /// Layout change: instantiate a deferred globe or re-target a running one.
    pub fn on_resize(&mut self) -> Result<(), GlobeError> {
        match self.phase {
            Phase::Initializing => self.try_instantiate(),
            Phase::Running => {
                let Some(metrics) = self.host.measure().filter(SurfaceMetrics::is_laid_out) else {
                    log::debug!("[globe] resize to zero size ignored");
                    return Ok(());
                };
                let config = self.config.with_metrics(&metrics);
                if config == self.config {
                    return Ok(());
                }
                self.config = config;
                let size = self.config.backing_size();
                if let Some(inst) = self.instance.as_mut() {
                    inst.rasterizer.set_config(self.config.clone(), LandMask::world());
                    inst.presenter.resize(size, size);
                    inst.buffer.resize(size, size);
                }
                log::debug!(
                    "[globe] resized to {} css px @ {}x ({} px backing)",
                    self.config.pixel_size,
                    self.config.device_pixel_ratio,
                    size
                );
                Ok(())
            }
            Phase::Unmounted | Phase::TearingDown => Ok(()),
        }
    }

    /// One animation frame. `now_ms` is a monotonic timestamp in milliseconds.
    pub fn on_frame(&mut self, now_ms: f64) -> Result<(), GlobeError> {
        if self.phase != Phase::Running {
            return Ok(());
        }
        // The request that fired is spent.
        self.pending_frame = None;
        match self.render_frame(now_ms) {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    /// Forward a pointer event. Returns the cursor change applied, if any.
    pub fn pointer(&mut self, input: PointerInput) -> Option<Cursor> {
        if !matches!(self.phase, Phase::Initializing | Phase::Running) {
            return None;
        }
        let bounds = self.host.surface_bounds();
        let cursor = self.motion.pointer(input, bounds);
        if let Some(c) = cursor {
            self.host.set_cursor(c);
        }
        cursor
    }

    /// Apply new options; a change rebuilds the globe from scratch.
    pub fn set_options(&mut self, options: GlobeOptions) -> Result<(), GlobeError> {
        options.validate()?;
        if options == self.options {
            return Ok(());
        }
        self.options = options;
        if self.phase == Phase::Unmounted {
            self.config = RenderConfig::from_options(&options);
            return Ok(());
        }
        log::info!("[globe] options changed, reconstructing");
        self.teardown();
        self.mount()
    }

    /// Release everything acquired since mount. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Unmounted
            && self.pending_frame.is_none()
            && self.listeners.is_none()
            && self.instance.is_none()
        {
            return;
        }
        self.phase = Phase::TearingDown;
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        if let Some(listeners) = self.listeners.take() {
            self.host.detach_listeners(listeners);
        }
        if let Some(inst) = self.instance.take() {
            log::debug!("[globe] releasing instance after {} frames", inst.frames);
            drop(inst);
        }
        self.phase = Phase::Unmounted;
        log::info!("[globe] torn down");
    }

    fn try_instantiate(&mut self) -> Result<(), GlobeError> {
        let Some(metrics) = self.host.measure().filter(SurfaceMetrics::is_laid_out) else {
            log::debug!("[globe] surface has no size yet, deferring");
            return Ok(());
        };
        match self.instantiate(&metrics) {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    fn instantiate(&mut self, metrics: &SurfaceMetrics) -> Result<(), GlobeError> {
        self.config = self.config.with_metrics(metrics);
        let presenter = self.host.create_instance(&self.config)?;
        let size = self.config.backing_size();
        self.instance = Some(Instance {
            presenter,
            rasterizer: Rasterizer::new(self.config.clone(), LandMask::world()),
            buffer: FrameBuffer::new(size, size),
            revealed: false,
            last_frame_ms: None,
            frames: 0,
        });
        self.phase = Phase::Running;
        log::info!("[globe] running at {size}x{size} px");
        self.schedule()
    }

    fn render_frame(&mut self, now_ms: f64) -> Result<(), GlobeError> {
        let Some(inst) = self.instance.as_mut() else {
            return Ok(());
        };
        let dt = match inst.last_frame_ms {
            Some(prev) => (now_ms - prev) / 1000.0,
            None => REFERENCE_FRAME_SEC,
        };
        inst.last_frame_ms = Some(now_ms);

        let params = self.motion.advance(dt);
        self.last_stats = inst
            .rasterizer
            .render(self.markers.as_slice(), &params, &mut inst.buffer);
        inst.presenter.present(&inst.buffer)?;
        inst.frames += 1;
        if !inst.revealed {
            inst.revealed = true;
            inst.presenter.reveal(FADE_IN_SEC);
        }
        self.schedule()
    }

    fn schedule(&mut self) -> Result<(), GlobeError> {
        let frame = self.host.request_frame()?;
        if let Some(stale) = self.pending_frame.replace(frame) {
            self.host.cancel_frame(stale);
        }
        Ok(())
    }

    fn fail(&mut self, error: GlobeError) -> Result<(), GlobeError> {
        log::error!("[globe] {error}; tearing down");
        self.teardown();
        Err(error)
    }
}

impl<H: Host> Drop for Lifecycle<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
