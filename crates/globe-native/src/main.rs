mod presenter;

use std::sync::Arc;
use std::time::Instant;

use globe_core::{
    Cursor, GlobeError, GlobeOptions, Host, Lifecycle, MarkerCatalog, PointerInput, RenderConfig,
    SurfaceBounds, SurfaceMetrics,
};
use presenter::GpuPresenter;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{CursorIcon, Window, WindowBuilder},
};

/// Proof of registration; pointer events are forwarded only while one is live.
struct InputRegistration;

struct NativeHost {
    window: Arc<Window>,
    listening: bool,
}

impl NativeHost {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            listening: false,
        }
    }

    fn logical_size(&self) -> (f64, f64) {
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        (size.width as f64 / scale, size.height as f64 / scale)
    }
}

impl Host for NativeHost {
    type Instance = GpuPresenter;
    type Frame = ();
    type Listeners = InputRegistration;

    fn measure(&self) -> Option<SurfaceMetrics> {
        let (w, h) = self.logical_size();
        Some(SurfaceMetrics::new(w, h, self.window.scale_factor()))
    }

    fn surface_bounds(&self) -> Option<SurfaceBounds> {
        let (w, h) = self.logical_size();
        Some(SurfaceBounds::new(0.0, 0.0, w, h))
    }

    fn create_instance(&mut self, config: &RenderConfig) -> Result<GpuPresenter, GlobeError> {
        pollster::block_on(GpuPresenter::new(Arc::clone(&self.window), config))
            .map_err(|e| GlobeError::ContextUnavailable(format!("{e:#}")))
    }

    fn attach_listeners(&mut self) -> Result<InputRegistration, GlobeError> {
        self.listening = true;
        Ok(InputRegistration)
    }

    fn detach_listeners(&mut self, _listeners: InputRegistration) {
        self.listening = false;
    }

    fn request_frame(&mut self) -> Result<(), GlobeError> {
        self.window.request_redraw();
        Ok(())
    }

    fn cancel_frame(&mut self, _frame: ()) {
        // A queued redraw is ignored by the lifecycle once it is not running.
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.window.set_cursor_icon(match cursor {
            Cursor::Grab => CursorIcon::Grab,
            Cursor::Grabbing => CursorIcon::Grabbing,
        });
    }
}

/// `globe-native [size] [dark|light]`
fn options_from_args() -> anyhow::Result<GlobeOptions> {
    let mut args = std::env::args().skip(1);
    let size = args.next();
    let dark = args.next();
    Ok(GlobeOptions::from_attrs(size.as_deref(), dark.as_deref())?)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = options_from_args()?;
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Globe (native)")
            .with_inner_size(LogicalSize::new(options.size as f64, options.size as f64))
            .build(&event_loop)?,
    );

    let mut globe = Lifecycle::new(
        NativeHost::new(Arc::clone(&window)),
        options,
        MarkerCatalog::carbon_hubs(),
    );
    globe.mount()?;

    let start = Instant::now();
    let mut cursor_pos = PhysicalPosition::new(0.0, 0.0);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        let scale = window.scale_factor();
        let forward = globe.host().listening;
        let result = match event {
            WindowEvent::CloseRequested => {
                globe.teardown();
                elwt.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => {
                    globe.teardown();
                    elwt.exit();
                    Ok(())
                }
                Key::Character(c) if c.eq_ignore_ascii_case("d") => {
                    let mut next = *globe.options();
                    next.dark_mode = !next.dark_mode;
                    globe.set_options(next)
                }
                _ => Ok(()),
            },
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => globe.on_resize(),
            WindowEvent::CursorMoved { position, .. } => {
                cursor_pos = position;
                if forward {
                    let p = position.to_logical::<f64>(scale);
                    globe.pointer(PointerInput::Move { x: p.x, y: p.y });
                }
                Ok(())
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } if forward => {
                let p = cursor_pos.to_logical::<f64>(scale);
                globe.pointer(match state {
                    ElementState::Pressed => PointerInput::Down { x: p.x, y: p.y },
                    ElementState::Released => PointerInput::Up,
                });
                Ok(())
            }
            WindowEvent::CursorLeft { .. } if forward => {
                globe.pointer(PointerInput::Leave);
                Ok(())
            }
            WindowEvent::CursorEntered { .. } if forward => {
                globe.pointer(PointerInput::Enter);
                Ok(())
            }
            WindowEvent::RedrawRequested => {
                globe.on_frame(start.elapsed().as_secs_f64() * 1000.0)
            }
            _ => Ok(()),
        };
        if let Err(e) = result {
            log::error!("[native] {e}");
            elwt.exit();
        }
    })?;
    Ok(())
}
