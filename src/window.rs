//! The host loop: a winit application that owns the GPU context and the [`GameManager`].
//!
//! Redraws are paced by [`ControlFlow::WaitUntil`] at the configured frame rate. Window events
//! go to the GUI first; Escape closes the window unless the GUI is using the keyboard.

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{context::Context, manager::GameManager, settings::Settings};

struct Running {
    ctx: Context,
    manager: GameManager,
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: Settings,
    running: Option<Running>,
    frame_interval: Duration,
    last_time: Instant,
    next_frame: Instant,
}

impl App {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        let now = Instant::now();
        Ok(Self {
            async_runtime,
            frame_interval: settings.frame_interval(),
            settings,
            running: None,
            last_time: now,
            next_frame: now,
        })
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let ctx = self
            .async_runtime
            .block_on(Context::new(window, &self.settings))?;
        let manager = GameManager::new(&ctx, &self.settings, &self.async_runtime);
        Ok(Running { ctx, manager })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.ctx.window().request_redraw();
                self.running = Some(running);
                self.last_time = Instant::now();
            }
            Err(err) => {
                log::error!("Cannot start: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(Running { ctx, manager }) = &mut self.running else {
            return;
        };

        let consumed = manager.window_event(ctx, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !consumed => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if ctx.resize(size.width, size.height) {
                    manager.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                manager.update(ctx, &self.async_runtime, dt);
                match manager.render(ctx, dt) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = ctx.window().inner_size();
                        ctx.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Unable to render {e}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &self.running else {
            return;
        };
        let now = Instant::now();
        if now >= self.next_frame {
            running.ctx.window().request_redraw();
            self.next_frame = now + self.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Installs `env_logger` with an `info` default. Does nothing when a logger is already set.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Opens the window and runs until it is closed.
pub fn run(settings: Settings) -> anyhow::Result<()> {
    init_logger();
    log::info!("Starting `{}` with assets from {}", settings.title, settings.asset_root.display());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
