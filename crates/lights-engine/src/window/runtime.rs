use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

use super::translate::translate_event;

/// Window settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Inner size in logical pixels.
    pub size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lights".to_string(),
            size: LogicalSize::new(700.0, 700.0),
            resizable: true,
        }
    }
}

/// Runs the event loop until the app exits or the window closes.
pub struct Runtime;

impl Runtime {
    /// Blocks until shutdown. Window or GPU setup failures are returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit event loop")?;
        let mut state = RuntimeState {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window, the surface bound to it and the per-window frame state.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    entry: Option<WindowEntry>,
    /// First fatal setup error, reported by [`Runtime::run`].
    failure: Option<anyhow::Error>,
}

impl<A: App> RuntimeState<A> {
    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        log::info!(
            "window {:?} opened at {}x{}",
            self.config.title,
            self.config.size.width,
            self.config.size.height
        );

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        // Surface and device drop before the window they borrow.
        self.entry = None;
        event_loop.exit();
    }

    /// Runs one frame: tick the clock, hand the app its context, clear the
    /// frame's input edges.
    fn redraw(&mut self) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        })
    }
}

impl<A: App> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.failure = Some(err);
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The game redraws continuously; vsync paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_event(fields.window, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match event {
            WindowEvent::CloseRequested => {
                if self.app.on_close_requested() == AppControl::Exit {
                    log::info!("window closed");
                    self.shut_down(event_loop);
                }
            }

            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    log::info!("exit requested");
                    self.shut_down(event_loop);
                }
            }

            _ => {}
        }
    }
}
