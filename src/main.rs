use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use clap::Parser;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::command::{Command, apply};
use crate::config::{Config, ConfigError};
use crate::geometry::Point;
use crate::renderer::FrameBuffer;
use crate::world::World;

mod caster;
mod command;
mod config;
mod geometry;
mod input;
mod player;
mod projector;
mod renderer;
mod world;

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,

    // Full-window buffer: map pane on the left, view pane on the right
    frame: FrameBuffer,
    map_width: u32,
    map_height: u32,

    cursor: Point,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,
}

impl App {
    fn new(world: World, map_width: u32, map_height: u32) -> Self {
        Self {
            window: None,
            surface: None,
            world,
            frame: FrameBuffer::new(2 * map_width as usize, map_height as usize),
            map_width,
            map_height,
            cursor: Point::default(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
        }
    }

    /// Mutate, then ask for a redraw; casting and projection happen in the redraw.
    fn dispatch(&mut self, command: Command) {
        if let Err(e) = apply(command, &mut self.world) {
            tracing::warn!(error = %e, "command rejected");
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return; // Minimized window, skip drawing
        };
        if let Err(e) = surface.resize(dw, dh) {
            tracing::error!(error = %e, "failed to resize surface");
            return;
        }
        self.frame.resize(dw.get() as usize, dh.get() as usize);

        let map_width = self.map_width as f32;
        let view_width = (dw.get() as f32 - map_width).max(0.0);
        let height = dh.get() as f32;

        let hits = caster::cast(&self.world.player, self.world.walls.walls());
        let columns = projector::project(&hits, &self.world.player, view_width, height);
        tracing::debug!(
            rays = hits.len(),
            columns = columns.len(),
            "frame computed"
        );

        renderer::draw_scene(
            &mut self.frame,
            &self.world,
            &hits,
            &columns,
            map_width,
            view_width,
            height,
        );

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                tracing::error!(error = %e, "failed to map surface buffer");
                return;
            }
        };
        buf.copy_from_slice(self.frame.pixels());
        if let Err(e) = buf.present() {
            tracing::error!(error = %e, "failed to present frame");
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            tracing::debug!(fps = self.frame_counter as f32 / elapsed, "redraw rate");
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Wallcaster")
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(2 * self.map_width, self.map_height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(surface) => surface,
            Err(e) => {
                tracing::error!(error = %e, "failed to create softbuffer surface");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        tracing::info!(width = size.width, height = size.height, "window created");

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(command) = input::key_command(code) {
                    self.dispatch(command);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(command) = input::click_command(self.cursor, self.world.bounds) {
                    self.dispatch(command);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(id),

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    let world = config.build_world()?;
    tracing::info!(
        map_width = config.width,
        map_height = config.height,
        fov = config.fov,
        rays = config.rays,
        max_distance = world.player.max_distance,
        walls = world.walls.walls().len(),
        "starting"
    );

    let event_loop = EventLoop::new()?;

    // Redraw only in response to commands and window events
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(world, config.width, config.height);
    event_loop.run_app(&mut app)?;
    Ok(())
}
