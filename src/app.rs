use glutin::config::{Config as GlutinConfig, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::PBError;
use gl_wrapper::renderer::GlRenderer;

use crate::color::Color;
use crate::config::Config;

/// Something drawn once per frame after the screen is cleared.
pub trait Scene {
    fn draw(&mut self, renderer: &mut GlRenderer, elapsed: Duration);
}

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    renderer: GlRenderer,
    clear_color: Color,
}

impl App {
    /// Opens the window and makes an OpenGL 3.3 context current on this thread.
    pub fn new(config: &Config, title: &str) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                config.window.width,
                config.window.height,
            )))
            .with_maximized(config.window.maximized)
            .with_title(title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        // glutin-winit returns an error from `find_configs` when the display
        // has no matching config, so the picker always sees at least one
        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                most_samples(configs, |c| c.num_samples())
                    .expect("display offered no GL configs")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window was created".into()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if let Err(e) = gl_window
            .surface
            .set_swap_interval(&gl_context, swap_interval(config.vsync))
        {
            log::warn!("Could not set swap interval: {e}");
        }

        let renderer = GlRenderer::new();

        log::info!(
            "OpenGL {} on {}",
            renderer.gl_string(gl::VERSION).unwrap_or_default(),
            renderer.gl_string(gl::RENDERER).unwrap_or_default()
        );

        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        renderer.resize(width, height);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            renderer,
            clear_color: config.clear_color,
        })
    }

    /// Runs the render loop until the window is closed or Escape is released.
    pub fn run<S: Scene + 'static>(self, scene: S) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            mut renderer,
            clear_color,
        } = self;

        let mut scene = Some(scene);
        let start = Instant::now();

        event_loop.run(move |event, _window_target, control_flow| {
            control_flow.set_poll();
            match event {
                Event::MainEventsCleared => {
                    gl_window.window.request_redraw();
                }
                Event::WindowEvent { event, .. } => match window_action(&event) {
                    Some(Action::Resize(w, h)) => {
                        gl_window.surface.resize(&gl_context, w, h);
                        renderer.resize(w.get(), h.get());
                        log::debug!("resized to {w}x{h}");
                    }
                    Some(Action::Exit) => control_flow.set_exit(),
                    None => (),
                },
                Event::RedrawRequested(_) => {
                    if let Some(scene) = &mut scene {
                        renderer.clear_color(
                            clear_color.r,
                            clear_color.g,
                            clear_color.b,
                            clear_color.a,
                        );
                        scene.draw(&mut renderer, start.elapsed());

                        if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                            log::error!("Could not swap buffers: {e}");
                            control_flow.set_exit_with_code(1);
                        }
                    }
                }
                Event::LoopDestroyed => {
                    // GL objects go while the context is still current
                    scene.take();
                    log::info!("Exiting");
                }
                _ => (),
            }
        })
    }
}

/// What the render loop does in response to a window event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Resize(NonZeroU32, NonZeroU32),
    Exit,
}

/// Escape exits on release, like a key callback checking for the release action.
/// Resizes to a zero dimension (minimized windows) are ignored.
pub fn window_action(event: &WindowEvent) -> Option<Action> {
    match event {
        WindowEvent::Resized(size) => {
            let w = NonZeroU32::new(size.width)?;
            let h = NonZeroU32::new(size.height)?;
            Some(Action::Resize(w, h))
        }
        WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    virtual_keycode: Some(VirtualKeyCode::Escape),
                    state: ElementState::Released,
                    ..
                },
            ..
        } => Some(Action::Exit),
        WindowEvent::CloseRequested => Some(Action::Exit),
        _ => None,
    }
}

/// Keeps the first of the candidates with the highest sample count.
fn most_samples<T>(configs: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    configs.reduce(|best, c| {
        if samples(&c) > samples(&best) {
            c
        } else {
            best
        }
    })
}

fn swap_interval(vsync: bool) -> SwapInterval {
    match (vsync, NonZeroU32::new(1)) {
        (true, Some(one)) => SwapInterval::Wait(one),
        _ => SwapInterval::DontWait,
    }
}

pub struct GlWindow {
    // the surface must be dropped before the window
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &GlutinConfig) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create window: {0}")]
    Window(String),
    #[error("Window has zero size")]
    ZeroSize,
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Could not build shader program: {0}")]
    Program(#[from] PBError),
    #[error("Could not upload geometry: {0}")]
    Geometry(#[from] GBError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(deprecated)]
    fn key(keycode: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 1,
                state,
                virtual_keycode: Some(keycode),
                modifiers: Default::default(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn escape_exits_on_release() {
        assert_eq!(
            window_action(&key(VirtualKeyCode::Escape, ElementState::Pressed)),
            None
        );
        assert_eq!(
            window_action(&key(VirtualKeyCode::Escape, ElementState::Released)),
            Some(Action::Exit)
        );
        assert_eq!(
            window_action(&key(VirtualKeyCode::Space, ElementState::Released)),
            None
        );
    }

    #[test]
    fn close_requested_exits() {
        assert_eq!(
            window_action(&WindowEvent::CloseRequested),
            Some(Action::Exit)
        );
    }

    #[test]
    fn resize_ignores_zero_size() {
        assert_eq!(
            window_action(&WindowEvent::Resized(PhysicalSize::new(0, 600))),
            None
        );
        assert_eq!(
            window_action(&WindowEvent::Resized(PhysicalSize::new(800, 0))),
            None
        );

        let resize = window_action(&WindowEvent::Resized(PhysicalSize::new(1024, 768)));
        assert!(matches!(
            resize,
            Some(Action::Resize(w, h)) if w.get() == 1024 && h.get() == 768
        ));
    }

    #[test]
    fn picks_config_with_most_samples() {
        let configs = vec![("a", 0_u8), ("b", 4), ("c", 4), ("d", 2)];

        assert_eq!(
            most_samples(configs.into_iter(), |c| c.1),
            Some(("b", 4))
        );
        assert_eq!(most_samples(Vec::<(&str, u8)>::new().into_iter(), |c| c.1), None);
    }

    #[test]
    fn vsync_waits_one_frame() {
        assert!(matches!(swap_interval(true), SwapInterval::Wait(n) if n.get() == 1));
        assert!(matches!(swap_interval(false), SwapInterval::DontWait));
    }

    #[test]
    fn scene_errors_carry_cause() {
        let err: SceneError = GBError::InvalidDataLength.into();

        assert_eq!(
            err.to_string(),
            "Could not upload geometry: Invalid data length for given attributes"
        );
    }
}
