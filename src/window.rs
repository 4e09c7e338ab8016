//! Runs a [`Frame`](crate::kit::Frame) inside a native window.

use {
    crate::{
        core::{Globals, Propagate, Repaint},
        kit::FrameRef,
        surface::Typeface,
    },
    glutin::{
        dpi::{LogicalSize, PhysicalSize},
        event::{ElementState, Event, MouseButton, StartCause, WindowEvent},
        event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
        window::WindowBuilder,
        ContextBuilder, PossiblyCurrent, WindowedContext,
    },
    reclutch::display::{
        self as gfx,
        skia::{SkiaGraphicsDisplay, SkiaOpenGlFramebuffer},
        GraphicsDisplay,
    },
    thiserror::Error,
};

const LABEL_FONT: &str = "Arial";
const LABEL_FALLBACK_FONTS: &[&str] = &["Helvetica", "Segoe UI", "DejaVu Sans", "Liberation Sans"];
const LABEL_SIZE: f32 = 13.0;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create window: {0}")]
    Creation(#[from] glutin::CreationError),
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::ContextError),
    #[error("failed to create graphics display: {0}")]
    Skia(#[from] reclutch::error::SkiaError),
    #[error("failed to present: {0}")]
    Present(#[from] reclutch::error::DisplayError),
    #[error("graphics display error: {0}")]
    Graphics(Box<dyn std::error::Error>),
}

/// Window input the component tree reacts to, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Resized(gfx::Size),
    CursorMoved(gfx::Point),
    Pressed,
    Released,
}

impl Input {
    /// Converts a window event. Events the component tree has no use for map to `None`.
    pub fn from_window_event(event: &WindowEvent, scale_factor: f64) -> Option<Self> {
        match event {
            WindowEvent::Resized(size) => {
                let size = size.to_logical::<f64>(scale_factor);
                Some(Input::Resized(gfx::Size::new(
                    size.width as f32,
                    size.height as f32,
                )))
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = position.to_logical::<f64>(scale_factor);
                Some(Input::CursorMoved(gfx::Point::new(
                    position.x as f32,
                    position.y as f32,
                )))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => Input::Pressed,
                ElementState::Released => Input::Released,
            }),
            _ => None,
        }
    }
}

/// Forwards [`Input`](Input) to the components under a frame.
///
/// Button events carry no position, so the last cursor position is kept.
#[derive(Debug, Clone, Copy)]
pub struct InputRouter {
    frame: FrameRef,
    cursor: gfx::Point,
}

impl InputRouter {
    pub fn new(frame: FrameRef) -> Self {
        InputRouter {
            frame,
            cursor: gfx::Point::new(0.0, 0.0),
        }
    }

    #[inline]
    pub fn cursor(&self) -> gfx::Point {
        self.cursor
    }

    pub fn route(&mut self, globals: &mut Globals, input: Input) {
        match input {
            Input::Resized(size) => {
                globals.get_mut(self.frame).set_size(size);
                globals.update(self.frame, Repaint::Yes, Propagate::No);
            }
            Input::CursorMoved(position) => {
                self.cursor = position;
                globals.pointer_moved(self.frame, position);
            }
            Input::Pressed => globals.pointer_pressed(self.frame, self.cursor),
            Input::Released => globals.pointer_released(self.frame, self.cursor),
        }
    }
}

type Context = WindowedContext<PossiblyCurrent>;

/// The GL context and the skia display drawing into it.
struct Screen {
    context: Context,
    display: SkiaGraphicsDisplay,
    typeface: Option<Typeface>,
    commands: Option<gfx::CommandGroupHandle>,
}

impl Screen {
    fn open(
        target: &EventLoopWindowTarget<()>,
        globals: &Globals,
        frame: FrameRef,
    ) -> Result<Self, WindowError> {
        let frame = globals.get(frame);
        let builder = WindowBuilder::new()
            .with_title(frame.title())
            .with_inner_size(LogicalSize::new(
                frame.size().width as f64,
                frame.size().height as f64,
            ));

        let context = ContextBuilder::new()
            .with_vsync(true)
            .build_windowed(builder, target)?;
        let context = unsafe { context.make_current() }.map_err(|(_, err)| err)?;

        let size = context.window().inner_size();
        let mut display = SkiaGraphicsDisplay::new_gl_framebuffer(&SkiaOpenGlFramebuffer {
            framebuffer_id: 0,
            size: (size.width as _, size.height as _),
        })?;

        let typeface = match Typeface::load(
            &mut display,
            LABEL_FONT,
            LABEL_FALLBACK_FONTS,
            LABEL_SIZE,
        ) {
            Ok(typeface) => Some(typeface),
            Err(err) => {
                tracing::warn!(%err, "no font available, button labels will not be drawn");
                None
            }
        };

        Ok(Screen {
            context,
            display,
            typeface,
            commands: None,
        })
    }

    #[inline]
    fn scale_factor(&self) -> f64 {
        self.context.window().scale_factor()
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), WindowError> {
        self.context.resize(size);
        self.display
            .resize((size.width, size.height))
            .map_err(WindowError::Graphics)
    }

    fn redraw(&mut self, globals: &Globals, frame: FrameRef) -> Result<(), WindowError> {
        let commands = globals.display_list(frame, self.typeface.as_ref());
        tracing::trace!(commands = commands.len(), "rebuilt display list");

        match self.commands {
            Some(handle) => {
                self.display.modify_command_group(
                    handle,
                    &commands,
                    gfx::ZOrder::default(),
                    None,
                    None,
                );
            }
            None => {
                self.commands = Some(
                    self.display
                        .push_command_group(&commands, gfx::ZOrder::default(), None, None)
                        .map_err(WindowError::Graphics)?,
                );
            }
        }

        self.display.present(None)?;
        self.context.swap_buffers()?;
        Ok(())
    }
}

/// Drains the UI task queue, opens the window for `frame` and dispatches window events to `globals` until the
/// window is closed.
///
/// Setup work should be queued with [`Globals::invoke_later`](Globals::invoke_later) before calling this.
pub fn run(event_loop: EventLoop<()>, mut globals: Globals, frame: FrameRef) -> ! {
    let mut screen: Option<Screen> = None;
    let mut router = InputRouter::new(frame);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                globals.run_pending();
                match Screen::open(target, &globals, frame) {
                    Ok(opened) => {
                        tracing::info!(title = globals.get(frame).title(), "opened window");
                        screen = Some(opened);
                    }
                    Err(err) => {
                        tracing::error!(%err, "failed to open window");
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Some(mut closed) = screen.take() {
                    closed.display.before_exit();
                    globals.unmount(frame);
                }
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent { event, .. } => {
                if let Some(screen) = &mut screen {
                    if let WindowEvent::Resized(size) = event {
                        if let Err(err) = screen.resize(size) {
                            tracing::error!(%err, "failed to resize display");
                        }
                    }

                    if let Some(input) = Input::from_window_event(&event, screen.scale_factor()) {
                        router.route(&mut globals, input);
                    }
                }
            }
            Event::MainEventsCleared => {
                globals.run_pending();
                if let Some(screen) = &screen {
                    if globals.take_repaint() {
                        screen.context.window().request_redraw();
                    }
                }
            }
            Event::RedrawRequested(_) => {
                if let Some(screen) = &mut screen {
                    if let Err(err) = screen.redraw(&globals, frame) {
                        tracing::error!(%err, "failed to redraw");
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{app, kit::Frame, theme::flat::FlatTheme, theme::palette},
    };

    fn launched() -> (Globals, FrameRef, app::Buttons) {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let buttons = app::build(&mut globals, frame);
        (globals, frame, buttons)
    }

    #[test]
    fn test_window_events_are_converted_to_logical_input() {
        assert_eq!(
            Input::from_window_event(&WindowEvent::Resized(PhysicalSize::new(700, 400)), 2.0),
            Some(Input::Resized(gfx::Size::new(350.0, 200.0)))
        );
        assert_eq!(Input::from_window_event(&WindowEvent::Focused(true), 1.0), None);
    }

    #[test]
    fn test_router_presses_under_the_cursor() {
        let (mut globals, frame, buttons) = launched();
        let mut router = InputRouter::new(frame);
        let blue = globals.bounds(buttons.blue);
        let inside = gfx::Point::new(blue.origin.x + 5.0, blue.origin.y + 5.0);

        router.route(&mut globals, Input::CursorMoved(inside));
        assert_eq!(router.cursor(), inside);

        router.route(&mut globals, Input::Pressed);
        assert_eq!(
            globals.get(buttons.blue).background(),
            Some(palette::light_gray())
        );

        router.route(&mut globals, Input::Released);
        assert_eq!(globals.get(buttons.blue).background(), None);
    }

    #[test]
    fn test_router_relays_out_on_resize() {
        let (mut globals, frame, buttons) = launched();
        let mut router = InputRouter::new(frame);
        globals.take_repaint();

        // too narrow for one row: the third button wraps
        router.route(&mut globals, Input::Resized(gfx::Size::new(250.0, 200.0)));

        assert_eq!(globals.get(frame).size(), gfx::Size::new(250.0, 200.0));
        assert!(globals.take_repaint());
        assert!(globals.bounds(buttons.blue).origin.y > globals.bounds(buttons.red).origin.y);
    }
}
