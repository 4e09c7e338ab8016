use {
    glutin::event_loop::EventLoop,
    tint::{app, core::Globals, kit::Frame, theme::flat::FlatTheme, window},
    tracing_subscriber::EnvFilter,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new();
    let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());

    globals.invoke_later(move |globals| {
        app::build(globals, frame);
    });

    window::run(event_loop, globals, frame)
}
