//! Standard components.

mod color_button;
mod feedback;
mod frame;

pub use {color_button::*, feedback::*, frame::*};
