//! A small retained-mode UI kit whose buttons bridge a nominal button flavor to an independent painter.

#[macro_use]
extern crate derivative;

pub mod app;
pub mod button;
pub mod core;
pub mod kit;
pub mod layout;
pub mod painter;
pub mod signal;
pub mod surface;
pub mod theme;
pub mod window;
