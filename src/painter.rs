//! Button painters; the implementor side of a color button.
//!
//! A painter knows nothing about the button which uses it, only how to fill an area of a given size.

use {
    crate::{
        surface::{self, Surface},
        theme::palette,
    },
    reclutch::display as gfx,
};

/// Fills a button's area.
pub trait ButtonPainter {
    /// Sets the draw color and fills `(0, 0)-(width, height)`.
    fn paint_fill(&self, surface: &mut dyn Surface, width: f32, height: f32);
}

fn fill(surface: &mut dyn Surface, color: gfx::Color, width: f32, height: f32) {
    surface.set_color(color);
    surface.fill_rect(surface::local_rect(width, height));
}

/// Always paints red.
#[derive(Debug, Default, Clone, Copy)]
pub struct RedPainter;

impl ButtonPainter for RedPainter {
    #[inline]
    fn paint_fill(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        fill(surface, palette::red(), width, height);
    }
}

/// Always paints green.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreenPainter;

impl ButtonPainter for GreenPainter {
    #[inline]
    fn paint_fill(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        fill(surface, palette::green(), width, height);
    }
}

/// Paints a color chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidPainter {
    color: gfx::Color,
}

impl SolidPainter {
    #[inline]
    pub fn new(color: gfx::Color) -> Self {
        SolidPainter { color }
    }

    #[inline]
    pub fn color(&self) -> gfx::Color {
        self.color
    }
}

impl ButtonPainter for SolidPainter {
    #[inline]
    fn paint_fill(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        fill(surface, self.color, width, height);
    }
}
