//! Button abstractions; the abstraction side of a color button.
//!
//! The flavor of a button is nominal. What ends up on screen is decided entirely by the painter it was built
//! with, so a [`RedButton`] holding a blue painter is a blue button.

use crate::{kit::ColorButton, painter::ButtonPainter, surface::Surface};

/// Renders a [`ColorButton`](ColorButton) by delegating to a painter.
pub trait Button {
    fn paint(&self, surface: &mut dyn Surface, widget: &ColorButton);
}

pub struct RedButton {
    painter: Box<dyn ButtonPainter>,
}

impl RedButton {
    #[inline]
    pub fn new(painter: impl ButtonPainter + 'static) -> Self {
        RedButton {
            painter: Box::new(painter),
        }
    }
}

impl Button for RedButton {
    #[inline]
    fn paint(&self, surface: &mut dyn Surface, widget: &ColorButton) {
        self.painter
            .paint_fill(surface, widget.width(), widget.height());
    }
}

pub struct GreenButton {
    painter: Box<dyn ButtonPainter>,
}

impl GreenButton {
    #[inline]
    pub fn new(painter: impl ButtonPainter + 'static) -> Self {
        GreenButton {
            painter: Box::new(painter),
        }
    }
}

impl Button for GreenButton {
    #[inline]
    fn paint(&self, surface: &mut dyn Surface, widget: &ColorButton) {
        self.painter
            .paint_fill(surface, widget.width(), widget.height());
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            core::Globals,
            kit::{ColorButtonRef, Frame, FrameRef},
            painter::{GreenPainter, RedPainter, SolidPainter},
            surface::{self, DrawOp, Recorder},
            theme::{flat::FlatTheme, palette},
        },
        reclutch::display as gfx,
    };

    fn sized_widget(
        globals: &mut Globals,
        frame: FrameRef,
        button: impl Button + 'static,
    ) -> ColorButtonRef {
        let widget: ColorButtonRef = globals.child(frame, Box::new(button) as Box<dyn Button>);
        globals.set_bounds(
            widget,
            gfx::Rect::new(gfx::Point::new(0.0, 0.0), gfx::Size::new(100.0, 50.0)),
        );
        widget
    }

    fn paint_ops(globals: &Globals, widget: ColorButtonRef) -> Vec<DrawOp> {
        let mut recorder = Recorder::new();
        let widget = globals.get(widget);
        widget.button().paint(&mut recorder, widget);
        recorder.ops().to_vec()
    }

    #[test]
    fn test_flavors_forward_widget_size() {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let red = sized_widget(&mut globals, frame, RedButton::new(RedPainter));
        let green = sized_widget(&mut globals, frame, GreenButton::new(GreenPainter));
        let rect = surface::local_rect(100.0, 50.0);

        assert_eq!(
            paint_ops(&globals, red),
            vec![
                DrawOp::SetColor(palette::red()),
                DrawOp::FillRect(rect, palette::red())
            ]
        );
        assert_eq!(
            paint_ops(&globals, green),
            vec![
                DrawOp::SetColor(palette::green()),
                DrawOp::FillRect(rect, palette::green())
            ]
        );
    }

    #[test]
    fn test_flavor_does_not_pick_the_color() {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let blue = sized_widget(
            &mut globals,
            frame,
            RedButton::new(SolidPainter::new(palette::blue())),
        );
        let crossed = sized_widget(&mut globals, frame, GreenButton::new(RedPainter));

        let blue_ops = paint_ops(&globals, blue);
        assert_eq!(
            blue_ops,
            vec![
                DrawOp::SetColor(palette::blue()),
                DrawOp::FillRect(surface::local_rect(100.0, 50.0), palette::blue())
            ]
        );
        assert!(!blue_ops.contains(&DrawOp::SetColor(palette::red())));

        assert_eq!(paint_ops(&globals, crossed)[0], DrawOp::SetColor(palette::red()));
    }
}
