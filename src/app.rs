//! The demo window: three color buttons, each bridging a button flavor to a painter.

use {
    crate::{
        button::{Button, GreenButton, RedButton},
        core::{Globals, Propagate, Repaint, Update},
        kit::{ColorButtonRef, FrameRef},
        painter::{GreenPainter, RedPainter, SolidPainter},
        signal::PointerEvent,
        theme::palette,
    },
    reclutch::display as gfx,
};

pub const TITLE: &str = "Bridge Pattern Example";
pub const WINDOW_WIDTH: f32 = 350.0;
pub const WINDOW_HEIGHT: f32 = 200.0;
pub const BUTTON_WIDTH: f32 = 100.0;
pub const BUTTON_HEIGHT: f32 = 50.0;

/// References to the buttons created by [`build`](build).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buttons {
    pub red: ColorButtonRef,
    pub green: ColorButtonRef,
    pub blue: ColorButtonRef,
}

/// Populates `frame` with the demo buttons, then sizes and lays it out.
///
/// Must run on the UI thread; the binary queues it with [`Globals::invoke_later`](Globals::invoke_later).
pub fn build(globals: &mut Globals, frame: FrameRef) -> Buttons {
    let red_painter = RedPainter;
    let green_painter = GreenPainter;
    let solid_painter = SolidPainter::new(palette::blue());

    let buttons = Buttons {
        red: add_button(globals, frame, "Red Button", RedButton::new(red_painter)),
        green: add_button(globals, frame, "Green Button", GreenButton::new(green_painter)),
        // a "red" button, painted blue
        blue: add_button(globals, frame, "Blue Button", RedButton::new(solid_painter)),
    };

    {
        let frame = globals.get_mut(frame);
        frame.set_title(TITLE);
        frame.set_size(gfx::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    }
    globals.update(frame, Repaint::Yes, Propagate::No);

    tracing::debug!(title = TITLE, "built demo frame");

    buttons
}

fn add_button(
    globals: &mut Globals,
    frame: FrameRef,
    text: &'static str,
    button: impl Button + 'static,
) -> ColorButtonRef {
    let cref: ColorButtonRef = globals.child(frame, Box::new(button) as Box<dyn Button>);

    let widget = globals.get_mut(cref);
    widget.set_text(text);
    widget.set_preferred_size(gfx::Size::new(BUTTON_WIDTH, BUTTON_HEIGHT));

    globals.listen(
        frame,
        cref,
        |widget| &mut widget.on_pointer,
        move |_, event| {
            if let PointerEvent::Clicked(_) = event {
                tracing::info!(button = text, "clicked");
            }
        },
        Update::No,
    );

    cref
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            core::{Globals, UntypedComponentRef},
            kit::Frame,
            surface::{DrawOp, Recorder},
            theme::flat::FlatTheme,
        },
    };

    fn launched() -> (Globals, FrameRef, Buttons) {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let buttons = std::rc::Rc::new(std::cell::Cell::new(None));
        let out = buttons.clone();
        globals.invoke_later(move |globals| out.set(Some(build(globals, frame))));

        assert!(buttons.get().is_none());
        assert_eq!(globals.run_pending(), 1);

        let buttons = buttons.get().expect("setup task did not run");
        (globals, frame, buttons)
    }

    fn area(globals: &Globals, cref: ColorButtonRef) -> gfx::Rect {
        globals.bounds(cref)
    }

    #[test]
    fn test_window_contents() {
        let (globals, frame, buttons) = launched();

        assert_eq!(globals.get(frame).title(), TITLE);
        assert_eq!(
            globals.get(frame).size(),
            gfx::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT)
        );

        let children = globals.untyped_node(frame).children().to_vec();
        assert_eq!(
            children,
            vec![
                UntypedComponentRef::from(buttons.red),
                buttons.green.into(),
                buttons.blue.into()
            ]
        );

        let labels: Vec<_> = children
            .iter()
            .map(|c| globals.get(c.to_typed::<crate::kit::ColorButton>()).text().to_owned())
            .collect();
        assert_eq!(labels, vec!["Red Button", "Green Button", "Blue Button"]);

        for cref in &[buttons.red, buttons.green, buttons.blue] {
            assert_eq!(
                globals.preferred_size(*cref),
                gfx::Size::new(BUTTON_WIDTH, BUTTON_HEIGHT)
            );
            assert_eq!(area(&globals, *cref).size, gfx::Size::new(BUTTON_WIDTH, BUTTON_HEIGHT));
        }
    }

    #[test]
    fn test_buttons_render_their_painter_color() {
        let (globals, frame, buttons) = launched();
        let mut recorder = Recorder::new();
        globals.render(frame, &mut recorder);

        let fills = recorder.fills();
        for &(cref, color) in &[
            (buttons.red, palette::red()),
            (buttons.green, palette::green()),
            (buttons.blue, palette::blue()),
        ] {
            let covering: Vec<_> = fills
                .iter()
                .filter(|(rect, _)| *rect == area(&globals, cref))
                .map(|(_, c)| *c)
                .collect();
            assert_eq!(covering, vec![color]);
        }
    }

    #[test]
    fn test_press_highlights_until_release() {
        let (mut globals, frame, buttons) = launched();
        let blue = area(&globals, buttons.blue);
        let inside = gfx::Point::new(blue.origin.x + 10.0, blue.origin.y + 10.0);

        globals.pointer_moved(frame, inside);
        globals.pointer_pressed(frame, inside);
        assert_eq!(
            globals.get(buttons.blue).background(),
            Some(palette::light_gray())
        );
        assert_eq!(globals.get(buttons.red).background(), None);

        let mut recorder = Recorder::new();
        globals.render(frame, &mut recorder);
        let covering: Vec<_> = recorder
            .fills()
            .into_iter()
            .filter(|(rect, _)| *rect == blue)
            .map(|(_, c)| c)
            .collect();
        assert_eq!(covering, vec![palette::blue(), palette::light_gray()]);

        globals.pointer_released(frame, inside);
        assert_eq!(globals.get(buttons.blue).background(), None);
        assert!(globals.take_repaint());
    }

    #[test]
    fn test_presses_outside_buttons_are_ignored() {
        let (mut globals, frame, buttons) = launched();
        let below = gfx::Point::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT - 10.0);

        assert_eq!(globals.hit_test(frame, below), None);
        globals.pointer_pressed(frame, below);
        globals.pointer_released(frame, below);

        for cref in &[buttons.red, buttons.green, buttons.blue] {
            assert_eq!(globals.get(*cref).background(), None);
        }
    }

    #[test]
    fn test_labels_are_drawn_over_their_buttons() {
        let (globals, frame, buttons) = launched();
        let mut recorder = Recorder::new();
        globals.render(frame, &mut recorder);

        let texts: Vec<_> = recorder
            .texts()
            .into_iter()
            .map(|(text, rect, _)| (text.to_owned(), rect))
            .collect();
        assert_eq!(
            texts,
            vec![
                ("Red Button".to_owned(), area(&globals, buttons.red)),
                ("Green Button".to_owned(), area(&globals, buttons.green)),
                ("Blue Button".to_owned(), area(&globals, buttons.blue)),
            ]
        );

        for (label, cref) in &[("Red Button", buttons.red), ("Blue Button", buttons.blue)] {
            let ops = recorder.ops();
            let fill = ops
                .iter()
                .position(|op| matches!(op, DrawOp::FillRect(rect, _) if *rect == area(&globals, *cref)))
                .expect("button was not filled");
            let text = ops
                .iter()
                .position(|op| matches!(op, DrawOp::Text(text, _, _) if text == label))
                .expect("label was not drawn");
            assert!(fill < text);
        }
    }

    #[test]
    fn test_display_list_has_a_command_per_fill() {
        let (globals, frame, _) = launched();
        let mut recorder = Recorder::new();
        globals.render(frame, &mut recorder);

        // without a typeface only the fills reach the display list
        assert!(globals.display_list(frame, None).len() >= recorder.fills().len());
        assert!(!recorder.fills().is_empty());
    }
}
