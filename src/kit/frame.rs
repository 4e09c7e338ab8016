use {
    crate::{
        core,
        layout::FlowLayout,
        surface::{self, Surface},
        theme::ThemeColor,
    },
    reclutch::display as gfx,
};

pub type FrameRef = core::ComponentRef<Frame>;

/// Top-level container; the contents of a window.
///
/// Children are laid out with a [`FlowLayout`](FlowLayout) whenever the frame is updated.
pub struct Frame {
    title: String,
    size: gfx::Size,
    layout: FlowLayout,
    background: gfx::Color,
    cref: FrameRef,
}

impl core::ComponentFactory for Frame {
    type Props = ();

    fn new(globals: &mut core::Globals, cref: FrameRef, _props: ()) -> Self {
        Frame {
            title: String::new(),
            size: gfx::Size::new(0.0, 0.0),
            layout: Default::default(),
            background: globals.color(ThemeColor::Background),
            cref,
        }
    }
}

impl core::Component for Frame {
    fn update(&mut self, globals: &mut core::Globals) {
        globals.set_bounds(
            self.cref,
            surface::local_rect(self.size.width, self.size.height),
        );

        let children = globals.untyped_node(self.cref).children().to_vec();
        let sizes: Vec<_> = children
            .iter()
            .map(|child| globals.preferred_size(*child))
            .collect();

        for (child, bounds) in children
            .into_iter()
            .zip(self.layout.arrange(self.size, &sizes))
        {
            globals.set_bounds(child, bounds);
        }

        tracing::trace!(
            width = self.size.width,
            height = self.size.height,
            children = sizes.len(),
            "laid out frame"
        );
    }

    fn display(&self, surface: &mut dyn Surface) {
        surface.set_color(self.background);
        surface.fill_rect(surface::local_rect(self.size.width, self.size.height));
    }

    #[inline]
    fn preferred_size(&self) -> gfx::Size {
        self.size
    }
}

impl Frame {
    #[inline]
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the size of the frame. Takes effect on the next update.
    #[inline]
    pub fn set_size(&mut self, size: gfx::Size) {
        self.size = size;
    }

    #[inline]
    pub fn size(&self) -> gfx::Size {
        self.size
    }

    #[inline]
    pub fn set_layout(&mut self, layout: FlowLayout) {
        self.layout = layout;
    }

    #[inline]
    pub fn layout(&self) -> &FlowLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            button::{Button, GreenButton},
            core::{Globals, Propagate, Repaint},
            kit::ColorButtonRef,
            layout::FlowAlignment,
            painter::GreenPainter,
            theme::flat::FlatTheme,
        },
    };

    fn add(globals: &mut Globals, frame: FrameRef, width: f32) -> ColorButtonRef {
        let cref: ColorButtonRef =
            globals.child(frame, Box::new(GreenButton::new(GreenPainter)) as Box<dyn Button>);
        globals
            .get_mut(cref)
            .set_preferred_size(gfx::Size::new(width, 20.0));
        cref
    }

    #[test]
    fn test_update_lays_out_children() {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let a = add(&mut globals, frame, 40.0);
        let b = add(&mut globals, frame, 60.0);

        {
            let frame = globals.get_mut(frame);
            frame.set_size(gfx::Size::new(200.0, 100.0));
            frame.set_layout(FlowLayout {
                alignment: FlowAlignment::Leading,
                ..Default::default()
            });
        }
        globals.update(frame, Repaint::Yes, Propagate::No);

        assert_eq!(globals.bounds(frame), surface::local_rect(200.0, 100.0));
        assert_eq!(globals.bounds(a).origin, gfx::Point::new(5.0, 5.0));
        assert_eq!(globals.bounds(b).origin, gfx::Point::new(50.0, 5.0));
        assert_eq!(globals.get(b).width(), 60.0);
        assert_eq!(globals.get(frame).layout().alignment, FlowAlignment::Leading);
    }

    #[test]
    fn test_resize_relays_out() {
        let (mut globals, frame) = Globals::new::<Frame>(FlatTheme, ());
        let a = add(&mut globals, frame, 100.0);
        let b = add(&mut globals, frame, 100.0);

        globals.get_mut(frame).set_size(gfx::Size::new(300.0, 100.0));
        globals.update(frame, Repaint::Yes, Propagate::No);
        assert_eq!(globals.bounds(a).origin.y, globals.bounds(b).origin.y);

        globals.get_mut(frame).set_size(gfx::Size::new(150.0, 100.0));
        globals.update(frame, Repaint::Yes, Propagate::No);
        assert_eq!(globals.bounds(b).origin.y, 30.0);
    }
}
