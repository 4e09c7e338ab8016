use {
    crate::{
        button::Button,
        core,
        kit::PressFeedback,
        signal::{self, PointerEvent},
        surface::{self, Surface},
        theme::ThemeColor,
    },
    reclutch::display as gfx,
};

pub type ColorButtonRef = core::ComponentRef<ColorButton>;

/// On-screen button whose fill is delegated to a [`Button`](Button).
///
/// The fill is rendered first and the default chrome (pressed background, outline and label) on top of it.
pub struct ColorButton {
    pub on_pointer: signal::Signal<PointerEvent>,

    button: Box<dyn Button>,
    text: String,
    preferred_size: gfx::Size,
    size: gfx::Size,
    background: Option<gfx::Color>,
    border: gfx::Color,
    foreground: gfx::Color,
    cref: ColorButtonRef,
}

impl core::ComponentFactory for ColorButton {
    type Props = Box<dyn Button>;

    fn new(globals: &mut core::Globals, cref: ColorButtonRef, button: Box<dyn Button>) -> Self {
        let mut widget = ColorButton {
            on_pointer: Default::default(),

            button,
            text: String::new(),
            preferred_size: gfx::Size::new(0.0, 0.0),
            size: gfx::Size::new(0.0, 0.0),
            background: None,
            border: globals.color(ThemeColor::Border),
            foreground: globals.color(ThemeColor::Foreground),
            cref,
        };

        PressFeedback::attach(globals, &mut widget);

        widget
    }
}

impl core::Component for ColorButton {
    fn display(&self, surface: &mut dyn Surface) {
        self.button.paint(surface, self);

        let area = surface::local_rect(self.size.width, self.size.height);
        if let Some(background) = self.background {
            surface.set_color(background);
            surface.fill_rect(area);
        }

        if self.size.width >= 1.0 && self.size.height >= 1.0 {
            surface.set_color(self.border);
            for edge in &outline(area) {
                surface.fill_rect(*edge);
            }
        }

        if !self.text.is_empty() {
            surface.set_color(self.foreground);
            surface.fill_text(&self.text, area);
        }
    }

    #[inline]
    fn preferred_size(&self) -> gfx::Size {
        self.preferred_size
    }

    #[inline]
    fn resize(&mut self, size: gfx::Size) {
        self.size = size;
    }

    #[inline]
    fn pointer(&mut self) -> Option<&mut signal::Signal<PointerEvent>> {
        Some(&mut self.on_pointer)
    }
}

impl ColorButton {
    #[inline]
    pub fn cref(&self) -> ColorButtonRef {
        self.cref
    }

    #[inline]
    pub fn button(&self) -> &dyn Button {
        self.button.as_ref()
    }

    #[inline]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn set_preferred_size(&mut self, size: gfx::Size) {
        self.preferred_size = size;
    }

    /// Current width, as assigned by the layout.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Current height, as assigned by the layout.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Overrides the background drawn over the fill. `None` restores the default (no override).
    #[inline]
    pub fn set_background(&mut self, color: Option<gfx::Color>) {
        self.background = color;
    }

    #[inline]
    pub fn background(&self) -> Option<gfx::Color> {
        self.background
    }

    /// Registers a reaction to pointer events delivered to this button.
    #[inline]
    pub fn register_reaction(
        &mut self,
        reaction: impl FnMut(&mut core::Globals, &PointerEvent) + 'static,
    ) -> signal::ListenerRef {
        self.on_pointer.listen(reaction)
    }
}

fn outline(area: gfx::Rect) -> [gfx::Rect; 4] {
    let (x, y) = (area.origin.x, area.origin.y);
    let (w, h) = (area.size.width, area.size.height);
    [
        gfx::Rect::new(gfx::Point::new(x, y), gfx::Size::new(w, 1.0)),
        gfx::Rect::new(gfx::Point::new(x, y + h - 1.0), gfx::Size::new(w, 1.0)),
        gfx::Rect::new(gfx::Point::new(x, y), gfx::Size::new(1.0, h)),
        gfx::Rect::new(gfx::Point::new(x + w - 1.0, y), gfx::Size::new(1.0, h)),
    ]
}
