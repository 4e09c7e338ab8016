use reclutch::display as gfx;

pub mod flat;

/// Standard colors a theme must provide for `kit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeColor {
    /// Color used by text and other foreground elements.
    Foreground,
    /// Color used to fill general background elements.
    Background,
    /// Background of a button while it is held down.
    Highlight,
    /// Outline drawn around buttons.
    Border,
}

pub trait Theme {
    fn color(&self, c: ThemeColor) -> gfx::Color;
}

pub mod palette {
    //! Named colors.

    use reclutch::display as gfx;

    #[inline]
    fn rgb(red: u8, green: u8, blue: u8) -> gfx::Color {
        gfx::Color::new(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
            1.0,
        )
    }

    #[inline]
    pub fn black() -> gfx::Color {
        rgb(0, 0, 0)
    }

    #[inline]
    pub fn red() -> gfx::Color {
        rgb(255, 0, 0)
    }

    #[inline]
    pub fn green() -> gfx::Color {
        rgb(0, 255, 0)
    }

    #[inline]
    pub fn blue() -> gfx::Color {
        rgb(0, 0, 255)
    }

    #[inline]
    pub fn light_gray() -> gfx::Color {
        rgb(192, 192, 192)
    }

    #[inline]
    pub fn gray() -> gfx::Color {
        rgb(128, 128, 128)
    }
}
