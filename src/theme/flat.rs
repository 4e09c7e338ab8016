use {super::*, reclutch::display as gfx};

/// Light theme with gray outlines and a light gray press highlight.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatTheme;

impl Theme for FlatTheme {
    fn color(&self, c: ThemeColor) -> gfx::Color {
        match c {
            ThemeColor::Foreground => palette::black(),
            ThemeColor::Background => gfx::Color::new(0.933, 0.933, 0.933, 1.0),
            ThemeColor::Highlight => palette::light_gray(),
            ThemeColor::Border => palette::gray(),
        }
    }
}
