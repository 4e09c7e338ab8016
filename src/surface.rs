//! Drawing surfaces components render onto.
//!
//! A surface carries a current draw color and an origin; fills are given in coordinates local to the
//! component being rendered and are offset by the origin.

use {reclutch::display as gfx, thiserror::Error};

/// Target of a component's render hook.
pub trait Surface {
    /// Moves the coordinate origin, in absolute units, for subsequent fills.
    fn set_origin(&mut self, origin: gfx::Point);
    /// Sets the color used by subsequent fills.
    fn set_color(&mut self, color: gfx::Color);
    /// Fills a rectangle, given in local coordinates, with the current color.
    fn fill_rect(&mut self, rect: gfx::Rect);
    /// Draws a line of text centered within `rect`, given in local coordinates, with the current color.
    fn fill_text(&mut self, text: &str, rect: gfx::Rect);
}

/// Returns the rectangle `(0, 0)-(width, height)`.
#[inline]
pub fn local_rect(width: f32, height: f32) -> gfx::Rect {
    gfx::Rect::new(gfx::Point::new(0.0, 0.0), gfx::Size::new(width, height))
}

fn offset(rect: gfx::Rect, origin: gfx::Point) -> gfx::Rect {
    gfx::Rect::new(
        gfx::Point::new(rect.origin.x + origin.x, rect.origin.y + origin.y),
        rect.size,
    )
}

#[derive(Debug, Error)]
pub enum TypefaceError {
    #[error("failed to load font: {0}")]
    Font(#[from] reclutch::error::FontError),
    #[error("font {0:?} has no loadable data")]
    MissingData(String),
    #[error("failed to upload font: {0}")]
    Resource(#[from] reclutch::error::ResourceError),
}

/// A font registered with a graphics display, used for text in a display list.
#[derive(Clone)]
pub struct Typeface {
    info: gfx::FontInfo,
    resource: gfx::ResourceReference,
    size: f32,
}

impl Typeface {
    /// Loads the system font `name`, or the first available out of `fallbacks`, and uploads it to `display`.
    pub fn load(
        display: &mut impl gfx::GraphicsDisplay,
        name: &str,
        fallbacks: &[&str],
        size: f32,
    ) -> Result<Self, TypefaceError> {
        let info = gfx::FontInfo::from_name(name, fallbacks, None)?;
        let data = info
            .data()
            .ok_or_else(|| TypefaceError::MissingData(name.to_string()))?;
        let resource = display.new_resource(gfx::ResourceDescriptor::Font(
            gfx::ResourceData::Data(gfx::SharedData::RefCount(std::sync::Arc::new(data))),
        ))?;

        Ok(Typeface {
            info,
            resource,
            size,
        })
    }
}

/// Surface which builds a reclutch display list.
///
/// Text is only emitted when a [`Typeface`](Typeface) is provided.
pub struct DisplayListSurface<'a> {
    builder: gfx::DisplayListBuilder,
    typeface: Option<&'a Typeface>,
    origin: gfx::Point,
    color: gfx::Color,
}

impl<'a> DisplayListSurface<'a> {
    pub fn new(typeface: Option<&'a Typeface>) -> Self {
        DisplayListSurface {
            builder: gfx::DisplayListBuilder::new(),
            typeface,
            origin: gfx::Point::new(0.0, 0.0),
            color: gfx::Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Consumes the surface, returning the recorded display commands.
    #[inline]
    pub fn build(self) -> Vec<gfx::DisplayCommand> {
        self.builder.build()
    }
}

impl<'a> Surface for DisplayListSurface<'a> {
    #[inline]
    fn set_origin(&mut self, origin: gfx::Point) {
        self.origin = origin;
    }

    #[inline]
    fn set_color(&mut self, color: gfx::Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: gfx::Rect) {
        self.builder.push_rectangle(
            offset(rect, self.origin),
            gfx::GraphicsDisplayPaint::Fill(self.color.into()),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, rect: gfx::Rect) {
        let typeface = match self.typeface {
            Some(typeface) => typeface,
            None => return,
        };

        let mut item = gfx::TextDisplayItem {
            text: text.into(),
            font: typeface.resource.clone(),
            font_info: typeface.info.clone(),
            size: typeface.size,
            bottom_left: gfx::Point::new(0.0, 0.0),
            color: self.color.into(),
        };

        // measured at a zero baseline, then moved so the ink box is centered on `rect`
        let ink = match item.bounds() {
            Ok(ink) => ink,
            Err(err) => {
                tracing::warn!(%err, text, "failed to measure text");
                return;
            }
        };
        let rect = offset(rect, self.origin);
        item.bottom_left = gfx::Point::new(
            rect.origin.x + (rect.size.width - ink.size.width) / 2.0 - ink.origin.x,
            rect.origin.y + (rect.size.height - ink.size.height) / 2.0 - ink.origin.y,
        );

        self.builder.push_text(item, None);
    }
}

/// A single operation captured by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetColor(gfx::Color),
    /// Filled rectangle in absolute coordinates, alongside the color it was filled with.
    FillRect(gfx::Rect, gfx::Color),
    /// Text centered within a rectangle in absolute coordinates.
    Text(String, gfx::Rect, gfx::Color),
}

/// Surface which records every operation instead of drawing.
#[derive(Debug, Clone)]
pub struct Recorder {
    ops: Vec<DrawOp>,
    origin: gfx::Point,
    color: gfx::Color,
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder {
            ops: Vec::new(),
            origin: gfx::Point::new(0.0, 0.0),
            color: gfx::Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl Recorder {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns only the fills, in the order they were made.
    pub fn fills(&self) -> Vec<(gfx::Rect, gfx::Color)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillRect(rect, color) => Some((rect, color)),
                _ => None,
            })
            .collect()
    }

    /// Returns only the text, in the order it was drawn.
    pub fn texts(&self) -> Vec<(&str, gfx::Rect, gfx::Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, rect, color) => Some((text.as_str(), *rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    #[inline]
    fn set_origin(&mut self, origin: gfx::Point) {
        self.origin = origin;
    }

    fn set_color(&mut self, color: gfx::Color) {
        self.color = color;
        self.ops.push(DrawOp::SetColor(color));
    }

    fn fill_rect(&mut self, rect: gfx::Rect) {
        self.ops
            .push(DrawOp::FillRect(offset(rect, self.origin), self.color));
    }

    fn fill_text(&mut self, text: &str, rect: gfx::Rect) {
        self.ops.push(DrawOp::Text(
            text.to_owned(),
            offset(rect, self.origin),
            self.color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_applies_origin() {
        let mut recorder = Recorder::new();
        let red = gfx::Color::new(1.0, 0.0, 0.0, 1.0);

        recorder.set_origin(gfx::Point::new(20.0, 5.0));
        recorder.set_color(red);
        recorder.fill_rect(local_rect(100.0, 50.0));
        recorder.fill_text("label", local_rect(100.0, 50.0));

        let area = gfx::Rect::new(gfx::Point::new(20.0, 5.0), gfx::Size::new(100.0, 50.0));
        assert_eq!(recorder.fills(), vec![(area, red)]);
        assert_eq!(recorder.texts(), vec![("label", area, red)]);
    }

    #[test]
    fn test_display_list_surface_emits_commands() {
        let mut surface = DisplayListSurface::new(None);
        surface.set_color(gfx::Color::new(0.0, 0.0, 1.0, 1.0));
        surface.fill_rect(local_rect(10.0, 10.0));

        assert!(!surface.build().is_empty());
    }

    #[test]
    fn test_text_without_typeface_is_skipped() {
        let mut surface = DisplayListSurface::new(None);
        surface.fill_text("label", local_rect(10.0, 10.0));

        assert!(surface.build().is_empty());
    }
}
