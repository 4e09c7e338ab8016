use reclutch::display as gfx;

/// Horizontal alignment of each row in a [`FlowLayout`](FlowLayout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowAlignment {
    Leading,
    Center,
    Trailing,
}

impl Default for FlowAlignment {
    fn default() -> Self {
        FlowAlignment::Center
    }
}

/// Lays components out left to right, wrapping onto a new row when the next component would overflow.
///
/// Components keep their preferred size and are vertically centered within their row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub alignment: FlowAlignment,
    pub hgap: f32,
    pub vgap: f32,
}

impl Default for FlowLayout {
    fn default() -> Self {
        FlowLayout {
            alignment: Default::default(),
            hgap: 5.0,
            vgap: 5.0,
        }
    }
}

impl FlowLayout {
    /// Computes the bounds of each item, in container coordinates, given their preferred sizes.
    pub fn arrange(&self, container: gfx::Size, items: &[gfx::Size]) -> Vec<gfx::Rect> {
        let max_width = container.width - self.hgap * 2.0;
        let mut out = Vec::with_capacity(items.len());

        let mut row_start = 0;
        let mut x = 0.0;
        let mut y = self.vgap;
        let mut row_height: f32 = 0.0;

        for (i, size) in items.iter().enumerate() {
            if i == row_start || x + size.width <= max_width {
                if i > row_start {
                    x += self.hgap;
                }
                x += size.width;
                row_height = row_height.max(size.height);
            } else {
                self.place_row(&items[row_start..i], x, y, row_height, max_width, &mut out);
                y += self.vgap + row_height;
                x = size.width;
                row_height = size.height;
                row_start = i;
            }
        }

        self.place_row(&items[row_start..], x, y, row_height, max_width, &mut out);

        out
    }

    fn place_row(
        &self,
        row: &[gfx::Size],
        row_width: f32,
        y: f32,
        row_height: f32,
        max_width: f32,
        out: &mut Vec<gfx::Rect>,
    ) {
        let slack = max_width - row_width;
        let mut x = self.hgap
            + match self.alignment {
                FlowAlignment::Leading => 0.0,
                FlowAlignment::Center => slack / 2.0,
                FlowAlignment::Trailing => slack,
            };

        for size in row {
            out.push(gfx::Rect::new(
                gfx::Point::new(x, y + (row_height - size.height) / 2.0),
                *size,
            ));
            x += size.width + self.hgap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(rects: &[gfx::Rect]) -> Vec<(f32, f32)> {
        rects.iter().map(|r| (r.origin.x, r.origin.y)).collect()
    }

    #[test]
    fn test_single_row_is_centered() {
        let layout = FlowLayout::default();
        let button = gfx::Size::new(100.0, 50.0);
        let rects = layout.arrange(gfx::Size::new(350.0, 200.0), &[button; 3]);

        assert_eq!(origins(&rects), vec![(20.0, 5.0), (125.0, 5.0), (230.0, 5.0)]);
        assert!(rects.iter().all(|r| r.size == button));
    }

    #[test]
    fn test_overflow_wraps_to_next_row() {
        let layout = FlowLayout::default();
        let button = gfx::Size::new(100.0, 50.0);
        let rects = layout.arrange(gfx::Size::new(250.0, 200.0), &[button; 3]);

        // two fit in the 240 wide row, the third starts a row 5 below the first
        assert_eq!(
            origins(&rects),
            vec![(22.5, 5.0), (127.5, 5.0), (75.0, 60.0)]
        );
    }

    #[test]
    fn test_row_items_are_vertically_centered() {
        let layout = FlowLayout {
            alignment: FlowAlignment::Leading,
            ..Default::default()
        };
        let rects = layout.arrange(
            gfx::Size::new(300.0, 100.0),
            &[gfx::Size::new(40.0, 20.0), gfx::Size::new(40.0, 40.0)],
        );

        assert_eq!(origins(&rects), vec![(5.0, 15.0), (50.0, 5.0)]);
    }

    #[test]
    fn test_trailing_alignment() {
        let layout = FlowLayout {
            alignment: FlowAlignment::Trailing,
            ..Default::default()
        };
        let rects = layout.arrange(gfx::Size::new(110.0, 50.0), &[gfx::Size::new(50.0, 10.0)]);

        assert_eq!(origins(&rects), vec![(55.0, 5.0)]);
    }

    #[test]
    fn test_empty_layout() {
        assert!(FlowLayout::default()
            .arrange(gfx::Size::new(10.0, 10.0), &[])
            .is_empty());
    }
}
