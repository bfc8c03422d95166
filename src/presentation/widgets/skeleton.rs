//! Skeleton placeholder widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::infrastructure::config::SkeletonVariant;

const SHADES: [char; 3] = ['░', '▒', '▓'];
const BAND_WIDTH: u16 = 6;

/// Layout-stable stand-in drawn while an image is loading.
///
/// Purely decorative: it renders no text and owns no state beyond the tick
/// passed in per frame. The shimmer band sweeps with the tick unless
/// animation is off.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonWidget {
    variant: SkeletonVariant,
    animate: bool,
    tick: u64,
}

impl SkeletonWidget {
    /// Creates a skeleton of the given shape.
    #[must_use]
    pub const fn new(variant: SkeletonVariant) -> Self {
        Self {
            variant,
            animate: true,
            tick: 0,
        }
    }

    /// Enables or disables the shimmer animation.
    #[must_use]
    pub const fn animated(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Sets the frame tick driving the shimmer.
    #[must_use]
    pub const fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn covers(self, area: Rect, x: u16, y: u16) -> bool {
        match self.variant {
            SkeletonVariant::Rectangular => true,
            SkeletonVariant::Rounded => {
                let left = x == area.left();
                let right = x == area.right().saturating_sub(1);
                let top = y == area.top();
                let bottom = y == area.bottom().saturating_sub(1);
                !((left || right) && (top || bottom))
            }
            SkeletonVariant::Circular => {
                let rx = f64::from(area.width) / 2.0;
                let ry = f64::from(area.height) / 2.0;
                if rx < 0.5 || ry < 0.5 {
                    return true;
                }
                let cx = f64::from(area.x) + rx - 0.5;
                let cy = f64::from(area.y) + ry - 0.5;
                let dx = (f64::from(x) - cx) / rx;
                let dy = (f64::from(y) - cy) / ry;
                dx.mul_add(dx, dy * dy) <= 1.0
            }
        }
    }

    fn shade(self, x: u16, y: u16) -> char {
        if !self.animate {
            return SHADES[0];
        }
        let band = (self.tick % u64::from(BAND_WIDTH * 2)) as i32;
        let pos = (i32::from(x) + i32::from(y) / 2 - band).rem_euclid(i32::from(BAND_WIDTH * 2));
        if pos < i32::from(BAND_WIDTH) / 2 {
            SHADES[2]
        } else if pos < i32::from(BAND_WIDTH) {
            SHADES[1]
        } else {
            SHADES[0]
        }
    }
}

impl Widget for SkeletonWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if !self.covers(area, x, y) {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(self.shade(x, y)).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn rendered(widget: SkeletonWidget, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).unwrap().symbol()
    }

    fn is_shade(s: &str) -> bool {
        matches!(s, "░" | "▒" | "▓")
    }

    #[test_case(SkeletonVariant::Rectangular; "rectangular")]
    #[test_case(SkeletonVariant::Rounded; "rounded")]
    #[test_case(SkeletonVariant::Circular; "circular")]
    fn test_center_is_filled(variant: SkeletonVariant) {
        let buf = rendered(SkeletonWidget::new(variant), 10, 6);
        assert!(is_shade(symbol(&buf, 5, 3)));
    }

    #[test]
    fn test_rectangular_fills_corners() {
        let buf = rendered(SkeletonWidget::new(SkeletonVariant::Rectangular), 10, 6);
        assert!(is_shade(symbol(&buf, 0, 0)));
        assert!(is_shade(symbol(&buf, 9, 5)));
    }

    #[test]
    fn test_rounded_clips_corners() {
        let buf = rendered(SkeletonWidget::new(SkeletonVariant::Rounded), 10, 6);
        assert_eq!(symbol(&buf, 0, 0), " ");
        assert_eq!(symbol(&buf, 9, 0), " ");
        assert_eq!(symbol(&buf, 0, 5), " ");
        assert_eq!(symbol(&buf, 9, 5), " ");
        assert!(is_shade(symbol(&buf, 1, 0)));
    }

    #[test]
    fn test_circular_clips_corners() {
        let buf = rendered(SkeletonWidget::new(SkeletonVariant::Circular), 12, 8);
        assert_eq!(symbol(&buf, 0, 0), " ");
        assert_eq!(symbol(&buf, 11, 7), " ");
        assert!(is_shade(symbol(&buf, 6, 4)));
    }

    #[test]
    fn test_static_without_animation() {
        let a = rendered(
            SkeletonWidget::new(SkeletonVariant::Rectangular)
                .animated(false)
                .tick(0),
            8,
            4,
        );
        let b = rendered(
            SkeletonWidget::new(SkeletonVariant::Rectangular)
                .animated(false)
                .tick(7),
            8,
            4,
        );
        assert_eq!(a, b);
        assert_eq!(symbol(&a, 3, 2), "░");
    }

    #[test]
    fn test_shimmer_moves_with_tick() {
        let a = rendered(SkeletonWidget::new(SkeletonVariant::Rectangular).tick(0), 8, 4);
        let b = rendered(SkeletonWidget::new(SkeletonVariant::Rectangular).tick(3), 8, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_renders_no_text() {
        // The placeholder is decorative; it must never contain readable text.
        let buf = rendered(SkeletonWidget::new(SkeletonVariant::Rectangular), 8, 4);
        for y in 0..4 {
            for x in 0..8 {
                assert!(is_shade(symbol(&buf, x, y)));
            }
        }
    }
}
