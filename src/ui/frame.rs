use crate::common::config::ColorSettings;
use crate::layout_engine::{FOCUSED_BORDER_MULTIPLIER, LayoutConfig};
use crate::sys::framebuffer::{Canvas, Color};
use crate::sys::geometry::{Rect, Size};

/// Side of the square the empty-desktop glyph is drawn as.
pub const GLYPH_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub top_bar: Color,
    pub window: Color,
    pub empty_desktop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color(0x1d2021),
            top_bar: Color(0x1d2021),
            window: Color(0x282828),
            empty_desktop: Color(0x3c3836),
        }
    }
}

impl From<&ColorSettings> for Palette {
    fn from(colors: &ColorSettings) -> Self {
        Self {
            background: colors.background,
            top_bar: colors.top_bar,
            window: colors.window,
            empty_desktop: colors.empty_desktop,
        }
    }
}

pub fn border_thickness(layout: &LayoutConfig, focused: bool) -> u32 {
    if focused {
        layout.border.saturating_mul(FOCUSED_BORDER_MULTIPLIER)
    } else {
        layout.border
    }
}

/// Paints one window: the interior inset by the border, then the four border
/// strips. The outer bounding box is the same whether or not the window is
/// focused; only the strips get thicker.
pub fn draw_window_frame(
    canvas: &mut impl Canvas,
    rect: Rect,
    layout: &LayoutConfig,
    focused: bool,
    interior: Color,
) {
    let border = border_thickness(layout, focused);
    let bw = border.min(rect.width);
    let bh = border.min(rect.height);

    let inner = rect.inset(border);
    if !inner.is_empty() {
        canvas.fill_rect(inner, interior);
    }

    let color = layout.border_color;
    canvas.fill_rect(Rect::new(rect.x, rect.y, rect.width, bh), color);
    canvas.fill_rect(Rect::new(rect.x, rect.bottom() - bh, rect.width, bh), color);
    canvas.fill_rect(Rect::new(rect.x, rect.y, bw, rect.height), color);
    canvas.fill_rect(Rect::new(rect.right() - bw, rect.y, bw, rect.height), color);
}

pub fn top_bar_rect(screen: Size, height: u32) -> Rect { Rect::new(0, 0, screen.width, height.min(screen.height)) }

/// The `~` marker shown on a workspace with no windows, centered on screen.
pub fn glyph_rect(screen: Size) -> Rect {
    Rect::new(
        screen.width.saturating_sub(GLYPH_SIZE) / 2,
        (screen.height / 2).saturating_sub(GLYPH_SIZE / 2),
        GLYPH_SIZE,
        GLYPH_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_engine::LayoutKind;
    use crate::sys::framebuffer::Framebuffer;

    const BG: Color = Color(0);
    const INTERIOR: Color = Color(0x282828);

    fn layout() -> LayoutConfig { LayoutConfig::preset(LayoutKind::Grid) }

    #[test]
    fn glyph_is_centered() {
        assert_eq!(glyph_rect(Size::new(800, 600)), Rect::new(396, 296, 8, 8));
        assert_eq!(glyph_rect(Size::new(4, 4)), Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn focused_border_is_three_times_thicker() {
        let mut fb = Framebuffer::allocate(64, 64, 64).unwrap();
        let rect = Rect::new(10, 10, 40, 40);
        let border = layout().border_color;

        draw_window_frame(&mut fb, rect, &layout(), false, INTERIOR);
        assert_eq!(fb.pixel(11, 20), Some(border));
        assert_eq!(fb.pixel(12, 20), Some(INTERIOR));
        assert_eq!(fb.pixel(9, 20), Some(BG));

        draw_window_frame(&mut fb, rect, &layout(), true, INTERIOR);
        assert_eq!(fb.pixel(15, 20), Some(border));
        assert_eq!(fb.pixel(16, 20), Some(INTERIOR));
        assert_eq!(fb.pixel(49, 49), Some(border));
        assert_eq!(fb.pixel(50, 50), Some(BG));

        // Unfocusing again must not leave the thick ring behind.
        draw_window_frame(&mut fb, rect, &layout(), false, INTERIOR);
        assert_eq!(fb.pixel(15, 20), Some(INTERIOR));
    }

    #[test]
    fn tiny_window_is_all_border() {
        let mut fb = Framebuffer::allocate(16, 16, 16).unwrap();
        draw_window_frame(&mut fb, Rect::new(2, 2, 3, 3), &layout(), true, INTERIOR);
        for y in 2..5 {
            for x in 2..5 {
                assert_eq!(fb.pixel(x, y), Some(layout().border_color));
            }
        }
        assert_eq!(fb.pixel(5, 5), Some(BG));
    }
}
