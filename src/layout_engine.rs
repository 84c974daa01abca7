//! Tiling geometry. Everything in here is a pure function of the window
//! count, the active [`LayoutConfig`] and the screen size.

pub mod engine;
pub(crate) mod graph;
pub(crate) mod systems;
pub(crate) mod utils;

pub use engine::{LayoutConfig, LayoutEngine, LayoutPresets, WindowPosition};
pub use graph::{FocusDirection, LAYOUT_COUNT, LayoutKind};

/// Height of the bar reserved at the top of the screen.
pub const DEFAULT_TOP_BAR_HEIGHT: u32 = 24;
pub const DEFAULT_GAP: u32 = 4;
pub const DEFAULT_BORDER: u32 = 2;
/// Focused windows draw their border this many times thicker.
pub const FOCUSED_BORDER_MULTIPLIER: u32 = 3;

static_assertions::const_assert!(FOCUSED_BORDER_MULTIPLIER >= 1);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::model::MAX_WINDOWS_PER_WORKSPACE;
    use crate::sys::framebuffer::Color;
    use crate::sys::geometry::{Rect, Size};

    fn config(kind: LayoutKind) -> LayoutConfig {
        LayoutConfig {
            kind,
            gap: DEFAULT_GAP,
            border: DEFAULT_BORDER,
            border_color: Color(0x928374),
            master_ratio: if kind == LayoutKind::MasterStack { 60 } else { 50 },
        }
    }

    fn engine() -> LayoutEngine { LayoutEngine::new(Size::new(800, 600), DEFAULT_TOP_BAR_HEIGHT) }

    #[test]
    fn grid_with_three_windows() {
        let rects = engine().calculate(3, &config(LayoutKind::Grid));
        assert_eq!(
            rects,
            vec![
                Rect::new(4, 28, 394, 280),
                Rect::new(402, 28, 394, 280),
                Rect::new(4, 312, 394, 280),
            ]
        );
    }

    #[test]
    fn master_stack_with_three_windows() {
        let rects = engine().calculate(3, &config(LayoutKind::MasterStack));
        assert_eq!(
            rects,
            vec![
                Rect::new(4, 28, 472, 568),
                Rect::new(480, 28, 316, 280),
                Rect::new(480, 312, 316, 280),
            ]
        );
    }

    #[test]
    fn master_stack_with_one_window_is_fullscreen() {
        let e = engine();
        assert_eq!(
            e.calculate(1, &config(LayoutKind::MasterStack)),
            e.calculate(1, &config(LayoutKind::Fullscreen)),
        );
        assert_eq!(
            e.calculate(1, &config(LayoutKind::Fullscreen)),
            vec![Rect::new(4, 28, 792, 568)]
        );
    }

    #[test]
    fn horizontal_drops_remainder_pixels() {
        let rects = engine().calculate(3, &config(LayoutKind::Horizontal));
        assert_eq!(
            rects,
            vec![
                Rect::new(4, 28, 261, 568),
                Rect::new(269, 28, 261, 568),
                Rect::new(534, 28, 261, 568),
            ]
        );
        // 800 - 795 = 5: the right gap plus one lost pixel.
        assert_eq!(rects[2].right(), 795);
    }

    #[test]
    fn vertical_rows() {
        let rects = engine().calculate(2, &config(LayoutKind::Vertical));
        assert_eq!(
            rects,
            vec![Rect::new(4, 28, 792, 280), Rect::new(4, 312, 792, 280)]
        );
    }

    #[test]
    fn zero_windows_produce_nothing() {
        for kind in LayoutKind::iter() {
            assert!(engine().calculate(0, &config(kind)).is_empty());
        }
    }

    #[test]
    fn count_is_capped_at_capacity() {
        let rects = engine().calculate(MAX_WINDOWS_PER_WORKSPACE + 3, &config(LayoutKind::Grid));
        assert_eq!(rects.len(), MAX_WINDOWS_PER_WORKSPACE);
    }

    #[test]
    fn oversized_gap_clamps_to_one_pixel() {
        let mut cfg = config(LayoutKind::Horizontal);
        cfg.gap = 200;
        let rects = engine().calculate(6, &cfg);
        assert_eq!(rects.len(), 6);
        assert!(rects.iter().all(|r| r.width == 1));
        assert!(rects.iter().all(|r| r.height >= 1));
    }

    #[test]
    fn every_kind_stays_on_screen_without_overlap() {
        let e = engine();
        let usable = Rect::new(0, DEFAULT_TOP_BAR_HEIGHT, 800, 600 - DEFAULT_TOP_BAR_HEIGHT);
        for kind in LayoutKind::iter() {
            for n in 1..=MAX_WINDOWS_PER_WORKSPACE {
                let rects = e.calculate(n, &config(kind));
                assert_eq!(rects.len(), n, "{kind:?} with {n} windows");
                for (i, a) in rects.iter().enumerate() {
                    assert!(usable.contains(a), "{kind:?}/{n}: {a:?} off screen");
                    if kind.overlaps() {
                        continue;
                    }
                    for b in &rects[i + 1..] {
                        assert!(!a.intersects(b), "{kind:?}/{n}: {a:?} overlaps {b:?}");
                    }
                }
            }
        }
    }

    proptest! {
        #[test]
        fn sane_configs_stay_in_bounds(
            width in 320u32..4096,
            height in 240u32..2160,
            gap in 0u32..16,
            ratio in 10u32..90,
            n in 1usize..=MAX_WINDOWS_PER_WORKSPACE,
        ) {
            let e = LayoutEngine::new(Size::new(width, height), DEFAULT_TOP_BAR_HEIGHT);
            let usable = Rect::new(0, DEFAULT_TOP_BAR_HEIGHT, width, height - DEFAULT_TOP_BAR_HEIGHT);
            for kind in LayoutKind::iter() {
                let mut cfg = config(kind);
                cfg.gap = gap;
                cfg.master_ratio = ratio;
                let rects = e.calculate(n, &cfg);
                prop_assert_eq!(rects.len(), n);
                for (i, a) in rects.iter().enumerate() {
                    prop_assert!(usable.contains(a), "{:?}: {:?} off screen", kind, a);
                    prop_assert!(!a.is_empty());
                    if !kind.overlaps() {
                        for b in &rects[i + 1..] {
                            prop_assert!(!a.intersects(b), "{:?}: {:?} overlaps {:?}", kind, a, b);
                        }
                    }
                }
            }
        }
    }
}
