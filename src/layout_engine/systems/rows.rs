use super::{LayoutCalcInputs, LayoutSystem};
use crate::layout_engine::utils::{clamp_extent, span, span_offset};
use crate::sys::geometry::Rect;

/// Stacked rows of equal height, each spanning the full width.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RowsLayoutSystem;

impl LayoutSystem for RowsLayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect> {
        let gap = inputs.gap;
        let height = span(inputs.usable_height(), gap, count as u32);
        let width = clamp_extent(inputs.screen.width.checked_sub(gap.saturating_mul(2)), "width");
        (0..count as u32)
            .map(|i| {
                Rect::new(gap, span_offset(inputs.top_bar_height, gap, height, i), width, height)
            })
            .collect()
    }
}
