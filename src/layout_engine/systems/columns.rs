use super::{LayoutCalcInputs, LayoutSystem};
use crate::layout_engine::utils::{clamp_extent, span, span_offset};
use crate::sys::geometry::Rect;

/// Side-by-side columns of equal width, each spanning the full usable height.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ColumnsLayoutSystem;

impl LayoutSystem for ColumnsLayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect> {
        let gap = inputs.gap;
        let width = span(inputs.screen.width, gap, count as u32);
        let height = clamp_extent(inputs.usable_height().checked_sub(gap), "height");
        (0..count as u32)
            .map(|i| Rect::new(span_offset(0, gap, width, i), inputs.origin_y(), width, height))
            .collect()
    }
}
