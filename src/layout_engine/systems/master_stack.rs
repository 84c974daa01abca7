use super::{LayoutCalcInputs, LayoutSystem};
use crate::layout_engine::utils::{clamp_extent, compute_tiling_area, span, span_offset};
use crate::sys::geometry::Rect;

/// Window 0 takes `master_ratio` percent of the screen width on the left; the
/// rest share the remaining column, stacked top to bottom.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MasterStackLayoutSystem;

impl MasterStackLayoutSystem {
    fn master_width(inputs: &LayoutCalcInputs) -> u32 {
        let ratio = u64::from(inputs.master_ratio.min(100));
        let share = (u64::from(inputs.screen.width) * ratio / 100) as u32;
        clamp_extent(share.checked_sub(inputs.gap.saturating_mul(2)), "master width")
    }
}

impl LayoutSystem for MasterStackLayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect> {
        let area = compute_tiling_area(inputs);
        if count <= 1 {
            return vec![area; count];
        }

        let gap = inputs.gap;
        let master_width = Self::master_width(inputs);
        let stack_x = master_width.saturating_add(gap.saturating_mul(2));
        let stack_width = clamp_extent(
            inputs
                .screen
                .width
                .checked_sub(master_width)
                .and_then(|w| w.checked_sub(gap.saturating_mul(3))),
            "stack width",
        );
        let stack_count = count as u32 - 1;
        let stack_height = span(inputs.usable_height(), gap, stack_count);

        let master = Rect::new(area.x, area.y, master_width, area.height);
        let stack = (0..stack_count).map(|i| {
            Rect::new(
                stack_x,
                span_offset(inputs.top_bar_height, gap, stack_height, i),
                stack_width,
                stack_height,
            )
        });
        std::iter::once(master).chain(stack).collect()
    }
}
