use super::{LayoutCalcInputs, LayoutSystem};
use crate::layout_engine::utils::{span, span_offset};
use crate::sys::geometry::Rect;

const GRID_COLUMNS: u32 = 2;

/// Two columns, as many rows as needed, filled row-major. An odd window count
/// leaves the last cell of the bottom row empty.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct GridLayoutSystem;

impl LayoutSystem for GridLayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect> {
        let gap = inputs.gap;
        let count = count as u32;
        let rows = count.div_ceil(GRID_COLUMNS);
        let cell_width = span(inputs.screen.width, gap, GRID_COLUMNS);
        let cell_height = span(inputs.usable_height(), gap, rows);
        (0..count)
            .map(|i| {
                let col = i % GRID_COLUMNS;
                let row = i / GRID_COLUMNS;
                Rect::new(
                    span_offset(0, gap, cell_width, col),
                    span_offset(inputs.top_bar_height, gap, cell_height, row),
                    cell_width,
                    cell_height,
                )
            })
            .collect()
    }
}
