use super::{LayoutCalcInputs, LayoutSystem};
use crate::layout_engine::utils::compute_tiling_area;
use crate::sys::geometry::Rect;

/// Every window gets the whole tiling area; they overlap completely and only
/// the focused one is meaningful.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MonocleLayoutSystem;

impl LayoutSystem for MonocleLayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect> {
        vec![compute_tiling_area(inputs); count]
    }
}
