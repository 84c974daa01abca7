use tracing::warn;

use super::systems::LayoutCalcInputs;
use crate::sys::geometry::Rect;

/// Clamps a computed extent to at least one pixel. `None` means the
/// subtraction that produced it would have underflowed.
pub(crate) fn clamp_extent(value: Option<u32>, what: &str) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => {
            warn!(what, "gap configuration leaves no room, clamping to 1px");
            1
        }
    }
}

/// Splits `total` into `count` equal spans separated (and surrounded) by
/// `gap`. Integer division: the remainder is dropped.
pub(crate) fn span(total: u32, gap: u32, count: u32) -> u32 {
    let count = count.max(1);
    let gaps = gap.checked_mul(count + 1);
    let free = gaps.and_then(|gaps| total.checked_sub(gaps));
    clamp_extent(free.map(|free| free / count), "span")
}

/// Offset of the `index`th span along one axis.
pub(crate) fn span_offset(start: u32, gap: u32, extent: u32, index: u32) -> u32 {
    start.saturating_add(gap).saturating_add(index.saturating_mul(extent.saturating_add(gap)))
}

/// The whole usable area below the top bar, inset by one gap on every side.
pub(crate) fn compute_tiling_area(inputs: &LayoutCalcInputs) -> Rect {
    Rect::new(
        inputs.gap,
        inputs.top_bar_height.saturating_add(inputs.gap),
        clamp_extent(
            inputs.screen.width.checked_sub(inputs.gap.saturating_mul(2)),
            "width",
        ),
        clamp_extent(inputs.usable_height().checked_sub(inputs.gap), "height"),
    )
}
