use enum_dispatch::enum_dispatch;

use super::engine::LayoutConfig;
use super::LayoutKind;
use crate::sys::geometry::{Rect, Size};

#[derive(Clone, Copy, Debug)]
pub(crate) struct LayoutCalcInputs {
    pub(crate) screen: Size,
    pub(crate) top_bar_height: u32,
    pub(crate) gap: u32,
    pub(crate) master_ratio: u32,
}

impl LayoutCalcInputs {
    pub(crate) fn new(screen: Size, top_bar_height: u32, config: &LayoutConfig) -> Self {
        Self {
            screen,
            top_bar_height,
            gap: config.gap,
            master_ratio: config.master_ratio,
        }
    }

    /// Screen height minus the top bar and one gap.
    pub(crate) fn usable_height(&self) -> u32 {
        self.screen
            .height
            .saturating_sub(self.top_bar_height)
            .saturating_sub(self.gap)
    }

    /// First row available to windows.
    pub(crate) fn origin_y(&self) -> u32 { self.top_bar_height.saturating_add(self.gap) }
}

/// One geometry policy. Implementations return exactly `count` rectangles
/// (`1..=MAX_WINDOWS_PER_WORKSPACE`) in window order.
#[enum_dispatch]
pub(crate) trait LayoutSystem {
    fn calculate_layout(&self, count: usize, inputs: &LayoutCalcInputs) -> Vec<Rect>;
}

mod columns;
pub(crate) use columns::ColumnsLayoutSystem;
mod rows;
pub(crate) use rows::RowsLayoutSystem;
mod grid;
pub(crate) use grid::GridLayoutSystem;
mod monocle;
pub(crate) use monocle::MonocleLayoutSystem;
mod master_stack;
pub(crate) use master_stack::MasterStackLayoutSystem;

#[derive(Debug, Clone, Copy)]
#[enum_dispatch(LayoutSystem)]
pub(crate) enum LayoutSystemKind {
    Horizontal(ColumnsLayoutSystem),
    Vertical(RowsLayoutSystem),
    Grid(GridLayoutSystem),
    Fullscreen(MonocleLayoutSystem),
    MasterStack(MasterStackLayoutSystem),
}

impl From<LayoutKind> for LayoutSystemKind {
    fn from(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Horizontal => ColumnsLayoutSystem.into(),
            LayoutKind::Vertical => RowsLayoutSystem.into(),
            LayoutKind::Grid => GridLayoutSystem.into(),
            LayoutKind::Fullscreen => MonocleLayoutSystem.into(),
            LayoutKind::MasterStack => MasterStackLayoutSystem.into(),
        }
    }
}
