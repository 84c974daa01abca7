use serde::{Deserialize, Serialize};
use tracing::trace;

use super::systems::{LayoutCalcInputs, LayoutSystem, LayoutSystemKind};
use super::{LAYOUT_COUNT, LayoutKind};
use crate::model::{MAX_WINDOWS_PER_WORKSPACE, Window, WindowHandle};
use crate::sys::framebuffer::Color;
use crate::sys::geometry::{Rect, Size};

/// Everything a layout needs besides the window count. Workspaces swap these
/// as a whole; individual fields are never edited in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub kind: LayoutKind,
    pub gap: u32,
    pub border: u32,
    pub border_color: Color,
    /// Master column width in percent of the screen. Only MasterStack reads it.
    pub master_ratio: u32,
}

pub const DEFAULT_BORDER_COLOR: Color = Color(0x928374);
pub const DEFAULT_MASTER_RATIO: u32 = 50;
pub const DEFAULT_MASTER_STACK_RATIO: u32 = 60;

impl LayoutConfig {
    /// The built-in preset for `kind`.
    pub fn preset(kind: LayoutKind) -> Self {
        LayoutConfig {
            kind,
            gap: super::DEFAULT_GAP,
            border: super::DEFAULT_BORDER,
            border_color: DEFAULT_BORDER_COLOR,
            master_ratio: match kind {
                LayoutKind::MasterStack => DEFAULT_MASTER_STACK_RATIO,
                _ => DEFAULT_MASTER_RATIO,
            },
        }
    }
}

/// One whole [`LayoutConfig`] per layout kind. Cycling the layout swaps in
/// the preset of the next kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPresets([LayoutConfig; LAYOUT_COUNT]);

impl Default for LayoutPresets {
    fn default() -> Self { Self(std::array::from_fn(|i| LayoutConfig::preset(LayoutKind::from_index(i)))) }
}

impl LayoutPresets {
    pub fn get(&self, kind: LayoutKind) -> LayoutConfig { self.0[kind.index()] }

    /// Replaces the preset for `config.kind`.
    pub fn set(&mut self, config: LayoutConfig) { self.0[config.kind.index()] = config; }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutConfig> { self.0.iter() }
}

/// Where one window ends up on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPosition {
    pub rect: Rect,
    pub handle: WindowHandle,
}

/// Pure geometry: window count + config + screen -> rectangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEngine {
    screen: Size,
    top_bar_height: u32,
}

impl LayoutEngine {
    pub fn new(screen: Size, top_bar_height: u32) -> Self { Self { screen, top_bar_height } }

    pub fn screen(&self) -> Size { self.screen }

    pub fn top_bar_height(&self) -> u32 { self.top_bar_height }

    /// Computes exactly `count` rectangles, in window order. `count` above the
    /// per-workspace capacity is capped.
    pub fn calculate(&self, count: usize, config: &LayoutConfig) -> Vec<Rect> {
        let count = count.min(MAX_WINDOWS_PER_WORKSPACE);
        if count == 0 {
            return Vec::new();
        }
        let inputs = LayoutCalcInputs::new(self.screen, self.top_bar_height, config);
        let rects = LayoutSystemKind::from(config.kind).calculate_layout(count, &inputs);
        debug_assert_eq!(rects.len(), count);
        trace!(kind = config.kind.name(), count, ?rects, "calculated layout");
        rects
    }

    /// Lays out `windows` and tags each rectangle with its window's handle.
    pub fn positions(&self, windows: &[Window], config: &LayoutConfig) -> Vec<WindowPosition> {
        self.calculate(windows.len(), config)
            .into_iter()
            .zip(windows)
            .map(|(rect, window)| WindowPosition { rect, handle: window.handle() })
            .collect()
    }
}
