use std::fmt;

use thiserror::Error;
use tracing::trace;

use crate::layout_engine::{FocusDirection, LayoutConfig};

pub const MAX_WINDOWS_PER_WORKSPACE: usize = 6;
/// Longest window title in bytes.
pub const MAX_TITLE_LEN: usize = 31;

static_assertions::const_assert!(MAX_WINDOWS_PER_WORKSPACE > 0);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("window title is {len} bytes long, at most {MAX_TITLE_LEN} fit")]
pub struct TitleTooLong {
    pub len: usize,
}

/// A window title stored inline with a fixed capacity.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct WindowTitle(heapless::String<MAX_TITLE_LEN>);

impl WindowTitle {
    pub fn new(title: &str) -> Result<Self, TitleTooLong> {
        if title.len() > MAX_TITLE_LEN {
            return Err(TitleTooLong { len: title.len() });
        }
        Ok(Self::truncated(title))
    }

    /// Keeps the longest prefix of `title` that fits, cutting only on a
    /// character boundary.
    pub fn truncated(title: &str) -> Self {
        let mut out = heapless::String::new();
        for ch in title.chars() {
            if out.push(ch).is_err() {
                trace!(title, kept = out.len(), "truncated window title");
                break;
            }
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str { self.0.as_str() }
}

impl fmt::Debug for WindowTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(self.as_str(), f) }
}

impl fmt::Display for WindowTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(u32);

impl WindowHandle {
    pub const fn new(raw: u32) -> Self { Self(raw) }

    pub fn get(self) -> u32 { self.0 }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    title: WindowTitle,
    handle: WindowHandle,
    is_open: bool,
}

impl Window {
    pub fn new(title: WindowTitle, handle: WindowHandle) -> Self {
        Self { title, handle, is_open: true }
    }

    pub fn title(&self) -> &WindowTitle { &self.title }

    pub fn handle(&self) -> WindowHandle { self.handle }

    pub fn is_open(&self) -> bool { self.is_open }
}

/// An ordered, bounded set of windows plus the layout they are tiled with.
///
/// Invariants, upheld by every method:
/// - `windows.len() <= MAX_WINDOWS_PER_WORKSPACE`
/// - `focused < windows.len()` when non-empty, `focused == 0` when empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    windows: heapless::Vec<Window, MAX_WINDOWS_PER_WORKSPACE>,
    layout: LayoutConfig,
    focused: usize,
}

impl Workspace {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            windows: heapless::Vec::new(),
            layout,
            focused: 0,
        }
    }

    pub fn windows(&self) -> &[Window] { &self.windows }

    pub fn window_count(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn is_full(&self) -> bool { self.windows.is_full() }

    pub fn layout(&self) -> &LayoutConfig { &self.layout }

    pub fn focused_index(&self) -> usize { self.focused }

    pub fn focused_window(&self) -> Option<&Window> { self.windows.get(self.focused) }

    /// Appends `window` and focuses it. A full workspace hands the window back.
    pub fn push(&mut self, window: Window) -> Result<(), Window> {
        self.windows.push(window)?;
        self.focused = self.windows.len() - 1;
        self.debug_check();
        Ok(())
    }

    /// Removes the focused window, sliding later windows down by one. Focus
    /// stays on the same index (now the next window) unless that index fell off
    /// the end, in which case it moves to the new last window.
    pub fn remove_focused(&mut self) -> Option<Window> {
        if self.windows.is_empty() {
            return None;
        }
        let removed = self.windows.remove(self.focused);
        if self.windows.is_empty() {
            self.focused = 0;
        } else if self.focused >= self.windows.len() {
            self.focused = self.windows.len() - 1;
        }
        self.debug_check();
        Some(removed)
    }

    /// Moves focus one step, wrapping at both ends. Returns `false` (and does
    /// nothing) on an empty workspace.
    pub fn cycle_focus(&mut self, direction: FocusDirection) -> bool {
        let count = self.windows.len();
        if count == 0 {
            return false;
        }
        self.focused = match direction {
            FocusDirection::Next => (self.focused + 1) % count,
            FocusDirection::Prev => (self.focused + count - 1) % count,
        };
        self.debug_check();
        true
    }

    /// Replaces the whole layout configuration.
    pub fn set_layout(&mut self, layout: LayoutConfig) { self.layout = layout; }

    fn debug_check(&self) {
        debug_assert!(self.windows.len() <= MAX_WINDOWS_PER_WORKSPACE);
        debug_assert!(
            (self.windows.is_empty() && self.focused == 0) || self.focused < self.windows.len(),
            "focus {} out of range for {} windows",
            self.focused,
            self.windows.len()
        );
    }
}
