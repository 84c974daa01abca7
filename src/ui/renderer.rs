//! Incremental redraw.
//!
//! The renderer remembers what it last painted and compares the current
//! workspace against that snapshot:
//! - a different window count, layout kind, workspace, or screen size is a
//!   structural change: the old frames are erased and everything is laid out
//!   and drawn again;
//! - a different focus index alone is cosmetic: only the previously focused
//!   and the newly focused frame are repainted;
//! - anything else draws nothing.

use tracing::{debug, trace};

use super::frame::{Palette, draw_window_frame, glyph_rect, top_bar_rect};
use crate::layout_engine::{LayoutEngine, LayoutKind, WindowPosition};
use crate::model::{MAX_WINDOWS_PER_WORKSPACE, Workspace};
use crate::sys::framebuffer::Canvas;
use crate::sys::geometry::Size;

/// What a call to [`Renderer::render`] repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Unchanged,
    /// Two frames repainted (one when both indices name the same slot).
    Focus { from: usize, to: usize },
    Structural { windows: usize, kind: LayoutKind },
}

#[derive(Debug, Clone)]
struct Snapshot {
    workspace: usize,
    screen: Size,
    positions: heapless::Vec<WindowPosition, MAX_WINDOWS_PER_WORKSPACE>,
    kind: LayoutKind,
    count: usize,
    focused: usize,
}

pub struct Renderer {
    top_bar_height: u32,
    palette: Palette,
    cache: Option<Snapshot>,
}

impl Renderer {
    pub fn new(top_bar_height: u32, palette: Palette) -> Self {
        Self { top_bar_height, palette, cache: None }
    }

    pub fn palette(&self) -> &Palette { &self.palette }

    /// Forgets the snapshot so the next render repaints the whole screen.
    pub fn invalidate(&mut self) { self.cache = None; }

    /// Positions painted by the last structural render.
    pub fn cached_positions(&self) -> &[WindowPosition] {
        match &self.cache {
            Some(snapshot) => &snapshot.positions,
            None => &[],
        }
    }

    pub fn render(
        &mut self,
        workspace_index: usize,
        workspace: &Workspace,
        canvas: &mut impl Canvas,
    ) -> RenderOutcome {
        let screen = canvas.size();
        let engine = LayoutEngine::new(screen, self.top_bar_height);
        let layout = workspace.layout();
        let count = workspace.window_count();
        let focused = workspace.focused_index();

        match self.cache.as_mut() {
            Some(snapshot)
                if snapshot.workspace == workspace_index
                    && snapshot.screen == screen
                    && snapshot.count == count
                    && snapshot.kind == layout.kind =>
            {
                if snapshot.focused == focused {
                    trace!("nothing to redraw");
                    return RenderOutcome::Unchanged;
                }
                let from = snapshot.focused;
                snapshot.focused = focused;

                let positions = engine.positions(workspace.windows(), layout);
                if let Some(old) = positions.get(from) {
                    draw_window_frame(canvas, old.rect, layout, false, self.palette.window);
                }
                if let Some(new) = positions.get(focused) {
                    draw_window_frame(canvas, new.rect, layout, true, self.palette.window);
                }
                debug!(from, to = focused, "focus redraw");
                RenderOutcome::Focus { from, to: focused }
            }
            _ => self.render_structural(workspace_index, workspace, &engine, canvas),
        }
    }

    fn render_structural(
        &mut self,
        workspace_index: usize,
        workspace: &Workspace,
        engine: &LayoutEngine,
        canvas: &mut impl Canvas,
    ) -> RenderOutcome {
        let screen = engine.screen();
        let layout = workspace.layout();
        let background = self.palette.background;

        match self.cache.take() {
            Some(old) if old.screen == screen => {
                for position in &old.positions {
                    canvas.fill_rect(position.rect, background);
                }
                if old.count == 0 {
                    canvas.fill_rect(glyph_rect(screen), background);
                }
            }
            _ => {
                canvas.fill_rect(screen.bounds(), background);
                canvas.fill_rect(top_bar_rect(screen, self.top_bar_height), self.palette.top_bar);
            }
        }

        let positions = engine.positions(workspace.windows(), layout);
        let focused = workspace.focused_index();
        if positions.is_empty() {
            canvas.fill_rect(glyph_rect(screen), self.palette.empty_desktop);
        } else {
            // Focused frame last so it stays on top where frames overlap.
            for (i, position) in positions.iter().enumerate().filter(|(i, _)| *i != focused) {
                trace!(index = i, rect = ?position.rect, "drawing frame");
                draw_window_frame(canvas, position.rect, layout, false, self.palette.window);
            }
            if let Some(position) = positions.get(focused) {
                draw_window_frame(canvas, position.rect, layout, true, self.palette.window);
            }
        }

        let count = positions.len();
        self.cache = Some(Snapshot {
            workspace: workspace_index,
            screen,
            positions: positions.into_iter().collect(),
            kind: layout.kind,
            count,
            focused,
        });
        debug!(
            workspace = workspace_index,
            windows = count,
            kind = layout.kind.name(),
            "structural redraw"
        );
        RenderOutcome::Structural { windows: count, kind: layout.kind }
    }
}
