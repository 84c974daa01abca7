//! The reactor owns the window manager state and the screen. Each command is
//! one store transition followed by one render reconciliation, run to
//! completion before the next command is looked at.

use tracing::{debug, instrument, trace};

use super::wm_controller::WmCommand;
use crate::model::WorkspaceStore;
use crate::sys::framebuffer::Canvas;
use crate::ui::{RenderOutcome, Renderer};

pub struct Reactor<C> {
    store: WorkspaceStore,
    renderer: Renderer,
    canvas: C,
}

impl<C: Canvas> Reactor<C> {
    /// Builds the reactor and paints the initial frame.
    pub fn new(store: WorkspaceStore, renderer: Renderer, canvas: C) -> Self {
        let mut reactor = Reactor { store, renderer, canvas };
        reactor.redraw();
        reactor
    }

    pub fn store(&self) -> &WorkspaceStore { &self.store }

    pub fn renderer(&self) -> &Renderer { &self.renderer }

    pub fn canvas(&self) -> &C { &self.canvas }

    pub fn into_canvas(self) -> C { self.canvas }

    #[instrument(name = "reactor::handle_command", skip(self))]
    pub fn handle_command(&mut self, command: &WmCommand) -> RenderOutcome {
        if !self.store.apply(command) {
            trace!("command left state unchanged");
        }
        self.redraw()
    }

    /// Throws away the render cache and repaints everything, e.g. after the
    /// host clobbered the framebuffer.
    pub fn force_redraw(&mut self) -> RenderOutcome {
        self.renderer.invalidate();
        self.redraw()
    }

    fn redraw(&mut self) -> RenderOutcome {
        let outcome = self.renderer.render(
            self.store.active_index(),
            self.store.active_workspace(),
            &mut self.canvas,
        );
        debug!(?outcome, "redraw");
        outcome
    }
}
