//! Painting: window frames, the top bar, and the incremental renderer.

pub mod frame;
pub mod renderer;

pub use frame::Palette;
pub use renderer::{RenderOutcome, Renderer};
