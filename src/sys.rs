//! The host boundary: pixels, geometry, and keys.

pub mod framebuffer;
pub mod geometry;
pub mod hotkey;
