//! Input handling. The controller maps key events to commands; the reactor
//! applies each command to the store and reconciles the screen.

pub mod reactor;
pub mod wm_controller;
