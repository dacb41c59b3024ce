//! Keyboard input mapped to scene actions.
//!
//! # Invariants
//! - Edit keys fire once per physical press, regardless of frame rate or key repeat.
//! - Rotate keys fire once per processed frame while held.
//! - Nothing here depends on the windowing backend.

pub mod action;
pub mod keyboard;
pub mod latch;

pub use action::Action;
pub use keyboard::{Key, Keyboard};
pub use latch::{KeyLatch, LatchState};
