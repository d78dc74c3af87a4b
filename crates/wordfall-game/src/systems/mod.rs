//! The per-tick systems.
//!
//! Within one tick they run in a fixed order -- store commit, spawn, typing,
//! motion, render sync, HUD sync -- and communicate only through the entity
//! store and the session stats, never by calling each other.

pub mod hud;
pub mod motion;
pub mod render_sync;
pub mod spawn;
pub mod typing;

pub use spawn::SpawnSystem;
pub use typing::{TypingOutcome, TypingSystem};
