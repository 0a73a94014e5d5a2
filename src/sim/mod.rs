//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (pipes in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CrashCause, Rect, circle_rect_collision, first_collision};
pub use score::ScoreTracker;
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, Session};
pub use tick::{TickInput, apply_action, tick};
