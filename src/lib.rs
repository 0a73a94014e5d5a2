//! Flappy Memory - a side-scrolling pipe-dodging mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `driver`: Frame loop driver with explicit start/stop lifecycle
//! - `clock`: Bounded per-frame delta
//! - `input`: Raw key/pointer events mapped to logical actions
//! - `snapshot`: Read-only per-frame view handed to the renderer
//! - `config`: Tunable playfield and physics constants

pub mod asset;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod sim;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use asset::{AssetHandle, AssetStatus};
pub use clock::FrameClock;
pub use config::GameConfig;
pub use driver::LoopDriver;
pub use error::ConfigError;
pub use input::{Action, InputQueue, KeyCode, RawInput};
pub use snapshot::RenderSnapshot;

/// Game configuration defaults
pub mod consts {
    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 420.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Vertical velocity set by a flap (pixels/s, negative is up)
    pub const FLAP_VELOCITY: f32 = -520.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 120.0;
    /// Start height as a fraction of world height (0.45 * 640 = 288)
    pub const BIRD_START_RATIO: f32 = 0.45;
    pub const BIRD_RADIUS: f32 = 18.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_GAP: f32 = 160.0;
    pub const PIPE_SPEED: f32 = 220.0;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 1.25;
    /// Minimum distance between the gap and the top/bottom of the world
    pub const PIPE_MARGIN: f32 = 70.0;
    /// New pipes appear this far past the right edge
    pub const SPAWN_LEAD: f32 = 30.0;
    /// Pipes are culled once their trailing edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 20.0;

    /// Upper bound on a single frame delta (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Idle bob while waiting for the first flap
    pub const IDLE_BOB_AMPLITUDE: f32 = 8.0;
    pub const IDLE_BOB_RATE: f32 = 4.0; // radians per second

    /// Impact pulse decay (units per second)
    pub const IMPACT_DECAY: f32 = 4.0;

    /// Tilt hint: vy / TILT_VELOCITY_SCALE, clamped to [TILT_MIN, TILT_MAX]
    pub const TILT_VELOCITY_SCALE: f32 = 600.0;
    pub const TILT_MIN: f32 = -0.6;
    pub const TILT_MAX: f32 = 1.1;
}
