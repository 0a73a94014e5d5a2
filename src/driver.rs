//! Loop driver
//!
//! Owns the game state and advances it once per rendering opportunity.
//! The host calls [`LoopDriver::frame`] from its frame callback and keeps
//! rescheduling only while [`LoopDriver::is_running`] holds. After
//! [`LoopDriver::stop`] no frame mutates state and no input is accepted.

use crate::asset::{AssetHandle, AssetStatus};
use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::{Action, InputQueue, RawInput};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::snapshot::RenderSnapshot;

/// Game instance holding all state
#[derive(Debug)]
pub struct LoopDriver {
    state: GameState,
    clock: FrameClock,
    inputs: InputQueue,
    asset: AssetHandle,
    running: bool,
    frames: u64,
    last_events: Vec<GameEvent>,
}

impl LoopDriver {
    /// Validate `config` and build a stopped driver in Ready
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let clock = FrameClock::new(config.max_frame_dt);
        let asset = AssetHandle::new(config.entity_asset_source.clone());
        let state = GameState::new(config, seed);
        log::info!(
            "Game created: {}x{} world, seed {}",
            state.config.world_width,
            state.config.world_height,
            state.seed
        );
        Ok(Self {
            state,
            clock,
            inputs: InputQueue::new(),
            asset,
            running: false,
            frames: 0,
            last_events: Vec::new(),
        })
    }

    /// Begin accepting frames. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.clock.reset();
        log::info!("Loop started");
        true
    }

    /// Stop the loop. Pending input is discarded; later frames and posts
    /// are ignored until `start` is called again.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.inputs.clear();
        log::info!("Loop stopped after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue a logical action for the next frame
    pub fn post(&mut self, action: Action) -> bool {
        if !self.running {
            return false;
        }
        self.inputs.push(action);
        true
    }

    /// Map a raw event using the phase last shown to the player and queue it
    pub fn dispatch(&mut self, raw: RawInput) -> Option<Action> {
        if !self.running {
            return None;
        }
        self.inputs.dispatch(raw, self.state.phase())
    }

    /// Advance one frame at host timestamp `now_ms`.
    /// Returns the snapshot to draw, or `None` when stopped.
    pub fn frame(&mut self, now_ms: f64) -> Option<RenderSnapshot> {
        if !self.running {
            return None;
        }

        let dt = self.clock.tick(now_ms);
        let input = TickInput::new(self.inputs.drain());
        tick(&mut self.state, &input, dt);
        self.frames += 1;

        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            log::trace!("frame {}: {:?}", self.frames, event);
        }

        Some(self.snapshot())
    }

    /// Snapshot of the current state without advancing
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, self.asset.status())
    }

    /// Events produced by the most recent frame
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn status(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn best(&self) -> u32 {
        self.state.best
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn asset(&self) -> &AssetHandle {
        &self.asset
    }

    pub fn asset_status(&self) -> AssetStatus {
        self.asset.status()
    }

    /// Host callback: image finished loading
    pub fn asset_loaded(&mut self) {
        self.asset.mark_ready();
    }

    /// Host callback: image failed to load
    pub fn asset_failed(&mut self, reason: impl Into<String>) {
        self.asset.mark_failed(reason);
    }
}
