//! Render snapshot
//!
//! A read-only copy of everything the renderer needs for one frame. The
//! core never draws; the host serializes this (JSON in the browser) and
//! paints it however it likes.

use serde::Serialize;

use crate::asset::AssetStatus;
use crate::sim::{GamePhase, GameState};

/// Bird as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Rotation hint (radians), clamped
    pub tilt: f32,
}

/// One pipe pair as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    /// Top of the bottom segment
    pub bottom_y: f32,
}

/// Per-frame view of the game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub world_width: f32,
    pub world_height: f32,
    pub status: GamePhase,
    pub score: u32,
    pub best: u32,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    /// Flap pulse in [0, 1] for shake/flash effects
    pub impact: f32,
    /// Whether the bird image can be drawn (fallback circle otherwise)
    pub asset: AssetStatus,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, asset: AssetStatus) -> Self {
        let config = &state.config;
        let session = &state.session;
        let bird = &session.bird;

        Self {
            world_width: config.world_width,
            world_height: config.world_height,
            status: session.phase,
            score: session.score(),
            best: state.best,
            bird: BirdView {
                x: bird.pos.x,
                y: bird.pos.y,
                radius: bird.radius,
                tilt: bird.tilt(),
            },
            pipes: session
                .pipes
                .iter()
                .map(|p| PipeView {
                    id: p.id,
                    x: p.x,
                    width: config.pipe_width,
                    top_height: p.top_height,
                    bottom_y: p.bottom_y(config.gap),
                })
                .collect(),
            impact: session.impact,
            asset,
        }
    }

    /// Whether the image may be drawn this frame
    pub fn asset_available(&self) -> bool {
        self.asset == AssetStatus::Ready
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_capture_ready() {
        let state = GameState::new(GameConfig::default(), 1);
        let snap = RenderSnapshot::capture(&state, AssetStatus::Pending);
        assert_eq!(snap.status, GamePhase::Ready);
        assert_eq!(snap.bird.x, 120.0);
        assert_eq!(snap.bird.y, 288.0);
        assert_eq!(snap.bird.tilt, 0.0);
        assert!(snap.pipes.is_empty());
        assert!(!snap.asset_available());
    }

    #[test]
    fn test_capture_pipes_and_tilt() {
        let mut state = GameState::new(GameConfig::default(), 1);
        tick(&mut state, &TickInput::flap(), 0.0);
        let pipe = state.spawn_pipe();
        let snap = RenderSnapshot::capture(&state, AssetStatus::Ready);
        assert_eq!(snap.status, GamePhase::Running);
        // -520 / 600 is below the -0.6 clamp
        assert_eq!(snap.bird.tilt, -0.6);
        assert_eq!(snap.pipes.len(), 1);
        assert_eq!(snap.pipes[0].bottom_y, pipe.top_height + 160.0);
        assert_eq!(snap.pipes[0].width, 70.0);
        assert!(snap.asset_available());
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new(GameConfig::default(), 1);
        let json = RenderSnapshot::capture(&state, AssetStatus::Failed).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["status"], "ready");
        assert_eq!(value["asset"], "failed");
        assert_eq!(value["score"], 0);
        assert!(value["pipes"].as_array().is_some());
    }
}
