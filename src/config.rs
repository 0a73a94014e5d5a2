//! Game configuration
//!
//! Supplied by the host at construction. Every field has a default, so a
//! host may pass a partial JSON object and override only what it needs.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Playfield, physics and pacing parameters for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    /// World width (pixels)
    pub world_width: f32,
    /// World height (pixels)
    pub world_height: f32,

    // === Bird ===
    /// Identifier/URL of the bird image; `None` draws the fallback shape
    pub entity_asset_source: Option<String>,
    /// Fixed horizontal position of the bird
    pub bird_x: f32,
    /// Start height as a fraction of world height
    pub bird_start_ratio: f32,
    /// Collision radius
    pub bird_radius: f32,

    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity a flap sets (pixels/s, must be negative)
    pub flap_velocity: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Vertical clearance between top and bottom segments
    pub gap: f32,
    /// Horizontal scroll speed (pixels/s)
    pub pipe_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Minimum top-segment height, and minimum bottom-segment height
    pub pipe_margin: f32,
    /// Spawn this far past the right edge
    pub spawn_lead: f32,
    /// Cull once the trailing edge is this far past the left edge
    pub despawn_margin: f32,

    // === Timing ===
    /// Upper bound on a single frame delta (seconds)
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            entity_asset_source: None,
            bird_x: BIRD_X,
            bird_start_ratio: BIRD_START_RATIO,
            bird_radius: BIRD_RADIUS,

            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            pipe_width: PIPE_WIDTH,
            gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            pipe_margin: PIPE_MARGIN,
            spawn_lead: SPAWN_LEAD,
            despawn_margin: DESPAWN_MARGIN,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Builder-style override of the bird image source
    pub fn with_asset_source(mut self, source: impl Into<String>) -> Self {
        self.entity_asset_source = Some(source.into());
        self
    }

    /// Consume and return self if valid
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Reject degenerate playfields up front
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("bird_radius", self.bird_radius),
            ("gravity", self.gravity),
            ("pipe_width", self.pipe_width),
            ("gap", self.gap),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval", self.spawn_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("bird_x", self.bird_x),
            ("bird_start_ratio", self.bird_start_ratio),
            ("pipe_margin", self.pipe_margin),
            ("spawn_lead", self.spawn_lead),
            ("despawn_margin", self.despawn_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(self.flap_velocity.is_finite() && self.flap_velocity < 0.0) {
            return Err(ConfigError::FlapNotUpward(self.flap_velocity));
        }

        if self.gap >= self.world_height {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap,
                world_height: self.world_height,
            });
        }

        if self.max_top_height() < self.pipe_margin {
            return Err(ConfigError::NoRoomForPipes {
                gap: self.gap,
                margin: self.pipe_margin,
                world_height: self.world_height,
            });
        }

        let y = self.bird_start_y();
        let r = self.bird_radius;
        if self.bird_x > self.world_width || y - r < 0.0 || y + r > self.world_height {
            return Err(ConfigError::BirdOutOfBounds {
                x: self.bird_x,
                y,
                radius: r,
            });
        }

        Ok(())
    }

    /// Bird resting height in Ready
    #[inline]
    pub fn bird_start_y(&self) -> f32 {
        self.world_height * self.bird_start_ratio
    }

    /// Largest legal top-segment height
    #[inline]
    pub fn max_top_height(&self) -> f32 {
        self.world_height - self.pipe_margin - self.gap
    }

    /// X coordinate at which new pipes appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.world_width + self.spawn_lead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bird_start_y(), 288.0);
        assert_eq!(config.spawn_x(), 450.0);
        assert_eq!(config.max_top_height(), 410.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = GameConfig::from_json(r#"{ "gap": 200, "entity_asset_source": "/me.png" }"#)
            .expect("valid config");
        assert_eq!(config.gap, 200.0);
        assert_eq!(config.entity_asset_source.as_deref(), Some("/me.png"));
        assert_eq!(config.world_width, WORLD_WIDTH);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let config = GameConfig {
            world_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "world_width",
                ..
            })
        ));

        let config = GameConfig {
            world_height: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_gap_not_smaller_than_world() {
        let config = GameConfig {
            gap: 640.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GapTooLarge { .. })));
    }

    #[test]
    fn test_rejects_gap_without_room_for_margins() {
        let config = GameConfig {
            gap: 550.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoRoomForPipes { .. })));
    }

    #[test]
    fn test_accepts_collapsed_height_range() {
        // 640 - 2 * 70 = 500: exactly one legal top height
        let config = GameConfig {
            gap: 500.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.max_top_height(), config.pipe_margin);
    }

    #[test]
    fn test_rejects_downward_flap() {
        let config = GameConfig {
            flap_velocity: 520.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FlapNotUpward(_))));
    }

    #[test]
    fn test_rejects_bird_outside_world() {
        let config = GameConfig {
            bird_start_ratio: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BirdOutOfBounds { .. })));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
