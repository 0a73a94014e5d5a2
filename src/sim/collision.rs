//! Collision detection
//!
//! The bird is a circle; each pipe is two axis-aligned rectangles. A circle
//! overlaps a rectangle when the rectangle's closest point to the circle
//! center lies within the radius.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bird, Pipe};
use crate::config::GameConfig;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Bird's top edge went above y = 0
    Ceiling,
    /// Bird's bottom edge went below the world height
    Floor,
    /// Bird overlapped a pipe segment
    Pipe { id: u32 },
}

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point inside (or on) the rectangle closest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Closest-point circle/rectangle overlap test (touching counts)
#[inline]
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length_squared() <= radius * radius
}

/// Top segment: `(x, 0, width, top_height)`
pub fn top_rect(pipe: &Pipe, config: &GameConfig) -> Rect {
    Rect::new(pipe.x, 0.0, config.pipe_width, pipe.top_height)
}

/// Bottom segment: from `top_height + gap` down to the world height
pub fn bottom_rect(pipe: &Pipe, config: &GameConfig) -> Rect {
    let bottom_y = pipe.bottom_y(config.gap);
    Rect::new(
        pipe.x,
        bottom_y,
        config.pipe_width,
        config.world_height - bottom_y,
    )
}

/// Check the bird against the ceiling and floor
pub fn check_bounds(bird: &Bird, world_height: f32) -> Option<CrashCause> {
    if bird.pos.y - bird.radius < 0.0 {
        Some(CrashCause::Ceiling)
    } else if bird.pos.y + bird.radius > world_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// Check the bird against one pipe's two segments
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe, config: &GameConfig) -> bool {
    circle_rect_collision(bird.pos, bird.radius, &top_rect(pipe, config))
        || circle_rect_collision(bird.pos, bird.radius, &bottom_rect(pipe, config))
}

/// Bounds first, then pipes in creation order. Stops at the first hit.
pub fn first_collision(bird: &Bird, pipes: &[Pipe], config: &GameConfig) -> Option<CrashCause> {
    check_bounds(bird, config.world_height).or_else(|| {
        pipes
            .iter()
            .find(|pipe| bird_pipe_collision(bird, pipe, config))
            .map(|pipe| CrashCause::Pipe { id: pipe.id })
    })
}
