//! Bird physics
//!
//! Semi-implicit Euler: velocity first, then position with the new velocity.

use super::state::Bird;
use crate::consts::{IDLE_BOB_AMPLITUDE, IDLE_BOB_RATE};

/// Advance the bird by `dt` seconds under constant `gravity`
#[inline]
pub fn integrate(bird: &mut Bird, gravity: f32, dt: f32) {
    bird.vy += gravity * dt;
    bird.pos.y += bird.vy * dt;
}

/// Overwrite vertical velocity with the flap impulse
#[inline]
pub fn flap(bird: &mut Bird, flap_velocity: f32) {
    bird.vy = flap_velocity;
}

/// Cosmetic hover while Ready. Not physics: velocity stays pinned at zero.
pub fn idle_bob(bird: &mut Bird, rest_y: f32, idle_time: f32) {
    bird.pos.y = rest_y + (idle_time * IDLE_BOB_RATE).sin() * IDLE_BOB_AMPLITUDE;
    bird.vy = 0.0;
}
