//! Simulation tick
//!
//! Advances the game by one frame. Queued actions are applied first, then
//! the phase decides what runs:
//! - Ready: idle bob only
//! - Running: spawn, physics, scroll, cull, score, collide
//! - GameOver: nothing moves

use super::collision;
use super::physics;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clock::bound_dt;
use crate::consts::IMPACT_DECAY;
use crate::input::Action;

/// Actions received since the previous tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Convenience for a single flap
    pub fn flap() -> Self {
        Self::new(vec![Action::Flap])
    }
}

/// Route one logical action through the state machine.
/// Returns false for requests that are no-ops in the current phase.
pub fn apply_action(state: &mut GameState, action: Action) -> bool {
    match action {
        Action::Flap => state.flap(),
        Action::Reset => state.reset_to_ready(),
        Action::Play => state.play(),
        Action::Toggle => state.toggle(),
    }
}

/// Advance the game state by `dt` seconds (clamped to `max_frame_dt`)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = bound_dt(dt, state.config.max_frame_dt);

    for &action in &input.actions {
        apply_action(state, action);
    }

    match state.session.phase {
        GamePhase::Ready => {
            state.session.idle_time += dt;
            let rest_y = state.config.bird_start_y();
            physics::idle_bob(&mut state.session.bird, rest_y, state.session.idle_time);
        }
        GamePhase::Running => step_running(state, dt),
        GamePhase::GameOver => {}
    }

    // Cosmetic pulse decays in every phase
    state.session.impact = (state.session.impact - dt * IMPACT_DECAY).max(0.0);
}

fn step_running(state: &mut GameState, dt: f32) {
    if spawn::accumulate(
        &mut state.session.spawn_acc,
        state.config.spawn_interval,
        dt,
    ) {
        state.spawn_pipe();
    }

    let config = &state.config;
    let session = &mut state.session;

    physics::integrate(&mut session.bird, config.gravity, dt);

    spawn::scroll(&mut session.pipes, config.pipe_speed, dt);
    spawn::cull(&mut session.pipes, config.pipe_width, config.despawn_margin);

    // Scoring is independent of this tick's collision outcome
    let before = session.tracker.score();
    let credited = session
        .tracker
        .credit_passed(&session.pipes, session.bird.pos.x, config.pipe_width);
    for (i, id) in credited.iter().enumerate() {
        let score = before + i as u32 + 1;
        log::debug!("Passed pipe {} (score {})", id, score);
        state.events.push(GameEvent::Scored { id: *id, score });
    }
    if !credited.is_empty() {
        state.sync_best();
    }

    if let Some(cause) =
        collision::first_collision(&state.session.bird, &state.session.pipes, &state.config)
    {
        state.crash(cause);
    }
}
