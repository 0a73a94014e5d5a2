//! Game state and core simulation types
//!
//! `GameState` is owned by the loop driver and mutated only inside `tick`.
//! Everything belonging to one run lives in `Session`, which is replaced
//! wholesale on reset; `best`, the RNG and the id counter outlive it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CrashCause;
use super::physics;
use super::score::ScoreTracker;
use super::spawn;
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Waiting for the first flap; bird bobs in place
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Run ended; bird and pipes frozen until reset or play
    GameOver,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    PipeSpawned { id: u32, top_height: f32 },
    Scored { id: u32, score: u32 },
    Crashed { cause: CrashCause, score: u32, best: u32 },
    Reset,
}

/// The player-controlled bird. `pos.x` never changes during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive is down)
    pub vy: f32,
    pub radius: f32,
}

impl Bird {
    /// Bird at its resting position for `config`
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.bird_x, config.bird_start_y()),
            vy: 0.0,
            radius: config.bird_radius,
        }
    }

    /// Velocity-derived rotation hint for the renderer (radians)
    pub fn tilt(&self) -> f32 {
        (self.vy / TILT_VELOCITY_SCALE).clamp(TILT_MIN, TILT_MAX)
    }
}

/// A pipe pair. The top segment spans `0..top_height`; the bottom segment
/// spans `top_height + gap..world_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    pub top_height: f32,
}

impl Pipe {
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    #[inline]
    pub fn bottom_y(&self, gap: f32) -> f32 {
        self.top_height + gap
    }
}

/// Everything belonging to a single run
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes in creation order
    pub pipes: Vec<Pipe>,
    /// Score and passed-set
    pub tracker: ScoreTracker,
    /// Seconds since the last spawn
    pub spawn_acc: f32,
    /// Cosmetic flap pulse, 1.0 on flap, decays to 0
    pub impact: f32,
    /// Seconds spent in Ready (drives the idle bob)
    pub idle_time: f32,
}

impl Session {
    pub fn new(config: &GameConfig, phase: GamePhase) -> Self {
        Self {
            phase,
            bird: Bird::new(config),
            pipes: Vec::new(),
            tracker: ScoreTracker::default(),
            spawn_acc: 0.0,
            impact: 0.0,
            idle_time: 0.0,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.tracker.score()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated tuning for this instance
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Pipe-height RNG, shared by all sessions of this instance
    pub rng: Pcg32,
    /// The active run
    pub session: Session,
    /// Best score across all sessions of this instance
    pub best: u32,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next pipe ID
    next_id: u32,
}

impl GameState {
    /// Create a Ready game. `config` must already be validated.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let session = Session::new(&config, GamePhase::Ready);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session,
            best: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Allocate a new pipe ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events accumulated so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append a pipe at the spawn column with a random top height
    pub fn spawn_pipe(&mut self) -> Pipe {
        let id = self.next_entity_id();
        let top_height = spawn::roll_top_height(&mut self.rng, &self.config);
        let pipe = Pipe {
            id,
            x: self.config.spawn_x(),
            top_height,
        };
        self.session.pipes.push(pipe);
        self.events.push(GameEvent::PipeSpawned { id, top_height });
        log::debug!("Spawned pipe {} (top {:.1})", id, top_height);
        pipe
    }

    /// Fold the current score into `best`
    pub fn sync_best(&mut self) {
        self.best = self.best.max(self.session.score());
    }

    // === Phase transitions ===

    /// Flap. Starts the run from Ready; ignored in GameOver.
    pub fn flap(&mut self) -> bool {
        match self.session.phase {
            GamePhase::Ready => {
                self.start();
                self.apply_flap();
                true
            }
            GamePhase::Running => {
                self.apply_flap();
                true
            }
            GamePhase::GameOver => {
                log::debug!("Flap ignored after game over");
                false
            }
        }
    }

    /// Replace the session with a fresh Ready one. No-op when already Ready.
    pub fn reset_to_ready(&mut self) -> bool {
        if self.session.phase == GamePhase::Ready {
            log::debug!("Reset ignored: already ready");
            return false;
        }
        self.sync_best();
        self.session = Session::new(&self.config, GamePhase::Ready);
        self.events.push(GameEvent::Reset);
        log::info!("Session reset (best {})", self.best);
        true
    }

    /// Fresh session, immediately Running. Ignored while Running.
    pub fn play(&mut self) -> bool {
        if self.session.phase == GamePhase::Running {
            log::debug!("Play ignored: already running");
            return false;
        }
        self.start();
        true
    }

    /// Side-panel button: stop while Running, play otherwise
    pub fn toggle(&mut self) -> bool {
        if self.session.phase == GamePhase::Running {
            self.reset_to_ready()
        } else {
            self.play()
        }
    }

    /// Running -> GameOver
    pub fn crash(&mut self, cause: CrashCause) {
        if self.session.phase != GamePhase::Running {
            return;
        }
        self.session.phase = GamePhase::GameOver;
        self.sync_best();
        let (score, best) = (self.session.score(), self.best);
        self.events.push(GameEvent::Crashed { cause, score, best });
        log::info!("Game over ({:?}): score {}, best {}", cause, score, best);
    }

    fn start(&mut self) {
        self.session = Session::new(&self.config, GamePhase::Running);
        self.events.push(GameEvent::Started);
        log::info!("Run started");
    }

    fn apply_flap(&mut self) {
        physics::flap(&mut self.session.bird, self.config.flap_velocity);
        self.session.impact = 1.0;
        self.events.push(GameEvent::Flapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 7)
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.phase(), GamePhase::Ready);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best, 0);
        assert_eq!(state.session.bird.pos, Vec2::new(120.0, 288.0));
        assert_eq!(state.session.bird.vy, 0.0);
        assert!(state.session.pipes.is_empty());
    }

    #[test]
    fn test_first_flap_starts_and_sets_velocity() {
        let mut state = new_state();
        assert!(state.flap());
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.session.bird.vy, -520.0);
        assert_eq!(state.session.impact, 1.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started, GameEvent::Flapped]
        );
    }

    #[test]
    fn test_flap_after_game_over_is_noop() {
        let mut state = new_state();
        state.flap();
        state.crash(CrashCause::Floor);
        let bird = state.session.bird;
        assert!(!state.flap());
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.session.bird, bird);
    }

    #[test]
    fn test_reset_while_ready_is_noop() {
        let mut state = new_state();
        assert!(!state.reset_to_ready());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_reset_replaces_session_keeps_best() {
        let mut state = new_state();
        state.flap();
        state.session.tracker.force_score(4);
        state.spawn_pipe();
        state.crash(CrashCause::Pipe { id: 1 });
        assert_eq!(state.best, 4);

        assert!(state.reset_to_ready());
        assert_eq!(state.phase(), GamePhase::Ready);
        assert_eq!(state.score(), 0);
        assert!(state.session.pipes.is_empty());
        assert_eq!(state.session.bird, Bird::new(&state.config));
        assert_eq!(state.best, 4);
    }

    #[test]
    fn test_play_from_game_over_restarts_running() {
        let mut state = new_state();
        state.flap();
        state.spawn_pipe();
        state.crash(CrashCause::Ceiling);
        assert!(state.play());
        assert_eq!(state.phase(), GamePhase::Running);
        assert!(state.session.pipes.is_empty());
        assert_eq!(state.session.bird.vy, 0.0);
    }

    #[test]
    fn test_play_while_running_is_noop() {
        let mut state = new_state();
        state.flap();
        state.spawn_pipe();
        assert!(!state.play());
        assert_eq!(state.session.pipes.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut state = new_state();
        assert!(state.toggle());
        assert_eq!(state.phase(), GamePhase::Running);
        assert!(state.toggle());
        assert_eq!(state.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_crash_only_from_running() {
        let mut state = new_state();
        state.crash(CrashCause::Floor);
        assert_eq!(state.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_pipe_ids_are_unique_across_sessions() {
        let mut state = new_state();
        state.flap();
        let a = state.spawn_pipe().id;
        state.crash(CrashCause::Floor);
        state.play();
        let b = state.spawn_pipe().id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut bird = Bird::new(&GameConfig::default());
        bird.vy = -10_000.0;
        assert_eq!(bird.tilt(), TILT_MIN);
        bird.vy = 10_000.0;
        assert_eq!(bird.tilt(), TILT_MAX);
        bird.vy = 300.0;
        assert!((bird.tilt() - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_over_sessions(scores in proptest::collection::vec(0u32..50, 1..12)) {
            let mut state = new_state();
            let mut expected = 0;
            for score in scores {
                state.play();
                state.session.tracker.force_score(score);
                state.crash(CrashCause::Floor);
                expected = expected.max(score);
                prop_assert_eq!(state.best, expected);
                if score % 2 == 0 {
                    state.reset_to_ready();
                    prop_assert_eq!(state.best, expected);
                }
            }
        }
    }
}
