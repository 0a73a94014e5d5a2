//! Flappy Memory entry point
//!
//! The browser build is driven from JavaScript through `FlappyGame` in the
//! library. Natively this runs a headless session with a simple autopilot,
//! which is handy for watching the simulation through the log.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_memory::sim::{GameEvent, GamePhase};
    use flappy_memory::{Action, GameConfig, LoopDriver};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_SECONDS: f64 = 30.0;

    /// Flap when falling below the middle of the next gap
    fn should_flap(driver: &LoopDriver) -> bool {
        let state = driver.state();
        let config = &state.config;
        let bird = &state.session.bird;

        let target_y = state
            .session
            .pipes
            .iter()
            .find(|p| p.trailing_edge(config.pipe_width) >= bird.pos.x - bird.radius)
            .map(|p| p.top_height + config.gap * 0.5)
            .unwrap_or(config.world_height * 0.5);

        bird.vy >= 0.0 && bird.pos.y > target_y + bird.radius * 0.5
    }

    pub fn run() {
        let seconds = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse::<f64>().ok())
            .unwrap_or(DEFAULT_SECONDS);
        let seed = std::env::args()
            .nth(2)
            .and_then(|arg| arg.parse::<u64>().ok())
            .unwrap_or(0x5eed);

        let mut driver = match LoopDriver::new(GameConfig::default(), seed) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };
        driver.start();

        let total_frames = (seconds * 1000.0 / FRAME_MS).ceil() as u64;
        let mut runs = 0u32;
        let mut now = 0.0;

        for _ in 0..total_frames {
            match driver.status() {
                GamePhase::Ready => {
                    driver.post(Action::Flap);
                }
                GamePhase::Running if should_flap(&driver) => {
                    driver.post(Action::Flap);
                }
                GamePhase::GameOver => {
                    driver.post(Action::Play);
                }
                GamePhase::Running => {}
            }

            driver.frame(now);
            now += FRAME_MS;

            for event in driver.last_events() {
                match event {
                    GameEvent::Started => runs += 1,
                    GameEvent::Scored { score, .. } => log::debug!("Score {}", score),
                    _ => {}
                }
            }
        }

        driver.stop();
        log::info!(
            "Simulated {:.1}s over {} frames: {} runs, last score {}, best {}",
            seconds,
            driver.frames(),
            runs,
            driver.score(),
            driver.best()
        );
        println!("best score: {}", driver.best());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Memory (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `flappy_memory::wasm::init`, this is just to satisfy the compiler
}
