//! Pipe spawning and scrolling
//!
//! A time accumulator gates spawns. Pipes scroll left at a fixed speed and
//! are culled once their trailing edge leaves the screen; culled IDs may
//! linger in the passed-set, where they are inert.

use rand::Rng;

use super::state::Pipe;
use crate::config::GameConfig;

/// Uniform top-segment height in `[pipe_margin, world_height - pipe_margin - gap]`.
/// A collapsed range yields its single value.
pub fn roll_top_height<R: Rng>(rng: &mut R, config: &GameConfig) -> f32 {
    let min = config.pipe_margin;
    let max = config.max_top_height();
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Add `dt` to the accumulator. Returns true (and zeroes it) once it
/// reaches `interval`.
#[inline]
pub fn accumulate(spawn_acc: &mut f32, interval: f32, dt: f32) -> bool {
    *spawn_acc += dt;
    if *spawn_acc >= interval {
        *spawn_acc = 0.0;
        true
    } else {
        false
    }
}

/// Move every pipe left by `speed * dt`
pub fn scroll(pipes: &mut [Pipe], speed: f32, dt: f32) {
    for pipe in pipes.iter_mut() {
        pipe.x -= speed * dt;
    }
}

/// Drop pipes whose trailing edge is at or past `-despawn_margin`
pub fn cull(pipes: &mut Vec<Pipe>, width: f32, despawn_margin: f32) {
    pipes.retain(|p| p.trailing_edge(width) > -despawn_margin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_accumulator_fires_at_interval() {
        let mut acc = 0.0;
        // 1/32 s steps are exact in binary: 40 of them make 1.25 s
        for _ in 0..39 {
            assert!(!accumulate(&mut acc, 1.25, 1.0 / 32.0));
        }
        assert!(accumulate(&mut acc, 1.25, 1.0 / 32.0));
        assert_eq!(acc, 0.0);
    }

    #[test]
    fn test_scroll_and_cull() {
        let mut pipes = vec![
            Pipe {
                id: 1,
                x: -89.0,
                top_height: 100.0,
            },
            Pipe {
                id: 2,
                x: -80.0,
                top_height: 100.0,
            },
            Pipe {
                id: 3,
                x: 300.0,
                top_height: 100.0,
            },
        ];
        cull(&mut pipes, 70.0, 20.0);
        // id 1: trailing edge -19 stays
        assert_eq!(pipes.len(), 3);

        scroll(&mut pipes, 1.0, 1.0);
        cull(&mut pipes, 70.0, 20.0);
        // id 1 trailing edge now -20 -> culled
        assert_eq!(pipes.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
        assert!((pipes[1].x - 299.0).abs() < 1e-4);
    }

    #[test]
    fn test_collapsed_range_yields_margin() {
        let config = GameConfig {
            gap: 500.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(roll_top_height(&mut rng, &config), 70.0);
        }
    }

    #[test]
    fn test_heights_cover_the_range() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let heights: Vec<f32> = (0..500).map(|_| roll_top_height(&mut rng, &config)).collect();
        let lo = heights.iter().cloned().fold(f32::MAX, f32::min);
        let hi = heights.iter().cloned().fold(f32::MIN, f32::max);
        assert!(lo < 120.0, "lowest {lo}");
        assert!(hi > 360.0, "highest {hi}");
    }

    proptest! {
        #[test]
        fn prop_top_height_within_margins(
            seed in any::<u64>(),
            world_height in 200.0f32..2000.0,
            margin in 0.0f32..80.0,
            gap_fraction in 0.05f32..0.95,
        ) {
            let usable = world_height - 2.0 * margin;
            prop_assume!(usable > 1.0);
            let config = GameConfig {
                world_height,
                pipe_margin: margin,
                gap: usable * gap_fraction,
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..32 {
                let top = roll_top_height(&mut rng, &config);
                prop_assert!(top >= margin);
                prop_assert!(top <= world_height - margin - config.gap);
            }
        }
    }
}
