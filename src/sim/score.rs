//! Scoring
//!
//! A pipe is worth one point the first time its trailing edge is strictly
//! left of the bird. The passed-set guarantees at-most-once crediting.

use std::collections::HashSet;

use super::state::Pipe;

/// Score for one session plus the IDs already credited
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: u32,
    passed: HashSet<u32>,
}

impl ScoreTracker {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn has_passed(&self, id: u32) -> bool {
        self.passed.contains(&id)
    }

    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    /// Credit every newly passed pipe. Returns the IDs credited this call.
    pub fn credit_passed(&mut self, pipes: &[Pipe], bird_x: f32, pipe_width: f32) -> Vec<u32> {
        let mut credited = Vec::new();
        for pipe in pipes {
            if pipe.trailing_edge(pipe_width) < bird_x && self.passed.insert(pipe.id) {
                self.score += 1;
                credited.push(pipe.id);
            }
        }
        credited
    }

    #[cfg(test)]
    pub(crate) fn force_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(id: u32, x: f32) -> Pipe {
        Pipe {
            id,
            x,
            top_height: 200.0,
        }
    }

    #[test]
    fn test_trailing_edge_left_of_bird_scores() {
        let mut tracker = ScoreTracker::default();
        // Trailing edge at 119, bird at 120
        let credited = tracker.credit_passed(&[pipe(1, 49.0)], 120.0, 70.0);
        assert_eq!(credited, vec![1]);
        assert_eq!(tracker.score(), 1);
        assert!(tracker.has_passed(1));
    }

    #[test]
    fn test_edge_at_bird_does_not_score() {
        let mut tracker = ScoreTracker::default();
        assert!(tracker.credit_passed(&[pipe(1, 50.0)], 120.0, 70.0).is_empty());
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut tracker = ScoreTracker::default();
        let pipes = [pipe(1, 10.0), pipe(2, 300.0)];
        for _ in 0..10 {
            tracker.credit_passed(&pipes, 120.0, 70.0);
        }
        assert_eq!(tracker.score(), 1);
        assert_eq!(tracker.passed_count(), 1);
    }

    #[test]
    fn test_culled_ids_stay_inert() {
        let mut tracker = ScoreTracker::default();
        tracker.credit_passed(&[pipe(1, 10.0)], 120.0, 70.0);
        // Pipe 1 culled; a later pipe still scores normally
        tracker.credit_passed(&[pipe(2, 0.0)], 120.0, 70.0);
        assert_eq!(tracker.score(), 2);
    }
}
