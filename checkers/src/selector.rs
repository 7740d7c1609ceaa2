//! Pluggable move choice for the AI seat.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Move;

/// Picks one move out of a list of legal candidates. `None` only for an empty list.
pub trait MoveSelector: Send {
    fn choose(&mut self, moves: &[Move]) -> Option<Move>;
}

/// Uniformly random choice.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomSelector {
    fn choose(&mut self, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..moves.len());
        moves.get(index).copied()
    }
}

/// Deterministic choice: takes the queued indices in order (clamped to the
/// list), then always the first candidate once the queue is drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    picks: VecDeque<usize>,
}

impl ScriptedSelector {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn with_picks(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl MoveSelector for ScriptedSelector {
    fn choose(&mut self, moves: &[Move]) -> Option<Move> {
        let last = moves.len().checked_sub(1)?;
        let index = self.picks.pop_front().unwrap_or(0).min(last);
        moves.get(index).copied()
    }
}
