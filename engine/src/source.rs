use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Anything that can hand out a uniform integer in `low..=high`.
///
/// Each draw must be independent of the previous ones. Sources are owned by
/// whoever rolls; share across threads by giving each thread its own.
pub trait RandomSource {
    fn between(&mut self, low: u32, high: u32) -> u32;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        (**self).between(low, high)
    }
}

/// Seedable ChaCha8 roller.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Convenience for scripted tests: `Dice::from_scripted(vec![20])`.
    pub fn from_scripted(faces: Vec<u32>) -> ScriptedDice {
        ScriptedDice::new(faces)
    }
}

impl RandomSource for Dice {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of faces in order.
///
/// Faces are clamped into the requested bounds. The script repeats once it
/// runs out, and an empty script always yields `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: Vec<u32>,
    queue: VecDeque<u32>,
    draws: usize,
}

impl ScriptedDice {
    pub fn new(faces: Vec<u32>) -> Self {
        Self {
            queue: faces.iter().copied().collect(),
            script: faces,
            draws: 0,
        }
    }

    /// How many faces have been handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedDice {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.draws += 1;
        match self.queue.pop_front() {
            Some(face) => face.clamp(low, high),
            None => low,
        }
    }
}
