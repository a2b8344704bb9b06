//! Shape randomizers for piece generation
//!
//! Spawning asks a `ShapeSource` for the next shape. The game uses a uniform
//! choice over the 7 shapes; tests and replays plug in a fixed sequence.

use crate::error::ConfigError;
use crate::tetromino::ShapeKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies the shape of each newly spawned piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

/// Uniform random choice over all 7 shapes, independently per spawn
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: ChaCha8Rng,
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource {
    /// Create a randomizer seeded from the OS
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a reproducible randomizer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ShapeSource for UniformSource {
    fn next_shape(&mut self) -> ShapeKind {
        let all = ShapeKind::all();
        all[self.rng.gen_range(0..all.len())]
    }
}

/// Deals a fixed list of shapes, starting over when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    shapes: Vec<ShapeKind>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(shapes: impl IntoIterator<Item = ShapeKind>) -> Result<Self, ConfigError> {
        let shapes: Vec<_> = shapes.into_iter().collect();
        if shapes.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        Ok(Self { shapes, cursor: 0 })
    }

    /// Repeat a single shape forever
    pub fn repeat(kind: ShapeKind) -> Self {
        Self {
            shapes: vec![kind],
            cursor: 0,
        }
    }
}

impl ShapeSource for SequenceSource {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.cursor];
        self.cursor = (self.cursor + 1) % self.shapes.len();
        kind
    }
}
