//! Bounded retry placement for resource and puddle spawners.
//!
//! A spawner proposes uniformly random candidates and keeps the first one the
//! terrain accepts. Running out of attempts is an expected outcome: the caller
//! skips that spawn for the current cycle.

use glam::DVec2;
use rand::Rng;

use crate::biome::{BiomeCategory, BiomeQuery};

/// Default retry budget per spawn.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Result of one placement attempt loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// An acceptable location was found.
    Placed {
        /// Accepted world position.
        position: DVec2,
        /// Candidates drawn, including the accepted one.
        attempts: u32,
    },
    /// The retry budget ran out; skip this spawn.
    Skipped {
        /// Candidates drawn.
        attempts: u32,
    },
}

impl PlacementOutcome {
    /// Accepted position, if any.
    pub fn position(&self) -> Option<DVec2> {
        match *self {
            Self::Placed { position, .. } => Some(position),
            Self::Skipped { .. } => None,
        }
    }

    /// Candidates drawn.
    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Placed { attempts, .. } | Self::Skipped { attempts } => attempts,
        }
    }

    /// Returns `true` if a location was found.
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Draws candidate positions inside a rectangle until the terrain accepts one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPlacer {
    /// Minimum corner of the spawn area.
    pub min: DVec2,
    /// Maximum corner of the spawn area.
    pub max: DVec2,
    /// Candidates drawn before giving up.
    pub max_attempts: u32,
}

impl SpawnPlacer {
    /// Placer over `[min, max]` with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min,
            max,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the retry budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Find a location that is not water.
    pub fn place<Q, R>(&self, query: &Q, rng: &mut R) -> PlacementOutcome
    where
        Q: BiomeQuery + ?Sized,
        R: Rng,
    {
        self.place_where(query, rng, BiomeCategory::is_passable)
    }

    /// Find a location whose biome satisfies `accept`.
    pub fn place_where<Q, R>(
        &self,
        query: &Q,
        rng: &mut R,
        accept: impl Fn(BiomeCategory) -> bool,
    ) -> PlacementOutcome
    where
        Q: BiomeQuery + ?Sized,
        R: Rng,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate(rng);
            if accept(query.biome_at(candidate.x, candidate.y)) {
                return PlacementOutcome::Placed {
                    position: candidate,
                    attempts: attempt,
                };
            }
        }

        tracing::debug!(
            attempts = self.max_attempts,
            "no acceptable spawn location within retry budget, skipping"
        );
        PlacementOutcome::Skipped {
            attempts: self.max_attempts,
        }
    }

    /// Uniform point in the rectangle; a degenerate rectangle yields its corner.
    fn candidate<R: Rng>(&self, rng: &mut R) -> DVec2 {
        let t = DVec2::new(rng.random::<f64>(), rng.random::<f64>());
        self.min + (self.max - self.min) * t
    }
}
