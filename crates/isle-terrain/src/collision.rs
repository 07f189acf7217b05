//! Terrain collision: water is impassable.
//!
//! Actors are tested at their prospective centre point. A rejected move leaves
//! the actor where it was, exactly like any other solid obstacle.

use glam::DVec2;

use crate::biome::BiomeQuery;

/// Where an actor ended up after a move request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The full move was accepted.
    Moved(DVec2),
    /// Only one axis of the move was accepted.
    Slid(DVec2),
    /// Nothing was accepted; the actor keeps its prior position.
    Blocked(DVec2),
}

impl MoveOutcome {
    /// Final position.
    pub fn position(&self) -> DVec2 {
        match *self {
            Self::Moved(p) | Self::Slid(p) | Self::Blocked(p) => p,
        }
    }

    /// Returns `true` if the actor did not move.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Collision queries against the biome field.
pub struct TerrainCollision<'a, Q: ?Sized> {
    query: &'a Q,
}

impl<'a, Q: BiomeQuery + ?Sized> TerrainCollision<'a, Q> {
    /// Collision view over a biome query.
    pub fn new(query: &'a Q) -> Self {
        Self { query }
    }

    /// Whether an actor centred at `position` would stand in water.
    pub fn is_blocked(&self, position: DVec2) -> bool {
        !self.query.biome_at(position.x, position.y).is_passable()
    }

    /// Move from `from` to `to`, or stay at `from` if `to` is water.
    pub fn try_move(&self, from: DVec2, to: DVec2) -> MoveOutcome {
        if self.is_blocked(to) {
            MoveOutcome::Blocked(from)
        } else {
            MoveOutcome::Moved(to)
        }
    }

    /// Like [`Self::try_move`], but when the full move is blocked try the
    /// x-only and then the y-only component, so actors slide along shorelines.
    pub fn try_move_sliding(&self, from: DVec2, to: DVec2) -> MoveOutcome {
        if !self.is_blocked(to) {
            return MoveOutcome::Moved(to);
        }
        let x_only = DVec2::new(to.x, from.y);
        if x_only != from && !self.is_blocked(x_only) {
            return MoveOutcome::Slid(x_only);
        }
        let y_only = DVec2::new(from.x, to.y);
        if y_only != from && !self.is_blocked(y_only) {
            return MoveOutcome::Slid(y_only);
        }
        MoveOutcome::Blocked(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeCategory;

    /// A lake occupying x > 10 and y > 10.
    struct Lake;

    impl BiomeQuery for Lake {
        fn biome_at(&self, x: f64, y: f64) -> BiomeCategory {
            if x > 10.0 && y > 10.0 {
                BiomeCategory::Water
            } else {
                BiomeCategory::Sand
            }
        }
    }

    #[test]
    fn test_dry_move_accepted() {
        let collision = TerrainCollision::new(&Lake);
        let outcome = collision.try_move(DVec2::ZERO, DVec2::new(5.0, 5.0));
        assert_eq!(outcome, MoveOutcome::Moved(DVec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_water_move_keeps_prior_position() {
        let collision = TerrainCollision::new(&Lake);
        let from = DVec2::new(9.0, 9.0);
        let outcome = collision.try_move(from, DVec2::new(11.0, 11.0));
        assert!(outcome.is_blocked());
        assert_eq!(outcome.position(), from);
    }

    #[test]
    fn test_sliding_along_shore() {
        let collision = TerrainCollision::new(&Lake);
        // Moving diagonally into the lake from below slides along x.
        let outcome = collision.try_move_sliding(DVec2::new(9.0, 5.0), DVec2::new(12.0, 12.0));
        assert_eq!(outcome, MoveOutcome::Slid(DVec2::new(12.0, 5.0)));

        // From the left, x is blocked but y is free.
        let outcome = collision.try_move_sliding(DVec2::new(5.0, 11.0), DVec2::new(12.0, 14.0));
        assert_eq!(outcome, MoveOutcome::Slid(DVec2::new(5.0, 14.0)));
    }

    #[test]
    fn test_sliding_fully_blocked() {
        let collision = TerrainCollision::new(&Lake);
        let from = DVec2::new(11.0, 11.0);
        let outcome = collision.try_move_sliding(from, DVec2::new(12.0, 12.0));
        assert_eq!(outcome, MoveOutcome::Blocked(from));
    }
}
