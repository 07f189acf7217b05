//! Spawn exclusion: a disc around the world origin that is always grass.

/// Hard override applied before any noise is evaluated, so new players never
/// land in sand or water whatever the thresholds are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnZoneGuard {
    radius: f64,
    radius_sq: f64,
}

impl SpawnZoneGuard {
    /// Guard with the given radius in world units.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Radius of the exclusion disc.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Strict Euclidean test `distance((x, y), origin) < radius`.
    ///
    /// Compares squared distances; NaN and overflowing inputs are outside.
    #[inline]
    pub fn is_within_exclusion(&self, x: f64, y: f64) -> bool {
        x * x + y * y < self.radius_sq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_excluded() {
        let guard = SpawnZoneGuard::new(1500.0);
        assert!(guard.is_within_exclusion(0.0, 0.0));
        assert!(guard.is_within_exclusion(100.0, 100.0));
        assert!(guard.is_within_exclusion(-1000.0, 1000.0));
    }

    #[test]
    fn test_boundary_is_outside() {
        let guard = SpawnZoneGuard::new(1500.0);
        assert!(!guard.is_within_exclusion(1500.0, 0.0));
        assert!(!guard.is_within_exclusion(0.0, -1500.0));
        assert!(guard.is_within_exclusion(1499.999, 0.0));
        // 900² + 1200² = 1500²
        assert!(!guard.is_within_exclusion(900.0, 1200.0));
    }

    #[test]
    fn test_degenerate_inputs_are_outside() {
        let guard = SpawnZoneGuard::new(1500.0);
        assert!(!guard.is_within_exclusion(f64::NAN, 0.0));
        assert!(!guard.is_within_exclusion(f64::INFINITY, 0.0));
        assert!(!guard.is_within_exclusion(1e200, 1e200));
    }

    #[test]
    fn test_zero_radius_excludes_nothing() {
        let guard = SpawnZoneGuard::new(0.0);
        assert!(!guard.is_within_exclusion(0.0, 0.0));
    }
}
