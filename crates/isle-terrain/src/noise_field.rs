//! Multi-octave coherent noise normalized to `[0, 1]`.
//!
//! Each octave samples the same simplex field at its own frequency and weight.
//! The weighted mean is mapped linearly into `[0, 1]` and, in
//! [`NormalizationMode::Equalized`], then through the field's own empirical
//! CDF so that `P(sample > t) ≈ 1 - t` for any threshold `t`. The CDF table is
//! built from a seeded sample at construction time and never changes, so the
//! field stays a pure function of `(seed, octaves, x, y)`.

use isle_config::{NormalizationMode, OctaveSpec};
use noise::{NoiseFn, Simplex};
use rand::Rng;

use crate::config::NoiseConfig;
use crate::seed::calibration_rng;

/// Scaled coordinates beyond this magnitude are folded back into range so the
/// simplex lattice indices can never overflow.
const FOLD_LIMIT: f64 = 1.0e9;

/// Points sampled to build the equalization table.
const CALIBRATION_SAMPLES: usize = 8192;

/// Intervals in the equalization table (the table holds one more knot).
const QUANTILE_INTERVALS: usize = 256;

/// Width of the calibration square, in wavelengths of the lowest octave.
const CALIBRATION_SPAN_WAVELENGTHS: f64 = 128.0;

/// Value returned for non-finite coordinates.
const NEUTRAL: f64 = 0.5;

/// Deterministic layered noise over the unbounded plane.
pub struct NoiseField {
    noise: Simplex,
    config: NoiseConfig,
    amplitude_sum: f64,
    /// Sorted knots of the empirical CDF. Empty for linear normalization.
    quantiles: Vec<f64>,
}

impl NoiseField {
    /// Build a field. Equalized fields sample themselves once here.
    pub fn new(config: &NoiseConfig) -> Self {
        let mut field = Self {
            noise: Simplex::new(config.seed),
            config: config.clone(),
            amplitude_sum: config.amplitude_sum(),
            quantiles: Vec::new(),
        };
        if config.normalization == NormalizationMode::Equalized {
            field.quantiles = field.build_quantiles();
        }
        field
    }

    /// Sample the field at `(x, y)`, in `[0, 1]`.
    ///
    /// Total over all inputs: non-finite coordinates give `0.5`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) {
            return NEUTRAL;
        }
        let linear = self.raw(x, y);
        match self.config.normalization {
            NormalizationMode::Linear => linear,
            NormalizationMode::Equalized => self.equalize(linear),
        }
    }

    /// Amplitude-weighted mean of all octaves, mapped linearly to `[0, 1]`.
    ///
    /// This is the value before equalization; calibration and diagnostics use it.
    pub fn raw(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) || self.amplitude_sum <= 0.0 {
            return NEUTRAL;
        }

        let mut total = 0.0;
        for &OctaveSpec {
            frequency,
            amplitude,
        } in &self.config.octaves
        {
            let nx = fold(x * frequency);
            let ny = fold(y * frequency);
            total += self.noise.get([nx, ny]) * amplitude;
        }

        let value = ((total / self.amplitude_sum) + 1.0) * 0.5;
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            NEUTRAL
        }
    }

    /// The configuration this field was built from.
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Knots of the equalization table (empty for linear fields).
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Map a linear value through the empirical CDF, interpolating between knots.
    fn equalize(&self, value: f64) -> f64 {
        let q = &self.quantiles;
        let (Some(&first), Some(&last)) = (q.first(), q.last()) else {
            return value;
        };
        if value <= first {
            return 0.0;
        }
        if value >= last {
            return 1.0;
        }
        // q[i - 1] <= value < q[i]
        let i = q.partition_point(|&knot| knot <= value);
        let lo = q[i - 1];
        let hi = q[i];
        let frac = (value - lo) / (hi - lo);
        ((i - 1) as f64 + frac) / (q.len() - 1) as f64
    }

    fn build_quantiles(&self) -> Vec<f64> {
        let Some(min_frequency) = self.config.min_frequency() else {
            return Vec::new();
        };
        let half_span = 0.5 * CALIBRATION_SPAN_WAVELENGTHS / min_frequency;
        // Zero, negative, or NaN frequencies leave no span to sample.
        if !(half_span.is_finite() && half_span > 0.0) {
            return Vec::new();
        }

        let mut rng = calibration_rng(self.config.seed);
        let mut samples: Vec<f64> = (0..CALIBRATION_SAMPLES)
            .map(|_| {
                let x = rng.random_range(-half_span..half_span);
                let y = rng.random_range(-half_span..half_span);
                self.raw(x, y)
            })
            .collect();
        samples.sort_by(f64::total_cmp);

        let last = (samples.len() - 1) as f64;
        let mut knots: Vec<f64> = (0..=QUANTILE_INTERVALS)
            .map(|k| {
                let idx = (k as f64 * last / QUANTILE_INTERVALS as f64).round() as usize;
                samples[idx]
            })
            .collect();
        // A flat table cannot be inverted; fall back to linear.
        knots.dedup();
        if knots.len() < 2 { Vec::new() } else { knots }
    }
}

#[inline]
fn fold(v: f64) -> f64 {
    if v.abs() < FOLD_LIMIT {
        v
    } else {
        v.rem_euclid(FOLD_LIMIT)
    }
}
