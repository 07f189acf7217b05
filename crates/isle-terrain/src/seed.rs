//! Deterministic seed derivation and the configuration fingerprint.
//!
//! Everything here is a pure function of its inputs, so server and client
//! derive the same sub-seeds and the same fingerprint from the same world
//! constants without talking to each other.

use std::fmt;
use std::hash::Hasher;

use isle_config::NormalizationMode;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use siphasher::sip::SipHasher24;

use crate::config::{BiomeConfig, NoiseConfig};

/// Mixed into the world seed to decorrelate the water field from the base field.
const WATER_SEED_SALT: u32 = 0x7A7E_12C5;

/// Mixed into a field seed to pick the equalization sample points.
const CALIBRATION_SALT: u64 = 0xC0FF_EE15_1E5E_ED00;

/// Bumped whenever the meaning of a fingerprinted field changes.
const FINGERPRINT_VERSION: u32 = 2;

/// SipHash keys for the configuration fingerprint.
const FINGERPRINT_KEYS: (u64, u64) = (0x6973_6C65_6269_6F6D, 0x6669_6E67_6572_7072);

/// SipHash keys for spawn cycle seeds.
const SPAWN_KEYS: (u64, u64) = (0x7370_6177_6E2D_6379, 0x636C_652D_7265_706C);

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive the water-carving seed from the world seed.
pub fn derive_water_seed(world_seed: u32) -> u32 {
    world_seed.rotate_left(16) ^ WATER_SEED_SALT
}

/// RNG that chooses the sample points a [`NoiseField`](crate::NoiseField)
/// equalizes against. Depends on the field seed only.
pub fn calibration_rng(field_seed: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(u64::from(field_seed) ^ CALIBRATION_SALT)
}

/// RNG for one resource spawn cycle.
///
/// The same `(world_seed, cycle)` pair yields the same candidate sequence, so a
/// server can replay a spawn cycle when debugging placement.
pub fn spawn_rng(world_seed: u32, cycle: u64) -> ChaCha8Rng {
    let mut digest = Digest::new(SPAWN_KEYS);
    digest.u32(world_seed);
    digest.u64(cycle);
    ChaCha8Rng::seed_from_u64(digest.finish())
}

/// SipHash-2-4 fed with explicit little-endian bytes, so the result does not
/// depend on pointer width or host byte order.
struct Digest(SipHasher24);

impl Digest {
    fn new((k0, k1): (u64, u64)) -> Self {
        Self(SipHasher24::new_with_keys(k0, k1))
    }

    fn u8(&mut self, v: u8) {
        self.0.write(&[v]);
    }

    fn u32(&mut self, v: u32) {
        self.0.write(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.0.write(&v.to_le_bytes());
    }

    fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    fn finish(&self) -> u64 {
        self.0.finish()
    }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Stable 64-bit digest of every constant that affects classification.
///
/// Cache settings are excluded: they change performance, never results. Peers
/// that exchange fingerprints at connect time can refuse a mismatched world
/// instead of silently disagreeing about where the water is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigFingerprint(pub u64);

impl ConfigFingerprint {
    /// Compute the fingerprint of a configuration.
    pub fn of(config: &BiomeConfig) -> Self {
        let mut digest = Digest::new(FINGERPRINT_KEYS);
        digest.u32(FINGERPRINT_VERSION);
        digest_noise(&config.base, &mut digest);
        digest_noise(&config.water, &mut digest);
        digest.f64(config.thresholds.sand_threshold);
        digest.f64(config.thresholds.water_threshold);
        digest.f64(config.exclusion_radius);
        Self(digest.finish())
    }
}

impl fmt::Display for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

fn digest_noise(noise: &NoiseConfig, digest: &mut Digest) {
    digest.u32(noise.seed);
    digest.u64(noise.octaves.len() as u64);
    for octave in &noise.octaves {
        digest.f64(octave.frequency);
        digest.f64(octave.amplitude);
    }
    digest.u8(match noise.normalization {
        NormalizationMode::Linear => 0,
        NormalizationMode::Equalized => 1,
    });
}
