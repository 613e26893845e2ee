//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through an explicit SimRng owned by the caller.
//! There is no process-wide stream: two synthesizers with the same seed
//! produce the same draws no matter what else is running.
//!
//! Replicate batches get their own stream, seeded deterministically
//! from (master_seed XOR replicate_index * golden). This means:
//!   - Adding a replicate never changes earlier replicates' streams.
//!   - Each replicate is fully reproducible in isolation.

use crate::error::{SimError, SimResult};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const REPLICATE_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// A seeded, deterministic sampling stream.
///
/// Not `Clone`. Derive a fresh stream through `RngBank` instead.
pub struct SimRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform real over [lo, hi).
    ///
    /// `lo == hi` yields `lo`. The result never leaves the closed
    /// interval [lo, hi], even when rounding pushes it up to `hi`.
    pub fn uniform_real(&mut self, lo: f64, hi: f64) -> SimResult<f64> {
        check_bounds(lo, hi)?;
        let value = lo + (hi - lo) * self.next_f64();
        Ok(value.min(hi))
    }

    /// Uniform integer over [lo, hi). An empty range is rejected.
    pub fn uniform_int(&mut self, lo: i64, hi: i64) -> SimResult<i64> {
        if lo >= hi {
            return Err(SimError::InvalidRange {
                lo: lo as f64,
                hi: hi as f64,
            });
        }
        Ok(self.inner.gen_range(lo..hi))
    }

    /// Pick one element, each with equal probability.
    pub fn choice<'a, T>(&mut self, options: &'a [T]) -> SimResult<&'a T> {
        if options.is_empty() {
            return Err(SimError::InvalidArgument(
                "choice requires at least one option".into(),
            ));
        }
        let index = self.inner.gen_range(0..options.len());
        Ok(&options[index])
    }
}

/// Both bounds finite, ordered, and no wider than an `f64` can represent.
fn check_bounds(lo: f64, hi: f64) -> SimResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi || !(hi - lo).is_finite() {
        return Err(SimError::InvalidRange { lo, hi });
    }
    Ok(())
}

/// Stream factory for replicate batches derived from one master seed.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Replicate 0 uses the master seed unchanged, so a single-replicate
    /// run matches a plain `SimRng::new(master_seed)` run.
    pub fn for_replicate(&self, index: u64) -> SimRng {
        SimRng::new(self.derived_seed(index))
    }

    pub fn derived_seed(&self, index: u64) -> u64 {
        self.master_seed ^ index.wrapping_mul(REPLICATE_STRIDE)
    }
}
