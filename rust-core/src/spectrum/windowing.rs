//! Hann window table for spectral analysis
//!
//! Tapers each frame before the FFT to reduce spectral leakage. The table is
//! built once per transform size and reused for every frame at that size.

use std::f64::consts::PI;
use std::ops::Deref;

use crate::error::{Result, SpectrumError};

/// Precomputed Hann coefficients for one transform size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowTable {
    coefficients: Vec<f32>,
}

impl WindowTable {
    /// Build a Hann window of length `n`
    ///
    /// w[i] = 0.5 * (1 - cos(2πi/(n-1))), i = 0..n
    ///
    /// `n == 1` makes the divisor zero and the single coefficient NaN.
    /// Callers must not ask for it; it is not rejected here.
    pub fn build(n: usize) -> Result<Self> {
        let mut coefficients = Vec::new();
        coefficients
            .try_reserve_exact(n)
            .map_err(|_| SpectrumError::AllocationFailed { nfft: n })?;

        let denom = n as f64 - 1.0;
        coefficients.extend((0..n).map(|i| {
            let angle = 2.0 * PI * i as f64 / denom;
            (0.5 * (1.0 - angle.cos())) as f32
        }));

        Ok(Self { coefficients })
    }

    /// Apply the window into `dst`: dst[i] = src[i] * w[i]
    ///
    /// Writes `min(len, src.len(), dst.len())` samples.
    pub fn apply(&self, src: &[f32], dst: &mut [f32]) {
        for ((out, &sample), &w) in dst.iter_mut().zip(src).zip(&self.coefficients) {
            *out = sample * w;
        }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl Deref for WindowTable {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.coefficients
    }
}
