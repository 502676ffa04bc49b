//! Real-time spectrum analyzer
//!
//! Windows a frame, runs the forward real FFT and writes normalized bin
//! magnitudes into a caller-owned buffer. The transform plan and every
//! size-dependent buffer live in a [`TransformCache`] and are reused until the
//! requested size changes.

use tracing::debug;

use super::cache::TransformCache;
use super::fft::TransformBackend;
use crate::error::{Result, SpectrumError};

/// Spectrum analyzer for one audio thread
///
/// Owns its configuration cache, so `&mut self` on every call keeps a
/// size change from racing a frame in flight. Share across threads only
/// behind a lock held for the whole call.
#[derive(Default)]
pub struct SpectrumAnalyzer {
    cache: TransformCache,
}

impl SpectrumAnalyzer {
    /// Create analyzer using the default (mixed-radix) backend
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: TransformBackend) -> Self {
        Self {
            cache: TransformCache::new(backend),
        }
    }

    /// Analyze one frame
    ///
    /// # Arguments
    /// * `input` - at least `nfft` samples; only the first `nfft` are read
    /// * `output` - receives normalized magnitudes starting at index 0
    /// * `nfft` - transform size
    ///
    /// # Returns
    /// Number of bins written: `min(output.len(), nfft / 2)`. The Nyquist bin
    /// is never written. Each value is |X[k]| / (nfft / 2), integer division.
    ///
    /// On error nothing is written to `output`.
    pub fn analyze(&mut self, input: &[f32], output: &mut [f32], nfft: usize) -> Result<usize> {
        if nfft == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }

        check_input(input, nfft)?;
        self.cache.ensure(nfft)?;

        let parts = self
            .cache
            .parts_mut()
            .ok_or(SpectrumError::AllocationFailed { nfft })?;

        parts.window.apply(&input[..nfft], parts.windowed);
        parts.plan.process(parts.windowed, parts.spectrum)?;

        let bins = output.len().min(nfft / 2);
        let divisor = normalization_divisor(nfft);
        for (out, bin) in output[..bins].iter_mut().zip(parts.spectrum.iter()) {
            *out = bin.norm_sqr().sqrt() / divisor;
        }

        Ok(bins)
    }

    /// Analyze one frame into a fresh vector of `nfft / 2` magnitudes
    pub fn spectrum(&mut self, input: &[f32], nfft: usize) -> Result<Vec<f32>> {
        if nfft == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }
        check_input(input, nfft)?;

        let mut output = vec![0.0; nfft / 2];
        let bins = self.analyze(input, &mut output, nfft)?;
        output.truncate(bins);
        Ok(output)
    }

    /// Boundary form of [`analyze`](Self::analyze)
    ///
    /// Never fails: any error (non-positive size, failed configuration, short
    /// input) is logged at debug level and reported as 0 bins written.
    pub fn compute_spectrum(&mut self, input: &[f32], output: &mut [f32], nfft: i64) -> usize {
        let result = usize::try_from(nfft)
            .map_err(|_| SpectrumError::InvalidSize(nfft))
            .and_then(|n| self.analyze(input, output, n));

        match result {
            Ok(bins) => bins,
            Err(err) => {
                debug!(nfft, error = %err, "spectrum frame skipped");
                0
            }
        }
    }

    /// Release the cached configuration. Safe to call at any time.
    pub fn cleanup(&mut self) {
        self.cache.release();
    }

    /// Currently cached transform size
    pub fn fft_size(&self) -> Option<usize> {
        self.cache.size()
    }

    pub fn backend(&self) -> TransformBackend {
        self.cache.backend()
    }

    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }
}

/// A frame must hold at least `nfft` samples. Checked before the cache is
/// touched, so `nfft` never exceeds memory the caller already holds.
fn check_input(input: &[f32], nfft: usize) -> Result<()> {
    if input.len() < nfft {
        return Err(SpectrumError::InputTooShort {
            needed: nfft,
            got: input.len(),
        });
    }
    Ok(())
}

/// Magnitude divisor for a transform of `nfft` samples: `nfft / 2` truncated
///
/// For odd sizes this is smaller than nfft/2.0 (9 -> 4, not 4.5).
pub fn normalization_divisor(nfft: usize) -> f32 {
    (nfft / 2) as f32
}

/// Center frequency of `bin` in Hz
pub fn bin_to_hz(bin: usize, nfft: usize, sample_rate: f64) -> f64 {
    bin as f64 * sample_rate / nfft as f64
}

/// Frequencies in Hz for the `nfft / 2` bins the analyzer writes
pub fn frequency_axis_hz(nfft: usize, sample_rate: f64) -> Vec<f64> {
    (0..nfft / 2)
        .map(|bin| bin_to_hz(bin, nfft, sample_rate))
        .collect()
}
