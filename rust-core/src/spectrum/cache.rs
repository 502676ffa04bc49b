//! Transform configuration cache
//!
//! Holds the forward transform plan for the most recently requested size
//! together with every buffer whose length depends on that size. All of them
//! are rebuilt together or released together, never one at a time.

use num_complex::Complex32;
use tracing::{debug, trace};

use super::fft::{ForwardRealTransform, TransformBackend};
use super::windowing::WindowTable;
use crate::error::{Result, SpectrumError};
use crate::transform::zeroed;

/// Size-keyed transform plan plus its window and scratch buffers
///
/// Invariant: when configured for N, `window.len() == windowed.len() == N`
/// and `spectrum.len() == N/2 + 1`. When empty, size is 0 and every buffer
/// is empty.
pub struct TransformCache {
    backend: TransformBackend,

    /// Cached transform size, 0 when nothing is held
    nfft: usize,

    plan: Option<Box<dyn ForwardRealTransform>>,
    window: WindowTable,
    windowed: Vec<f32>,
    spectrum: Vec<Complex32>,
}

/// Borrowed view of a configured cache, split so the pipeline can window
/// into one buffer while reading another
pub(crate) struct CacheParts<'a> {
    pub plan: &'a mut dyn ForwardRealTransform,
    pub window: &'a WindowTable,
    pub windowed: &'a mut [f32],
    pub spectrum: &'a mut [Complex32],
}

impl TransformCache {
    pub fn new(backend: TransformBackend) -> Self {
        Self {
            backend,
            nfft: 0,
            plan: None,
            window: WindowTable::default(),
            windowed: Vec::new(),
            spectrum: Vec::new(),
        }
    }

    /// Make sure a configuration for exactly `nfft` is held
    ///
    /// Reuses the current one if it already matches. Otherwise releases it
    /// and builds the plan, window table and scratch buffers for `nfft`.
    /// On failure the cache is left empty, never half-built.
    pub fn ensure(&mut self, nfft: usize) -> Result<()> {
        if nfft == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }
        if self.plan.is_some() && self.nfft == nfft {
            return Ok(());
        }

        self.release();

        match self.rebuild(nfft) {
            Ok(()) => {
                debug!(nfft, backend = %self.backend, "rebuilt transform configuration");
                Ok(())
            }
            Err(err) => {
                debug!(nfft, backend = %self.backend, error = %err, "transform configuration failed");
                Err(err)
            }
        }
    }

    fn rebuild(&mut self, nfft: usize) -> Result<()> {
        let plan = self.backend.plan(nfft)?;
        let window = WindowTable::build(nfft)?;
        let windowed = zeroed(nfft, 0.0, nfft)?;
        let spectrum = zeroed(nfft / 2 + 1, Complex32::new(0.0, 0.0), nfft)?;

        self.plan = Some(plan);
        self.window = window;
        self.windowed = windowed;
        self.spectrum = spectrum;
        self.nfft = nfft;
        Ok(())
    }

    /// Drop the held configuration and its buffers. Safe to call when empty.
    pub fn release(&mut self) {
        if self.plan.is_some() {
            trace!(nfft = self.nfft, "releasing transform configuration");
        }
        self.plan = None;
        self.window = WindowTable::default();
        self.windowed = Vec::new();
        self.spectrum = Vec::new();
        self.nfft = 0;
    }

    /// Cached size, or `None` when nothing is held
    pub fn size(&self) -> Option<usize> {
        self.plan.as_ref().map(|_| self.nfft)
    }

    pub fn is_configured(&self) -> bool {
        self.plan.is_some()
    }

    pub fn backend(&self) -> TransformBackend {
        self.backend
    }

    /// Window table for the cached size (empty when unconfigured)
    pub fn window(&self) -> &WindowTable {
        &self.window
    }

    /// Last complex spectrum computed at the cached size
    pub fn spectrum(&self) -> &[Complex32] {
        &self.spectrum
    }

    pub(crate) fn parts_mut(&mut self) -> Option<CacheParts<'_>> {
        let plan = self.plan.as_deref_mut()?;
        Some(CacheParts {
            plan,
            window: &self.window,
            windowed: &mut self.windowed,
            spectrum: &mut self.spectrum,
        })
    }
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new(TransformBackend::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(cache: &TransformCache, nfft: usize) {
        assert_eq!(cache.size(), Some(nfft));
        assert_eq!(cache.window().len(), nfft);
        assert_eq!(cache.windowed.len(), nfft);
        assert_eq!(cache.spectrum().len(), nfft / 2 + 1);
    }

    #[test]
    fn test_starts_empty() {
        let cache = TransformCache::default();
        assert_eq!(cache.size(), None);
        assert!(!cache.is_configured());
        assert!(cache.window().is_empty());
    }

    #[test]
    fn test_ensure_builds_all_buffers() {
        let mut cache = TransformCache::default();
        cache.ensure(512).unwrap();
        assert_consistent(&cache, 512);
    }

    #[test]
    fn test_ensure_same_size_keeps_configuration() {
        let mut cache = TransformCache::default();
        cache.ensure(256).unwrap();
        let window_ptr = cache.window().as_ptr();

        cache.ensure(256).unwrap();
        assert_eq!(cache.window().as_ptr(), window_ptr);
        assert_consistent(&cache, 256);
    }

    #[test]
    fn test_size_change_rebuilds_together() {
        let mut cache = TransformCache::default();
        cache.ensure(256).unwrap();
        cache.ensure(1000).unwrap();
        assert_consistent(&cache, 1000);
        cache.ensure(14).unwrap();
        assert_consistent(&cache, 14);
    }

    #[test]
    fn test_zero_is_noop() {
        let mut cache = TransformCache::default();
        cache.ensure(128).unwrap();

        assert!(matches!(cache.ensure(0), Err(SpectrumError::InvalidSize(0))));
        assert_consistent(&cache, 128);
    }

    #[test]
    fn test_failed_build_leaves_cache_empty() {
        let mut cache = TransformCache::new(TransformBackend::MixedRadix);
        cache.ensure(128).unwrap();

        assert!(matches!(cache.ensure(127), Err(SpectrumError::OddSize(127))));
        assert_eq!(cache.size(), None);
        assert!(cache.window().is_empty());
        assert!(cache.spectrum().is_empty());
        assert!(cache.parts_mut().is_none());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut cache = TransformCache::default();
        cache.release();
        cache.ensure(64).unwrap();
        cache.release();
        cache.release();

        assert_eq!(cache.size(), None);
        assert!(cache.windowed.is_empty());
        assert!(cache.spectrum().is_empty());
    }

    #[test]
    fn test_realfft_backend_takes_odd_sizes() {
        let mut cache = TransformCache::new(TransformBackend::RealFft);
        cache.ensure(9).unwrap();
        assert_consistent(&cache, 9);
    }
}
