//! Forward real FFT backends
//!
//! The analysis pipeline only talks to [`ForwardRealTransform`]. Two backends
//! implement it: the in-crate mixed-radix transform and the `realfft` planner.

use num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, SpectrumError};
use crate::transform::RealMixedRadixFft;

/// A forward FFT of real input, prepared for one size
pub trait ForwardRealTransform: Send {
    /// Real input length the transform was planned for
    fn len(&self) -> usize;

    /// Transform `input` (exactly `len()` samples) into `len()/2 + 1` bins
    ///
    /// `input` may be used as scratch and is left in an unspecified state.
    fn process(&mut self, input: &mut [f32], output: &mut [Complex32]) -> Result<()>;
}

impl ForwardRealTransform for RealMixedRadixFft {
    fn len(&self) -> usize {
        RealMixedRadixFft::len(self)
    }

    fn process(&mut self, input: &mut [f32], output: &mut [Complex32]) -> Result<()> {
        RealMixedRadixFft::process(self, input, output);
        Ok(())
    }
}

/// `realfft` plan plus its scratch buffer
pub struct RealFftTransform {
    r2c: Arc<dyn RealToComplex<f32>>,
    scratch: Vec<Complex32>,
}

impl RealFftTransform {
    pub fn new(len: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let r2c = planner.plan_fft_forward(len);
        let scratch = r2c.make_scratch_vec();

        Self { r2c, scratch }
    }
}

impl ForwardRealTransform for RealFftTransform {
    fn len(&self) -> usize {
        self.r2c.len()
    }

    fn process(&mut self, input: &mut [f32], output: &mut [Complex32]) -> Result<()> {
        self.r2c
            .process_with_scratch(input, output, &mut self.scratch)?;
        Ok(())
    }
}

/// Which forward transform the configuration cache builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformBackend {
    /// In-crate mixed-radix transform; even sizes only
    #[default]
    MixedRadix,

    /// `realfft` planner; any positive size
    RealFft,
}

impl TransformBackend {
    /// Plan a forward transform of `nfft` real samples
    pub fn plan(self, nfft: usize) -> Result<Box<dyn ForwardRealTransform>> {
        if nfft == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }

        match self {
            TransformBackend::MixedRadix => Ok(Box::new(RealMixedRadixFft::new(nfft)?)),
            TransformBackend::RealFft => Ok(Box::new(RealFftTransform::new(nfft))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformBackend::MixedRadix => "mixed_radix",
            TransformBackend::RealFft => "realfft",
        }
    }
}

impl fmt::Display for TransformBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformBackend {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mixed_radix" | "mixed-radix" | "kiss" => Ok(TransformBackend::MixedRadix),
            "realfft" | "real_fft" => Ok(TransformBackend::RealFft),
            other => Err(SpectrumError::UnknownBackend(other.to_string())),
        }
    }
}
