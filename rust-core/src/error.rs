//! Error types for spectral analysis
//!
//! Every failure the pipeline can hit is a variant here. The managed-caller
//! boundary folds them all into "no bins written".

use thiserror::Error;

/// Errors produced while configuring or running a spectral analysis
#[derive(Debug, Error)]
pub enum SpectrumError {
    /// Transform size was zero or negative
    #[error("Transform size must be positive (got {0})")]
    InvalidSize(i64),

    /// The mixed-radix real transform packs sample pairs and cannot take odd sizes
    #[error("Real transform size must be even (got {0})")]
    OddSize(usize),

    /// Buffers for the transform configuration could not be reserved
    #[error("Failed to allocate transform configuration for size {nfft}")]
    AllocationFailed { nfft: usize },

    /// Caller handed in fewer samples than the transform size
    #[error("Input holds {got} samples but the transform needs {needed}")]
    InputTooShort { needed: usize, got: usize },

    /// The library backend rejected its buffers
    #[error("Forward transform failed: {0}")]
    Transform(#[from] realfft::FftError),

    /// Backend name did not match any known backend
    #[error("Unknown transform backend: {0}")]
    UnknownBackend(String),
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
