//! Audio Spectrum - real-time magnitude spectrum core
//! 
//! Hann-windowed real FFT magnitudes for visualization, with a size-keyed
//! transform cache and an in-crate mixed-radix FFT for arbitrary even sizes.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod spectrum;
pub mod transform;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::SpectrumError;
pub use spectrum::{SpectrumAnalyzer, TransformBackend};
