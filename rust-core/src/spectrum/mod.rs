//! Spectral analysis with FFT

pub mod analysis;
pub mod cache;
pub mod fft;
pub mod windowing;

pub use analysis::{bin_to_hz, frequency_axis_hz, normalization_divisor, SpectrumAnalyzer};
pub use cache::TransformCache;
pub use fft::{ForwardRealTransform, RealFftTransform, TransformBackend};
pub use windowing::WindowTable;
