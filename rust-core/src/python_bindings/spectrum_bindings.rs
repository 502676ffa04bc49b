//! Python bindings for spectrum analysis

use numpy::{PyArray1, PyReadonlyArray1, PyReadwriteArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::cell::RefCell;
use tracing::debug;

use crate::spectrum::{SpectrumAnalyzer, TransformBackend};

thread_local! {
    static THREAD_ANALYZER: RefCell<SpectrumAnalyzer> = RefCell::new(SpectrumAnalyzer::new());
}

/// Borrow both numpy buffers and run one frame. Anything that cannot be
/// borrowed as a contiguous float32 array means 0 bins and no writes.
fn compute_into(analyzer: &mut SpectrumAnalyzer, input: &PyAny, output: &PyAny, nfft: i64) -> usize {
    let Ok(input) = input.extract::<PyReadonlyArray1<f32>>() else {
        debug!(nfft, "input is not a readable float32 array");
        return 0;
    };
    let Ok(mut output) = output.extract::<PyReadwriteArray1<f32>>() else {
        debug!(nfft, "output is not a writable float32 array");
        return 0;
    };
    let (Ok(samples), Ok(magnitudes)) = (input.as_slice(), output.as_slice_mut()) else {
        debug!(nfft, "spectrum buffers are not contiguous");
        return 0;
    };

    analyzer.compute_spectrum(samples, magnitudes, nfft)
}

/// Spectrum analyzer exposed to Python
///
/// Bound to the thread that created it.
#[pyclass(name = "SpectrumAnalyzer", unsendable)]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     backend: "mixed_radix" (even sizes) or "realfft" (any size)
    #[new]
    #[pyo3(signature = (backend="mixed_radix"))]
    fn new(backend: &str) -> PyResult<Self> {
        let backend = backend
            .parse::<TransformBackend>()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            analyzer: SpectrumAnalyzer::with_backend(backend),
        })
    }

    /// Write normalized magnitudes of one frame into `output`
    ///
    /// Args:
    ///     input: float32 array with at least nfft samples
    ///     output: float32 array receiving min(len(output), nfft // 2) values
    ///     nfft: transform size
    ///
    /// Returns:
    ///     Number of bins written (0 if the frame was skipped)
    fn compute_spectrum(&mut self, input: &PyAny, output: &PyAny, nfft: i64) -> usize {
        compute_into(&mut self.analyzer, input, output, nfft)
    }

    /// Analyze a frame and return all nfft // 2 magnitudes
    ///
    /// Raises:
    ///     ValueError: if the size is invalid or the input is too short
    fn spectrum<'py>(
        &mut self,
        py: Python<'py>,
        input: PyReadonlyArray1<f32>,
        nfft: usize,
    ) -> PyResult<&'py PyArray1<f32>> {
        let samples = input
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let magnitudes = self
            .analyzer
            .spectrum(samples, nfft)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(PyArray1::from_vec(py, magnitudes))
    }

    /// Free the cached transform configuration
    fn release_resources(&mut self) {
        self.analyzer.cleanup();
    }

    /// Currently cached transform size, or None
    #[getter]
    fn fft_size(&self) -> Option<usize> {
        self.analyzer.fft_size()
    }

    #[getter]
    fn backend(&self) -> &'static str {
        self.analyzer.backend().name()
    }
}

/// Write normalized magnitudes using this thread's analyzer
#[pyfunction]
pub fn compute_spectrum(input: &PyAny, output: &PyAny, nfft: i64) -> usize {
    THREAD_ANALYZER.with(|cell| compute_into(&mut cell.borrow_mut(), input, output, nfft))
}

/// Free this thread's cached transform configuration
#[pyfunction]
pub fn release_resources() {
    THREAD_ANALYZER.with(|cell| cell.borrow_mut().cleanup());
}
