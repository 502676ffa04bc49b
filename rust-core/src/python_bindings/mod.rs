//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn audio_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    // Process-style entry points backed by a per-thread analyzer
    m.add_function(wrap_pyfunction!(spectrum_bindings::compute_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::release_resources, m)?)?;

    Ok(())
}
