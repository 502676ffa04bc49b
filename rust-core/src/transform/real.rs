//! Real-input forward FFT on top of a half-size complex plan
//!
//! Packs `nfft` real samples into `nfft/2` complex points (even samples in
//! the real part, odd in the imaginary part), transforms them, then splits
//! the result into the `nfft/2 + 1` non-redundant bins.

use num_complex::Complex32;
use std::f64::consts::PI;

use super::{zeroed, MixedRadixFft};
use crate::error::{Result, SpectrumError};

/// Forward real FFT for an even size, with its own working buffers
#[derive(Debug, Clone)]
pub struct RealMixedRadixFft {
    /// Real input length
    len: usize,

    /// Complex plan of size len/2
    half: MixedRadixFft,

    /// exp(-iπ((k+1)/(len/2) + 1/2)) for k = 0..len/4
    split_twiddles: Vec<Complex32>,

    /// Packed input pairs
    packed: Vec<Complex32>,

    /// Half-size transform output
    half_spectrum: Vec<Complex32>,

    /// Generic butterfly arena for the half-size plan
    scratch: Vec<Complex32>,
}

impl RealMixedRadixFft {
    /// Plan a forward transform of `len` real samples
    ///
    /// Fails with [`SpectrumError::OddSize`] unless `len` is even.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }
        if len % 2 != 0 {
            return Err(SpectrumError::OddSize(len));
        }

        let ncfft = len / 2;
        let half = MixedRadixFft::new(ncfft)?;

        let split_twiddles = (0..ncfft / 2)
            .map(|k| {
                let phase = -PI * ((k + 1) as f64 / ncfft as f64 + 0.5);
                Complex32::new(phase.cos() as f32, phase.sin() as f32)
            })
            .collect();

        let packed = zeroed(ncfft, Complex32::new(0.0, 0.0), len)?;
        let half_spectrum = zeroed(ncfft, Complex32::new(0.0, 0.0), len)?;
        let scratch = half.make_scratch_vec()?;

        Ok(Self {
            len,
            half,
            split_twiddles,
            packed,
            half_spectrum,
            scratch,
        })
    }

    /// Real input length
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of output bins (len/2 + 1)
    pub fn output_len(&self) -> usize {
        self.len / 2 + 1
    }

    /// Forward transform
    ///
    /// # Arguments
    /// * `input` - `len` real samples
    /// * `output` - receives `len/2 + 1` unnormalized bins, DC first, Nyquist last
    ///
    /// # Panics
    /// If `input` or `output` is shorter than required.
    pub fn process(&mut self, input: &[f32], output: &mut [Complex32]) {
        let ncfft = self.half.len();
        assert!(input.len() >= self.len, "input shorter than FFT size");
        assert!(output.len() > ncfft, "output shorter than len/2 + 1");

        for (slot, pair) in self.packed.iter_mut().zip(input.chunks_exact(2)) {
            *slot = Complex32::new(pair[0], pair[1]);
        }

        self.half
            .process(&self.packed, &mut self.half_spectrum, &mut self.scratch);

        let dc = self.half_spectrum[0];
        output[0] = Complex32::new(dc.re + dc.im, 0.0);
        output[ncfft] = Complex32::new(dc.re - dc.im, 0.0);

        for k in 1..=ncfft / 2 {
            let fpk = self.half_spectrum[k];
            let fpnk = self.half_spectrum[ncfft - k].conj();

            let f1k = fpk + fpnk;
            let f2k = fpk - fpnk;
            let tw = f2k * self.split_twiddles[k - 1];

            output[k] = (f1k + tw) * 0.5;
            output[ncfft - k] = Complex32::new(0.5 * (f1k.re - tw.re), 0.5 * (tw.im - f1k.im));
        }
    }
}
