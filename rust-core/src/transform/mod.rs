//! Mixed-radix FFT for arbitrary sizes
//!
//! Decimation-in-time Cooley-Tukey over the factorization of the size.
//! Factors 2, 3, 4 and 5 get specialized butterflies; any other factor is
//! combined by the generic O(p²) butterfly in [`generic`].

pub mod butterflies;
pub mod generic;
pub mod real;

pub use real::RealMixedRadixFft;

use num_complex::Complex32;
use std::f64::consts::PI;

use crate::error::{Result, SpectrumError};

/// Forward complex FFT plan for a fixed size
#[derive(Debug, Clone)]
pub struct MixedRadixFft {
    /// Transform size
    len: usize,

    /// (radix p, remaining length m) per decomposition layer, outermost first
    factors: Vec<(usize, usize)>,

    /// exp(-2πi·k/len) for k = 0..len
    twiddles: Vec<Complex32>,

    /// Largest factor that goes through the generic butterfly (0 if none)
    generic_radix: usize,
}

impl MixedRadixFft {
    /// Plan a forward transform of `len` complex points
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SpectrumError::InvalidSize(0));
        }

        let factors = factorize(len);
        let generic_radix = factors
            .iter()
            .map(|&(p, _)| p)
            .filter(|&p| !matches!(p, 2..=5))
            .max()
            .unwrap_or(0);

        let mut twiddles = zeroed(len, Complex32::new(0.0, 0.0), len)?;
        for (k, slot) in twiddles.iter_mut().enumerate() {
            *slot = twiddle(k, len);
        }

        Ok(Self {
            len,
            factors,
            twiddles,
            generic_radix,
        })
    }

    /// Transform size
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Radix layers as (p, m) pairs
    pub fn factors(&self) -> &[(usize, usize)] {
        &self.factors
    }

    /// Scratch length `process` needs for the generic butterfly
    pub fn scratch_len(&self) -> usize {
        self.generic_radix
    }

    /// Allocate a scratch arena sized for this plan
    pub fn make_scratch_vec(&self) -> Result<Vec<Complex32>> {
        zeroed(self.generic_radix, Complex32::new(0.0, 0.0), self.len)
    }

    /// Out-of-place forward transform
    ///
    /// # Arguments
    /// * `input` - `len` complex samples
    /// * `output` - receives `len` unnormalized bins
    /// * `scratch` - at least [`scratch_len`](Self::scratch_len) elements
    ///
    /// # Panics
    /// If any buffer is shorter than the plan requires.
    pub fn process(&self, input: &[Complex32], output: &mut [Complex32], scratch: &mut [Complex32]) {
        assert!(input.len() >= self.len, "input shorter than FFT size");
        assert!(output.len() >= self.len, "output shorter than FFT size");
        assert!(scratch.len() >= self.generic_radix, "scratch shorter than largest generic radix");

        self.work(&mut output[..self.len], input, 1, 0, scratch);
    }

    /// One decomposition layer: recurse into the `p` sub-transforms, then combine
    fn work(
        &self,
        out: &mut [Complex32],
        input: &[Complex32],
        fstride: usize,
        stage: usize,
        scratch: &mut [Complex32],
    ) {
        let (p, m) = self.factors[stage];

        if m == 1 {
            for (q, slot) in out[..p].iter_mut().enumerate() {
                *slot = input[q * fstride];
            }
        } else {
            for (q, lane) in out.chunks_exact_mut(m).enumerate() {
                self.work(lane, &input[q * fstride..], fstride * p, stage + 1, scratch);
            }
        }

        let tw = &self.twiddles;
        match p {
            2 => butterflies::butterfly_2(out, fstride, tw, m),
            3 => butterflies::butterfly_3(out, fstride, tw, m),
            4 => butterflies::butterfly_4(out, fstride, tw, m),
            5 => butterflies::butterfly_5(out, fstride, tw, m),
            _ => generic::combine(out, fstride, tw, m, p, scratch),
        }
    }
}

/// Split `n` into radix layers: fours first, then twos, threes, fives and odd
/// trial divisors up to floor(sqrt(n)); whatever remains is the last factor.
///
/// Each entry is (p, m) where m is the length left after dividing out p.
pub fn factorize(mut n: usize) -> Vec<(usize, usize)> {
    let floor_sqrt = (n as f64).sqrt().floor() as usize;
    let mut factors = Vec::new();
    let mut p = 4;

    loop {
        while n % p != 0 {
            p = match p {
                4 => 2,
                2 => 3,
                _ => p + 2,
            };
            if p > floor_sqrt {
                p = n;
            }
        }
        n /= p;
        factors.push((p, n));
        if n <= 1 {
            break;
        }
    }

    factors
}

/// `len` copies of `value`, reserved up front so an oversized request
/// reports `AllocationFailed` for transform size `nfft` instead of aborting
pub(crate) fn zeroed<T: Clone>(len: usize, value: T, nfft: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SpectrumError::AllocationFailed { nfft })?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// exp(-2πi·k/n), computed in double precision
pub(crate) fn twiddle(k: usize, n: usize) -> Complex32 {
    let phase = -2.0 * PI * k as f64 / n as f64;
    Complex32::new(phase.cos() as f32, phase.sin() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    fn test_signal(len: usize) -> Vec<Complex32> {
        (0..len)
            .map(|i| {
                let t = i as f32;
                Complex32::new((0.37 * t).sin() + 0.25, (1.3 * t).cos() * 0.5)
            })
            .collect()
    }

    fn reference_fft(input: &[Complex32]) -> Vec<Complex32> {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(input.len());
        let mut buffer = input.to_vec();
        fft.process(&mut buffer);
        buffer
    }

    fn assert_matches_reference(len: usize) {
        let plan = MixedRadixFft::new(len).unwrap();
        let input = test_signal(len);
        let mut output = vec![Complex32::new(0.0, 0.0); len];
        let mut scratch = plan.make_scratch_vec().unwrap();
        plan.process(&input, &mut output, &mut scratch);

        let expected = reference_fft(&input);
        let tolerance = 1e-4 * len as f32;
        for (k, (got, want)) in output.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).norm() < tolerance,
                "size {len}, bin {k}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn test_factorization_order() {
        assert_eq!(factorize(1), vec![(1, 1)]);
        assert_eq!(factorize(2), vec![(2, 1)]);
        assert_eq!(factorize(8), vec![(4, 2), (2, 1)]);
        assert_eq!(factorize(6), vec![(2, 3), (3, 1)]);
        assert_eq!(factorize(77), vec![(7, 11), (11, 1)]);
        assert_eq!(factorize(22), vec![(2, 11), (11, 1)]);
        assert_eq!(factorize(1000), vec![(4, 250), (2, 125), (5, 25), (5, 5), (5, 1)]);
    }

    #[test]
    fn test_factors_multiply_back() {
        for n in 1..300 {
            let product: usize = factorize(n).iter().map(|&(p, _)| p).product();
            assert_eq!(product, n);
        }
    }

    #[test]
    fn test_scratch_only_for_generic_factors() {
        assert_eq!(MixedRadixFft::new(1024).unwrap().scratch_len(), 0);
        assert_eq!(MixedRadixFft::new(60).unwrap().scratch_len(), 0);
        assert_eq!(MixedRadixFft::new(77).unwrap().scratch_len(), 11);
        assert_eq!(MixedRadixFft::new(14).unwrap().scratch_len(), 7);
    }

    #[test]
    fn test_scratch_vec_matches_scratch_len() {
        let plan = MixedRadixFft::new(154).unwrap();
        assert_eq!(plan.make_scratch_vec().unwrap().len(), plan.scratch_len());
    }

    #[test]
    fn test_oversized_buffer_reports_allocation_failure() {
        assert!(matches!(
            zeroed(usize::MAX, Complex32::new(0.0, 0.0), 12),
            Err(SpectrumError::AllocationFailed { nfft: 12 })
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(MixedRadixFft::new(0), Err(SpectrumError::InvalidSize(0))));
    }

    #[test]
    fn test_specialized_radices_match_reference() {
        for len in [1, 2, 3, 4, 5, 8, 12, 16, 20, 30, 60, 64, 100, 256, 1000] {
            assert_matches_reference(len);
        }
    }

    #[test]
    fn test_generic_radices_match_reference() {
        for len in [7, 11, 13, 14, 21, 49, 77, 91, 98, 121, 154, 242] {
            assert_matches_reference(len);
        }
    }
}
