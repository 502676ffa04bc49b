//! Generic radix butterfly
//!
//! Combines one decomposition layer for a radix with no specialized
//! butterfly (any factor other than 2, 3, 4, 5). Each of the `m` lanes gets a
//! direct size-`p` DFT, O(p²) per lane. Fine for the small prime factors that
//! practical audio frame sizes leave over.

use num_complex::Complex32;

/// Combine `p` sub-transforms of length `m` in place.
///
/// # Arguments
/// * `data` - `p * m` values; sub-transform `q` occupies `data[q*m..(q+1)*m]`
/// * `fstride` - twiddle stride for this layer (full size / (p * m))
/// * `twiddles` - the plan's full table, exp(-2πi·k/N) for k in 0..N
/// * `m` - lanes in this layer
/// * `p` - radix
/// * `scratch` - at least `p` elements, reused across lanes
///
/// `m`, `p`, `fstride` and `twiddles` must come from the same plan, with
/// `fstride * p * m == twiddles.len()`.
pub fn combine(
    data: &mut [Complex32],
    fstride: usize,
    twiddles: &[Complex32],
    m: usize,
    p: usize,
    scratch: &mut [Complex32],
) {
    let n = twiddles.len();
    let scratch = &mut scratch[..p];

    for u in 0..m {
        for (q, slot) in scratch.iter_mut().enumerate() {
            *slot = data[u + q * m];
        }

        for q1 in 0..p {
            let k = u + q1 * m;
            let step = fstride * k;
            let mut twidx = 0;
            let mut acc = scratch[0];
            for &value in &scratch[1..] {
                twidx += step;
                if twidx >= n {
                    twidx -= n;
                }
                acc += value * twiddles[twidx];
            }
            data[k] = acc;
        }
    }
}

/// Direct DFT used as ground truth by the butterfly tests
#[cfg(test)]
pub(crate) fn naive_dft(input: &[Complex32]) -> Vec<Complex32> {
    let n = input.len();
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(j, &x)| x * crate::transform::twiddle((j * k) % n, n))
                .sum()
        })
        .collect()
}
