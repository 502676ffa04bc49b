//! Specialized forward butterflies for radix 2, 3, 4 and 5
//!
//! Each function combines `p` interleaved sub-transforms of length `m` held
//! in `data[0..p*m]`. Twiddle `k * fstride` of the plan's table is
//! exp(-2πi·k/(p·m)) at this layer.

use num_complex::Complex32;

pub fn butterfly_2(data: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize) {
    let (lo, hi) = data[..2 * m].split_at_mut(m);
    for (k, (a, b)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let t = *b * twiddles[k * fstride];
        *b = *a - t;
        *a += t;
    }
}

pub fn butterfly_3(data: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize) {
    // sin(-2π/3)
    let epi3 = twiddles[fstride * m].im;

    for k in 0..m {
        let s1 = data[k + m] * twiddles[k * fstride];
        let s2 = data[k + 2 * m] * twiddles[2 * k * fstride];
        let s3 = s1 + s2;
        let s0 = (s1 - s2) * epi3;

        let d0 = data[k];
        let half = d0 - s3 * 0.5;
        data[k] = d0 + s3;
        data[k + m] = Complex32::new(half.re - s0.im, half.im + s0.re);
        data[k + 2 * m] = Complex32::new(half.re + s0.im, half.im - s0.re);
    }
}

pub fn butterfly_4(data: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize) {
    for k in 0..m {
        let s0 = data[k + m] * twiddles[k * fstride];
        let s1 = data[k + 2 * m] * twiddles[2 * k * fstride];
        let s2 = data[k + 3 * m] * twiddles[3 * k * fstride];

        let s5 = data[k] - s1;
        let d = data[k] + s1;
        let s3 = s0 + s2;
        let s4 = s0 - s2;

        data[k] = d + s3;
        data[k + 2 * m] = d - s3;
        data[k + m] = Complex32::new(s5.re + s4.im, s5.im - s4.re);
        data[k + 3 * m] = Complex32::new(s5.re - s4.im, s5.im + s4.re);
    }
}

pub fn butterfly_5(data: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize) {
    let ya = twiddles[fstride * m];
    let yb = twiddles[2 * fstride * m];

    for u in 0..m {
        let s0 = data[u];
        let s1 = data[u + m] * twiddles[u * fstride];
        let s2 = data[u + 2 * m] * twiddles[2 * u * fstride];
        let s3 = data[u + 3 * m] * twiddles[3 * u * fstride];
        let s4 = data[u + 4 * m] * twiddles[4 * u * fstride];

        let s7 = s1 + s4;
        let s10 = s1 - s4;
        let s8 = s2 + s3;
        let s9 = s2 - s3;

        data[u] = s0 + s7 + s8;

        let s5 = Complex32::new(
            s0.re + s7.re * ya.re + s8.re * yb.re,
            s0.im + s7.im * ya.re + s8.im * yb.re,
        );
        let s6 = Complex32::new(
            s10.im * ya.im + s9.im * yb.im,
            -s10.re * ya.im - s9.re * yb.im,
        );
        data[u + m] = s5 - s6;
        data[u + 4 * m] = s5 + s6;

        let s11 = Complex32::new(
            s0.re + s7.re * yb.re + s8.re * ya.re,
            s0.im + s7.im * yb.re + s8.im * ya.re,
        );
        let s12 = Complex32::new(
            -s10.im * yb.im + s9.im * ya.im,
            s10.re * yb.im - s9.re * ya.im,
        );
        data[u + 2 * m] = s11 + s12;
        data[u + 3 * m] = s11 - s12;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::generic::naive_dft;
    use crate::transform::twiddle;

    fn table(n: usize) -> Vec<Complex32> {
        (0..n).map(|k| twiddle(k, n)).collect()
    }

    fn check_single_layer(p: usize, run: fn(&mut [Complex32], usize, &[Complex32], usize)) {
        let input: Vec<Complex32> = (0..p)
            .map(|i| Complex32::new(i as f32 + 1.0, 0.5 - i as f32))
            .collect();
        let mut data = input.clone();
        run(&mut data, 1, &table(p), 1);

        for (got, want) in data.iter().zip(naive_dft(&input).iter()) {
            assert!((got - want).norm() < 1e-4, "radix {p}: got {got}, want {want}");
        }
    }

    #[test]
    fn test_single_layer_is_a_dft() {
        check_single_layer(2, butterfly_2);
        check_single_layer(3, butterfly_3);
        check_single_layer(4, butterfly_4);
        check_single_layer(5, butterfly_5);
    }
}
