use attractor::kernels::float128::Float128;
use bolero::check;

// Sums and products of small dyadic doubles are exact at 128 bits, so the
// single rounding in `to_f64` must agree with native arithmetic.

fn dyadic(v: i32) -> f64 {
    f64::from(v) / 1024.0
}

#[test]
fn fuzz_float128_matches_f64() {
    check!()
        .with_type::<(i32, i32)>()
        .for_each(|&(a, b)| {
            let (fa, fb) = (dyadic(a), dyadic(b));
            let (qa, qb) = (Float128::from_f64(fa), Float128::from_f64(fb));

            assert_eq!((qa + qb).to_f64(), fa + fb, "{fa} + {fb}");
            assert_eq!((qa - qb).to_f64(), fa - fb, "{fa} - {fb}");
            assert_eq!((qa * qb).to_f64(), fa * fb, "{fa} * {fb}");
        });
}

#[test]
fn fuzz_fraction_byte() {
    check!().with_type::<i32>().for_each(|&v| {
        let f = dyadic(v);
        let expected = ((f - f.trunc()).rem_euclid(1.0) * 256.0) as u8;
        assert_eq!(Float128::from_f64(f).fract_byte(), expected, "{f}");
    });
}
