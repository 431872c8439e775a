//! Portable 128-bit-mantissa binary floating point.
//!
//! The Lorenz system amplifies every rounding difference, so the trajectory
//! kernel cannot use `f64`. `Float128` keeps exactly 128 mantissa bits and
//! rounds each add, subtract and multiply to nearest, ties to even. The
//! implementation is pure integer arithmetic and therefore bit-identical
//! on every target.
//!
//! Representation: `value = (-1)^neg * mant / 2^128 * 2^exp`, with `mant`
//! normalized so bit 127 is set. Zero is the single canonical `mant == 0`.

use core::cmp::Ordering;
use core::ops::{Add, Mul, Neg, Sub};

/// Mantissa width in bits.
pub const PRECISION_BITS: u32 = 128;

const HALF: u128 = 1 << 127;

// =============================================================================
// TYPE
// =============================================================================

/// Binary floating-point value with a fixed 128-bit mantissa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Float128 {
    neg: bool,
    exp: i32,
    mant: u128,
}

impl Float128 {
    /// Positive zero.
    pub const ZERO: Self = Self {
        neg: false,
        exp: 0,
        mant: 0,
    };

    /// One.
    pub const ONE: Self = Self {
        neg: false,
        exp: 1,
        mant: HALF,
    };

    // =========================================================================
    // CONVERSIONS
    // =========================================================================

    /// Exact conversion from an unsigned integer.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn from_u64(value: u64) -> Self {
        if value == 0 {
            return Self::ZERO;
        }
        let lz = value.leading_zeros();
        Self {
            neg: false,
            exp: 64 - lz as i32,
            mant: (value as u128) << (64 + lz),
        }
    }

    /// Exact conversion from a finite `f64`.
    ///
    /// Infinities and NaN are not representable; callers only feed finite
    /// preset constants through here.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let neg = bits >> 63 == 1;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1 << 52) - 1);

        let (mantissa, exp2) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1 << 52), biased - 1075)
        };

        if mantissa == 0 {
            return Self::ZERO;
        }

        let mut out = Self::from_u64(mantissa).mul_pow2(exp2);
        out.neg = neg;
        out
    }

    /// Nearest `f64` (ties to even). Overflows to infinity.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        #[allow(clippy::cast_possible_truncation)]
        let top = (self.mant >> 75) as u64;
        let rest = self.mant & ((1 << 75) - 1);
        let half = 1u128 << 74;

        let mut m = top;
        if rest > half || (rest == half && top & 1 == 1) {
            m += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let magnitude = (m as f64) * 2f64.powi(self.exp - 53);
        if self.neg {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Low 64 bits of `|trunc(self)|`.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn trunc_to_u64(self) -> u64 {
        if self.exp <= 0 {
            return 0;
        }
        let exp = self.exp as u32;
        if exp <= PRECISION_BITS {
            (self.mant >> (PRECISION_BITS - exp)) as u64
        } else if exp - PRECISION_BITS < PRECISION_BITS {
            (self.mant << (exp - PRECISION_BITS)) as u64
        } else {
            0
        }
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    /// True for zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.mant == 0
    }

    /// True for values strictly below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.neg && self.mant != 0
    }

    fn cmp_abs(self, other: Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .exp
                .cmp(&other.exp)
                .then(self.mant.cmp(&other.mant)),
        }
    }

    // =========================================================================
    // ARITHMETIC
    // =========================================================================

    /// Exact multiplication by `2^k`.
    #[must_use]
    pub const fn mul_pow2(self, k: i32) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            exp: self.exp + k,
            ..self
        }
    }

    /// Truncation toward zero.
    #[must_use]
    pub const fn trunc(self) -> Self {
        if self.exp <= 0 {
            return Self::ZERO;
        }
        #[allow(clippy::cast_sign_loss)]
        let exp = self.exp as u32;
        if exp >= PRECISION_BITS {
            return self;
        }
        let fraction_bits = PRECISION_BITS - exp;
        Self {
            mant: self.mant & !((1u128 << fraction_bits) - 1),
            ..self
        }
    }

    /// Rounded sum.
    #[allow(clippy::cast_possible_wrap)]
    fn sum(self, rhs: Self) -> Self {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }

        let (big, small) = if self.cmp_abs(rhs) == Ordering::Less {
            (rhs, self)
        } else {
            (self, rhs)
        };

        // 256-bit window: big occupies the high half, small is aligned
        // beneath it with lost bits folded into a sticky bit.
        let shift = (big.exp - small.exp).unsigned_abs();
        let (b_hi, b_lo) = shr_sticky(small.mant, 0, shift);

        if big.neg == small.neg {
            let (hi, carry) = big.mant.overflowing_add(b_hi);
            if carry {
                let lo = (b_lo >> 1) | (hi << 127) | (b_lo & 1);
                return round(big.neg, big.exp + 1, (hi >> 1) | HALF, lo);
            }
            return round(big.neg, big.exp, hi, b_lo);
        }

        let (lo, borrow) = 0u128.overflowing_sub(b_lo);
        let hi = big.mant - b_hi - u128::from(borrow);
        if hi == 0 && lo == 0 {
            return Self::ZERO;
        }

        let lz = if hi == 0 {
            128 + lo.leading_zeros()
        } else {
            hi.leading_zeros()
        };
        let (hi, lo) = shl_wide(hi, lo, lz);
        round(big.neg, big.exp - lz as i32, hi, lo)
    }

    // =========================================================================
    // BYTE EXTRACTION
    // =========================================================================

    /// Fractional part scaled to a byte.
    ///
    /// Negative fractions are lifted into `[0, 1)` by adding one before the
    /// `* 256` scaling; the result is the low byte of the truncated value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn fract_byte(self) -> u8 {
        let mut fraction = self - self.trunc();
        if fraction.is_negative() {
            fraction = fraction + Self::ONE;
        }
        (fraction.mul_pow2(8).trunc_to_u64() & 0xFF) as u8
    }

    /// Same as [`Self::fract_byte`] after scaling by `2^shift`.
    #[must_use]
    pub fn shifted_fract_byte(self, shift: i32) -> u8 {
        self.mul_pow2(shift).fract_byte()
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl Neg for Float128 {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            neg: !self.neg,
            ..self
        }
    }
}

impl Add for Float128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.sum(rhs)
    }
}

impl Sub for Float128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.sum(-rhs)
    }
}

impl Mul for Float128 {
    type Output = Self;

    /// Rounded product.
    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }

        let neg = self.neg != rhs.neg;
        let exp = self.exp + rhs.exp;
        let (hi, lo) = mul_wide(self.mant, rhs.mant);

        if hi & HALF != 0 {
            round(neg, exp, hi, lo)
        } else {
            round(neg, exp - 1, (hi << 1) | (lo >> 127), lo << 1)
        }
    }
}

// =============================================================================
// WIDE INTEGER HELPERS
// =============================================================================

/// Round a 256-bit `(mant, rest)` window to nearest, ties to even.
///
/// `mant` must be normalized; bit 127 of `rest` is the half bit.
const fn round(neg: bool, exp: i32, mant: u128, rest: u128) -> Float128 {
    let round_up = rest > HALF || (rest == HALF && mant & 1 == 1);
    if !round_up {
        return Float128 { neg, exp, mant };
    }
    match mant.checked_add(1) {
        Some(mant) => Float128 { neg, exp, mant },
        None => Float128 {
            neg,
            exp: exp + 1,
            mant: HALF,
        },
    }
}

/// Full 128x128 -> 256-bit product as `(hi, lo)`.
const fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;

    let (a1, a0) = (a >> 64, a & MASK);
    let (b1, b0) = (b >> 64, b & MASK);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);
    let lo = (p00 & MASK) | (mid << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (hi, lo)
}

/// Right shift of a 256-bit value; any bit shifted out sets bit 0.
const fn shr_sticky(hi: u128, lo: u128, shift: u32) -> (u128, u128) {
    if shift == 0 {
        return (hi, lo);
    }
    if shift >= 256 {
        return (0, (hi | lo != 0) as u128);
    }
    if shift >= 128 {
        let s = shift - 128;
        let new_lo = if s == 0 { hi } else { hi >> s };
        let lost = lo != 0 || (s != 0 && hi << (128 - s) != 0);
        return (0, new_lo | lost as u128);
    }
    let new_lo = (lo >> shift) | (hi << (128 - shift));
    let lost = lo << (128 - shift) != 0;
    (hi >> shift, new_lo | lost as u128)
}

/// Left shift of a 256-bit value by `n < 256`.
const fn shl_wide(hi: u128, lo: u128, n: u32) -> (u128, u128) {
    if n == 0 {
        (hi, lo)
    } else if n >= 128 {
        (lo << (n - 128), 0)
    } else {
        ((hi << n) | (lo >> (128 - n)), lo << n)
    }
}
