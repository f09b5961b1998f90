//! Coordinate types accepted by the engine.
//!
//! Every predicate (orientation, point-in-triangle, segment crossing) runs in
//! `Coord::Wide`, so integer input is never rounded:
//! - `f32 → f64`, `f64 → f64`
//! - `i32 → i128`, `i64 → i128`
//!
//! Differences and sums of widened `i64` values fit in `i128`; their products
//! may not. `Exact::cross` and `Exact::product` take the `i128` fast path when
//! the products fit and fall back to a 256-bit product otherwise, so the whole
//! `i64` range is handled exactly.
//!
//! The Z-order key and the hole-bridge ray are computed in `f64` for all types.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Sub};

use num_traits::AsPrimitive;

/// Numeric type of a point coordinate.
pub trait Coord: Copy + PartialOrd + Debug + Send + Sync + AsPrimitive<f64> {
    /// Type the geometric predicates are evaluated in.
    type Wide: Exact;

    fn widen(self) -> Self::Wide;

    /// Total order used to sort holes; floats order NaN last via `total_cmp`.
    fn total_order(&self, other: &Self) -> Ordering;
}

/// Arithmetic the predicates run in.
///
/// Predicates only ever need the sign of a product difference or of a sum of
/// products, never the product itself.
pub trait Exact: Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Accumulator for sums of products.
    type Sum: Copy + Debug + Default + PartialOrd + Add<Output = Self::Sum>;

    fn product(a: Self, b: Self) -> Self::Sum;

    /// Sign of `a·b − c·d`. Unordered values (NaN) count as equal.
    fn cross(a: Self, b: Self, c: Self, d: Self) -> Ordering {
        Self::product(a, b)
            .partial_cmp(&Self::product(c, d))
            .unwrap_or(Ordering::Equal)
    }
}

impl Exact for f64 {
    type Sum = f64;

    #[inline]
    fn product(a: f64, b: f64) -> f64 {
        a * b
    }
}

impl Exact for i128 {
    type Sum = I256;

    #[inline]
    fn product(a: i128, b: i128) -> I256 {
        I256::product(a, b)
    }

    #[inline]
    fn cross(a: i128, b: i128, c: i128, d: i128) -> Ordering {
        match (a.checked_mul(b), c.checked_mul(d)) {
            (Some(l), Some(r)) => l.cmp(&r),
            _ => I256::product(a, b).cmp(&I256::product(c, d)),
        }
    }
}

/// Signed 256-bit integer in two's complement, `hi · 2^128 + lo`.
///
/// Only what the predicates need: exact products of two `i128`, addition and
/// ordering. Field order makes the derived `Ord` numeric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct I256 {
    hi: i128,
    lo: u128,
}

impl I256 {
    pub fn product(a: i128, b: i128) -> Self {
        let (hi, lo) = mul_u128(a.unsigned_abs(), b.unsigned_abs());
        // |a·b| <= 2^254, so the magnitude's top bit is clear.
        let magnitude = Self { hi: hi as i128, lo };
        if (a < 0) != (b < 0) {
            magnitude.neg()
        } else {
            magnitude
        }
    }

    fn neg(self) -> Self {
        let lo = (!self.lo).wrapping_add(1);
        let carry = (self.lo == 0) as i128;
        Self {
            hi: (!self.hi).wrapping_add(carry),
            lo,
        }
    }

    pub fn signum(&self) -> i8 {
        match self.cmp(&Self::default()) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl Add for I256 {
    type Output = I256;

    fn add(self, rhs: I256) -> I256 {
        let lo = self.lo.wrapping_add(rhs.lo);
        let carry = (lo < self.lo) as i128;
        I256 {
            hi: self.hi.wrapping_add(rhs.hi).wrapping_add(carry),
            lo,
        }
    }
}

/// Full 256-bit product of two `u128`, as `(high, low)` halves.
fn mul_u128(a: u128, b: u128) -> (u128, u128) {
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

macro_rules! float_coord {
    ($($t:ty => $w:ty),*) => {$(
        impl Coord for $t {
            type Wide = $w;
            #[inline]
            fn widen(self) -> $w {
                self as $w
            }
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }
    )*};
}

macro_rules! int_coord {
    ($($t:ty => $w:ty),*) => {$(
        impl Coord for $t {
            type Wide = $w;
            #[inline]
            fn widen(self) -> $w {
                self as $w
            }
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

float_coord!(f32 => f64, f64 => f64);
int_coord!(i32 => i128, i64 => i128);
