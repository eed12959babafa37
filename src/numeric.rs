//! Integer helpers shared by every layout engine.
//!
//! All layout arithmetic is done on `i64` with the same truncating semantics
//! as the historical output: `/` rounds toward zero and `%` takes the sign of
//! the dividend. Addition and multiplication saturate instead of panicking so absurd query
//! values produce a degenerate picture rather than a crash.

use std::fmt;

/// Clamp `value` into `[min, max]`.
#[inline]
pub const fn clamp(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Remainder with the sign of the dividend. A zero divisor yields zero.
#[inline]
pub const fn modulo(a: i64, b: i64) -> i64 {
    if b == 0 { 0 } else { a.wrapping_rem(b) }
}

/// Division truncating toward zero. A zero divisor yields zero.
#[inline]
pub const fn div(a: i64, b: i64) -> i64 {
    if b == 0 { 0 } else { a.wrapping_div(b) }
}

#[inline]
pub const fn add(a: i64, b: i64) -> i64 {
    a.saturating_add(b)
}

#[inline]
pub const fn mul(a: i64, b: i64) -> i64 {
    a.saturating_mul(b)
}

/// Ceiling division for a non-negative dividend and positive divisor.
#[inline]
pub const fn ceil_div(a: i64, b: i64) -> i64 {
    let q = div(a, b);
    if modulo(a, b) != 0 { q + 1 } else { q }
}

/// Replace non-positive values with `fallback`.
#[inline]
pub const fn positive_or(value: i64, fallback: i64) -> i64 {
    if value <= 0 { fallback } else { value }
}

/// A percentage, clamped to `[0, 100]` when constructed.
///
/// Every chart clamps before doing any arithmetic, so layout code takes this
/// type instead of a raw integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    #[inline]
    pub const fn clamped(value: i64) -> Percentage {
        Percentage(clamp(value, 0, 100) as u8)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0 as i64
    }

    /// `value * self / 100` with integer truncation.
    #[inline]
    pub const fn of(self, value: i64) -> i64 {
        div(mul(value, self.get()), 100)
    }

    /// Fraction in `[0.0, 1.0]`.
    #[inline]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<i64> for Percentage {
    fn from(value: i64) -> Self {
        Percentage::clamped(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
