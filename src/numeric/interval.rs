// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::numeric::eft::{product_is_exact, two_diff, two_product, two_sum};
use crate::numeric::sign::Sign;

/// Smallest double strictly greater than `x`.
#[inline]
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest double strictly less than `x`.
#[inline]
pub fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

/// A rounding direction, applied to one operation at a time.
///
/// The operation is carried out exactly with an error-free transform and the
/// rounded-to-nearest result is moved one step when the exact error lies on
/// the wrong side. No floating-point control state is read or written, so the
/// directions can be mixed freely inside one expression and across threads.
pub trait Rounding {
    /// The neighbouring double in this direction.
    fn outward(value: f64) -> f64;

    /// Whether an exact rounding error lies on this direction's side of zero.
    fn error_is_outward(error: f64) -> bool;

    /// Rounds the exact value `value + error` in this direction.
    ///
    /// A NaN error means the transform overflowed; the correctly rounded
    /// `value` is still within one step of the truth.
    #[inline]
    fn adjust(value: f64, error: f64) -> f64 {
        if error.is_nan() || Self::error_is_outward(error) {
            Self::outward(value)
        } else {
            value
        }
    }

    #[inline]
    fn add(a: f64, b: f64) -> f64 {
        let (s, e) = two_sum(a, b);
        Self::adjust(s, e)
    }

    #[inline]
    fn sub(a: f64, b: f64) -> f64 {
        let (s, e) = two_diff(a, b);
        Self::adjust(s, e)
    }

    #[inline]
    fn mul(a: f64, b: f64) -> f64 {
        let (p, e) = two_product(a, b);
        if product_is_exact(a, b, p) {
            Self::adjust(p, e)
        } else {
            Self::outward(p)
        }
    }
}

/// Round toward negative infinity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Downward;

/// Round toward positive infinity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Upward;

impl Rounding for Downward {
    #[inline]
    fn outward(value: f64) -> f64 {
        // next_down(+inf) is f64::MAX: an overflowed sum of finite operands
        next_down(value)
    }

    #[inline]
    fn error_is_outward(error: f64) -> bool {
        error < 0.0
    }
}

impl Rounding for Upward {
    #[inline]
    fn outward(value: f64) -> f64 {
        next_up(value)
    }

    #[inline]
    fn error_is_outward(error: f64) -> bool {
        error > 0.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
} // value ∈ [lo, hi]

impl Interval {
    pub const ENTIRE: Interval = Interval {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    #[inline]
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(!(lo > hi), "inverted interval [{lo}, {hi}]");
        Interval { lo, hi }
    }

    /// Encloses `a - b` for two exact doubles.
    #[inline]
    pub fn diff(a: f64, b: f64) -> Self {
        Interval {
            lo: Downward::sub(a, b),
            hi: Upward::sub(a, b),
        }
    }

    #[inline]
    pub fn add(self, o: Self) -> Self {
        Interval {
            lo: Downward::add(self.lo, o.lo),
            hi: Upward::add(self.hi, o.hi),
        }
    }

    #[inline]
    pub fn sub(self, o: Self) -> Self {
        Interval {
            lo: Downward::sub(self.lo, o.hi),
            hi: Upward::sub(self.hi, o.lo),
        }
    }

    #[inline]
    pub fn neg(self) -> Self {
        Interval {
            lo: -self.hi,
            hi: -self.lo,
        }
    }

    pub fn mul(self, o: Self) -> Self {
        let ends = [
            (self.lo, o.lo),
            (self.lo, o.hi),
            (self.hi, o.lo),
            (self.hi, o.hi),
        ];
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (a, b) in ends {
            let down = Downward::mul(a, b);
            let up = Upward::mul(a, b);
            if down.is_nan() || up.is_nan() {
                return Interval::ENTIRE;
            }
            lo = lo.min(down);
            hi = hi.max(up);
        }
        Interval { lo, hi }
    }

    #[inline]
    pub fn contains_zero(self) -> bool {
        !(self.lo > 0.0 || self.hi < 0.0)
    }

    /// Sign of every value in the interval, if they all agree and none is zero.
    #[inline]
    pub fn sign_if_certain(self) -> Option<Sign> {
        if self.lo > 0.0 {
            Some(Sign::Positive)
        } else if self.hi < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}
