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

use num_traits::ToPrimitive;
use rug::Rational;
use smallvec::{SmallVec, smallvec};
use tracing::warn;

use crate::error::PredicateError;
use crate::numeric::eft::{
    fast_two_sum, product_is_exact, split, two_diff, two_product, two_product_presplit, two_sum,
};
use crate::numeric::interval::{next_down, next_up};
use crate::numeric::sign::Sign;
use crate::numeric::two_double::TwoDouble;

/// Most components any expansion may hold.
///
/// The 3x3 orientation determinant of coordinate differences is the largest
/// expression evaluated: 2-component differences, 8-component 2x2 products,
/// 16 after subtraction, 64 after scaling by a difference, 192 for the sum of
/// the three cofactor terms.
pub const EXPANSION_CAPACITY: usize = 192;

type Components = SmallVec<[f64; EXPANSION_CAPACITY]>;

/// A sum of non-overlapping doubles sorted by increasing magnitude.
///
/// The value is the exact sum of the components. There is always at least
/// one component; zero is `[0.0]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion {
    components: Components,
}

pub(crate) fn ensure_capacity(required: usize) -> Result<(), PredicateError> {
    if required > EXPANSION_CAPACITY {
        warn!(required, capacity = EXPANSION_CAPACITY, "expansion capacity exceeded");
        return Err(PredicateError::CapacityOverflow {
            required,
            capacity: EXPANSION_CAPACITY,
        });
    }
    Ok(())
}

// Overflow leaves an infinite or NaN component behind; nothing read from
// such an expansion can be trusted.
fn finish(components: Components, operation: &'static str) -> Result<Expansion, PredicateError> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(Expansion { components })
    } else {
        Err(PredicateError::ExponentRange { operation })
    }
}

impl Expansion {
    pub fn zero() -> Self {
        Self::from_f64(0.0)
    }

    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Expansion {
            components: smallvec![x],
        }
    }

    #[inline]
    fn from_pair(hi: f64, lo: f64, operation: &'static str) -> Result<Self, PredicateError> {
        finish(smallvec![lo, hi], operation)
    }

    /// Exact `a + b`.
    #[inline]
    pub fn from_two_sum(a: f64, b: f64) -> Result<Self, PredicateError> {
        let (hi, lo) = two_sum(a, b);
        Self::from_pair(hi, lo, "two_sum")
    }

    /// Exact `a - b`.
    #[inline]
    pub fn from_two_diff(a: f64, b: f64) -> Result<Self, PredicateError> {
        let (hi, lo) = two_diff(a, b);
        Self::from_pair(hi, lo, "two_diff")
    }

    /// Exact `a * b`.
    #[inline]
    pub fn from_two_product(a: f64, b: f64) -> Result<Self, PredicateError> {
        let (hi, lo) = two_product(a, b);
        if !product_is_exact(a, b, hi) {
            return Err(PredicateError::ExponentRange {
                operation: "two_product",
            });
        }
        Self::from_pair(hi, lo, "two_product")
    }

    /// Builds an expansion from components that already satisfy the
    /// non-overlapping, increasing-magnitude ordering.
    pub fn from_components(components: &[f64]) -> Result<Self, PredicateError> {
        ensure_capacity(components.len())?;
        if components.is_empty() {
            return Ok(Self::zero());
        }
        Ok(Expansion {
            components: SmallVec::from_slice(components),
        })
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub(crate) fn len(&self) -> usize {
        self.components.len()
    }

    /// Adds one double, dropping zero components.
    pub fn grow(&self, b: f64) -> Result<Expansion, PredicateError> {
        ensure_capacity(self.len() + 1)?;
        let mut h = Components::new();
        let mut q = b;
        for &enow in &self.components {
            let (qnew, hh) = two_sum(q, enow);
            q = qnew;
            if hh != 0.0 {
                h.push(hh);
            }
        }
        if q != 0.0 || h.is_empty() {
            h.push(q);
        }
        finish(h, "grow")
    }

    /// Multiplies by one double, dropping zero components.
    pub fn scale(&self, b: f64) -> Result<Expansion, PredicateError> {
        ensure_capacity(2 * self.len())?;
        let e = &self.components;
        let (bhi, blo) = split(b);
        let mut h = Components::new();
        let (mut q, hh) = two_product_presplit(e[0], b, bhi, blo);
        if !product_is_exact(e[0], b, q) {
            return Err(PredicateError::ExponentRange { operation: "scale" });
        }
        if hh != 0.0 {
            h.push(hh);
        }
        for &enow in &e[1..] {
            let (product1, product0) = two_product_presplit(enow, b, bhi, blo);
            if !product_is_exact(enow, b, product1) {
                return Err(PredicateError::ExponentRange { operation: "scale" });
            }
            let (sum, hh) = two_sum(q, product0);
            if hh != 0.0 {
                h.push(hh);
            }
            let (qnew, hh) = fast_two_sum(product1, sum);
            q = qnew;
            if hh != 0.0 {
                h.push(hh);
            }
        }
        if q != 0.0 || h.is_empty() {
            h.push(q);
        }
        finish(h, "scale")
    }

    /// Exact sum of two expansions, dropping zero components.
    pub fn add(&self, other: &Expansion) -> Result<Expansion, PredicateError> {
        ensure_capacity(self.len() + other.len())?;
        let e = &self.components;
        let f = &other.components;
        let mut h = Components::new();

        let mut eindex = 0;
        let mut findex = 0;
        let mut enow = e[0];
        let mut fnow = f[0];
        let mut q;
        if (fnow > enow) == (fnow > -enow) {
            q = enow;
            eindex += 1;
        } else {
            q = fnow;
            findex += 1;
        }

        if eindex < e.len() && findex < f.len() {
            enow = e[eindex];
            fnow = f[findex];
            let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
                eindex += 1;
                fast_two_sum(enow, q)
            } else {
                findex += 1;
                fast_two_sum(fnow, q)
            };
            q = qnew;
            if hh != 0.0 {
                h.push(hh);
            }
            while eindex < e.len() && findex < f.len() {
                enow = e[eindex];
                fnow = f[findex];
                let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
                    eindex += 1;
                    two_sum(q, enow)
                } else {
                    findex += 1;
                    two_sum(q, fnow)
                };
                q = qnew;
                if hh != 0.0 {
                    h.push(hh);
                }
            }
        }
        for &enow in &e[eindex..] {
            let (qnew, hh) = two_sum(q, enow);
            q = qnew;
            if hh != 0.0 {
                h.push(hh);
            }
        }
        for &fnow in &f[findex..] {
            let (qnew, hh) = two_sum(q, fnow);
            q = qnew;
            if hh != 0.0 {
                h.push(hh);
            }
        }
        if q != 0.0 || h.is_empty() {
            h.push(q);
        }
        finish(h, "add")
    }

    pub fn sub(&self, other: &Expansion) -> Result<Expansion, PredicateError> {
        self.add(&other.negate())
    }

    /// Exact product, formed as a sum of scalings of the longer operand.
    pub fn mul(&self, other: &Expansion) -> Result<Expansion, PredicateError> {
        let (short, long) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut acc = long.scale(short.components[0])?;
        for &c in &short.components[1..] {
            let part = long.scale(c)?;
            if acc.len() + part.len() > EXPANSION_CAPACITY {
                acc = acc.compress();
            }
            acc = acc.add(&part)?;
        }
        Ok(acc)
    }

    /// Canonical form: the largest component approximates the value to
    /// within one ulp and no two components are adjacent.
    pub fn compress(&self) -> Expansion {
        let e = &self.components;
        let n = e.len();
        let mut g: Components = smallvec![0.0; n];

        let mut bottom = n - 1;
        let mut q = e[bottom];
        for &enow in e[..n - 1].iter().rev() {
            let (qnew, small) = fast_two_sum(q, enow);
            if small != 0.0 {
                g[bottom] = qnew;
                bottom -= 1;
                q = small;
            } else {
                q = qnew;
            }
        }

        let mut top = 0;
        for hindex in bottom + 1..n {
            let (qnew, small) = fast_two_sum(g[hindex], q);
            if small != 0.0 {
                g[top] = small;
                top += 1;
            }
            q = qnew;
        }
        g[top] = q;
        g.truncate(top + 1);
        Expansion { components: g }
    }

    /// Plain sum of the components; cheap and within a few ulps.
    pub fn estimate(&self) -> f64 {
        self.components.iter().sum()
    }

    /// The double nearest to the exact value, ties to even.
    pub fn nearest(&self) -> Result<f64, PredicateError> {
        let c = self.compress();
        let mut hi = c.estimate();
        if !hi.is_finite() {
            return Ok(hi);
        }
        for _ in 0..4 {
            let rest = c.grow(-hi)?.compress();
            let direction = rest.sign();
            if direction.is_zero() {
                break;
            }
            let neighbour = if direction.is_positive() {
                next_up(hi)
            } else {
                next_down(hi)
            };
            let half_gap = (neighbour - hi) * 0.5;
            match rest.grow(-half_gap)?.sign() {
                Sign::Zero => {
                    if hi.to_bits() & 1 == 1 {
                        hi = neighbour;
                    }
                    break;
                }
                s if s == direction => hi = neighbour,
                _ => break,
            }
        }
        Ok(hi)
    }

    /// Splits the value into the nearest double and the rounded remainder.
    pub fn to_two_double(&self) -> Result<TwoDouble, PredicateError> {
        let hi = self.nearest()?;
        if !hi.is_finite() {
            return Ok(TwoDouble { hi, lo: 0.0 });
        }
        let lo = self.grow(-hi)?.compress().estimate();
        Ok(TwoDouble { hi, lo })
    }

    /// Sign of the exact value, read from the largest nonzero component.
    pub fn sign(&self) -> Sign {
        self.components
            .iter()
            .rev()
            .find(|c| **c != 0.0)
            .map_or(Sign::Zero, |c| Sign::of(*c))
    }

    pub fn is_negative(&self) -> bool {
        self.sign().is_negative()
    }

    pub fn is_zero(&self) -> bool {
        self.sign().is_zero()
    }

    pub fn negate(&self) -> Expansion {
        Expansion {
            components: self.components.iter().map(|c| -c).collect(),
        }
    }

    pub fn abs(&self) -> Expansion {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Exact value as a rational, `None` if a component is not finite.
    pub fn to_rational(&self) -> Option<Rational> {
        let mut acc = Rational::new();
        for &c in &self.components {
            acc += Rational::from_f64(c)?;
        }
        Some(acc)
    }
}

impl From<f64> for Expansion {
    fn from(x: f64) -> Self {
        Expansion::from_f64(x)
    }
}

impl ToPrimitive for Expansion {
    fn to_i64(&self) -> Option<i64> {
        self.nearest().ok()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.nearest().ok()?.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.nearest().ok()
    }
}
