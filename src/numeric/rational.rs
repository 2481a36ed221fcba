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

//! Arbitrary-precision reference evaluation on `rug::Rational`.
//!
//! Much slower than expansions, but obviously exact. The exact predicates
//! fall back to it when expansion arithmetic leaves the range where it is
//! exact, and tests use it to cross-check the expansion evaluator.

use std::ops::{Add, Mul, Sub};

use rug::Rational;

use crate::error::PredicateError;
use crate::geometry::point::{Point2, Point3};
use crate::numeric::sign::Sign;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct ExactRational(pub Rational);

impl ExactRational {
    /// `None` for NaN and infinities.
    pub fn from_f64(x: f64) -> Option<Self> {
        Rational::from_f64(x).map(ExactRational)
    }

    pub fn zero() -> Self {
        ExactRational(Rational::new())
    }

    pub fn sign(&self) -> Sign {
        Sign::from_ordering(self.0.cmp0())
    }

    pub fn abs(&self) -> ExactRational {
        ExactRational(self.0.clone().abs())
    }

    /// A double with the same sign; magnitudes below the subnormal range
    /// become the smallest subnormal instead of zero.
    pub fn to_f64(&self) -> f64 {
        let v = self.0.to_f64();
        if v == 0.0 {
            self.sign().as_f64() * f64::from_bits(1)
        } else {
            v
        }
    }
}

/// `|tail| / (|tail| + |head|)`, or one half when both are zero.
pub fn segment_scale_rational(tail: &ExactRational, head: &ExactRational) -> f64 {
    let near = tail.abs();
    let total = &near + &head.abs();
    if total.sign().is_zero() {
        return 0.5;
    }
    let mut ratio = near.0;
    ratio /= &total.0;
    ratio.to_f64().clamp(0.0, 1.0)
}

/// `w / sum(w)` for nonnegative weights, `None` when they sum to zero.
pub fn normalize_rational(w: &[ExactRational; 3]) -> Option<[f64; 3]> {
    let total = &(&w[0] + &w[1]) + &w[2];
    if total.sign().is_zero() {
        return None;
    }
    Some([0, 1, 2].map(|k| {
        let mut share = w[k].0.clone();
        share /= &total.0;
        share.to_f64()
    }))
}

impl<'a, 'b> Add<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result += &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Sub<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Mul<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        ExactRational(result)
    }
}

// `slot` is the point's position in the caller's argument list, so errors
// report the same flattened index as `ensure_finite`.
fn lift<const N: usize>(p: &[f64; N], slot: usize) -> Result<[ExactRational; N], PredicateError> {
    let mut out = [(); N].map(|_| ExactRational::zero());
    for (k, &value) in p.iter().enumerate() {
        out[k] = ExactRational::from_f64(value).ok_or(PredicateError::NonFiniteCoordinate {
            index: N * slot + k,
            value,
        })?;
    }
    Ok(out)
}

fn diff3(
    a: &Point3,
    a_slot: usize,
    b: &Point3,
    b_slot: usize,
) -> Result<[ExactRational; 3], PredicateError> {
    let a = lift(&a.coords, a_slot)?;
    let b = lift(&b.coords, b_slot)?;
    Ok([&a[0] - &b[0], &a[1] - &b[1], &a[2] - &b[2]])
}

fn det3(r0: &[ExactRational; 3], r1: &[ExactRational; 3], r2: &[ExactRational; 3]) -> ExactRational {
    let m0 = &(&r1[0] * &r2[1]) - &(&r1[1] * &r2[0]);
    let m1 = &(&r2[0] * &r0[1]) - &(&r2[1] * &r0[0]);
    let m2 = &(&r0[0] * &r1[1]) - &(&r0[1] * &r1[0]);
    &(&(&r0[2] * &m0) + &(&r1[2] * &m1)) + &(&r2[2] * &m2)
}

/// `det[p0 - p3; p1 - p3; p2 - p3]`, positive when `p0` is above the
/// counterclockwise triangle `p1, p2, p3`.
pub fn orient3d_rational(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
) -> Result<ExactRational, PredicateError> {
    Ok(det3(&diff3(p0, 0, p3, 3)?, &diff3(p1, 1, p3, 3)?, &diff3(p2, 2, p3, 3)?))
}

/// `(a - c) x (b - c)`, positive when `a, b, c` turn counterclockwise.
pub fn orient2d_rational(a: &Point2, b: &Point2, c: &Point2) -> Result<ExactRational, PredicateError> {
    let [ax, ay] = lift(&a.coords, 0)?;
    let [bx, by] = lift(&b.coords, 1)?;
    let [cx, cy] = lift(&c.coords, 2)?;
    Ok(&(&(&ax - &cx) * &(&by - &cy)) - &(&(&ay - &cy) * &(&bx - &cx)))
}

/// `n . (c0 - a)` with `n = (c1 - c0) x (c2 - c0)`.
pub fn perpendicular_distance_rational(
    a: &Point3,
    c0: &Point3,
    c1: &Point3,
    c2: &Point3,
) -> Result<ExactRational, PredicateError> {
    let d = diff3(c0, 1, a, 0)?;
    let e1 = diff3(c1, 2, c0, 1)?;
    let e2 = diff3(c2, 3, c0, 1)?;
    let n = [
        &(&e1[1] * &e2[2]) - &(&e1[2] * &e2[1]),
        &(&e1[2] * &e2[0]) - &(&e1[0] * &e2[2]),
        &(&e1[0] * &e2[1]) - &(&e1[1] * &e2[0]),
    ];
    Ok(&(&(&n[0] * &d[0]) + &(&n[1] * &d[1])) + &(&n[2] * &d[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_tetrahedron_volume() {
        let v = orient3d_rational(
            &Point3::new(0.0, 0.0, 1.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_eq!(v.0, Rational::from(1));
        assert_eq!(v.sign(), Sign::Positive);
    }

    #[test]
    fn non_finite_is_rejected() {
        let nan = Point3::new(f64::NAN, 0.0, 0.0);
        let o = Point3::new(0.0, 0.0, 0.0);
        assert!(matches!(
            orient3d_rational(&o, &o, &nan, &o),
            Err(PredicateError::NonFiniteCoordinate { index: 6, .. })
        ));
    }

    #[test]
    fn perpendicular_distance_of_point_below_plane() {
        let d = perpendicular_distance_rational(
            &Point3::new(0.0, 0.0, -1.0),
            &Point3::new(-1.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
            &Point3::new(1.0, -1.0, 0.0),
        )
        .unwrap();
        assert_eq!(d.0, Rational::from(-4));
    }

    #[test]
    fn orient2d_agrees_with_expansion() {
        let a = Point2::new(0.1, 0.7);
        let b = Point2::new(0.3, 0.2 + f64::EPSILON);
        let c = Point2::new(0.5, -0.3);
        let r = orient2d_rational(&a, &b, &c).unwrap();
        let e = crate::kernel::orientation::orient2d_exact(&a, &b, &c).unwrap();
        assert_eq!(Some(r.0.clone()), e.to_rational());
        assert_eq!(r.sign(), e.sign());
    }

    #[test]
    fn tiny_values_keep_their_sign() {
        let tiny = ExactRational(Rational::from_f64(2f64.powi(-600)).unwrap().square());
        assert_eq!(tiny.to_f64(), f64::from_bits(1));
        let negative = ExactRational(-tiny.0.clone());
        assert_eq!(negative.to_f64(), -f64::from_bits(1));
        assert_eq!(ExactRational::zero().to_f64(), 0.0);
    }

    #[test]
    fn rational_scale_is_a_magnitude_ratio() {
        let tail = ExactRational(Rational::from(1));
        let head = ExactRational(Rational::from(-3));
        assert_eq!(segment_scale_rational(&tail, &head), 0.25);
        let zero = ExactRational::zero();
        assert_eq!(segment_scale_rational(&zero, &zero), 0.5);
    }

    #[test]
    fn weights_are_normalized_exactly() {
        let big = ExactRational(Rational::from_f64(1e300).unwrap().square());
        let twice = &big + &big;
        let w = [twice, big.clone(), big];
        assert_eq!(normalize_rational(&w), Some([0.5, 0.25, 0.25]));

        let zeros = [ExactRational::zero(), ExactRational::zero(), ExactRational::zero()];
        assert_eq!(normalize_rational(&zeros), None);
    }
}
