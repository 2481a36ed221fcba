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

use tracing::{debug, trace};

use crate::error::PredicateError;
use crate::geometry::point::{Point2, Point3, Vertex};
use crate::kernel::outcome::{Depth, Resolved};
use crate::kernel::sos::sos_orient3d;
use crate::numeric::expansion::Expansion;
use crate::numeric::interval::Interval;
use crate::numeric::rational::{orient2d_rational, orient3d_rational};
use crate::numeric::sign::Sign;
use crate::numeric::two_double::TwoDouble;

/// Plain double evaluation of `det[p0 - p3; p1 - p3; p2 - p3]`.
pub fn orient3d_approx(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> f64 {
    let (adx, ady, adz) = (p0[0] - p3[0], p0[1] - p3[1], p0[2] - p3[2]);
    let (bdx, bdy, bdz) = (p1[0] - p3[0], p1[1] - p3[1], p1[2] - p3[2]);
    let (cdx, cdy, cdz) = (p2[0] - p3[0], p2[1] - p3[1], p2[2] - p3[2]);
    adz * (bdx * cdy - bdy * cdx) + bdz * (cdx * ady - cdy * adx) + cdz * (adx * bdy - ady * bdx)
}

/// Encloses `det[p0 - p3; p1 - p3; p2 - p3]` with directed rounding.
pub fn orient3d_interval(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> Interval {
    let adx = Interval::diff(p0[0], p3[0]);
    let ady = Interval::diff(p0[1], p3[1]);
    let adz = Interval::diff(p0[2], p3[2]);
    let bdx = Interval::diff(p1[0], p3[0]);
    let bdy = Interval::diff(p1[1], p3[1]);
    let bdz = Interval::diff(p1[2], p3[2]);
    let cdx = Interval::diff(p2[0], p3[0]);
    let cdy = Interval::diff(p2[1], p3[1]);
    let cdz = Interval::diff(p2[2], p3[2]);

    let m0 = bdx.mul(cdy).sub(bdy.mul(cdx));
    let m1 = cdx.mul(ady).sub(cdy.mul(adx));
    let m2 = adx.mul(bdy).sub(ady.mul(bdx));
    adz.mul(m0).add(bdz.mul(m1)).add(cdz.mul(m2))
}

/// Exact `det[p0 - p3; p1 - p3; p2 - p3]` as an expansion.
pub fn orient3d_exact(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
) -> Result<Expansion, PredicateError> {
    let adx = Expansion::from_two_diff(p0[0], p3[0])?;
    let ady = Expansion::from_two_diff(p0[1], p3[1])?;
    let adz = Expansion::from_two_diff(p0[2], p3[2])?;
    let bdx = Expansion::from_two_diff(p1[0], p3[0])?;
    let bdy = Expansion::from_two_diff(p1[1], p3[1])?;
    let bdz = Expansion::from_two_diff(p1[2], p3[2])?;
    let cdx = Expansion::from_two_diff(p2[0], p3[0])?;
    let cdy = Expansion::from_two_diff(p2[1], p3[1])?;
    let cdz = Expansion::from_two_diff(p2[2], p3[2])?;

    let m0 = bdx.mul(&cdy)?.sub(&bdy.mul(&cdx)?)?;
    let m1 = cdx.mul(&ady)?.sub(&cdy.mul(&adx)?)?;
    let m2 = adx.mul(&bdy)?.sub(&ady.mul(&bdx)?)?;

    adz.mul(&m0)?.add(&bdz.mul(&m1)?)?.add(&cdz.mul(&m2)?)
}

/// Runs an expansion evaluation and repeats it on rationals when an
/// intermediate value leaves the range where expansions are exact.
pub(crate) fn exact_or_rational<T>(
    what: &'static str,
    expansion: impl FnOnce() -> Result<T, PredicateError>,
    rational: impl FnOnce() -> Result<T, PredicateError>,
) -> Result<T, PredicateError> {
    match expansion() {
        Err(PredicateError::ExponentRange { operation }) => {
            debug!(what, operation, "expansion out of range, evaluating on rationals");
            rational()
        }
        other => other,
    }
}

/// Exact sign of `det[p0 - p3; p1 - p3; p2 - p3]` for any finite input.
pub fn orient3d_exact_sign(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
) -> Result<Sign, PredicateError> {
    exact_or_rational(
        "orient3d",
        || Ok(orient3d_exact(p0, p1, p2, p3)?.sign()),
        || Ok(orient3d_rational(p0, p1, p2, p3)?.sign()),
    )
}

/// Exact orientation volume rounded to a two-double.
pub fn orient3d_exact_volume(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
) -> Result<TwoDouble, PredicateError> {
    orient3d_exact(p0, p1, p2, p3)?.to_two_double()
}

/// Exact `(a - c) x (b - c)`, positive when `a, b, c` turn counterclockwise.
pub fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> Result<Expansion, PredicateError> {
    let acx = Expansion::from_two_diff(a[0], c[0])?;
    let acy = Expansion::from_two_diff(a[1], c[1])?;
    let bcx = Expansion::from_two_diff(b[0], c[0])?;
    let bcy = Expansion::from_two_diff(b[1], c[1])?;
    acx.mul(&bcy)?.sub(&acy.mul(&bcx)?)
}

/// Exact sign of `(a - c) x (b - c)` for any finite input.
pub fn orient2d_exact_sign(a: &Point2, b: &Point2, c: &Point2) -> Result<Sign, PredicateError> {
    exact_or_rational(
        "orient2d",
        || Ok(orient2d_exact(a, b, c)?.sign()),
        || Ok(orient2d_rational(a, b, c)?.sign()),
    )
}

/// Approximate `(a - c) x (b - c)` whose sign is exact.
pub fn orient2d_estimate(a: &Point2, b: &Point2, c: &Point2) -> Result<f64, PredicateError> {
    exact_or_rational(
        "orient2d",
        || Ok(orient2d_exact(a, b, c)?.estimate()),
        || Ok(orient2d_rational(a, b, c)?.to_f64()),
    )
}

/// Sign of `a - b`; never wrong since the rounded difference keeps its sign.
#[inline]
pub fn orient1d(a: f64, b: f64) -> Sign {
    Sign::of(a - b)
}

/// Orientation of `v[0]` against the counterclockwise triangle `v[1], v[2], v[3]`.
///
/// Positive when `v[0]` lies above the triangle. Escalates from interval
/// arithmetic (skipped when `interval_filter` is off) to exact arithmetic and
/// finally to symbolic perturbation, so the answer is never zero for
/// vertices with distinct identities.
pub fn orient3d_resolved(
    v: [&Vertex; 4],
    interval_filter: bool,
) -> Result<Resolved<Sign>, PredicateError> {
    let [p0, p1, p2, p3] = v.map(|x| &x.point);

    if interval_filter {
        if let Some(sign) = orient3d_interval(p0, p1, p2, p3).sign_if_certain() {
            return Ok(Resolved::new(sign, Depth::Interval));
        }
        trace!(ids = ?v.map(|x| x.id), "orient3d interval inconclusive");
    }

    let exact = orient3d_exact_sign(p0, p1, p2, p3)?;
    if !exact.is_zero() {
        return Ok(Resolved::new(exact, Depth::Exact));
    }

    let sign = sos_orient3d(v)?;
    debug!(ids = ?v.map(|x| x.id), ?sign, "orient3d decided by symbolic perturbation");
    Ok(Resolved::new(sign, Depth::Symbolic))
}
