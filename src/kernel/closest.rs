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

//! Which of two triangles a segment crosses first.
//!
//! With `dX_p` the unnormalized distance of point `p` from the plane of
//! triangle `X`, the crossing parameters along `a -> b` are
//! `|dC_a| / (|dC_a| + |dC_b|)` and `|dD_a| / (|dD_a| + |dD_b|)`. Their order
//! is the sign of `|dC_a| |dD_b| - |dC_b| |dD_a|`, which needs no division.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::PredicateError;
use crate::geometry::point::Point3;
use crate::kernel::distance::{perpendicular_distance_exact, perpendicular_distance_interval};
use crate::kernel::orientation::exact_or_rational;
use crate::kernel::outcome::{Depth, Resolved};
use crate::numeric::interval::{Downward, Interval, Rounding, Upward};
use crate::numeric::rational::perpendicular_distance_rational;
use crate::numeric::sign::Sign;

/// Magnitude bounds of a distance whose sign is certain.
fn magnitude(d: Interval) -> Option<Interval> {
    if (d.lo < 0.0) != (d.hi < 0.0) {
        return None;
    }
    Some(if d.hi < 0.0 { d.neg() } else { d })
}

fn closest_interval(a: &Point3, b: &Point3, c: [&Point3; 3], d: [&Point3; 3]) -> Option<Sign> {
    let dca = magnitude(perpendicular_distance_interval(a, c[0], c[1], c[2]))?;
    let dcb = magnitude(perpendicular_distance_interval(b, c[0], c[1], c[2]))?;
    let dda = magnitude(perpendicular_distance_interval(a, d[0], d[1], d[2]))?;
    let ddb = magnitude(perpendicular_distance_interval(b, d[0], d[1], d[2]))?;

    let tmax1 = Upward::mul(dcb.hi, dda.hi);
    let tmax2 = Upward::mul(dca.hi, ddb.hi);
    let tmin1 = Downward::mul(dcb.lo, dda.lo);
    let tmin2 = Downward::mul(dca.lo, ddb.lo);

    let qmin = Downward::sub(tmin2, tmax1);
    let qmax = Upward::sub(tmax2, tmin1);
    if !(qmin.is_finite() && qmax.is_finite()) {
        return None;
    }
    if (qmin < 0.0) != (qmax < 0.0) || qmin == 0.0 || qmax == 0.0 {
        return None;
    }
    Some(Sign::of(qmin))
}

fn closest_exact(
    a: &Point3,
    b: &Point3,
    c: [&Point3; 3],
    d: [&Point3; 3],
) -> Result<Sign, PredicateError> {
    let dca = perpendicular_distance_exact(a, c[0], c[1], c[2])?.compress().abs();
    let dcb = perpendicular_distance_exact(b, c[0], c[1], c[2])?.compress().abs();
    let dda = perpendicular_distance_exact(a, d[0], d[1], d[2])?.compress().abs();
    let ddb = perpendicular_distance_exact(b, d[0], d[1], d[2])?.compress().abs();

    let p = dca.mul(&ddb)?.sub(&dcb.mul(&dda)?)?;
    Ok(p.sign())
}

fn closest_rational(
    a: &Point3,
    b: &Point3,
    c: [&Point3; 3],
    d: [&Point3; 3],
) -> Result<Sign, PredicateError> {
    let dca = perpendicular_distance_rational(a, c[0], c[1], c[2])?.abs();
    let dcb = perpendicular_distance_rational(b, c[0], c[1], c[2])?.abs();
    let dda = perpendicular_distance_rational(a, d[0], d[1], d[2])?.abs();
    let ddb = perpendicular_distance_rational(b, d[0], d[1], d[2])?.abs();

    Ok((&(&dca * &ddb) - &(&dcb * &dda)).sign())
}

/// Compares where segment `a -> b` crosses triangles `c` and `d`.
///
/// `Less` when the crossing with `c` is closer to `a`, `Greater` when the
/// crossing with `d` is, `Equal` when they coincide exactly. Both triangles
/// are assumed to be crossed. Swapping `a` and `b` reverses the answer.
pub fn closest_intersection(
    segment: [&Point3; 2],
    c: [&Point3; 3],
    d: [&Point3; 3],
    interval_filter: bool,
) -> Result<Resolved<Ordering>, PredicateError> {
    let [a, b] = segment;
    if interval_filter {
        if let Some(sign) = closest_interval(a, b, c, d) {
            return Ok(Resolved::new(sign.to_ordering(), Depth::Interval));
        }
        trace!("closest intersection interval inconclusive");
    }
    let sign = exact_or_rational(
        "closest_intersection",
        || closest_exact(a, b, c, d),
        || closest_rational(a, b, c, d),
    )?;
    Ok(Resolved::new(sign.to_ordering(), Depth::Exact))
}
