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

//! Double-precision filter with an a-priori rounding error bound.
//!
//! The bound follows Aftosmis, Berger and Melton (1998), eq. 5: a coarse
//! test against `ORIENT_EPS * 6 * max_len^3`, then a tighter one built from
//! the magnitudes of the individual products.

use crate::geometry::point::{Point3, PointOps};
use crate::geometry::segment::{Segment3, SegmentOps};
use crate::geometry::vector::{Vector3, VectorOps};
use crate::kernel::outcome::Depth;
use crate::kernel::segment_triangle::{Crossing, IntersectionFlags, SegmentTriangleIntersection};
use crate::numeric::eft::UNDERFLOW_GUARD;

const DOUBLE_PREC: f64 = 2e-16;

/// Relative error bound of a filtered volume.
pub const ORIENT_EPS: f64 = (7.0 + 56.0 * DOUBLE_PREC) * DOUBLE_PREC;

/// Coarse absolute error bound when every edge is at most `max_len` long.
pub fn coarse_error_bound(max_len: f64) -> f64 {
    ORIENT_EPS * 6.0 * max_len * max_len * max_len
}

/// `(a x b) . c`, or `None` when it is within its rounding error of zero.
fn filtered_volume(a: &Vector3, b: &Vector3, c: &Vector3, max_err: f64) -> Option<f64> {
    let cybx = c.y * b.x;
    let cxby = c.x * b.y;
    let cxay = c.x * a.y;
    let cyax = c.y * a.x;
    let axby = a.x * b.y;
    let aybx = a.y * b.x;

    let res = a.z * (cybx - cxby) + b.z * (cxay - cyax) + c.z * (axby - aybx);
    if !res.is_finite() {
        return None;
    }
    // Relative bounds say nothing about products that lost bits to underflow.
    let abs = res.abs();
    if abs > max_err + UNDERFLOW_GUARD {
        return Some(res);
    }

    let bound = ORIENT_EPS
        * (a.z.abs() * (cybx.abs() + cxby.abs())
            + b.z.abs() * (cxay.abs() + cyax.abs())
            + c.z.abs() * (axby.abs() + aybx.abs()));
    (abs > bound + UNDERFLOW_GUARD).then_some(res)
}

/// Filtered orientation volume of `p0` against the counterclockwise triangle
/// `p1, p2, p3`; same sign convention as the exact predicate.
///
/// `max_len` must bound every edge of the tetrahedron; without it the longest
/// edge from `p1` is used.
pub fn orient3d_fast(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, max_len: Option<f64>) -> Option<f64> {
    let r1 = p1.vector_to(p2);
    let r2 = p1.vector_to(p3);
    let r3 = p1.vector_to(p0);

    let max_len = max_len.unwrap_or_else(|| {
        r1.norm_squared()
            .max(r2.norm_squared())
            .max(r3.norm_squared())
            .sqrt()
    });
    filtered_volume(&r1, &r2, &r3, coarse_error_bound(max_len))
}

/// Segment/triangle test on filtered volumes only.
///
/// Returns `None` when any volume is too close to zero to trust. A decided
/// intersection only ever carries `INTERSECTS` and possibly `TAIL_OUTSIDE`.
pub fn intersect_segment_triangle_fast(
    tail: &Point3,
    head: &Point3,
    triangle: [&Point3; 3],
    max_len: f64,
) -> Option<SegmentTriangleIntersection> {
    let [p0, p1, p2] = triangle;
    let max_err = coarse_error_bound(max_len);

    let r1 = p0.vector_to(p1);
    let r2 = p0.vector_to(p2);
    let t = filtered_volume(&r1, &r2, &p0.vector_to(tail), max_err)?;
    let h = filtered_volume(&r1, &r2, &p0.vector_to(head), max_err)?;

    let miss = Some(SegmentTriangleIntersection::miss(Depth::Filter));
    let cs = if h < 0.0 {
        if t < 0.0 {
            return miss;
        }
        -1.0
    } else {
        if t > 0.0 {
            return miss;
        }
        1.0
    };

    let r0 = head.vector_to(p0);
    let r1 = head.vector_to(p1);
    let r2 = head.vector_to(p2);
    let rt = head.vector_to(tail);

    let mut weights = [0.0; 3];
    for (k, (u, v)) in [(&r2, &r1), (&r0, &r2), (&r1, &r0)].into_iter().enumerate() {
        let b = cs * filtered_volume(u, v, &rt, max_err)?;
        if b < 0.0 {
            return miss;
        }
        weights[k] = b;
    }

    let s = t.abs() / (t.abs() + h.abs());
    let total: f64 = weights.iter().sum();
    let mut flags = IntersectionFlags::INTERSECTS;
    if cs < 0.0 {
        flags |= IntersectionFlags::TAIL_OUTSIDE;
    }
    Some(SegmentTriangleIntersection {
        flags,
        depth: Depth::Filter,
        crossing: Some(Crossing {
            point: Segment3::new(tail, head).point_at(s),
            parameter: s,
            barycentric: weights.map(|w| w / total),
        }),
    })
}
