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

//! Segment versus triangle intersection with consistent tie-breaking.
//!
//! Five orientation tests decide the outcome: both segment endpoints against
//! the triangle plane, then each triangle edge against the segment used as a
//! hinge. Because every test goes through [`orient3d_resolved`], a segment
//! crossing a shared edge or vertex of a closed mesh hits exactly one of the
//! incident triangles.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use tracing::{debug, trace};

use crate::error::PredicateError;
use crate::geometry::point::{Point2, Point3, Vertex};
use crate::geometry::segment::{Segment3, SegmentOps};
use crate::geometry::triangle::Triangle3;
use crate::kernel::orientation::{
    exact_or_rational, orient2d_estimate, orient3d_approx, orient3d_exact_volume,
    orient3d_resolved,
};
use crate::kernel::outcome::{Depth, Resolved};
use crate::numeric::sign::Sign;
use crate::numeric::rational::{
    ExactRational, normalize_rational, orient3d_rational, segment_scale_rational,
};
use crate::numeric::two_double::segment_scale;

/// Bit set describing a segment/triangle intersection.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntersectionFlags(u8);

impl IntersectionFlags {
    pub const NONE: Self = Self(0);
    /// The segment and triangle intersect.
    pub const INTERSECTS: Self = Self(0x01);
    /// The tail lies on the positive (normal) side of the triangle.
    pub const TAIL_OUTSIDE: Self = Self(0x02);
    /// The tail is exactly on the triangle plane.
    pub const TAIL_ON_TRIANGLE: Self = Self(0x04);
    /// The head is exactly on the triangle plane.
    pub const HEAD_ON_TRIANGLE: Self = Self(0x08);
    /// Edge `t0 t1` is exactly coplanar with the segment.
    pub const E01_ON_SEGMENT: Self = Self(0x10);
    /// Edge `t1 t2` is exactly coplanar with the segment.
    pub const E12_ON_SEGMENT: Self = Self(0x20);
    /// Edge `t2 t0` is exactly coplanar with the segment.
    pub const E20_ON_SEGMENT: Self = Self(0x40);
    pub const V0_ON_SEGMENT: Self = Self(0x40 | 0x10);
    pub const V1_ON_SEGMENT: Self = Self(0x10 | 0x20);
    pub const V2_ON_SEGMENT: Self = Self(0x20 | 0x40);
    pub const DEGENERACY_MASK: Self = Self(0x78);

    const ALL: u8 = 0x7f;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Keeps only the defined bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self) -> bool {
        self.contains(Self::INTERSECTS)
    }

    /// Degenerate contacts only: the on-plane and on-segment bits.
    pub const fn degeneracies(self) -> Self {
        Self(self.0 & Self::DEGENERACY_MASK.0)
    }

    /// Triangle vertex lying on the segment, if both of its edges are flagged
    /// and the third is not.
    pub fn touched_vertex(self) -> Option<usize> {
        let edges = self.0 & (Self::E01_ON_SEGMENT.0 | Self::E12_ON_SEGMENT.0 | Self::E20_ON_SEGMENT.0);
        [Self::V0_ON_SEGMENT, Self::V1_ON_SEGMENT, Self::V2_ON_SEGMENT]
            .iter()
            .position(|v| v.0 == edges)
    }

    /// Edge `k` means the edge opposite vertex `k`: `t1 t2`, `t2 t0`, `t0 t1`.
    fn opposite_edge(k: usize) -> Self {
        match k {
            0 => Self::E12_ON_SEGMENT,
            1 => Self::E20_ON_SEGMENT,
            _ => Self::E01_ON_SEGMENT,
        }
    }
}

impl BitOr for IntersectionFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IntersectionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for IntersectionFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for IntersectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(IntersectionFlags, &str); 7] = [
            (IntersectionFlags::INTERSECTS, "INTERSECTS"),
            (IntersectionFlags::TAIL_OUTSIDE, "TAIL_OUTSIDE"),
            (IntersectionFlags::TAIL_ON_TRIANGLE, "TAIL_ON_TRIANGLE"),
            (IntersectionFlags::HEAD_ON_TRIANGLE, "HEAD_ON_TRIANGLE"),
            (IntersectionFlags::E01_ON_SEGMENT, "E01_ON_SEGMENT"),
            (IntersectionFlags::E12_ON_SEGMENT, "E12_ON_SEGMENT"),
            (IntersectionFlags::E20_ON_SEGMENT, "E20_ON_SEGMENT"),
        ];
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Where the segment crosses the triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub point: Point3,
    /// Position along the segment, 0 at the tail and 1 at the head.
    pub parameter: f64,
    /// Normalized weights of `t0, t1, t2`.
    pub barycentric: [f64; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentTriangleIntersection {
    pub flags: IntersectionFlags,
    /// Deepest evaluation tier any of the orientation tests needed.
    pub depth: Depth,
    /// Present exactly when `flags` contains [`IntersectionFlags::INTERSECTS`].
    pub crossing: Option<Crossing>,
}

impl SegmentTriangleIntersection {
    pub fn miss(depth: Depth) -> Self {
        Self {
            flags: IntersectionFlags::NONE,
            depth,
            crossing: None,
        }
    }

    pub fn intersects(&self) -> bool {
        self.flags.intersects()
    }

    pub fn point(&self) -> Option<Point3> {
        self.crossing.map(|c| c.point)
    }
}

/// Parameter range of the segment whose projection lies inside the triangle,
/// projected along the dominant axis of the triangle normal.
///
/// `None` when the projected segment misses the projected triangle. Only the
/// signs of the edge tests are exact; the crossing parameters are rounded.
pub fn clip_range(
    tail: &Point3,
    head: &Point3,
    triangle: &Triangle3,
) -> Result<Option<(f64, f64)>, PredicateError> {
    let normal = triangle.normal();
    let axis = normal.dominant_axis();
    let orientation = if normal.component(axis) < 0.0 { -1.0 } else { 1.0 };

    let pt = tail.project(axis);
    let ph = head.project(axis);
    let [a, b, c] = triangle.vertices().map(|p| p.project(axis));

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for (u, v) in [(&a, &b), (&b, &c), (&c, &a)] {
        let fa = orient2d_estimate(u, v, &pt)? * orientation;
        let fb = orient2d_estimate(u, v, &ph)? * orientation;
        if fa < 0.0 && fb < 0.0 {
            return Ok(None);
        }
        if fa < 0.0 {
            lo = lo.max(fa / (fa - fb));
        } else if fb < 0.0 {
            hi = hi.min(fa / (fa - fb));
        }
    }
    Ok((lo <= hi).then_some((lo, hi)))
}

/// Weights from the three hinge volumes, with flagged edges pinned to zero.
fn barycentric_weights(
    segment: [&Point3; 2],
    triangle: [&Point3; 3],
    cs: Sign,
    flags: IntersectionFlags,
    point: &Point3,
) -> [f64; 3] {
    let [tail, head] = segment;
    let [t0, t1, t2] = triangle;
    let hinges = [(t2, t1), (t0, t2), (t1, t0)];

    let mut w = [0.0; 3];
    for (k, (u, v)) in hinges.into_iter().enumerate() {
        if !flags.contains(IntersectionFlags::opposite_edge(k)) {
            w[k] = (cs.as_f64() * orient3d_approx(u, v, tail, head)).max(0.0);
        }
    }
    normalize(w)
        .or_else(|| rational_weights(segment, triangle, cs, flags))
        .unwrap_or_else(|| planar_weights(triangle, point))
}

// Same weights on exact volumes, for when the doubles overflow or vanish.
fn rational_weights(
    segment: [&Point3; 2],
    triangle: [&Point3; 3],
    cs: Sign,
    flags: IntersectionFlags,
) -> Option<[f64; 3]> {
    let [tail, head] = segment;
    let [t0, t1, t2] = triangle;
    let hinges = [(t2, t1), (t0, t2), (t1, t0)];

    let mut w = [ExactRational::zero(), ExactRational::zero(), ExactRational::zero()];
    for (k, (u, v)) in hinges.into_iter().enumerate() {
        if flags.contains(IntersectionFlags::opposite_edge(k)) {
            continue;
        }
        let volume = orient3d_rational(u, v, tail, head).ok()?;
        if volume.sign() == cs {
            w[k] = volume.abs();
        }
    }
    normalize_rational(&w)
}

fn normalize(w: [f64; 3]) -> Option<[f64; 3]> {
    let total = w[0] + w[1] + w[2];
    (total > 0.0 && total.is_finite()).then(|| w.map(|x| x / total))
}

// Projected areas; used when the segment is coplanar with the triangle.
fn planar_weights(triangle: [&Point3; 3], point: &Point3) -> [f64; 3] {
    let [t0, t1, t2] = triangle;
    let normal = Triangle3::new(*t0, *t1, *t2).normal();
    let axis = normal.dominant_axis();
    let orientation = if normal.component(axis) < 0.0 { -1.0 } else { 1.0 };

    let area = |a: Point2, b: Point2, c: Point2| {
        let v = (a[0] - c[0]) * (b[1] - c[1]) - (a[1] - c[1]) * (b[0] - c[0]);
        (v * orientation).max(0.0)
    };
    let [a, b, c] = [t0, t1, t2].map(|p| p.project(axis));
    let p = point.project(axis);
    normalize([area(p, b, c), area(a, p, c), area(a, b, p)]).unwrap_or([1.0 / 3.0; 3])
}

/// Intersects segment `tail -> head` with triangle `t0, t1, t2`.
///
/// Identities of all five vertices must be pairwise distinct, including
/// vertices that share coordinates.
pub fn intersect_segment_triangle(
    segment: [&Vertex; 2],
    triangle: [&Vertex; 3],
    interval_filter: bool,
) -> Result<SegmentTriangleIntersection, PredicateError> {
    let [tail, head] = segment;
    let [t0, t1, t2] = triangle;
    trace!(
        segment = ?segment.map(|v| v.id),
        triangle = ?triangle.map(|v| v.id),
        "intersect segment triangle"
    );

    let vt = orient3d_resolved([tail, t0, t1, t2], interval_filter)?;
    let vh = orient3d_resolved([head, t0, t1, t2], interval_filter)?;
    let mut depth = vt.depth.max(vh.depth);
    if vt.value == vh.value {
        return Ok(SegmentTriangleIntersection::miss(depth));
    }

    let mut flags = IntersectionFlags::INTERSECTS;
    let cs = if vh.value.is_negative() {
        flags |= IntersectionFlags::TAIL_OUTSIDE;
        Sign::Negative
    } else {
        Sign::Positive
    };
    if vt.depth == Depth::Symbolic {
        flags |= IntersectionFlags::TAIL_ON_TRIANGLE;
    }
    if vh.depth == Depth::Symbolic {
        flags |= IntersectionFlags::HEAD_ON_TRIANGLE;
    }

    let hinges = [[t2, t1, tail, head], [t0, t2, tail, head], [t1, t0, tail, head]];
    for (k, hinge) in hinges.into_iter().enumerate() {
        let b: Resolved<Sign> = orient3d_resolved(hinge, interval_filter)?;
        depth = depth.max(b.depth);
        if (cs * b.value).is_negative() {
            return Ok(SegmentTriangleIntersection::miss(depth));
        }
        if b.depth == Depth::Symbolic {
            flags |= IntersectionFlags::opposite_edge(k);
        }
    }

    let crossing = locate_crossing(segment, triangle, cs, flags)?;
    if !flags.degeneracies().is_empty() {
        debug!(?flags, ?depth, "degenerate segment triangle contact");
    }
    Ok(SegmentTriangleIntersection {
        flags,
        depth,
        crossing: Some(crossing),
    })
}

fn locate_crossing(
    segment: [&Vertex; 2],
    triangle: [&Vertex; 3],
    cs: Sign,
    flags: IntersectionFlags,
) -> Result<Crossing, PredicateError> {
    let [tail, head] = segment.map(|v| &v.point);
    let [t0, t1, t2] = triangle.map(|v| &v.point);
    let tri = Triangle3::new(*t0, *t1, *t2);
    let seg = Segment3::new(tail, head);

    let tail_on = flags.contains(IntersectionFlags::TAIL_ON_TRIANGLE);
    let head_on = flags.contains(IntersectionFlags::HEAD_ON_TRIANGLE);

    let (point, parameter) = if tail_on && head_on {
        let s = match clip_range(tail, head, &tri)? {
            Some((lo, hi)) => 0.5 * (lo + hi),
            None => 0.5,
        };
        (seg.point_at(s), s)
    } else if tail_on {
        (*tail, 0.0)
    } else if head_on {
        (*head, 1.0)
    } else {
        let mut s = crossing_scale(tail, head, t0, t1, t2)?;
        if let Some((lo, hi)) = clip_range(tail, head, &tri)? {
            s = s.clamp(lo, hi);
        }
        match flags.touched_vertex() {
            Some(k) => (*[t0, t1, t2][k], s),
            None => (seg.point_at(s), s),
        }
    };

    let barycentric = barycentric_weights([tail, head], [t0, t1, t2], cs, flags, &point);
    Ok(Crossing {
        point,
        parameter,
        barycentric,
    })
}

/// Fraction of the way from `tail` to `head` at which the segment meets the
/// plane of `t0, t1, t2`.
fn crossing_scale(
    tail: &Point3,
    head: &Point3,
    t0: &Point3,
    t1: &Point3,
    t2: &Point3,
) -> Result<f64, PredicateError> {
    exact_or_rational(
        "crossing_scale",
        || {
            let near = orient3d_exact_volume(tail, t0, t1, t2)?;
            let far = orient3d_exact_volume(head, t0, t1, t2)?;
            segment_scale(near, far)
        },
        || {
            let near = orient3d_rational(tail, t0, t1, t2)?;
            let far = orient3d_rational(head, t0, t1, t2)?;
            Ok(segment_scale_rational(&near, &far))
        },
    )
}
