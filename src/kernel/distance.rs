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

//! Signed, unnormalized distance of a point from a triangle's plane.
//!
//! All variants compute `n . (c0 - a)` with `n = (c1 - c0) x (c2 - c0)`, so
//! the value is the perpendicular distance scaled by `|n|`.

use crate::error::PredicateError;
use crate::geometry::point::Point3;
use crate::numeric::expansion::Expansion;
use crate::numeric::interval::{Downward, Interval, Rounding, Upward};

// Products `f * g` of triangle coordinates that multiply one weight. Each
// pair is `(negate_f, f, g)` in the layout used when the weight is
// nonnegative; a negative weight is made positive and every `negate_f` flips.
type Pairs<const K: usize> = [(bool, f64, f64); K];

/// `weight * sum(f * g)` with every rounding in direction `R`.
///
/// The outer factor is forced nonnegative so the directed sum stays a bound
/// after scaling.
#[inline]
fn weighted<R: Rounding, const K: usize>(weight: f64, pairs: Pairs<K>) -> f64 {
    let flip = weight < 0.0;
    let mut sum = 0.0;
    for (negated, f, g) in pairs {
        let f = if negated != flip { -f } else { f };
        sum = R::add(sum, R::mul(f, g));
    }
    R::mul(weight.abs(), sum)
}

/// Directed-rounding evaluation: a lower bound under [`Downward`], an upper
/// bound under [`Upward`].
pub fn perpendicular_distance<R: Rounding>(a: &Point3, c0: &Point3, c1: &Point3, c2: &Point3) -> f64 {
    let (c0x, c0y, c0z) = (c0[0], c0[1], c0[2]);
    let (c1x, c1y, c1z) = (c1[0], c1[1], c1[2]);
    let (c2x, c2y, c2z) = (c2[0], c2[1], c2[2]);

    let terms = [
        weighted::<R, 6>(
            a[0],
            [
                (false, c1z, c2y),
                (false, c0z, c1y),
                (false, c0y, c2z),
                (true, c1y, c2z),
                (true, c0z, c2y),
                (true, c0y, c1z),
            ],
        ),
        weighted::<R, 6>(
            a[1],
            [
                (false, c1x, c2z),
                (false, c0z, c2x),
                (false, c0x, c1z),
                (true, c1z, c2x),
                (true, c0z, c1x),
                (true, c0x, c2z),
            ],
        ),
        weighted::<R, 6>(
            a[2],
            [
                (false, c0x, c2y),
                (false, c0y, c1x),
                (false, c1y, c2x),
                (true, c0x, c1y),
                (true, c0y, c2x),
                (true, c1x, c2y),
            ],
        ),
        weighted::<R, 2>(c0x, [(false, c1y, c2z), (true, c1z, c2y)]),
        weighted::<R, 2>(c0y, [(false, c1z, c2x), (true, c1x, c2z)]),
        weighted::<R, 2>(c0z, [(false, c1x, c2y), (true, c1y, c2x)]),
    ];

    terms.into_iter().fold(0.0, R::add)
}

/// Encloses the distance between its downward and upward evaluations.
pub fn perpendicular_distance_interval(a: &Point3, c0: &Point3, c1: &Point3, c2: &Point3) -> Interval {
    Interval::new(
        perpendicular_distance::<Downward>(a, c0, c1, c2),
        perpendicular_distance::<Upward>(a, c0, c1, c2),
    )
}

fn diff3(p: &Point3, q: &Point3) -> Result<[Expansion; 3], PredicateError> {
    Ok([
        Expansion::from_two_diff(p[0], q[0])?,
        Expansion::from_two_diff(p[1], q[1])?,
        Expansion::from_two_diff(p[2], q[2])?,
    ])
}

/// Exact distance; each normal component has at most 16 components and the
/// dot product at most 192.
pub fn perpendicular_distance_exact(
    a: &Point3,
    c0: &Point3,
    c1: &Point3,
    c2: &Point3,
) -> Result<Expansion, PredicateError> {
    let d = diff3(c0, a)?;
    let e1 = diff3(c1, c0)?;
    let e2 = diff3(c2, c0)?;

    let nx = e1[1].mul(&e2[2])?.sub(&e1[2].mul(&e2[1])?)?;
    let ny = e1[2].mul(&e2[0])?.sub(&e1[0].mul(&e2[2])?)?;
    let nz = e1[0].mul(&e2[1])?.sub(&e1[1].mul(&e2[0])?)?;

    nx.mul(&d[0])?.add(&ny.mul(&d[1])?)?.add(&nz.mul(&d[2])?)
}
