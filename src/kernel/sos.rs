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

//! Simulation of simplicity for `orient3d`.
//!
//! Every input coordinate is perturbed by a distinct infinitesimal power of
//! epsilon keyed on the vertex identity. The sign of the perturbed
//! determinant is the sign of the first non-vanishing coefficient of the
//! resulting polynomial, taken over the vertices sorted by identity.

use crate::error::PredicateError;
use crate::geometry::point::{Point2, Vertex};
use crate::kernel::orientation::{orient1d, orient2d_exact_sign};
use crate::numeric::sign::Sign;

/// One coefficient of the perturbation polynomial.
#[derive(Clone, Copy, Debug)]
enum Minor {
    /// `orient2d` of three sorted vertices restricted to two axes.
    Plane { points: [usize; 3], axes: [usize; 2] },
    /// Difference of one coordinate of two sorted vertices.
    Line { points: [usize; 2], axis: usize },
}

#[derive(Clone, Copy, Debug)]
struct Term {
    minor: Minor,
    negated: bool,
}

const fn plane(points: [usize; 3], axes: [usize; 2], negated: bool) -> Term {
    Term {
        minor: Minor::Plane { points, axes },
        negated,
    }
}

const fn line(points: [usize; 2], axis: usize, negated: bool) -> Term {
    Term {
        minor: Minor::Line { points, axis },
        negated,
    }
}

// Coefficients in increasing order of epsilon exponent, indices into the
// identity-sorted quadruple.
const TERMS: [Term; 13] = [
    plane([1, 2, 3], [0, 1], false),
    plane([1, 2, 3], [0, 2], true),
    plane([1, 2, 3], [1, 2], false),
    plane([0, 2, 3], [0, 1], true),
    line([2, 3], 0, false),
    line([2, 3], 1, true),
    plane([0, 2, 3], [0, 2], false),
    line([2, 3], 2, false),
    plane([0, 2, 3], [1, 2], true),
    plane([0, 1, 3], [0, 1], false),
    line([1, 3], 0, true),
    line([1, 3], 1, false),
    line([0, 3], 0, false),
];

// Sorting network over four slots.
const NETWORK: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 3), (0, 1), (1, 2), (0, 1)];

/// Sorts by identity, returning the permutation parity.
fn sort_by_identity(v: &mut [&Vertex; 4]) -> Sign {
    let mut parity = Sign::Positive;
    for (i, j) in NETWORK {
        if v[i].id > v[j].id {
            v.swap(i, j);
            parity = -parity;
        }
    }
    parity
}

fn evaluate(term: &Term, v: &[&Vertex; 4]) -> Result<Sign, PredicateError> {
    let sign = match term.minor {
        Minor::Plane { points, axes } => {
            let [a, b, c] = points.map(|k| {
                let p = &v[k].point;
                Point2::new(p[axes[0]], p[axes[1]])
            });
            orient2d_exact_sign(&a, &b, &c)?
        }
        Minor::Line { points, axis } => {
            orient1d(v[points[0]].point[axis], v[points[1]].point[axis])
        }
    };
    Ok(if term.negated { -sign } else { sign })
}

/// Symbolically perturbed orientation of `v[0]` against `v[1], v[2], v[3]`.
///
/// Never returns [`Sign::Zero`]. Swapping any two vertices negates the
/// result. Identities must be pairwise distinct.
pub fn sos_orient3d(v: [&Vertex; 4]) -> Result<Sign, PredicateError> {
    debug_assert!(
        (0..4).all(|i| (i + 1..4).all(|j| v[i].id != v[j].id)),
        "symbolic perturbation needs distinct vertex identities"
    );

    let mut sorted = v;
    let parity = sort_by_identity(&mut sorted);

    for term in &TERMS {
        let sign = evaluate(term, &sorted)?;
        if !sign.is_zero() {
            return Ok(parity * sign);
        }
    }
    Ok(parity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point3;

    fn square() -> [Vertex; 4] {
        [
            Vertex::new(0, Point3::new(0.0, 0.0, 0.0)),
            Vertex::new(1, Point3::new(1.0, 0.0, 0.0)),
            Vertex::new(2, Point3::new(0.0, 1.0, 0.0)),
            Vertex::new(3, Point3::new(1.0, 1.0, 0.0)),
        ]
    }

    #[test]
    fn first_minor_decides_flat_square() {
        let v = square();
        // orient2d of the last three in xy is -1
        assert_eq!(sos_orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap(), Sign::Negative);
    }

    #[test]
    fn transposition_flips_sign() {
        let v = square();
        let base = sos_orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        assert_eq!(sos_orient3d([&v[1], &v[0], &v[2], &v[3]]).unwrap(), -base);
        assert_eq!(sos_orient3d([&v[0], &v[1], &v[3], &v[2]]).unwrap(), -base);
        assert_eq!(sos_orient3d([&v[3], &v[1], &v[2], &v[0]]).unwrap(), -base);
        // even permutation
        assert_eq!(sos_orient3d([&v[1], &v[2], &v[0], &v[3]]).unwrap(), base);
    }

    #[test]
    fn identical_points_fall_back_to_parity() {
        let p = Point3::new(0.25, -3.0, 7.5);
        let v = [0, 1, 2, 3].map(|id| Vertex::new(id, p));
        assert_eq!(sos_orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap(), Sign::Positive);
        assert_eq!(sos_orient3d([&v[1], &v[0], &v[2], &v[3]]).unwrap(), Sign::Negative);
    }

    #[test]
    fn collinear_points_reach_line_terms() {
        // all on the x axis, so every planar minor vanishes
        let v = [
            Vertex::new(10, Point3::new(0.0, 0.0, 0.0)),
            Vertex::new(11, Point3::new(1.0, 0.0, 0.0)),
            Vertex::new(12, Point3::new(2.0, 0.0, 0.0)),
            Vertex::new(13, Point3::new(5.0, 0.0, 0.0)),
        ];
        // fifth term: c.x - d.x = 2 - 5 < 0
        assert_eq!(sos_orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap(), Sign::Negative);
    }

    #[test]
    fn sorting_network_parity() {
        let v = square();
        let mut order = [&v[3], &v[2], &v[1], &v[0]];
        // reversal of four is an even permutation
        assert_eq!(sort_by_identity(&mut order), Sign::Positive);
        assert_eq!(order.map(|x| x.id), [0, 1, 2, 3]);
    }
}
