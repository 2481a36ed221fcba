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

//! Property-based tests for the robust predicates.
//!
//! Random coordinates exercise the filtered paths. Coordinates drawn from a
//! small integer grid make exact coplanarity common enough to exercise the
//! symbolic tie-breaking. Coordinates spread over the whole exponent range
//! push products past overflow and into underflow.

use std::cmp::Ordering;

use proptest::prelude::*;

use robust_preds::kernel::orientation::{orient3d_exact, orient3d_interval};
use robust_preds::numeric::rational::orient3d_rational;
use robust_preds::{Depth, Point3, Sign, Vertex, closest_intersection, intersect_segment_triangle, orient3d};

fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-1000.0..1000.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

fn point_3d() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(finite_coordinate()).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn wide_coordinate() -> impl Strategy<Value = f64> {
    (-2.0..2.0, -1000i32..1000)
        .prop_map(|(mantissa, exponent): (f64, i32)| mantissa * 2f64.powi(exponent))
        .prop_filter("must be finite", |x| x.is_finite())
}

fn wide_point() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(wide_coordinate()).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn grid_point() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(-2i32..=2).prop_map(|[x, y, z]| Point3::new(x.into(), y.into(), z.into()))
}

fn with_ids<const N: usize>(points: [Point3; N]) -> [Vertex; N] {
    let mut id = 0;
    points.map(|p| {
        id += 1;
        Vertex::new(id, p)
    })
}

proptest! {
    /// Property: the same query always gives the same answer at the same depth.
    #[test]
    fn prop_orient3d_is_deterministic(points in prop::array::uniform4(point_3d())) {
        let v = with_ids(points);
        let first = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        let second = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: a conclusive interval never disagrees with the exact sign.
    #[test]
    fn prop_interval_sign_is_exact_when_certain(points in prop::array::uniform4(point_3d())) {
        let [p0, p1, p2, p3] = &points;
        let exact = orient3d_exact(p0, p1, p2, p3).unwrap().sign();
        if let Some(sign) = orient3d_interval(p0, p1, p2, p3).sign_if_certain() {
            prop_assert_eq!(sign, exact);
        }
    }

    /// Property: the expansion determinant carries the exact rational value.
    #[test]
    fn prop_exact_volume_matches_rational(points in prop::array::uniform4(point_3d())) {
        let [p0, p1, p2, p3] = &points;
        let expansion = orient3d_exact(p0, p1, p2, p3).unwrap();
        let rational = orient3d_rational(p0, p1, p2, p3).unwrap();
        prop_assert_eq!(expansion.to_rational().unwrap(), rational.0);
    }

    /// Property: grid orientations are never zero, and only exact zeros
    /// reach symbolic perturbation.
    #[test]
    fn prop_grid_orientation_never_zero(points in prop::array::uniform4(grid_point())) {
        let v = with_ids(points);
        let r = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        prop_assert_ne!(r.value, Sign::Zero);

        let [p0, p1, p2, p3] = &points;
        let flat = orient3d_rational(p0, p1, p2, p3).unwrap().sign().is_zero();
        prop_assert_eq!(r.depth == Depth::Symbolic, flat);
    }

    /// Property: swapping two triangle vertices flips the orientation,
    /// coplanar cases included.
    #[test]
    fn prop_triangle_swap_flips_orientation(points in prop::array::uniform4(grid_point())) {
        let v = with_ids(points);
        let r = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        let swapped = orient3d([&v[0], &v[2], &v[1], &v[3]]).unwrap();
        prop_assert_eq!(swapped.value, -r.value);
    }

    /// Property: at any exponent the answer has the sign of the exact
    /// rational determinant, and only a zero determinant is perturbed.
    #[test]
    fn prop_wide_orient3d_matches_rational(points in prop::array::uniform4(wide_point())) {
        let v = with_ids(points);
        let r = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();

        let [p0, p1, p2, p3] = &points;
        let truth = orient3d_rational(p0, p1, p2, p3).unwrap().sign();
        if truth.is_zero() {
            prop_assert_eq!(r.depth, Depth::Symbolic);
            prop_assert_ne!(r.value, Sign::Zero);
        } else {
            prop_assert_eq!(r.value, truth);
            prop_assert_ne!(r.depth, Depth::Symbolic);
        }
        if let Some(sign) = orient3d_interval(p0, p1, p2, p3).sign_if_certain() {
            prop_assert_eq!(sign, truth);
        }
    }

    /// Property: triangle swaps flip the sign at any exponent.
    #[test]
    fn prop_wide_triangle_swap_flips_orientation(points in prop::array::uniform4(wide_point())) {
        let v = with_ids(points);
        let r = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        let swapped = orient3d([&v[0], &v[2], &v[1], &v[3]]).unwrap();
        let cycled = orient3d([&v[0], &v[2], &v[3], &v[1]]).unwrap();
        prop_assert_eq!(swapped.value, -r.value);
        prop_assert_eq!(cycled.value, r.value);
    }

    /// Property: rotating the triangle's vertex order does not change
    /// whether the segment hits it.
    #[test]
    fn prop_triangle_rotation_keeps_hit(points in prop::array::uniform5(grid_point())) {
        let v = with_ids(points);
        let hit = intersect_segment_triangle([&v[0], &v[1]], [&v[2], &v[3], &v[4]]).unwrap();
        let rotated = intersect_segment_triangle([&v[0], &v[1]], [&v[3], &v[4], &v[2]]).unwrap();
        prop_assert_eq!(hit.intersects(), rotated.intersects());
    }

    /// Property: exchanging the triangles, or walking the segment the other
    /// way, reverses the closest-intersection ordering.
    #[test]
    fn prop_closest_is_antisymmetric(
        segment in prop::array::uniform2(point_3d()),
        c in prop::array::uniform3(point_3d()),
        d in prop::array::uniform3(point_3d()),
    ) {
        let seg = [&segment[0], &segment[1]];
        let back = [&segment[1], &segment[0]];
        let c = [&c[0], &c[1], &c[2]];
        let d = [&d[0], &d[1], &d[2]];

        let forward = closest_intersection(seg, c, d).unwrap().value;
        let exchanged = closest_intersection(seg, d, c).unwrap().value;
        let reversed = closest_intersection(back, c, d).unwrap().value;
        prop_assert_eq!(exchanged, forward.reverse());
        prop_assert_eq!(reversed, forward.reverse());
        prop_assert!(forward != Ordering::Equal || exchanged == Ordering::Equal);
    }
}
