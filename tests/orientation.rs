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

use robust_preds::kernel::orientation::{orient3d_exact, orient3d_exact_sign, orient3d_interval};
use robust_preds::kernel::sos::sos_orient3d;
use robust_preds::numeric::rational::orient3d_rational;
use robust_preds::{Depth, Point3, PredicateError, Sign, Vertex, orient3d};

fn ids(points: [Point3; 4]) -> [Vertex; 4] {
    [
        Vertex::new(0, points[0]),
        Vertex::new(1, points[1]),
        Vertex::new(2, points[2]),
        Vertex::new(3, points[3]),
    ]
}

fn refs(v: &[Vertex; 4]) -> [&Vertex; 4] {
    [&v[0], &v[1], &v[2], &v[3]]
}

#[test]
fn orientation_3d_positive_volume() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    let d = Point3::new(0.0, 0.0, 1.0); // above the abc plane

    let v = ids([d, a, b, c]);
    let r = orient3d(refs(&v)).unwrap();
    assert_eq!(r.value, Sign::Positive);
    assert_eq!(r.depth, Depth::Interval);
}

#[test]
fn orientation_3d_negative_volume() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    let d = Point3::new(0.0, 0.0, -1.0); // below the abc plane

    let v = ids([d, a, b, c]);
    assert_eq!(orient3d(refs(&v)).unwrap().value, Sign::Negative);
}

#[test]
fn orientation_3d_coplanar() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    let d = Point3::new(1.0, 1.0, 0.0); // lies in the same z=0 plane

    let v = ids([d, a, b, c]);
    let r = orient3d(refs(&v)).unwrap();
    assert_eq!(r.depth, Depth::Symbolic);
    assert_ne!(r.value, Sign::Zero);
}

#[test]
fn swapping_triangle_points_flips_sign() {
    let cases = [
        [
            Point3::new(0.3, -0.2, 0.9),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        // coplanar, decided symbolically
        [
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        // all four coincide
        [Point3::new(1.5, -2.5, 3.0); 4],
    ];

    for points in cases {
        let v = ids(points);
        let base = orient3d([&v[0], &v[1], &v[2], &v[3]]).unwrap();
        let swapped = orient3d([&v[0], &v[2], &v[1], &v[3]]).unwrap();
        assert_eq!(swapped.value, -base.value);
        assert_eq!(swapped.depth, base.depth);

        let swapped = orient3d([&v[0], &v[1], &v[3], &v[2]]).unwrap();
        assert_eq!(swapped.value, -base.value);
        let rotated = orient3d([&v[0], &v[2], &v[3], &v[1]]).unwrap();
        assert_eq!(rotated.value, base.value);
    }
}

#[test]
fn symbolic_depth_only_for_exact_zero() {
    let grid = [-1.0, 0.0, 1.0];
    let mut n = 0;
    for &x in &grid {
        for &y in &grid {
            for &z in &grid {
                let points = [
                    Point3::new(x, y, z),
                    Point3::new(0.0, 1.0, 0.0),
                    Point3::new(1.0, 0.0, 1.0),
                    Point3::new(-1.0, 0.0, 1.0),
                ];
                let v = ids(points);
                let r = orient3d(refs(&v)).unwrap();
                let exact = orient3d_exact(&points[0], &points[1], &points[2], &points[3]).unwrap();

                assert_ne!(r.value, Sign::Zero);
                if exact.is_zero() {
                    assert_eq!(r.depth, Depth::Symbolic);
                    assert_eq!(r.value, sos_orient3d(refs(&v)).unwrap());
                    n += 1;
                } else {
                    assert!(r.depth < Depth::Symbolic);
                    assert_eq!(r.value, exact.sign());
                }
            }
        }
    }
    assert!(n > 0);
}

#[test]
fn interval_and_exact_agree_on_near_degenerate_input() {
    // a point nudged off the plane by one ulp in each coordinate
    let base = Point3::new(0.1, 0.2, 0.3);
    let p1 = Point3::new(0.7, -0.4, 0.3);
    let p2 = Point3::new(-0.2, 0.9, 0.3);
    let p3 = Point3::new(0.5, 0.5, 0.3);
    for dz in [f64::EPSILON, -f64::EPSILON, 0.0] {
        let p0 = Point3::new(base[0], base[1], base[2] + base[2] * dz);
        let exact = orient3d_exact(&p0, &p1, &p2, &p3).unwrap().sign();
        let reference = orient3d_rational(&p0, &p1, &p2, &p3).unwrap().sign();
        assert_eq!(exact, reference);
        if let Some(sign) = orient3d_interval(&p0, &p1, &p2, &p3).sign_if_certain() {
            assert_eq!(sign, exact);
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let v = ids([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]);
    let first = orient3d(refs(&v)).unwrap();
    for _ in 0..10 {
        assert_eq!(orient3d(refs(&v)).unwrap(), first);
    }
}

// Differences of order 1e160 square to 1e320, past the largest double.
fn huge_tetrahedron(z: f64) -> [Point3; 4] {
    [
        Point3::new(0.5e160, 0.5e160, z),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1e160, 0.0, 0.0),
        Point3::new(0.0, 1e160, 0.0),
    ]
}

#[test]
fn huge_coordinates_are_decided_exactly() {
    let above = huge_tetrahedron(1e-300);
    let [p0, p1, p2, p3] = above;
    assert!(matches!(
        orient3d_exact(&p0, &p1, &p2, &p3),
        Err(PredicateError::ExponentRange { .. })
    ));
    assert_eq!(orient3d_exact_sign(&p0, &p1, &p2, &p3).unwrap(), Sign::Positive);

    // The answer must not depend on vertex identities.
    for order in [[0, 1, 2, 3], [1, 0, 2, 3], [3, 2, 1, 0]] {
        let v = [0, 1, 2, 3].map(|k| Vertex::new(order[k], above[k]));
        let r = orient3d(refs(&v)).unwrap();
        assert_eq!(r.value, Sign::Positive, "ids {order:?}");
        assert_ne!(r.depth, Depth::Symbolic, "ids {order:?}");
    }

    let v = ids(huge_tetrahedron(-1e-300));
    let r = orient3d(refs(&v)).unwrap();
    assert_eq!(r.value, Sign::Negative);
    assert_ne!(r.depth, Depth::Symbolic);
}

#[test]
fn underflowing_products_keep_the_true_sign() {
    // The exact determinant is about -3.2e-145, but the s * s terms fall
    // below the subnormal range.
    let s = 2f64.powi(-540);
    let big = 2f64.powi(600);
    let p0 = Point3::new(1.0, 0.0, big);
    let p1 = Point3::new(1.0, s, big);
    let p2 = Point3::new(s, 1.0, 2f64.powi(-60));
    let p3 = Point3::new(0.0, 0.0, 0.0);

    assert_ne!(orient3d_interval(&p0, &p1, &p2, &p3).sign_if_certain(), Some(Sign::Positive));
    assert_eq!(orient3d_exact_sign(&p0, &p1, &p2, &p3).unwrap(), Sign::Negative);
    assert_eq!(orient3d_rational(&p0, &p1, &p2, &p3).unwrap().sign(), Sign::Negative);

    let v = ids([p0, p1, p2, p3]);
    let r = orient3d(refs(&v)).unwrap();
    assert_eq!(r.value, Sign::Negative);
    assert_ne!(r.depth, Depth::Symbolic);
}
