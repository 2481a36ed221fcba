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

use std::cmp::Ordering;

use rand::SeedableRng;
use rand::rngs::StdRng;

use robust_preds::geometry::rotation::random_rotation;
use robust_preds::kernel::config_presets;
use robust_preds::{Depth, Point3, RobustPredicates, closest_intersection};

type Case = ([Point3; 2], [Point3; 3], [Point3; 3]);

fn sanity_case() -> Case {
    (
        [Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0)],
        [
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ],
        [
            Point3::new(-1.0, 0.0, -0.5),
            Point3::new(1.0, 1.0, -0.5),
            Point3::new(1.0, -1.0, -0.5),
        ],
    )
}

fn same_intersection_case() -> Case {
    (
        [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
        [
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 0.0),
        ],
        [
            Point3::new(0.75, 0.5, -0.25),
            Point3::new(0.75, 0.5, -0.3),
            Point3::new(0.25, -0.5, 0.0),
        ],
    )
}

fn both_ways(case: &Case) -> (Ordering, Ordering) {
    let ([a, b], c, d) = case;
    let c = [&c[0], &c[1], &c[2]];
    let d = [&d[0], &d[1], &d[2]];
    let forward = closest_intersection([a, b], c, d).unwrap();
    let backward = closest_intersection([b, a], c, d).unwrap();
    assert_eq!(forward.depth, backward.depth);
    (forward.value, backward.value)
}

#[test]
fn sanity_check() {
    assert_eq!(both_ways(&sanity_case()), (Ordering::Greater, Ordering::Less));
}

#[test]
fn crossing_and_same_intersection() {
    let ([a, b], c, d) = same_intersection_case();
    let r = closest_intersection([&a, &b], [&c[0], &c[1], &c[2]], [&d[0], &d[1], &d[2]]).unwrap();
    assert_eq!(r.value, Ordering::Equal);
    assert_eq!(r.depth, Depth::Exact);
    assert_eq!(both_ways(&same_intersection_case()), (Ordering::Equal, Ordering::Equal));
}

#[test]
fn swapping_the_triangles_reverses_the_answer() {
    let ([a, b], c, d) = sanity_case();
    let c = [&c[0], &c[1], &c[2]];
    let d = [&d[0], &d[1], &d[2]];
    assert_eq!(closest_intersection([&a, &b], c, d).unwrap().value, Ordering::Greater);
    assert_eq!(closest_intersection([&a, &b], d, c).unwrap().value, Ordering::Less);
}

#[test]
fn triangle_vertex_order_does_not_matter() {
    let ([a, b], c, d) = sanity_case();
    let orders = [[0, 1, 2], [2, 0, 1], [1, 2, 0], [0, 2, 1], [1, 0, 2], [2, 1, 0]];
    for oc in orders {
        for od in orders {
            let c = oc.map(|i| &c[i]);
            let d = od.map(|i| &d[i]);
            assert_eq!(closest_intersection([&a, &b], c, d).unwrap().value, Ordering::Greater);
        }
    }
}

#[test]
fn rotated_cases_stay_antisymmetric() {
    let mut rng = StdRng::seed_from_u64(99);
    for case in [sanity_case(), same_intersection_case()] {
        for _ in 0..200 {
            let m = random_rotation(&mut rng);
            let ([a, b], c, d) = &case;
            let spun: Case = (
                [m.apply(a), m.apply(b)],
                c.each_ref().map(|p| m.apply(p)),
                d.each_ref().map(|p| m.apply(p)),
            );
            let (forward, backward) = both_ways(&spun);
            assert_eq!(forward, backward.reverse());
        }
    }
}

#[test]
fn exact_only_matches_filtered() {
    let exact = RobustPredicates::new(config_presets::exact_only()).unwrap();
    let ([a, b], c, d) = sanity_case();
    let r = exact
        .closest_intersection([&a, &b], [&c[0], &c[1], &c[2]], [&d[0], &d[1], &d[2]])
        .unwrap();
    assert_eq!(r.value, Ordering::Greater);
    assert_eq!(r.depth, Depth::Exact);
}
