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

//! Robust geometric predicates for 3D meshes.
//!
//! `orient3d`, segment/triangle intersection and closest-intersection
//! ordering that give exact, consistent answers for every finite input.
//! Each query escalates from a floating-point filter to exact expansion
//! arithmetic, and `orient3d` resolves exact ties with simulation of
//! simplicity keyed on caller-supplied vertex identities.

pub mod error;
pub mod geometry;
pub mod kernel;
pub mod numeric;

pub use error::PredicateError;
pub use geometry::{Point3, Vertex};
pub use kernel::{
    Depth, IntersectionFlags, PredicateConfig, Resolved, RobustPredicates,
    SegmentTriangleIntersection, closest_intersection, intersect_segment_triangle, orient3d,
};
pub use numeric::Sign;
