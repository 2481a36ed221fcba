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

use std::ops::Index;

use crate::error::PredicateError;
use crate::geometry::vector::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T, const N: usize> {
    pub coords: [T; N],
}

pub type Point2 = Point<f64, 2>;
pub type Point3 = Point<f64, 3>;

pub trait PointOps<const N: usize>: Sized {
    type Vector;

    fn vector_to(&self, other: &Self) -> Self::Vector;
    /// `(1 - s) * self + s * other`
    fn lerp(&self, other: &Self, s: f64) -> Self;
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point { coords: [x, y] }
    }
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { coords: [x, y, z] }
    }

    /// Drops one coordinate, keeping the other two in cyclic order so that
    /// counterclockwise stays counterclockwise when viewed along `+axis`.
    pub fn project(&self, axis: usize) -> Point2 {
        Point2::new(self[(axis + 1) % 3], self[(axis + 2) % 3])
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl PointOps<3> for Point3 {
    type Vector = Vector3;

    fn vector_to(&self, other: &Self) -> Vector3 {
        Vector3::new(other[0] - self[0], other[1] - self[1], other[2] - self[2])
    }

    fn lerp(&self, other: &Self, s: f64) -> Self {
        let r = 1.0 - s;
        Point3::new(
            r * self[0] + s * other[0],
            r * self[1] + s * other[1],
            r * self[2] + s * other[2],
        )
    }
}

/// A point together with the identity used for symbolic tie-breaking.
///
/// Identities must be distinct among the points handed to one predicate call
/// and stable across calls that are expected to agree with each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub id: usize,
    pub point: Point3,
}

impl Vertex {
    pub fn new(id: usize, point: Point3) -> Self {
        Vertex { id, point }
    }
}

/// Rejects NaN and infinite coordinates, reporting the flattened index of the
/// first offending one.
pub fn ensure_finite<'a>(
    points: impl IntoIterator<Item = &'a Point3>,
) -> Result<(), PredicateError> {
    for (i, p) in points.into_iter().enumerate() {
        if let Some(k) = p.coords.iter().position(|c| !c.is_finite()) {
            return Err(PredicateError::NonFiniteCoordinate {
                index: 3 * i + k,
                value: p[k],
            });
        }
    }
    Ok(())
}
