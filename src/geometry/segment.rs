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

use crate::geometry::point::{Point3, PointOps};

pub trait SegmentOps: Sized {
    fn a(&self) -> &Point3;
    fn b(&self) -> &Point3;

    fn point_at(&self, s: f64) -> Point3 {
        self.a().lerp(self.b(), s)
    }
}

/// Directed segment from tail `a` to head `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    pub a: Point3,
    pub b: Point3,
}

impl Segment3 {
    pub fn new(a: &Point3, b: &Point3) -> Self {
        Self { a: *a, b: *b }
    }
}

impl SegmentOps for Segment3 {
    fn a(&self) -> &Point3 {
        &self.a
    }

    fn b(&self) -> &Point3 {
        &self.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_parameterization() {
        let seg = Segment3::new(&Point3::new(0.0, 0.0, 0.0), &Point3::new(2.0, 0.0, 0.0));
        assert_eq!(seg.point_at(0.25), Point3::new(0.5, 0.0, 0.0));
        assert_eq!(seg.point_at(1.0), seg.b);
    }
}
