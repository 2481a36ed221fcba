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

use tracing::trace;

use crate::error::PredicateError;
use crate::geometry::point::{Point3, Vertex, ensure_finite};
use crate::kernel::closest;
use crate::kernel::fast::intersect_segment_triangle_fast;
use crate::kernel::orientation::orient3d_resolved;
use crate::kernel::outcome::Resolved;
use crate::kernel::segment_triangle::{self, SegmentTriangleIntersection};
use crate::numeric::machine::{MachineConstants, exact_init};
use crate::numeric::sign::Sign;

/// How much filtering runs ahead of exact arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredicateConfig {
    /// Try directed-rounding interval arithmetic before expansions.
    pub interval_filter: bool,
    /// Upper bound on every segment and triangle edge length. When set,
    /// segment/triangle queries first try the double-precision filter.
    pub length_bound: Option<f64>,
}

impl Default for PredicateConfig {
    fn default() -> Self {
        Self {
            interval_filter: true,
            length_bound: None,
        }
    }
}

/// Ready-made configurations.
pub mod config_presets {
    use super::PredicateConfig;

    /// Straight to exact arithmetic; useful for checking the filters.
    #[must_use]
    pub fn exact_only() -> PredicateConfig {
        PredicateConfig {
            interval_filter: false,
            length_bound: None,
        }
    }

    #[must_use]
    pub fn interval_filtered() -> PredicateConfig {
        PredicateConfig::default()
    }

    /// For mesh queries whose edges are all at most `max_len` long.
    #[must_use]
    pub fn mesh_filtered(max_len: f64) -> PredicateConfig {
        PredicateConfig {
            interval_filter: true,
            length_bound: (max_len > 0.0).then_some(max_len),
        }
    }
}

/// Entry point for the three predicates.
///
/// Construction checks the floating-point environment once; afterwards every
/// method is a pure function of its arguments and the configuration.
#[derive(Clone, Copy, Debug)]
pub struct RobustPredicates {
    config: PredicateConfig,
    machine: MachineConstants,
}

impl RobustPredicates {
    pub fn new(config: PredicateConfig) -> Result<Self, PredicateError> {
        let machine = exact_init()?;
        Ok(Self { config, machine })
    }

    pub fn config(&self) -> &PredicateConfig {
        &self.config
    }

    pub fn machine_constants(&self) -> &MachineConstants {
        &self.machine
    }

    /// Orientation of `v[0]` against the counterclockwise triangle
    /// `v[1], v[2], v[3]`: positive above, negative below, never zero.
    pub fn orient3d(&self, v: [&Vertex; 4]) -> Result<Resolved<Sign>, PredicateError> {
        ensure_finite(v.map(|x| &x.point))?;
        orient3d_resolved(v, self.config.interval_filter)
    }

    /// Intersects segment `segment[0] -> segment[1]` with `triangle`.
    pub fn intersect_segment_triangle(
        &self,
        segment: [&Vertex; 2],
        triangle: [&Vertex; 3],
    ) -> Result<SegmentTriangleIntersection, PredicateError> {
        ensure_finite(segment.into_iter().chain(triangle).map(|x| &x.point))?;

        if let Some(max_len) = self.config.length_bound {
            let tri = triangle.map(|x| &x.point);
            if let Some(hit) = intersect_segment_triangle_fast(&segment[0].point, &segment[1].point, tri, max_len) {
                return Ok(hit);
            }
            trace!("segment triangle filter inconclusive");
        }
        segment_triangle::intersect_segment_triangle(segment, triangle, self.config.interval_filter)
    }

    /// Orders the crossings of `segment` with triangles `c` and `d` by their
    /// distance from `segment[0]`.
    pub fn closest_intersection(
        &self,
        segment: [&Point3; 2],
        c: [&Point3; 3],
        d: [&Point3; 3],
    ) -> Result<Resolved<Ordering>, PredicateError> {
        ensure_finite(segment.into_iter().chain(c).chain(d))?;
        closest::closest_intersection(segment, c, d, self.config.interval_filter)
    }
}

/// [`RobustPredicates::orient3d`] with the default configuration.
pub fn orient3d(v: [&Vertex; 4]) -> Result<Resolved<Sign>, PredicateError> {
    RobustPredicates::new(PredicateConfig::default())?.orient3d(v)
}

/// [`RobustPredicates::intersect_segment_triangle`] with the default configuration.
pub fn intersect_segment_triangle(
    segment: [&Vertex; 2],
    triangle: [&Vertex; 3],
) -> Result<SegmentTriangleIntersection, PredicateError> {
    RobustPredicates::new(PredicateConfig::default())?.intersect_segment_triangle(segment, triangle)
}

/// [`RobustPredicates::closest_intersection`] with the default configuration.
pub fn closest_intersection(
    segment: [&Point3; 2],
    c: [&Point3; 3],
    d: [&Point3; 3],
) -> Result<Resolved<Ordering>, PredicateError> {
    RobustPredicates::new(PredicateConfig::default())?.closest_intersection(segment, c, d)
}
