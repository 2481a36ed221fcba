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

use std::f64::consts::TAU;

use rand::Rng;

use crate::geometry::matrix::Matrix3;

/// Rotation by Euler angles: about x by `xang`, then y by `yang`, then z by `zang`.
pub fn rotation_from_euler(xang: f64, yang: f64, zang: f64) -> Matrix3 {
    let (sx, cx) = xang.sin_cos();
    let (sy, cy) = yang.sin_cos();
    let (sz, cz) = zang.sin_cos();
    Matrix3::new([
        [cy * cz, -cx * sz + sx * sy * cz, sx * sz + cx * sy * cz],
        [cy * sz, cx * cz + sx * sy * sz, -sx * cz + cx * sy * sz],
        [-sy, sx * cy, cx * cy],
    ])
}

/// Rotation with three independent angles drawn uniformly from `[0, 2π)`.
pub fn random_rotation<R: Rng>(rng: &mut R) -> Matrix3 {
    let xang = rng.random_range(0.0..TAU);
    let yang = rng.random_range(0.0..TAU);
    let zang = rng.random_range(0.0..TAU);
    rotation_from_euler(xang, yang, zang)
}
