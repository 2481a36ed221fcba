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

use std::{
    array,
    ops::{Index, Mul},
};

use crate::geometry::point::Point3;

/// Row-major `R x C` matrix of doubles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<const R: usize, const C: usize>(pub [[f64; C]; R]);

pub type Matrix3 = Matrix<3, 3>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    #[inline]
    pub fn new(data: [[f64; C]; R]) -> Self {
        Matrix(data)
    }

    /// Transpose into C x R.
    #[inline]
    pub fn transpose(&self) -> Matrix<C, R> {
        Matrix(array::from_fn(|j| array::from_fn(|i| self[i][j])))
    }
}

impl<const N: usize> Matrix<N, N> {
    pub fn identity() -> Self {
        Matrix(array::from_fn(|i| array::from_fn(|j| if i == j { 1.0 } else { 0.0 })))
    }
}

impl Matrix3 {
    pub fn apply(&self, p: &Point3) -> Point3 {
        Point3::new(
            self[0][0] * p[0] + self[0][1] * p[1] + self[0][2] * p[2],
            self[1][0] * p[0] + self[1][1] * p[1] + self[1][2] * p[2],
            self[2][0] * p[0] + self[2][1] * p[1] + self[2][2] * p[2],
        )
    }
}

impl<const R: usize, const C: usize> Index<usize> for Matrix<R, C> {
    type Output = [f64; C];
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<const R: usize, const K: usize, const C: usize> Mul<&Matrix<K, C>> for &Matrix<R, K> {
    type Output = Matrix<R, C>;
    fn mul(self, rhs: &Matrix<K, C>) -> Matrix<R, C> {
        Matrix(array::from_fn(|i| {
            array::from_fn(|j| (0..K).map(|k| self[i][k] * rhs[k][j]).sum())
        }))
    }
}
