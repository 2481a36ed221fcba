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

//! Error-free transforms on `f64`.
//!
//! Each function returns the rounded result together with the exact rounding
//! error, so `hi + lo` equals the real-number result. All of them assume
//! round-to-nearest IEEE-754 doubles. Overflow shows up as a NaN or infinite
//! result; products below [`UNDERFLOW_GUARD`] may lose their error term, see
//! [`product_is_exact`].

/// `2^ceil(53 / 2) + 1`, splits a double into two 26-bit halves.
pub const SPLITTER: f64 = 134_217_729.0;

/// Half an ulp of 1.0, the relative rounding error of one operation.
pub const EPSILON: f64 = 1.110_223_024_625_156_5e-16;

/// `2^-969`, the smallest product magnitude whose rounding error is still a
/// representable double. Below it the error term itself is rounded by
/// gradual underflow.
pub const UNDERFLOW_GUARD: f64 = f64::MIN_POSITIVE * 9_007_199_254_740_992.0;

#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    (x, two_sum_tail(a, b, x))
}

#[inline]
pub fn two_sum_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = x - a;
    let avirt = x - bvirt;
    let bround = b - bvirt;
    let around = a - avirt;
    around + bround
}

/// Requires `|a| >= |b|` (or `a == 0`).
#[inline]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    (x, b - bvirt)
}

#[inline]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

#[inline]
pub fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = a - x;
    let avirt = x + bvirt;
    let bround = bvirt - b;
    let around = a - avirt;
    around + bround
}

/// Dekker split into non-overlapping high and low halves.
#[inline]
pub fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let abig = c - a;
    let ahi = c - abig;
    (ahi, a - ahi)
}

#[inline]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let (bhi, blo) = split(b);
    two_product_presplit(a, b, bhi, blo)
}

/// `two_product` with `b` already split, for repeated scaling by the same factor.
#[inline]
pub fn two_product_presplit(a: f64, b: f64, bhi: f64, blo: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    let err1 = x - ahi * bhi;
    let err2 = err1 - alo * bhi;
    let err3 = err2 - ahi * blo;
    (x, alo * blo - err3)
}

/// Whether `two_product(a, b)`, whose rounded product is `p`, returned the
/// exact error. A NaN error from an overflowing split is not covered here;
/// callers see it in the error term.
#[inline]
pub fn product_is_exact(a: f64, b: f64, p: f64) -> bool {
    p.is_finite() && (p.abs() >= UNDERFLOW_GUARD || a == 0.0 || b == 0.0)
}
