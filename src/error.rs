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

use thiserror::Error;

/// Failures surfaced by the predicates.
///
/// Degenerate geometry is never an error: inconclusive interval results and
/// exact zeros are resolved by escalation. What remains are sizing bugs,
/// environment problems and non-finite input.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PredicateError {
    /// An expansion operation would need more components than the fixed buffer holds.
    #[error("expansion needs {required} components but capacity is {capacity}")]
    CapacityOverflow {
        /// Components the operation would have produced.
        required: usize,
        /// Fixed component capacity.
        capacity: usize,
    },

    /// An expansion operation overflowed, or formed a product small enough
    /// for gradual underflow to round it. Exact callers fall back to
    /// arbitrary-precision rationals when they see this.
    #[error("expansion {operation} left the exactly representable range")]
    ExponentRange {
        /// The expansion operation that gave up.
        operation: &'static str,
    },

    /// The floating-point environment does not behave like round-to-nearest IEEE-754 doubles.
    #[error("unexpected floating-point environment: epsilon {epsilon:e}, splitter {splitter}")]
    Environment {
        /// Machine epsilon derived at runtime.
        epsilon: f64,
        /// Dekker splitter derived at runtime.
        splitter: f64,
    },

    /// A coordinate handed to a predicate is NaN or infinite.
    #[error("non-finite coordinate {value} at index {index}")]
    NonFiniteCoordinate {
        /// Flattened coordinate index within the call's inputs.
        index: usize,
        /// The offending value.
        value: f64,
    },
}
