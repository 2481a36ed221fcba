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

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::PredicateError;
use crate::numeric::eft::{EPSILON, SPLITTER};

/// Floating-point constants measured in the running environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineConstants {
    /// Largest power of two such that `1 + epsilon` rounds to 1.
    pub epsilon: f64,
    /// Dekker splitter, `2^ceil(p / 2) + 1` for a `p`-bit mantissa.
    pub splitter: f64,
}

impl MachineConstants {
    fn derive() -> Self {
        let half = 0.5;
        let mut every_other = true;
        let mut epsilon: f64 = 1.0;
        let mut splitter: f64 = 1.0;
        let mut check: f64 = 1.0;
        loop {
            let last_check = check;
            epsilon *= half;
            if every_other {
                splitter *= 2.0;
            }
            every_other = !every_other;
            check = 1.0 + epsilon;
            if check == 1.0 || check == last_check {
                break;
            }
        }
        splitter += 1.0;
        MachineConstants { epsilon, splitter }
    }
}

static CONSTANTS: Lazy<MachineConstants> = Lazy::new(|| {
    let constants = MachineConstants::derive();
    debug!(?constants, "derived floating-point constants");
    constants
});

/// Derives the machine constants once per process and checks them against
/// the IEEE-754 double constants the arithmetic is compiled with.
///
/// Safe to call any number of times from any thread.
pub fn exact_init() -> Result<MachineConstants, PredicateError> {
    let constants = *CONSTANTS;
    if constants.epsilon != EPSILON || constants.splitter != SPLITTER {
        return Err(PredicateError::Environment {
            epsilon: constants.epsilon,
            splitter: constants.splitter,
        });
    }
    Ok(constants)
}
