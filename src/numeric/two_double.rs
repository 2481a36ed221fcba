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

use crate::error::PredicateError;
use crate::numeric::expansion::Expansion;
use crate::numeric::sign::Sign;

/// An exact value carried as the nearest double plus the rounded remainder.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TwoDouble {
    pub hi: f64,
    pub lo: f64,
}

impl TwoDouble {
    pub fn new(hi: f64, lo: f64) -> Self {
        TwoDouble { hi, lo }
    }

    pub fn sign(&self) -> Sign {
        if self.hi != 0.0 {
            Sign::of(self.hi)
        } else {
            Sign::of(self.lo)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hi == 0.0 && self.lo == 0.0
    }

    pub fn to_expansion(&self) -> Result<Expansion, PredicateError> {
        Expansion::from_two_sum(self.hi, self.lo)
    }
}

/// Fraction `|tail| / (|tail| + |head|)` of the way from the tail to the
/// plane crossing, given the signed tetrahedron volumes of both segment
/// endpoints against the plane.
///
/// The quotient gets one correction step computed on expansions, so it is
/// accurate to about an ulp even when both volumes are tiny.
pub fn segment_scale(tail: TwoDouble, head: TwoDouble) -> Result<f64, PredicateError> {
    let near = tail.to_expansion()?.abs();
    let far = head.to_expansion()?.abs();
    let total = near.add(&far)?;
    let total_hi = total.nearest()?;
    if total_hi == 0.0 {
        return Ok(0.5);
    }
    let q0 = near.nearest()? / total_hi;
    let rem = near.sub(&total.scale(q0)?)?;
    let q1 = rem.estimate() / total_hi;
    Ok((q0 + q1).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_volumes_meet_halfway() {
        let s = segment_scale(TwoDouble::new(2.0, 0.0), TwoDouble::new(-2.0, 0.0)).unwrap();
        assert_eq!(s, 0.5);
    }

    #[test]
    fn scale_is_ratio_of_magnitudes() {
        let s = segment_scale(TwoDouble::new(1.0, 0.0), TwoDouble::new(-3.0, 0.0)).unwrap();
        assert_eq!(s, 0.25);
        let s = segment_scale(TwoDouble::new(-1.0, 0.0), TwoDouble::new(2.0, 0.0)).unwrap();
        assert_eq!(s, 1.0 / 3.0);
    }

    #[test]
    fn endpoint_on_plane_gives_bounds() {
        let s = segment_scale(TwoDouble::new(0.0, 0.0), TwoDouble::new(-5.0, 0.0)).unwrap();
        assert_eq!(s, 0.0);
        let s = segment_scale(TwoDouble::new(7.0, 0.0), TwoDouble::new(0.0, 0.0)).unwrap();
        assert_eq!(s, 1.0);
    }

    #[test]
    fn sign_falls_back_to_low_part() {
        assert_eq!(TwoDouble::new(0.0, -1e-300).sign(), Sign::Negative);
        assert!(TwoDouble::default().is_zero());
    }
}
