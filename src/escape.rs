// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time function at the heart of every Mandelbrot renderer.

/// The number of iterations after which a point that has not escaped
/// is treated as a member of the set.
pub const MAX_ITERATIONS: usize = 80;

/// Iterates `z = z * z + c` for the point `c = cx + cy*i`, starting
/// with `z = c` (the first step from zero is folded away), and returns
/// the 0-based index of the iteration at which `|z|^2` was found to
/// exceed 4.  Points that never escape return `MAX_ITERATIONS`.
/// The squares computed for the bailout test are reused for the next
/// step.
#[inline]
pub fn escape_count(cx: f64, cy: f64) -> usize {
    let mut real = cx;
    let mut imaginary = cy;
    for i in 0..MAX_ITERATIONS {
        let real2 = real * real;
        let imaginary2 = imaginary * imaginary;
        if real2 + imaginary2 > 4.0 {
            return i;
        }
        imaginary = 2.0 * real * imaginary + cy;
        real = real2 - imaginary2 + cx;
    }
    MAX_ITERATIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_a_member() {
        assert_eq!(escape_count(0.0, 0.0), MAX_ITERATIONS);
    }

    #[test]
    fn cardioid_and_bulb_points_are_members() {
        assert_eq!(escape_count(-0.5, 0.0), MAX_ITERATIONS);
        assert_eq!(escape_count(-1.0, 0.0), MAX_ITERATIONS);
        assert_eq!(escape_count(0.25, 0.0), MAX_ITERATIONS);
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_count(3.0, 0.0), 0);
        assert_eq!(escape_count(0.0, -2.5), 0);
        assert_eq!(escape_count(-2.1, 0.0), 0);
    }

    #[test]
    fn near_points_escape_after_a_few_steps() {
        // 1 -> 2 -> 5: |2|^2 = 4 is not past the bailout, |5|^2 is.
        assert_eq!(escape_count(1.0, 0.0), 2);
        // -2 is the tip of the set and sits exactly on the boundary.
        assert_eq!(escape_count(-2.0, 0.0), MAX_ITERATIONS);
    }

    #[test]
    fn counts_are_bounded_and_deterministic() {
        let mut y = -1.5;
        while y <= 1.5 {
            let mut x = -2.5;
            while x <= 1.5 {
                let count = escape_count(x, y);
                assert!(count <= MAX_ITERATIONS);
                assert_eq!(count, escape_count(x, y));
                x += 0.0625;
            }
            y += 0.0625;
        }
    }
}
