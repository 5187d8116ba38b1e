// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The background gradient painted behind the set.  It depends only
//! on where a pixel sits in the image, never on the fractal.

/// An 8-bit-per-channel color, stored in the RGB order people read.
/// The bitmap writer is responsible for turning it into BGR.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// Each ramp runs from 0.0 to 127.5 across the image, so two summed
// ramps top out at exactly 255.
const RAMP_PEAK: f32 = 127.5;

/// A ramp climbing from 0 at `position == 0` to `RAMP_PEAK` at
/// `position == extent - 1`.  A one-pixel extent has nowhere to climb
/// and stays flat at 0.
#[inline]
fn ramp(position: usize, extent: usize) -> f32 {
    if extent < 2 {
        return 0.0;
    }
    (position as f32) / (((extent - 1) as f32) / RAMP_PEAK)
}

/// Sums two ramps and truncates to a byte.  Anything past 255 wraps
/// around rather than saturating.
#[inline]
fn channel(a: f32, b: f32) -> u8 {
    (a + b) as u32 as u8
}

/// Returns the background color for pixel `(x, y)` of a `width` by
/// `height` image.  Red climbs with both `x` and `y`, green falls with
/// both, and blue climbs with `x` while falling with `y`.
pub fn gradient(x: usize, y: usize, width: usize, height: usize) -> Rgb {
    let rising_x = ramp(x, width);
    let rising_y = ramp(y, height);
    let falling_x = ramp(width.saturating_sub(x + 1), width);
    let falling_y = ramp(height.saturating_sub(y + 1), height);
    Rgb(
        channel(rising_x, rising_y),
        channel(falling_x, falling_y),
        channel(rising_x, falling_y),
    )
}
