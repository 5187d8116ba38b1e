// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Composites the escape count over the background gradient.

use escape::MAX_ITERATIONS;
use gradient::Rgb;
use num::clamp;

/// Escape counts above this are drawn as part of the silhouette.
pub const DEFAULT_THRESHOLD: usize = 4;

/// Decides, per pixel, whether the gradient is shown as-is or darkened
/// by how long the point took to escape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Compositor {
    threshold: usize,
}

impl Default for Compositor {
    fn default() -> Self {
        Compositor {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Compositor {
    /// A compositor darkening every pixel whose count exceeds `threshold`.
    pub fn new(threshold: usize) -> Self {
        Compositor { threshold }
    }

    /// The escape count above which pixels are darkened.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The brightness multiplier for a point that escaped after `count`
    /// iterations: 1.0 for a count of 5, falling linearly to 5/80 for
    /// set members.  The result is clamped to `[0, 1]`, so thresholds
    /// below 4 cannot brighten the gradient past its own value.
    pub fn brightness(count: usize) -> f32 {
        let max = MAX_ITERATIONS as f32;
        clamp((max - (count as f32 - 5.0)) / max, 0.0, 1.0)
    }

    /// Returns the final color for a pixel whose background is
    /// `background` and whose point escaped after `count` iterations.
    pub fn composite(&self, count: usize, background: Rgb) -> Rgb {
        if count <= self.threshold {
            return background;
        }
        let factor = Compositor::brightness(count);
        let Rgb(r, g, b) = background;
        Rgb(
            (factor * f32::from(r)) as u8,
            (factor * f32::from(g)) as u8,
            (factor * f32::from(b)) as u8,
        )
    }
}
