// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane described by a resolved
//! `Region`.
use num::Complex;
use region::Region;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel.  Row 0 is the first row stored
/// in the bitmap, which is the bottom row of the picture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points on the complex plane by linear interpolation.
/// Column 0 lands on `x_min` and row 0 on `y_min`; the far edges
/// `x_max`, `y_max` are one step past the last pixel.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The size of the pixel grid.
    pub integral_plane: IntegralPlane,
    /// The resolved region of the complex plane.
    pub region: Region,
    // Width and height of one pixel in complex units.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Takes the size of the pixel grid and the region it covers.
    pub fn new(width: usize, height: usize, region: Region) -> PlaneMapper {
        let steps = (
            (region.x_max - region.x_min) / (width.max(1) as f64),
            (region.y_max - region.y_min) / (height.max(1) as f64),
        );
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            region,
            steps,
        }
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane at its lower-left corner.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.region.x_min + (pixel.0 as f64) * self.steps.0,
            self.region.y_min + (pixel.1 as f64) * self.steps.1,
        )
    }

    /// Given a point on the complex plane, return the pixel that covers
    /// it, or `None` if it falls outside the region.
    #[cfg(test)]
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let left = ((point.re - self.region.x_min) / self.steps.0).floor();
        let top = ((point.im - self.region.y_min) / self.steps.1).floor();
        if left < 0.0
            || top < 0.0
            || left >= (self.integral_plane.0 as f64)
            || top >= (self.integral_plane.1 as f64)
        {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}
