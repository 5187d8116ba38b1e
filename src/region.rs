// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rectangle of the complex plane being rendered, and the rules
//! for filling in whatever corners the user left out.
//!
//! A user may name any of the four edges of the region.  Three edges
//! are enough: the missing one is derived from the image's aspect
//! ratio so that pixels stay square.  Four edges are taken as given,
//! even if that stretches the picture.  Anything less than three is
//! ambiguous, and the whole input is thrown away in favor of a default
//! view of the entire set.

use std::fmt;

/// The left edge of the default view.
pub const DEFAULT_X_MIN: f64 = -2.4;
/// The right edge of the default view.
pub const DEFAULT_X_MAX: f64 = 1.4;

/// A fully-specified rectangle on the complex plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Real part of the left edge.
    pub x_min: f64,
    /// Real part of the right edge.
    pub x_max: f64,
    /// Imaginary part of the lower edge.
    pub y_min: f64,
    /// Imaginary part of the upper edge.
    pub y_max: f64,
}

impl Region {
    /// Returns a region if every edge is finite and the rectangle has
    /// positive width and height.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Option<Region> {
        let finite = x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        if !finite || x_max <= x_min || y_max <= y_min {
            return None;
        }
        Some(Region {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// The default view: `x` from -2.4 to 1.4, with a vertical span
    /// matching the image's aspect ratio and centered on the real axis.
    pub fn default_for(width: usize, height: usize) -> Region {
        let span = (DEFAULT_X_MAX - DEFAULT_X_MIN) * aspect(width, height);
        Region {
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            y_min: -span / 2.0,
            y_max: span / 2.0,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]i",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

// height / width, guarding against an empty image.
fn aspect(width: usize, height: usize) -> f64 {
    (height.max(1) as f64) / (width.max(1) as f64)
}

/// The edges as the user gave them.  Any of them may be missing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// `--xleft`
    pub x_left: Option<f64>,
    /// `--xright`
    pub x_right: Option<f64>,
    /// `--ylower`
    pub y_lower: Option<f64>,
    /// `--yupper`
    pub y_upper: Option<f64>,
}

impl Bounds {
    /// All four edges, specified.
    pub fn new(x_left: f64, x_right: f64, y_lower: f64, y_upper: f64) -> Bounds {
        Bounds {
            x_left: Some(x_left),
            x_right: Some(x_right),
            y_lower: Some(y_lower),
            y_upper: Some(y_upper),
        }
    }

    /// How many edges were given.
    pub fn specified(&self) -> usize {
        [self.x_left, self.x_right, self.y_lower, self.y_upper]
            .iter()
            .filter(|b| b.is_some())
            .count()
    }

    /// Fills in a single missing edge from the other three, keeping the
    /// region's aspect ratio equal to the image's.  Any other shape of
    /// input is returned unchanged.
    fn complete(&self, width: usize, height: usize) -> Bounds {
        let aspect = aspect(width, height);
        let mut bounds = *self;
        match (self.x_left, self.x_right, self.y_lower, self.y_upper) {
            (Some(left), Some(right), Some(lower), None) => {
                bounds.y_upper = Some(lower + (right - left) * aspect);
            }
            (Some(left), Some(right), None, Some(upper)) => {
                bounds.y_lower = Some(upper - (right - left) * aspect);
            }
            (Some(left), None, Some(lower), Some(upper)) => {
                bounds.x_right = Some(left + (upper - lower) / aspect);
            }
            (None, Some(right), Some(lower), Some(upper)) => {
                bounds.x_left = Some(right - (upper - lower) / aspect);
            }
            _ => {}
        }
        bounds
    }

    /// Resolves these bounds into a region for a `width` by `height`
    /// image.  Falls back to `Region::default_for` when fewer than three
    /// edges are known, or when the edges describe an empty or
    /// inverted rectangle.
    pub fn resolve(&self, width: usize, height: usize) -> Region {
        let fallback = Region::default_for(width, height);
        let bounds = self.complete(width, height);
        match (bounds.x_left, bounds.x_right, bounds.y_lower, bounds.y_upper) {
            (Some(left), Some(right), Some(lower), Some(upper)) => {
                match Region::new(left, right, lower, upper) {
                    Some(region) => {
                        if self.specified() == 4 {
                            debug!("Using region {} as given", region);
                        } else {
                            debug!("Derived region {} from {} edges", region, self.specified());
                        }
                        region
                    }
                    None => {
                        warn!(
                            "Region [{}, {}] x [{}, {}]i is empty or inverted, using default {}",
                            left, right, lower, upper, fallback
                        );
                        fallback
                    }
                }
            }
            _ => {
                warn!(
                    "{} of 4 region edges given, which is ambiguous; ignoring them and using default {}",
                    self.specified(),
                    fallback
                );
                fallback
            }
        }
    }
}
