// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything a render needs to know, gathered once and then only read.
//!
//! Values arrive as strings from the command line.  None of them is
//! allowed to stop a render: anything that cannot be parsed, or is out
//! of range, is logged and replaced by its default.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use color::DEFAULT_THRESHOLD;
use escape::MAX_ITERATIONS;
use num_cpus;
use region::{Bounds, Region};

/// Image width used when none (or a bad one) is given.
pub const DEFAULT_WIDTH: usize = 1920;
/// Image height used when none (or a bad one) is given.
pub const DEFAULT_HEIGHT: usize = 1080;
/// Widths and heights must be strictly below this.
pub const MAX_DIMENSION: usize = 20_000;
/// Where the image goes when no output is named.
pub const DEFAULT_OUTPUT: &str = "mandelbrot.bmp";

/// One worker per logical CPU.
pub fn default_workers() -> usize {
    num_cpus::get()
}

/// The raw, unparsed values a user supplied.  `None` means the flag
/// was absent.
#[derive(Clone, Debug, Default)]
pub struct Arguments<'a> {
    /// `--xleft`
    pub x_left: Option<&'a str>,
    /// `--xright`
    pub x_right: Option<&'a str>,
    /// `--ylower`
    pub y_lower: Option<&'a str>,
    /// `--yupper`
    pub y_upper: Option<&'a str>,
    /// `--width`
    pub width: Option<&'a str>,
    /// `--height`
    pub height: Option<&'a str>,
    /// `--threads`
    pub threads: Option<&'a str>,
    /// `--threshold`
    pub threshold: Option<&'a str>,
    /// `--output`
    pub output: Option<&'a str>,
}

/// The immutable configuration of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels, in `1..MAX_DIMENSION`.
    pub width: usize,
    /// Image height in pixels, in `1..MAX_DIMENSION`.
    pub height: usize,
    /// The region edges the user named, if any.
    pub bounds: Bounds,
    /// How many worker threads to start.  Clamped to the row count at
    /// render time.
    pub workers: usize,
    /// Escape counts above this darken the gradient.
    pub threshold: usize,
    /// The bitmap file to write.
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl RenderConfig {
    /// A configuration for a `width` by `height` image of the default
    /// region, with every other setting at its default.
    pub fn new(width: usize, height: usize) -> RenderConfig {
        RenderConfig {
            width,
            height,
            bounds: Bounds::default(),
            workers: default_workers(),
            threshold: DEFAULT_THRESHOLD,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Parses user-supplied values, substituting defaults for anything
    /// missing or unusable.
    pub fn from_arguments(args: &Arguments) -> RenderConfig {
        RenderConfig {
            width: parse_dimension("width", args.width, DEFAULT_WIDTH),
            height: parse_dimension("height", args.height, DEFAULT_HEIGHT),
            bounds: Bounds {
                x_left: parse_bound("xleft", args.x_left),
                x_right: parse_bound("xright", args.x_right),
                y_lower: parse_bound("ylower", args.y_lower),
                y_upper: parse_bound("yupper", args.y_upper),
            },
            workers: parse_workers(args.threads),
            threshold: parse_threshold(args.threshold),
            output: PathBuf::from(args.output.unwrap_or(DEFAULT_OUTPUT)),
        }
    }

    /// The region to render, resolved from `bounds` and the image's
    /// aspect ratio.
    pub fn region(&self) -> Region {
        self.bounds.resolve(self.width, self.height)
    }
}

/// Parses `value`, or logs a warning and returns `default` if it will
/// not parse.  An absent value quietly becomes `default`.
pub fn parse_or<T>(name: &str, value: Option<&str>, default: T) -> T
where
    T: FromStr + Display,
{
    match value {
        None => default,
        Some(s) => match T::from_str(s.trim()) {
            Ok(v) => v,
            Err(_) => {
                warn!("Could not parse {} '{}', using {}", name, s, default);
                default
            }
        },
    }
}

/// A region edge.  Unparsable or non-finite values count as unspecified.
pub fn parse_bound(name: &str, value: Option<&str>) -> Option<f64> {
    let s = value?;
    match f64::from_str(s.trim()) {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("Could not use {} '{}' as a region edge, ignoring it", name, s);
            None
        }
    }
}

/// An image dimension, which must lie strictly between 0 and
/// `MAX_DIMENSION`.
pub fn parse_dimension(name: &str, value: Option<&str>, default: usize) -> usize {
    let v = parse_or(name, value, default);
    if v == 0 || v >= MAX_DIMENSION {
        warn!(
            "{} {} is outside (0, {}), using {}",
            name, v, MAX_DIMENSION, default
        );
        return default;
    }
    v
}

/// The worker count.  Zero is not a useful number of workers.
pub fn parse_workers(value: Option<&str>) -> usize {
    let default = default_workers();
    let v = parse_or("threads", value, default);
    if v == 0 {
        warn!("0 threads requested, using {}", default);
        return default;
    }
    v
}

/// The darkening threshold, which must leave room below
/// `MAX_ITERATIONS`.
pub fn parse_threshold(value: Option<&str>) -> usize {
    let v = parse_or("threshold", value, DEFAULT_THRESHOLD);
    if v >= MAX_ITERATIONS {
        warn!(
            "threshold {} would leave nothing to darken, using {}",
            v, DEFAULT_THRESHOLD
        );
        return DEFAULT_THRESHOLD;
    }
    v
}
