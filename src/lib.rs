#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot bitmap renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which repeatedly squaring `z` and adding `c` never runs off to
//! infinity.  This crate counts, for every pixel of an image, how many
//! iterations its point survives, and uses that count to darken a
//! colored background gradient: points that escape quickly show the
//! gradient untouched, points that linger or never leave show it
//! dimmed, and the silhouette of the set appears.
//!
//! Rows of the image are divided into bands, one per worker thread.
//! Each worker owns its band of the output buffer outright, so no
//! locking is needed, and the finished buffer is written out as an
//! uncompressed 24-bit Windows bitmap.

extern crate crossbeam;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod bitmap;
pub mod color;
pub mod config;
pub mod errors;
pub mod escape;
pub mod gradient;
pub mod partition;
pub mod planes;
pub mod region;
pub mod render;

pub use bitmap::{Bitmap, BitmapHeader};
pub use config::RenderConfig;
pub use errors::{Error, Result};
pub use region::{Bounds, Region};
pub use render::{render, run, Renderer};
