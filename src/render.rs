// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The multi-threaded renderer.
//!
//! The pixel buffer is allocated once, already laid out as the rows of
//! the bitmap file (bottom row first, each row padded to four bytes).
//! It is then cut into one band of whole rows per worker with
//! `split_at_mut`, so every worker owns a mutable slice no other worker
//! can see.  The workers run inside a crossbeam scope; when the scope
//! ends every worker has been joined and the buffer belongs to the
//! caller again.

extern crate crossbeam;

use bitmap::{row_padding, row_stride, Bitmap};
use color::Compositor;
use config::RenderConfig;
use errors::{Error, Result};
use escape::escape_count;
use gradient::{gradient, Rgb};
use partition::{partition, WorkAssignment};
use planes::{IntegralPlane, Pixel, PlaneMapper};
use region::Region;

/// The zero-filled buffer the workers paint into.
#[derive(Debug)]
pub struct RenderTarget {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RenderTarget {
    /// A blank `width` by `height` image.
    pub fn new(width: usize, height: usize) -> RenderTarget {
        RenderTarget {
            width,
            height,
            pixels: vec![0u8; row_stride(width) * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Zero bytes at the end of every row.
    pub fn row_padding(&self) -> usize {
        row_padding(self.width)
    }

    /// Bytes per row, padding included.
    pub fn stride(&self) -> usize {
        row_stride(self.width)
    }

    /// The raw rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The color stored for one pixel.
    pub fn pixel(&self, pixel: &Pixel) -> Rgb {
        let offset = pixel.1 * self.stride() + pixel.0 * 3;
        Rgb(
            self.pixels[offset + 2],
            self.pixels[offset + 1],
            self.pixels[offset],
        )
    }

    /// Cuts the buffer into one mutable slice per assignment.  The
    /// assignments must tile the rows in order, as `partition` returns
    /// them.
    pub(crate) fn bands(&mut self, assignments: &[WorkAssignment]) -> Vec<(WorkAssignment, &mut [u8])> {
        let stride = self.stride();
        let mut rest: &mut [u8] = &mut self.pixels;
        let mut bands = Vec::with_capacity(assignments.len());
        let mut next_row = 0;
        for assignment in assignments {
            debug_assert_eq!(assignment.start_row, next_row);
            let (band, tail) = { rest }.split_at_mut(assignment.row_count * stride);
            bands.push((*assignment, band));
            rest = tail;
            next_row += assignment.row_count;
        }
        bands
    }

    /// Hands the finished rows to the bitmap writer.
    pub fn into_bitmap(self) -> Bitmap {
        Bitmap::from_rows(self.width, self.height, self.pixels)
    }
}

/// Knows how to color any pixel of the image.  Shared, read-only, by
/// every worker.
#[derive(Debug, Clone)]
pub struct Renderer {
    plane: PlaneMapper,
    compositor: Compositor,
}

impl Renderer {
    /// A renderer for `region` on a `width` by `height` grid.
    pub fn new(width: usize, height: usize, region: Region, compositor: Compositor) -> Renderer {
        Renderer {
            plane: PlaneMapper::new(width, height, region),
            compositor,
        }
    }

    /// A renderer for the image a configuration describes.
    pub fn from_config(config: &RenderConfig) -> Renderer {
        Renderer::new(
            config.width,
            config.height,
            config.region(),
            Compositor::new(config.threshold),
        )
    }

    /// The pixel-to-plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Computes the final color of one pixel.
    #[inline]
    pub fn pixel_color(&self, pixel: &Pixel) -> Rgb {
        let IntegralPlane(width, height) = self.plane.integral_plane;
        let c = self.plane.pixel_to_point(pixel);
        let count = escape_count(c.re, c.im);
        self.compositor
            .composite(count, gradient(pixel.0, pixel.1, width, height))
    }

    /// Paints the rows of `band` into `rows`, which holds exactly those
    /// rows.  Padding bytes are left alone.
    fn render_band(&self, band: WorkAssignment, rows: &mut [u8]) {
        let width = self.plane.integral_plane.0;
        let stride = row_stride(width);
        for (i, line) in rows.chunks_mut(stride).enumerate() {
            let row = band.start_row + i;
            for (column, bgr) in line[..width * 3].chunks_mut(3).enumerate() {
                let Rgb(r, g, b) = self.pixel_color(&Pixel(column, row));
                bgr[0] = b;
                bgr[1] = g;
                bgr[2] = r;
            }
        }
    }

    /// Renders the whole image on the calling thread.
    pub fn render_single(&self) -> RenderTarget {
        let IntegralPlane(width, height) = self.plane.integral_plane;
        let mut target = RenderTarget::new(width, height);
        if width > 0 {
            let whole = WorkAssignment {
                start_row: 0,
                row_count: height,
            };
            self.render_band(whole, &mut target.pixels);
        }
        target
    }

    /// Renders the image with up to `workers` threads, one band of rows
    /// each.  Returns once every worker has finished.
    pub fn render(&self, workers: usize) -> Result<RenderTarget> {
        let IntegralPlane(width, height) = self.plane.integral_plane;
        let mut target = RenderTarget::new(width, height);
        if width == 0 {
            return Ok(target);
        }
        let assignments = partition(height, workers);
        info!(
            "Rendering {}x{} over {} with {} workers",
            width,
            height,
            self.plane.region,
            assignments.len()
        );
        {
            let bands = target.bands(&assignments);
            let spawned = crossbeam::scope(|spawner| -> Result<()> {
                for (i, (band, rows)) in bands.into_iter().enumerate() {
                    debug!("Worker {} takes rows {:?}", i, band.rows());
                    spawner
                        .builder()
                        .name(format!("band-{}", i))
                        .spawn(move |_| self.render_band(band, rows))
                        .map_err(Error::Spawn)?;
                }
                Ok(())
            });
            match spawned {
                Ok(result) => result?,
                Err(_) => return Err(Error::WorkerPanic),
            }
        }
        Ok(target)
    }
}

/// Resolves the region, renders with the configured number of workers,
/// and returns the finished bitmap.
pub fn render(config: &RenderConfig) -> Result<Bitmap> {
    let renderer = Renderer::from_config(config);
    let target = renderer.render(config.workers)?;
    Ok(target.into_bitmap())
}

/// Renders the configured image and writes it to the configured file.
pub fn run(config: &RenderConfig) -> Result<()> {
    render(config)?.save(&config.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::MAX_ITERATIONS;

    fn renderer(width: usize, height: usize) -> Renderer {
        Renderer::new(
            width,
            height,
            Region::default_for(width, height),
            Compositor::default(),
        )
    }

    #[test]
    fn target_is_zero_filled_and_padded() {
        let target = RenderTarget::new(5, 3);
        assert_eq!(target.row_padding(), 1);
        assert_eq!(target.stride(), 16);
        assert_eq!(target.pixels().len(), 48);
        assert!(target.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn bands_are_disjoint_and_cover_the_buffer() {
        let mut target = RenderTarget::new(5, 10);
        let assignments = partition(10, 3);
        let total: usize = target.bands(&assignments).iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, 160);
        let lens: Vec<usize> = target
            .bands(&assignments)
            .iter()
            .map(|(_, b)| b.len())
            .collect();
        assert_eq!(lens, vec![48, 48, 64]);
    }

    #[test]
    fn each_worker_writes_only_its_rows() {
        // Mark every byte with the band that owns it and check the
        // marks land exactly where the assignments say they should.
        let mut target = RenderTarget::new(7, 23);
        let assignments = partition(23, 4);
        for (i, (_, rows)) in target.bands(&assignments).into_iter().enumerate() {
            for byte in rows.iter_mut() {
                *byte = i as u8 + 1;
            }
        }
        let stride = target.stride();
        for (i, a) in assignments.iter().enumerate() {
            for row in a.rows() {
                let line = &target.pixels()[row * stride..(row + 1) * stride];
                assert!(line.iter().all(|&b| b == i as u8 + 1));
            }
        }
    }

    #[test]
    fn threaded_render_matches_single_threaded() {
        let r = renderer(61, 37);
        let single = r.render_single();
        for &workers in &[1, 2, 5, 36, 37, 54, 200] {
            let threaded = r.render(workers).unwrap();
            assert_eq!(threaded.pixels(), single.pixels(), "{} workers", workers);
        }
    }

    #[test]
    fn padding_stays_zero() {
        let target = renderer(5, 9).render(4).unwrap();
        for line in target.pixels().chunks(target.stride()) {
            assert_eq!(line[15], 0);
        }
    }

    #[test]
    fn set_members_are_darkened_gradient() {
        let r = renderer(64, 48);
        let target = r.render(3).unwrap();
        let origin = r
            .plane()
            .point_to_pixel(&::num::Complex::new(0.0, 0.0))
            .unwrap();
        let c = r.plane().pixel_to_point(&origin);
        assert_eq!(escape_count(c.re, c.im), MAX_ITERATIONS);
        let expected = Compositor::default().composite(MAX_ITERATIONS, gradient(origin.0, origin.1, 64, 48));
        assert_eq!(target.pixel(&origin), expected);
    }

    #[test]
    fn corners_outside_the_set_show_the_gradient() {
        let r = renderer(64, 48);
        let target = r.render(2).unwrap();
        assert_eq!(target.pixel(&Pixel(0, 0)), gradient(0, 0, 64, 48));
        assert_eq!(target.pixel(&Pixel(63, 47)), gradient(63, 47, 64, 48));
    }

    #[test]
    fn one_row_image_renders() {
        let target = renderer(4, 1).render(54).unwrap();
        assert_eq!(target.pixels().len(), 12);
    }
}
