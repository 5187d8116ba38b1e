// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the rows of an image into contiguous bands, one per worker.

use std::ops::Range;

/// A contiguous band of rows handed to one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkAssignment {
    /// The first row of the band.
    pub start_row: usize,
    /// How many rows the band holds.  Never zero.
    pub row_count: usize,
}

impl WorkAssignment {
    /// The rows covered, as a half-open range.
    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.start_row + self.row_count
    }
}

/// Divides `height` rows among `workers` workers.  Every worker but the
/// last receives `height / workers` rows; the last absorbs whatever the
/// integer division left over.  The worker count is clamped to
/// `1..=height` so that no band is ever empty, and an image with no
/// rows gets no bands at all.
pub fn partition(height: usize, workers: usize) -> Vec<WorkAssignment> {
    if height == 0 {
        return vec![];
    }
    let workers = workers.max(1).min(height);
    let per_worker = height / workers;
    let last = height - per_worker * (workers - 1);
    (0..workers)
        .map(|i| WorkAssignment {
            start_row: i * per_worker,
            row_count: if i + 1 == workers { last } else { per_worker },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Walks the bands in order and checks they tile [0, height) exactly.
    fn assert_exact_cover(height: usize, bands: &[WorkAssignment]) {
        let mut next = 0;
        for band in bands {
            assert_eq!(band.start_row, next, "gap or overlap at row {}", next);
            assert!(band.row_count > 0);
            next += band.row_count;
        }
        assert_eq!(next, height);
    }

    #[test]
    fn original_fixed_pool_on_1080_rows() {
        let bands = partition(1080, 54);
        assert_eq!(bands.len(), 54);
        assert!(bands.iter().all(|b| b.row_count == 20));
        assert_exact_cover(1080, &bands);
    }

    #[test]
    fn last_worker_absorbs_the_remainder() {
        let bands = partition(10, 3);
        assert_eq!(
            bands,
            vec![
                WorkAssignment { start_row: 0, row_count: 3 },
                WorkAssignment { start_row: 3, row_count: 3 },
                WorkAssignment { start_row: 6, row_count: 4 },
            ]
        );
    }

    #[test]
    fn more_workers_than_rows_is_clamped() {
        let bands = partition(5, 54);
        assert_eq!(bands.len(), 5);
        assert!(bands.iter().all(|b| b.row_count == 1));
        assert_exact_cover(5, &bands);
    }

    #[test]
    fn zero_workers_means_one() {
        assert_eq!(partition(7, 0), vec![WorkAssignment { start_row: 0, row_count: 7 }]);
    }

    #[test]
    fn empty_image_has_no_bands() {
        assert!(partition(0, 8).is_empty());
    }

    #[test]
    fn every_height_and_worker_count_is_covered_exactly() {
        for height in 1..200 {
            for workers in 1..70 {
                let bands = partition(height, workers);
                assert_eq!(bands.len(), workers.min(height));
                assert_exact_cover(height, &bands);
            }
        }
    }

    #[test]
    fn rows_range_matches_band() {
        let band = WorkAssignment { start_row: 4, row_count: 3 };
        assert_eq!(band.rows(), 4..7);
    }
}
