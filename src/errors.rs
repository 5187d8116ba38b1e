// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ways a render can fail.  Bad input never shows up here: it is
//! logged and replaced by a default before rendering starts.

use std::io;

/// Fatal errors.  None of these are retried.
#[derive(Debug, Fail)]
pub enum Error {
    /// The output file could not be created or written.
    #[fail(display = "Could not write '{}': {}", path, err)]
    Io {
        /// The file being written.
        path: String,
        /// What the operating system said.
        #[fail(cause)]
        err: io::Error,
    },

    /// A writer other than a file failed.
    #[fail(display = "Could not write bitmap: {}", _0)]
    Write(#[fail(cause)] io::Error),

    /// The operating system would not start a worker thread.
    #[fail(display = "Could not start a render worker: {}", _0)]
    Spawn(#[fail(cause)] io::Error),

    /// A worker thread panicked, so the image is incomplete.
    #[fail(display = "A render worker panicked; no image was produced")]
    WorkerPanic,

    /// Bytes handed to the header reader are not a 24-bit uncompressed
    /// bitmap.
    #[fail(display = "Not a 24-bit uncompressed bitmap: {}", _0)]
    Header(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Write(err)
    }
}

/// Result type for everything in this crate.
pub type Result<T> = ::std::result::Result<T, Error>;
