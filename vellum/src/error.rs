// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Error for range-validated document operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the attempted range and the
/// text length at the time of failure. The edit reconciler itself never
/// returns errors: malformed lookups degrade to silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, range: &Range<usize>, len: usize) -> Self {
        Self {
            kind,
            start: range.start,
            end: range.end,
            len,
        }
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the range provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index of the range provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the document text at the time of the error.
    pub fn text_len(&self) -> usize {
        self.len
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}", self.start, self.end)
            }
            ErrorKind::NotOnCharBoundary => write!(
                f,
                "range {}..{} not on UTF-8 boundary",
                self.start, self.end
            ),
            ErrorKind::CrossesSpanBoundary => write!(
                f,
                "range {}..{} crosses a span boundary",
                self.start, self.end
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Provided range indices were out of bounds relative to the text length.
    InvalidBounds,

    /// The provided range was empty or had `start > end`.
    InvalidRange,

    /// Either `start` or `end` was not aligned to a UTF-8 character boundary.
    NotOnCharBoundary,

    /// The range straddles more than one span's own text.
    CrossesSpanBoundary,
}
