// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A text selection: an anchor and a focus byte offset.
///
/// The anchor is where the selection started; the focus is the end the caret
/// moves. `focus < anchor` is a legal "backward" selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    anchor: usize,
    focus: usize,
}

impl Selection {
    /// Creates a selection from anchor and focus offsets.
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// Creates a collapsed selection (a caret) at `index`.
    pub fn collapsed(index: usize) -> Self {
        Self {
            anchor: index,
            focus: index,
        }
    }

    /// The anchor offset.
    #[inline]
    pub fn anchor(self) -> usize {
        self.anchor
    }

    /// The focus offset.
    #[inline]
    pub fn focus(self) -> usize {
        self.focus
    }

    /// The smaller of anchor and focus.
    #[inline]
    pub fn min(self) -> usize {
        self.anchor.min(self.focus)
    }

    /// The larger of anchor and focus.
    #[inline]
    pub fn max(self) -> usize {
        self.anchor.max(self.focus)
    }

    /// Returns `true` if anchor and focus coincide.
    #[inline]
    pub fn is_collapsed(self) -> bool {
        self.anchor == self.focus
    }
}
