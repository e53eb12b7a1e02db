// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::values::{TextAlign, TextDirection};

/// A partial block-level style record for one paragraph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    /// Horizontal alignment.
    pub text_align: Option<TextAlign>,
    /// Base direction.
    pub direction: Option<TextDirection>,
    /// Line height multiplier.
    pub line_height: Option<f32>,
    /// First-line indent in pixels.
    pub text_indent: Option<f32>,
}

impl ParagraphStyle {
    /// Creates an empty record with every field unset.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.text_align.is_none()
            && self.direction.is_none()
            && self.line_height.is_none()
            && self.text_indent.is_none()
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = Some(text_align);
        self
    }

    /// Sets the base direction.
    #[must_use]
    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the line height multiplier.
    #[must_use]
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Sets the first-line indent.
    #[must_use]
    pub fn with_text_indent(mut self, text_indent: f32) -> Self {
        self.text_indent = Some(text_indent);
        self
    }

    /// Merges `other` over `self`: set fields in `other` override, unset
    /// fields leave `self` untouched.
    ///
    /// Block styles use the plain merge so that later toggles win even on
    /// unrelated fields.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            text_align: other.text_align.or(self.text_align),
            direction: other.direction.or(self.direction),
            line_height: other.line_height.or(self.line_height),
            text_indent: other.text_indent.or(self.text_indent),
        }
    }

    /// Clears every field of `self` that is set in `other`.
    #[must_use]
    pub fn unmerge(&self, other: &Self) -> Self {
        Self {
            text_align: if other.text_align.is_some() {
                None
            } else {
                self.text_align
            },
            direction: if other.direction.is_some() {
                None
            } else {
                self.direction
            },
            line_height: if other.line_height.is_some() {
                None
            } else {
                self.line_height
            },
            text_indent: if other.text_indent.is_some() {
                None
            } else {
                self.text_indent
            },
        }
    }
}
