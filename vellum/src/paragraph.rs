// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use span_style::ParagraphStyle;

use crate::span::SpanId;

/// One paragraph: an ordered list of root spans plus a block style.
///
/// A paragraph with no text content is legal and stays in the document until
/// a cross-paragraph deletion merges it away.
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    pub(crate) children: Vec<SpanId>,
    pub(crate) style: ParagraphStyle,
}

impl Paragraph {
    pub(crate) fn new(style: ParagraphStyle) -> Self {
        Self {
            children: Vec::new(),
            style,
        }
    }

    /// The ordered root spans of this paragraph.
    #[inline]
    pub fn children(&self) -> &[SpanId] {
        &self.children
    }

    /// The paragraph's block style.
    #[inline]
    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }
}
