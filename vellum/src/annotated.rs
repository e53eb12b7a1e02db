// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flattened styled-text value produced from a document.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use span_style::{ParagraphStyle, SpanStyle};

use crate::decoration::RichTextConfig;
use crate::document::RichDocument;
use crate::span::SpanId;

/// One maximal run of text sharing a single resolved character style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRun {
    /// Byte range of the run within the flattened text.
    pub range: Range<usize>,
    /// The fully resolved style, decoration contributions included.
    pub style: SpanStyle,
}

/// One paragraph of the flattened text with its block style.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphRun {
    /// Byte range of the paragraph within the flattened text.
    pub range: Range<usize>,
    /// The paragraph's block style.
    pub style: ParagraphStyle,
}

/// An immutable flattening of a [`RichDocument`]: the full text plus resolved,
/// coalesced style runs and per-paragraph block styles.
///
/// Each span's style is resolved against its ancestor chain before emission,
/// and a decorated span's style contribution is merged over the resolved
/// style. Adjacent runs with equal resolved styles coalesce, so consumers see
/// maximal runs regardless of how the tree is fragmented.
///
/// Run ranges are contiguous, non-overlapping, ascending and cover the text
/// exactly. Byte offsets into the flattened text and into the editor's raw
/// buffer coincide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotatedText {
    text: String,
    runs: Vec<StyleRun>,
    paragraphs: Vec<ParagraphRun>,
}

impl AnnotatedText {
    /// Flattens a document.
    pub fn from_document(doc: &RichDocument, config: &RichTextConfig) -> Self {
        let mut builder = Flattener {
            doc,
            config,
            out: Self::default(),
        };
        for paragraph in doc.paragraphs() {
            let start = builder.out.text.len();
            for &root in paragraph.children() {
                builder.emit(root, &SpanStyle::new());
            }
            builder.out.paragraphs.push(ParagraphRun {
                range: start..builder.out.text.len(),
                style: paragraph.style().clone(),
            });
        }
        builder.out
    }

    /// The flattened text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The coalesced style runs, in text order.
    #[inline]
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// The paragraph runs, in text order.
    #[inline]
    pub fn paragraph_runs(&self) -> &[ParagraphRun] {
        &self.paragraphs
    }

    /// The text length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The resolved style covering `index`, if any run contains it.
    pub fn style_at(&self, index: usize) -> Option<&SpanStyle> {
        self.runs
            .iter()
            .find(|run| run.range.contains(&index))
            .map(|run| &run.style)
    }
}

struct Flattener<'a> {
    doc: &'a RichDocument,
    config: &'a RichTextConfig,
    out: AnnotatedText,
}

impl Flattener<'_> {
    fn emit(&mut self, id: SpanId, inherited: &SpanStyle) {
        let node = self.doc.span(id);
        let mut resolved = inherited.custom_merge(node.style());
        if let Some(decoration) = node.decoration() {
            resolved = resolved.custom_merge(&decoration.style_contribution(self.config));
        }

        if !node.text().is_empty() {
            let start = self.out.text.len();
            self.out.text.push_str(node.text());
            // Coalesce with the previous run when the style carries over.
            match self.out.runs.last_mut() {
                Some(last) if last.range.end == start && last.style == resolved => {
                    last.range.end = self.out.text.len();
                }
                _ => self.out.runs.push(StyleRun {
                    range: start..self.out.text.len(),
                    style: resolved.clone(),
                }),
            }
        }

        for &child in node.children() {
            self.emit(child, &resolved);
        }
    }
}
