// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use span_style::{ParagraphStyle, SpanStyle};

use crate::decoration::SpanDecoration;
use crate::error::{Error, ErrorKind};
use crate::paragraph::Paragraph;
use crate::span::{SpanArena, SpanId, SpanNode};

/// The result of a text-index lookup: the deepest span whose own-text region
/// contains the probed index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanHit {
    /// Index of the containing paragraph.
    pub paragraph: usize,
    /// The hit span.
    pub span: SpanId,
    /// Absolute byte offset of the start of the span's own text.
    pub text_start: usize,
}

/// An ordered sequence of paragraphs over a shared span arena.
///
/// The sequence is never empty: a fresh document holds one empty paragraph,
/// and deletions merge paragraphs rather than leaving zero behind.
#[derive(Clone, Debug)]
pub struct RichDocument {
    pub(crate) arena: SpanArena,
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    /// Creates a document with a single empty paragraph.
    pub fn new() -> Self {
        Self {
            arena: SpanArena::default(),
            paragraphs: alloc::vec![Paragraph::default()],
        }
    }

    /// The paragraphs, in document order.
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Borrows a span node.
    #[inline]
    pub fn span(&self, id: SpanId) -> &SpanNode {
        &self.arena[id]
    }

    /// Resolves a span's full style by merging ancestor styles closest-first:
    /// the span's own fields win over its parent's, and so on up the chain.
    pub fn full_style(&self, id: SpanId) -> SpanStyle {
        let node = &self.arena[id];
        let base = match node.parent {
            Some(parent) => self.full_style(parent),
            None => SpanStyle::new(),
        };
        base.custom_merge(&node.style)
    }

    /// The flattened text length of a span's subtree, in bytes.
    pub fn subtree_len(&self, id: SpanId) -> usize {
        let node = &self.arena[id];
        let mut len = node.text.len();
        for &child in &node.children {
            len += self.subtree_len(child);
        }
        len
    }

    /// The flattened text length of one paragraph, in bytes.
    pub fn paragraph_len(&self, paragraph: usize) -> usize {
        self.paragraphs[paragraph]
            .children
            .iter()
            .map(|&id| self.subtree_len(id))
            .sum()
    }

    /// The absolute byte offset at which a paragraph's text begins.
    ///
    /// Paragraph texts are concatenated without separator bytes, so the
    /// flattened length always equals the raw text length.
    pub fn paragraph_offset(&self, paragraph: usize) -> usize {
        (0..paragraph).map(|p| self.paragraph_len(p)).sum()
    }

    /// The flattened text of one paragraph.
    pub fn paragraph_text(&self, paragraph: usize) -> String {
        let mut out = String::new();
        for &id in &self.paragraphs[paragraph].children {
            self.append_subtree_text(id, &mut out);
        }
        out
    }

    fn append_subtree_text(&self, id: SpanId, out: &mut String) {
        let node = &self.arena[id];
        out.push_str(&node.text);
        for &child in &node.children {
            self.append_subtree_text(child, out);
        }
    }

    /// The flattened text of the whole document.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for p in 0..self.paragraphs.len() {
            for &id in &self.paragraphs[p].children {
                self.append_subtree_text(id, &mut out);
            }
        }
        out
    }

    /// The flattened text length of the whole document, in bytes.
    pub fn len(&self) -> usize {
        (0..self.paragraphs.len())
            .map(|p| self.paragraph_len(p))
            .sum()
    }

    /// Returns `true` if the document holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the deepest span whose own-text region contains `index`, or
    /// `None` if `index` is out of bounds (including the empty document).
    ///
    /// This is a linear scan over the span tree; edits are local, so the probe
    /// count stays small in practice.
    pub fn find_span_at(&self, index: usize) -> Option<SpanHit> {
        let mut offset = 0;
        for (p, paragraph) in self.paragraphs.iter().enumerate() {
            for &id in &paragraph.children {
                if let Some((span, text_start)) = self.scan_span(id, &mut offset, index) {
                    return Some(SpanHit {
                        paragraph: p,
                        span,
                        text_start,
                    });
                }
            }
        }
        None
    }

    fn scan_span(&self, id: SpanId, offset: &mut usize, index: usize) -> Option<(SpanId, usize)> {
        let node = &self.arena[id];
        let start = *offset;
        let own_end = start + node.text.len();
        if index >= start && index < own_end {
            return Some((id, start));
        }
        *offset = own_end;
        for &child in &node.children {
            if let Some(hit) = self.scan_span(child, offset, index) {
                return Some(hit);
            }
        }
        None
    }

    /// Returns the index of the paragraph containing `index`, if any.
    pub fn paragraph_at(&self, index: usize) -> Option<usize> {
        let mut offset = 0;
        for p in 0..self.paragraphs.len() {
            let end = offset + self.paragraph_len(p);
            if index >= offset && index < end {
                return Some(p);
            }
            offset = end;
        }
        None
    }

    /// Recomputes every span's paragraph-relative subtree range in one DFS
    /// pass. Every structural mutation runs this before observers read, so
    /// stored ranges are always contiguous, non-overlapping and ascending.
    pub(crate) fn reindex(&mut self) {
        for p in 0..self.paragraphs.len() {
            let mut cursor = 0;
            let roots = self.paragraphs[p].children.clone();
            for id in roots {
                self.assign_ranges(id, &mut cursor);
            }
        }
    }

    fn assign_ranges(&mut self, id: SpanId, cursor: &mut usize) {
        let start = *cursor;
        *cursor += self.arena[id].text.len();
        let children = self.arena[id].children.clone();
        for child in children {
            self.assign_ranges(child, cursor);
        }
        self.arena[id].range = start..*cursor;
    }

    /// Removes a paragraph-relative byte range from one paragraph.
    ///
    /// Intersecting spans have their own text trimmed; spans whose whole
    /// subtree range falls inside the removed range are freed, subtree and
    /// all. Relies on ranges being current (see [`reindex`](Self::reindex)).
    pub(crate) fn remove_range_in_paragraph(&mut self, paragraph: usize, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let roots = self.paragraphs[paragraph].children.clone();
        let kept = self.remove_range_in_list(roots, &range);
        self.paragraphs[paragraph].children = kept;
    }

    fn remove_range_in_list(&mut self, ids: Vec<SpanId>, range: &Range<usize>) -> Vec<SpanId> {
        let mut kept = Vec::with_capacity(ids.len());
        for id in ids {
            if self.remove_range_in_span(id, range) {
                self.arena.free(id);
            } else {
                kept.push(id);
            }
        }
        kept
    }

    /// Returns `true` if the span's entire subtree was consumed by the range
    /// (the caller unlinks and frees it).
    fn remove_range_in_span(&mut self, id: SpanId, range: &Range<usize>) -> bool {
        let subtree = self.arena[id].range.clone();
        if range.end <= subtree.start || range.start >= subtree.end {
            return false;
        }
        if range.start <= subtree.start && subtree.end <= range.end {
            return true;
        }

        let own_start = subtree.start;
        let own_end = own_start + self.arena[id].text.len();
        let trim_start = range.start.max(own_start);
        let trim_end = range.end.min(own_end);
        if trim_start < trim_end {
            self.arena[id]
                .text
                .replace_range(trim_start - own_start..trim_end - own_start, "");
        }

        let children = core::mem::take(&mut self.arena[id].children);
        let kept = self.remove_range_in_list(children, range);
        self.arena[id].children = kept;
        false
    }

    /// Removes the paragraphs in `range`, returning every root span's subtree
    /// to the arena so the slots can be reused.
    pub(crate) fn remove_paragraphs(&mut self, range: Range<usize>) {
        for paragraph in self.paragraphs.drain(range) {
            for id in paragraph.children {
                self.arena.free(id);
            }
        }
    }

    /// Appends paragraph `paragraph`'s root spans onto the previous paragraph
    /// and removes it. The earlier paragraph's block style survives.
    pub(crate) fn merge_paragraph_into_previous(&mut self, paragraph: usize) {
        debug_assert!(paragraph > 0, "cannot merge the first paragraph");
        let removed = self.paragraphs.remove(paragraph);
        self.paragraphs[paragraph - 1].children.extend(removed.children);
    }

    pub(crate) fn push_paragraph(&mut self, style: ParagraphStyle) -> usize {
        self.paragraphs.push(Paragraph::new(style));
        self.paragraphs.len() - 1
    }

    /// Attaches a decoration over an absolute byte range of the document.
    ///
    /// The range must be non-empty, lie on UTF-8 character boundaries, and
    /// fall within a single span's own text; the span is split so that
    /// exactly the requested range carries the decoration. This is the entry
    /// point for externally computed marks such as spellcheck results.
    pub fn decorate(
        &mut self,
        range: Range<usize>,
        decoration: Arc<dyn SpanDecoration>,
    ) -> Result<(), Error> {
        let text = self.text();
        if range.start >= range.end {
            return Err(Error::new(ErrorKind::InvalidRange, &range, text.len()));
        }
        if range.end > text.len() {
            return Err(Error::new(ErrorKind::InvalidBounds, &range, text.len()));
        }
        if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
            return Err(Error::new(ErrorKind::NotOnCharBoundary, &range, text.len()));
        }

        let hit = self
            .find_span_at(range.start)
            .ok_or_else(|| Error::new(ErrorKind::InvalidBounds, &range, text.len()))?;
        let own_len = self.arena[hit.span].text.len();
        if range.end > hit.text_start + own_len {
            return Err(Error::new(
                ErrorKind::CrossesSpanBoundary,
                &range,
                text.len(),
            ));
        }

        let local_start = range.start - hit.text_start;
        let local_end = range.end - hit.text_start;
        // An exact cover only attaches in place on a leaf; with children
        // present the node's subtree range is wider than its own text, so the
        // own text moves into a dedicated child to keep the decorated range
        // exact.
        if local_start == 0 && local_end == own_len && self.arena[hit.span].children.is_empty() {
            self.arena[hit.span].decoration = Some(decoration);
        } else {
            let after: String = self.arena[hit.span].text[local_end..].into();
            let mid: String = self.arena[hit.span].text[local_start..local_end].into();
            self.arena[hit.span].text.truncate(local_start);

            let mid_id = self.arena.alloc(
                SpanNode::new(Some(hit.span), mid, SpanStyle::new()).with_decoration(decoration),
            );
            self.arena[hit.span].children.insert(0, mid_id);
            if !after.is_empty() {
                let after_id = self
                    .arena
                    .alloc(SpanNode::new(Some(hit.span), after, SpanStyle::new()));
                self.arena[hit.span].children.insert(1, after_id);
            }
        }
        self.reindex();
        Ok(())
    }

    /// Iterates the absolute ranges of all decorated spans, paragraph by
    /// paragraph, for the renderer's decoration callbacks.
    pub fn decorated_ranges(&self) -> Vec<(Range<usize>, Arc<dyn SpanDecoration>)> {
        let mut out = Vec::new();
        let mut offset = 0;
        for p in 0..self.paragraphs.len() {
            let roots = self.paragraphs[p].children.clone();
            for id in roots {
                self.collect_decorations(id, offset, &mut out);
            }
            offset += self.paragraph_len(p);
        }
        out
    }

    fn collect_decorations(
        &self,
        id: SpanId,
        paragraph_offset: usize,
        out: &mut Vec<(Range<usize>, Arc<dyn SpanDecoration>)>,
    ) {
        let node = &self.arena[id];
        if let Some(decoration) = &node.decoration {
            let range = node.range.start + paragraph_offset..node.range.end + paragraph_offset;
            out.push((range, decoration.clone()));
        }
        for &child in &node.children {
            self.collect_decorations(child, paragraph_offset, out);
        }
    }
}
