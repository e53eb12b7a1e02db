// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edit reconciler: keeps the span-tree document in sync with a flat
//! text buffer undergoing incremental edits.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use span_style::{ParagraphStyle, SpanStyle};

use crate::annotated::AnnotatedText;
use crate::decoration::{RichTextConfig, SpanDecoration};
use crate::document::RichDocument;
use crate::error::Error;
use crate::selection::Selection;
use crate::span::{SpanId, SpanNode};

/// Opaque representation of a generation.
///
/// Obtained from [`RichEditor::generation`].
// Overflow handling: the generations are only compared,
// so wrapping is fine. This could only fail if exactly
// `u32::MAX` generations happen between reads. This is
// implausible and so can be ignored.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub struct Generation(u32);

impl Generation {
    /// Make it not what it currently is.
    pub(crate) fn nudge(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// A rich-text editing state.
///
/// The editor owns a [`RichDocument`] and mirrors the flat text buffer and
/// selection the outer text field reports. [`on_text_change`] is the sole
/// mutation entry point: it classifies the edit as insertion or deletion by
/// comparing lengths, applies it to the span tree, and rebuilds the flattened
/// [`AnnotatedText`] before returning, so observers always see a consistent
/// value.
///
/// Style toggles ([`toggle_span_style`] and friends) accumulate as pending
/// "to add"/"to remove" deltas that commit on the next typed character and
/// clear after every text change.
///
/// All offsets are byte indices into UTF-8 text.
///
/// [`on_text_change`]: Self::on_text_change
/// [`toggle_span_style`]: Self::toggle_span_style
#[derive(Clone, Debug)]
pub struct RichEditor {
    doc: RichDocument,
    config: RichTextConfig,
    buffer: String,
    selection: Selection,
    to_add: SpanStyle,
    to_remove: SpanStyle,
    pending_paragraph: ParagraphStyle,
    current_applied: SpanStyle,
    current_paragraph: ParagraphStyle,
    annotated: AnnotatedText,
    generation: Generation,
}

impl Default for RichEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RichEditor {
    /// Creates an editor over an empty document.
    pub fn new() -> Self {
        Self::with_document(RichDocument::new())
    }

    /// Creates an editor over an existing document (for example one produced
    /// by a [`DocumentBuilder`](crate::DocumentBuilder)).
    pub fn with_document(doc: RichDocument) -> Self {
        let config = RichTextConfig::default();
        let buffer = doc.text();
        let annotated = AnnotatedText::from_document(&doc, &config);
        let mut editor = Self {
            doc,
            config,
            buffer,
            selection: Selection::collapsed(0),
            to_add: SpanStyle::new(),
            to_remove: SpanStyle::new(),
            pending_paragraph: ParagraphStyle::new(),
            current_applied: SpanStyle::new(),
            current_paragraph: ParagraphStyle::new(),
            annotated,
            generation: Generation::default(),
        };
        editor.refresh_current_styles();
        editor
    }

    /// Replaces the decoration config.
    pub fn with_config(mut self, config: RichTextConfig) -> Self {
        self.config = config;
        self.annotated = AnnotatedText::from_document(&self.doc, &self.config);
        self
    }

    /// The decoration config.
    #[inline]
    pub fn config(&self) -> &RichTextConfig {
        &self.config
    }

    /// The current flat text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// The current selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The underlying document.
    #[inline]
    pub fn document(&self) -> &RichDocument {
        &self.doc
    }

    /// The flattened styled-text value, rebuilt after every mutation.
    ///
    /// Its text length always equals the raw buffer length: the offset
    /// mapping between the two is the identity.
    #[inline]
    pub fn annotated_text(&self) -> &AnnotatedText {
        &self.annotated
    }

    /// The generation counter; changes whenever observable state changes.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The effective character style at the cursor: the committed style under
    /// the cursor merged with the pending "to add" delta, minus the pending
    /// "to remove" delta.
    pub fn current_span_style(&self) -> SpanStyle {
        self.current_applied
            .custom_merge(&self.to_add)
            .unmerge(&self.to_remove)
    }

    /// The block style of the paragraph under the cursor, including any
    /// pending block-style delta.
    #[inline]
    pub fn current_paragraph_style(&self) -> &ParagraphStyle {
        &self.current_paragraph
    }

    /// Toggles a character style: if the effective cursor style already
    /// matches `style` on its specified fields the request removes it,
    /// otherwise it adds it. Takes effect on the next typed character.
    pub fn toggle_span_style(&mut self, style: SpanStyle) {
        if self.current_span_style().contains_specified(&style) {
            self.remove_span_style(style);
        } else {
            self.add_span_style(style);
        }
    }

    /// Adds a pending character style.
    pub fn add_span_style(&mut self, style: SpanStyle) {
        if self.current_span_style().contains_specified(&style) {
            return;
        }
        self.to_add = self.to_add.custom_merge(&style);
        self.to_remove = self.to_remove.unmerge(&style);
    }

    /// Removes a character style, pending the next typed character.
    pub fn remove_span_style(&mut self, style: SpanStyle) {
        if !self.current_span_style().contains_specified(&style) {
            return;
        }
        // Fields that were merely pending are dropped from the "to add"
        // accumulator; only fields the committed style actually carries need
        // an explicit removal entry.
        let pending_only = style.unmerge(&self.current_applied);
        let committed_part = style.unmerge(&pending_only);
        self.to_remove = self.to_remove.custom_merge(&committed_part);
        self.to_add = self.to_add.unmerge(&style);
    }

    /// Adds a block style to the paragraph under the cursor. Later toggles
    /// win even on unrelated fields; the delta commits on the next text
    /// change.
    pub fn add_paragraph_style(&mut self, style: ParagraphStyle) {
        self.pending_paragraph = self.pending_paragraph.merge(&style);
        self.current_paragraph = self.current_paragraph.merge(&self.pending_paragraph);
    }

    /// Attaches a decoration over an absolute byte range (for example a
    /// spellcheck mark over a misspelled word).
    pub fn decorate(
        &mut self,
        range: Range<usize>,
        decoration: Arc<dyn SpanDecoration>,
    ) -> Result<(), Error> {
        self.doc.decorate(range, decoration)?;
        self.annotated = AnnotatedText::from_document(&self.doc, &self.config);
        self.generation.nudge();
        Ok(())
    }

    /// The absolute ranges of all decorated spans, for the renderer's
    /// decoration draw callbacks.
    pub fn decorated_ranges(&self) -> Vec<(Range<usize>, Arc<dyn SpanDecoration>)> {
        self.doc.decorated_ranges()
    }

    /// The sole mutation entry point: the outer text field reports its new
    /// text and selection here after every change.
    ///
    /// Longer text is handled as an insertion at the selection, shorter text
    /// as a deletion ending at the selection. Equal-length changes (pure
    /// selection moves, composition updates) leave the tree untouched but
    /// still clear pending styles and refresh the cursor style snapshot.
    pub fn on_text_change(&mut self, new_text: &str, new_selection: Selection) {
        if new_text.len() > self.buffer.len() {
            self.handle_insertion(new_text, new_selection);
        } else if new_text.len() < self.buffer.len() {
            self.handle_deletion(new_text, new_selection);
        }
        self.finish_edit(new_text, new_selection);
    }

    /// Commits pending block styles, reindexes, rebuilds the flattened value
    /// and resets the pending accumulators. Runs after every reported text
    /// change, successful or not, so observers never see a half-updated
    /// state.
    fn finish_edit(&mut self, new_text: &str, new_selection: Selection) {
        self.buffer.clear();
        self.buffer.push_str(new_text);
        self.selection = new_selection;

        if !self.pending_paragraph.is_empty() {
            let probe = self.selection.min();
            let paragraph = self
                .doc
                .paragraph_at(probe)
                .or_else(|| self.doc.paragraph_at(probe.saturating_sub(1)))
                .unwrap_or(self.doc.paragraphs.len() - 1);
            self.doc.paragraphs[paragraph].style = self.doc.paragraphs[paragraph]
                .style
                .merge(&self.pending_paragraph);
        }

        self.doc.reindex();
        self.annotated = AnnotatedText::from_document(&self.doc, &self.config);

        self.to_add = SpanStyle::new();
        self.to_remove = SpanStyle::new();
        self.pending_paragraph = ParagraphStyle::new();
        self.refresh_current_styles();
        self.generation.nudge();
    }

    fn refresh_current_styles(&mut self) {
        let probe = self.selection.min().saturating_sub(1);
        self.current_applied = self
            .doc
            .find_span_at(probe)
            .map(|hit| self.doc.full_style(hit.span))
            .unwrap_or_default();
        self.current_paragraph = self
            .doc
            .paragraph_at(probe)
            .map(|p| self.doc.paragraphs[p].style.clone())
            .unwrap_or_default();
    }

    fn handle_insertion(&mut self, new_text: &str, new_selection: Selection) {
        let added = new_text.len() - self.buffer.len();
        let sel_min = new_selection.min();
        if sel_min < added || sel_min > new_text.len() {
            return;
        }
        let insert_at = sel_min - added;
        let Some(typed) = new_text.get(insert_at..sel_min) else {
            return;
        };

        let probe = insert_at.saturating_sub(1);
        let Some(hit) = self.doc.find_span_at(probe) else {
            // Empty document: a fresh root span in the last paragraph picks
            // up the pending style.
            let id = self
                .doc
                .arena
                .alloc(SpanNode::new(None, typed.into(), self.to_add.clone()));
            let last = self.doc.paragraphs.len() - 1;
            self.doc.paragraphs[last].children.push(id);
            return;
        };

        let span_id = hit.span;
        let own_len = self.doc.arena[span_id].text.len();
        let local = insert_at - hit.text_start;
        if local > own_len || !self.doc.arena[span_id].text.is_char_boundary(local) {
            return;
        }

        if self.escapes_decorated_edge(span_id, local, own_len) {
            self.insert_escaped_sibling(hit.paragraph, span_id, local, typed);
            return;
        }

        let full = self.doc.full_style(span_id);
        let target = full.custom_merge(&self.to_add).unmerge(&self.to_remove);
        let no_pending = self.to_add.is_empty() && self.to_remove.is_empty();

        if no_pending || target == full {
            // No style boundary to introduce: splice into the active span.
            self.doc.arena[span_id].text.insert_str(local, typed);
        } else if self.to_remove.is_empty() {
            self.split_for_addition(span_id, local, typed);
        } else {
            self.split_for_removal(hit.paragraph, span_id, local, typed, &full, &target);
        }
    }

    /// Typing at the edge of a decoration that refuses edge text escapes to a
    /// plain sibling instead of extending the decorated span.
    fn escapes_decorated_edge(&self, span_id: SpanId, local: usize, own_len: usize) -> bool {
        let node = &self.doc.arena[span_id];
        let refuses = node
            .decoration
            .as_ref()
            .is_some_and(|d| !d.accepts_text_at_edges());
        // The right edge only counts for leaf spans; otherwise the insertion
        // point sits between the span's own text and its children.
        refuses && (local == 0 || (local == own_len && node.children.is_empty()))
    }

    fn insert_escaped_sibling(
        &mut self,
        paragraph: usize,
        span_id: SpanId,
        local: usize,
        typed: &str,
    ) {
        let parent = self.doc.arena[span_id].parent;
        let parent_full = parent.map(|p| self.doc.full_style(p)).unwrap_or_default();
        let parent_style = parent.map(|p| self.doc.arena[p].style.clone());
        let target = parent_full
            .custom_merge(&self.to_add)
            .unmerge(&self.to_remove);
        let style = target.unmerge_opt(parent_style.as_ref());

        let new_id = self
            .doc
            .arena
            .alloc(SpanNode::new(parent, typed.into(), style));
        let siblings = match parent {
            Some(p) => &mut self.doc.arena[p].children,
            None => &mut self.doc.paragraphs[paragraph].children,
        };
        let Some(pos) = siblings.iter().position(|&s| s == span_id) else {
            return;
        };
        let at = if local == 0 { pos } else { pos + 1 };
        siblings.insert(at, new_id);
    }

    /// Pure style addition: split the active span, prepending the typed text
    /// and the remainder as its first children.
    fn split_for_addition(&mut self, span_id: SpanId, local: usize, typed: &str) {
        let after: String = self.doc.arena[span_id].text[local..].into();
        self.doc.arena[span_id].text.truncate(local);

        // Seeding the typed span with the effective decoration keeps a forced
        // underline/strikethrough alive across the split.
        let typed_style = SpanStyle {
            text_decoration: self.current_span_style().text_decoration,
            ..SpanStyle::new()
        }
        .custom_merge(&self.to_add);

        let typed_id = self
            .doc
            .arena
            .alloc(SpanNode::new(Some(span_id), typed.into(), typed_style));
        self.doc.arena[span_id].children.insert(0, typed_id);
        if !after.is_empty() {
            let after_id = self
                .doc
                .arena
                .alloc(SpanNode::new(Some(span_id), after, SpanStyle::new()));
            self.doc.arena[span_id].children.insert(1, after_id);
        }
    }

    /// Style removal or mixed change: the typed text cannot live under the
    /// active span's chain, so it moves under the closest ancestor whose full
    /// style the target already satisfies, and everything textually after the
    /// insertion point moves with it.
    fn split_for_removal(
        &mut self,
        paragraph: usize,
        span_id: SpanId,
        local: usize,
        typed: &str,
        full: &SpanStyle,
        target: &SpanStyle,
    ) {
        let after: String = self.doc.arena[span_id].text[local..].into();
        self.doc.arena[span_id].text.truncate(local);

        let ancestor = self.closest_ancestor(span_id, target);
        let ancestor_style = ancestor.map(|a| self.doc.arena[a].style.clone());
        let typed_style = target.unmerge_opt(ancestor_style.as_ref());

        let typed_id = self
            .doc
            .arena
            .alloc(SpanNode::new(ancestor, typed.into(), typed_style));
        let mut to_shift = vec![typed_id];
        if !after.is_empty() {
            let after_id = self
                .doc
                .arena
                .alloc(SpanNode::new(ancestor, after, full.clone()));
            to_shift.push(after_id);
        }

        // The active span's children follow its own text, so they trail the
        // typed text now. Resolve each one's style against its old chain
        // before moving it: the inherited chain changes under it.
        let own_children = core::mem::take(&mut self.doc.arena[span_id].children);
        for child in own_children {
            let resolved = self.doc.full_style(child);
            let node = &mut self.doc.arena[child];
            node.style = resolved;
            node.parent = ancestor;
            to_shift.push(child);
        }

        // Walk from the active span up to the ancestor, carrying every
        // right-sibling along. Same resolve-then-move ordering.
        let mut prev = span_id;
        loop {
            let Some(cur) = self.doc.arena[prev].parent else {
                break;
            };
            if Some(cur) == ancestor {
                break;
            }
            let pos = self.doc.arena[cur].children.iter().position(|&c| c == prev);
            if let Some(pos) = pos {
                let moved = self.doc.arena[cur].children.split_off(pos + 1);
                for m in moved {
                    let resolved = self.doc.full_style(m);
                    let node = &mut self.doc.arena[m];
                    node.style = resolved;
                    node.parent = ancestor;
                    to_shift.push(m);
                }
            }
            prev = cur;
        }

        let siblings = match ancestor {
            Some(a) => &mut self.doc.arena[a].children,
            None => &mut self.doc.paragraphs[paragraph].children,
        };
        let at = siblings
            .iter()
            .position(|&s| s == prev)
            .map_or(siblings.len(), |pos| pos + 1);
        siblings.splice(at..at, to_shift);
    }

    /// Walks up the parent chain looking for the first ancestor whose full
    /// style is already satisfied by `target`; `None` means the paragraph
    /// root.
    fn closest_ancestor(&self, span_id: SpanId, target: &SpanStyle) -> Option<SpanId> {
        let mut cur = self.doc.arena[span_id].parent;
        while let Some(id) = cur {
            if target.contains_specified(&self.doc.full_style(id)) {
                return Some(id);
            }
            cur = self.doc.arena[id].parent;
        }
        None
    }

    fn handle_deletion(&mut self, new_text: &str, new_selection: Selection) {
        let removed = self.buffer.len() - new_text.len();
        let start = new_selection.min();
        if start + removed > self.buffer.len() {
            return;
        }

        // The span holding the last removed byte and the one holding the
        // first; either lookup failing means the reported selection and our
        // tree disagree, and the whole operation degrades to a no-op.
        let Some(last_hit) = self.doc.find_span_at(start + removed - 1) else {
            return;
        };
        let Some(first_hit) = self.doc.find_span_at(start) else {
            return;
        };

        let p_first = first_hit.paragraph;
        let p_last = last_hit.paragraph;
        if p_first == p_last {
            let offset = self.doc.paragraph_offset(p_first);
            self.doc
                .remove_range_in_paragraph(p_first, start - offset..start + removed - offset);
        } else {
            let first_offset = self.doc.paragraph_offset(p_first);
            let last_offset = self.doc.paragraph_offset(p_last);
            let first_len = self.doc.paragraph_len(p_first);

            self.doc
                .remove_range_in_paragraph(p_last, 0..start + removed - last_offset);
            self.doc
                .remove_range_in_paragraph(p_first, start - first_offset..first_len);

            // Fully enclosed paragraphs go away outright, subtrees returned
            // to the arena, then the two remainders merge into one.
            self.doc.remove_paragraphs(p_first + 1..p_last);
            self.doc.merge_paragraph_into_previous(p_first + 1);
        }
    }
}
