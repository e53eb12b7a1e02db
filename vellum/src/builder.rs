// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use span_style::{ParagraphStyle, SpanStyle};

use crate::decoration::SpanDecoration;
use crate::document::RichDocument;
use crate::span::{SpanId, SpanNode};

/// Builds a [`RichDocument`] with a push/pop protocol.
///
/// [`push_span`] opens a nested styled span, [`text`] appends to the innermost
/// open span, [`pop_span`] closes it. [`paragraph`] closes any open spans and
/// starts a new paragraph. [`finish`] closes everything and returns the
/// document with ranges indexed.
///
/// ```
/// # use vellum::DocumentBuilder;
/// # use span_style::{SpanStyle, FontWeight};
/// let mut builder = DocumentBuilder::new();
/// builder.text("plain ");
/// builder.push_span(SpanStyle::new().with_font_weight(FontWeight::BOLD));
/// builder.text("bold");
/// builder.pop_span();
/// let doc = builder.finish();
/// assert_eq!(doc.text(), "plain bold");
/// ```
///
/// [`push_span`]: Self::push_span
/// [`text`]: Self::text
/// [`pop_span`]: Self::pop_span
/// [`paragraph`]: Self::paragraph
/// [`finish`]: Self::finish
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: RichDocument,
    current_paragraph: usize,
    stack: Vec<SpanId>,
    /// Root-level span absorbing bare `text` calls, reset on any structural
    /// push.
    implicit: Option<SpanId>,
    /// Until the first content arrives, `paragraph` restyles the initial
    /// empty paragraph instead of appending a second one.
    fresh: bool,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a builder over a fresh single-paragraph document.
    pub fn new() -> Self {
        Self {
            doc: RichDocument::new(),
            current_paragraph: 0,
            stack: Vec::new(),
            implicit: None,
            fresh: true,
        }
    }

    /// Starts a new paragraph with the given block style, closing any open
    /// spans first.
    pub fn paragraph(&mut self, style: ParagraphStyle) {
        self.stack.clear();
        self.implicit = None;
        if self.fresh {
            self.doc.paragraphs[0].style = style;
        } else {
            self.current_paragraph = self.doc.push_paragraph(style);
        }
        self.fresh = false;
    }

    /// Opens a styled span nested inside the innermost open span.
    pub fn push_span(&mut self, style: SpanStyle) {
        let id = self.attach(SpanNode::new(self.stack.last().copied(), String::new(), style));
        self.stack.push(id);
        self.implicit = None;
        self.fresh = false;
    }

    /// Opens a decorated span nested inside the innermost open span.
    pub fn push_decorated_span(&mut self, style: SpanStyle, decoration: Arc<dyn SpanDecoration>) {
        let node = SpanNode::new(self.stack.last().copied(), String::new(), style)
            .with_decoration(decoration);
        let id = self.attach(node);
        self.stack.push(id);
        self.implicit = None;
        self.fresh = false;
    }

    /// Appends text to the innermost open span, or to an unstyled root span
    /// when none is open.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.fresh = false;
        match self.stack.last().copied() {
            Some(top) if self.doc.arena[top].children.is_empty() => {
                self.doc.arena[top].text.push_str(text);
            }
            Some(top) => {
                // Text arriving after nested spans must come after them in
                // flattened order, so it gets its own trailing child.
                let last = self.doc.arena[top].children.last().copied();
                if let Some(tail) = last.filter(|&id| self.is_plain_leaf(id)) {
                    self.doc.arena[tail].text.push_str(text);
                } else {
                    let id = self
                        .doc
                        .arena
                        .alloc(SpanNode::new(Some(top), text.into(), SpanStyle::new()));
                    self.doc.arena[top].children.push(id);
                }
            }
            None => {
                if let Some(id) = self.implicit {
                    self.doc.arena[id].text.push_str(text);
                } else {
                    let id = self.attach(SpanNode::new(None, text.into(), SpanStyle::new()));
                    self.implicit = Some(id);
                }
            }
        }
    }

    /// Closes the innermost open span.
    ///
    /// # Panics
    ///
    /// Panics if no span is open.
    pub fn pop_span(&mut self) {
        assert!(self.stack.pop().is_some(), "unbalanced pop_span");
    }

    /// Closes any open spans and returns the document with span ranges
    /// indexed.
    pub fn finish(mut self) -> RichDocument {
        self.stack.clear();
        self.doc.reindex();
        self.doc
    }

    fn attach(&mut self, node: SpanNode) -> SpanId {
        let parent = node.parent();
        let id = self.doc.arena.alloc(node);
        match parent {
            Some(p) => self.doc.arena[p].children.push(id),
            None => self.doc.paragraphs[self.current_paragraph].children.push(id),
        }
        id
    }

    fn is_plain_leaf(&self, id: SpanId) -> bool {
        let node = &self.doc.arena[id];
        node.style().is_empty() && node.decoration().is_none() && node.children.is_empty()
    }
}
