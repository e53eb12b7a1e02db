// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut, Range};

use span_style::SpanStyle;

use crate::decoration::SpanDecoration;

/// Identifier of a span node in a document's arena.
///
/// Ids are stable for the lifetime of the node; freed slots are reused by
/// later allocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpanId(u32);

impl SpanId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in a paragraph's style tree.
///
/// A node's own text precedes the flattened text of its children. The `style`
/// field is incremental relative to the parent chain; the resolved "full"
/// style is obtained via [`RichDocument::full_style`](crate::RichDocument::full_style).
#[derive(Clone, Debug)]
pub struct SpanNode {
    pub(crate) parent: Option<SpanId>,
    pub(crate) children: Vec<SpanId>,
    pub(crate) text: String,
    /// Paragraph-relative byte range of this node's whole subtree.
    ///
    /// Maintained by the document's reindex pass; always current when
    /// observers run.
    pub(crate) range: Range<usize>,
    pub(crate) style: SpanStyle,
    pub(crate) decoration: Option<Arc<dyn SpanDecoration>>,
}

impl SpanNode {
    pub(crate) fn new(parent: Option<SpanId>, text: String, style: SpanStyle) -> Self {
        Self {
            parent,
            children: Vec::new(),
            text,
            range: 0..0,
            style,
            decoration: None,
        }
    }

    pub(crate) fn with_decoration(mut self, decoration: Arc<dyn SpanDecoration>) -> Self {
        self.decoration = Some(decoration);
        self
    }

    /// The parent span, or `None` for paragraph roots.
    #[inline]
    pub fn parent(&self) -> Option<SpanId> {
        self.parent
    }

    /// The ordered child spans.
    #[inline]
    pub fn children(&self) -> &[SpanId] {
        &self.children
    }

    /// The node's own literal text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The paragraph-relative byte range of the node's subtree.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The incremental style relative to the parent chain.
    #[inline]
    pub fn style(&self) -> &SpanStyle {
        &self.style
    }

    /// The custom decoration attached to this span, if any.
    #[inline]
    pub fn decoration(&self) -> Option<&Arc<dyn SpanDecoration>> {
        self.decoration.as_ref()
    }
}

/// Slab storage for span nodes.
///
/// Parent and child links are ids into this arena, which sidesteps ownership
/// cycles while keeping upward traversal O(1).
#[derive(Clone, Debug, Default)]
pub(crate) struct SpanArena {
    nodes: Vec<SpanNode>,
    free: Vec<SpanId>,
}

impl SpanArena {
    pub(crate) fn alloc(&mut self, node: SpanNode) -> SpanId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            id
        } else {
            let id = SpanId(u32::try_from(self.nodes.len()).expect("span arena overflow"));
            self.nodes.push(node);
            id
        }
    }

    /// The number of allocated slots, free ones included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of slots on the free list.
    #[cfg(test)]
    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Returns the node's slot to the free list, recursively freeing its
    /// subtree. The caller is responsible for unlinking `id` from its parent.
    pub(crate) fn free(&mut self, id: SpanId) {
        let children = core::mem::take(&mut self.nodes[id.index()].children);
        for child in children {
            self.free(child);
        }
        let slot = &mut self.nodes[id.index()];
        slot.text.clear();
        slot.parent = None;
        slot.decoration = None;
        slot.style = SpanStyle::new();
        slot.range = 0..0;
        self.free.push(id);
    }
}

impl Index<SpanId> for SpanArena {
    type Output = SpanNode;

    #[inline]
    fn index(&self, id: SpanId) -> &SpanNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<SpanId> for SpanArena {
    #[inline]
    fn index_mut(&mut self, id: SpanId) -> &mut SpanNode {
        &mut self.nodes[id.index()]
    }
}
