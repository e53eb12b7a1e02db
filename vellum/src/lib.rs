// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rich-text editing core.
//!
//! The centerpiece is [`RichEditor`], which keeps a styled span-tree document
//! in sync with the flat text buffer of an outer text field. The field reports
//! each text change via [`RichEditor::on_text_change`]; the editor classifies
//! it as insertion or deletion, applies it to the tree while preserving and
//! propagating styles, and rebuilds the flattened [`AnnotatedText`] consumers
//! render from.
//!
//! Character styles toggle through a pending-delta scheme: calling
//! [`RichEditor::toggle_span_style`] does not restyle existing text, it
//! records a delta that takes effect on the next typed character. Partial
//! styles and their merge/unmerge algebra live in the [`span_style`] crate.
//!
//! Documents can also be assembled directly with [`DocumentBuilder`], and
//! spans can carry custom [`SpanDecoration`]s such as spellcheck marks or
//! links.
//!
//! All offsets throughout are byte indices into UTF-8 text.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub use span_style;

mod annotated;
mod builder;
mod decoration;
mod document;
mod editor;
mod error;
mod paragraph;
mod selection;
mod span;

#[cfg(test)]
mod tests;

pub use annotated::{AnnotatedText, ParagraphRun, StyleRun};
pub use builder::DocumentBuilder;
pub use decoration::{
    DecorationLayout, DecorationPrimitive, Link, Padding, RichTextConfig, SpanDecoration,
    SpellCheckUnderline,
};
pub use document::{RichDocument, SpanHit};
pub use editor::{Generation, RichEditor};
pub use error::{Error, ErrorKind};
pub use paragraph::Paragraph;
pub use selection::Selection;
pub use span::{SpanId, SpanNode};
