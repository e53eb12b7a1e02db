// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial style records and the merge/unmerge algebra over them.
//!
//! A "partial" style record is one in which every attribute is independently
//! either unset or set to a value. Records compose by merging (set fields of
//! the right operand win) and decompose by unmerging (set fields of the right
//! operand are cleared). This is the algebra an incremental rich-text editor
//! needs: toggling bold over bold-italic text must be able to clear exactly
//! the weight field while leaving the rest of the inherited chain alone.
//!
//! - [`SpanStyle`] is the character-level record.
//! - [`ParagraphStyle`] is the block-level record.
//! - [`values`] holds the shared value vocabulary ([`FontWeight`],
//!   [`TextDecoration`], ...).
//!
//! ## Equality
//!
//! Two records can be compared with [`SpanStyle::specified_fields_eq`], which
//! only considers fields set on at least one side, and
//! [`SpanStyle::contains_specified`], which asks whether one record satisfies
//! every field the other specifies. Plain `==` compares field-for-field
//! including unset state.
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
#![no_std]

mod paragraph;
mod span;
pub mod values;


pub use paragraph::ParagraphStyle;
pub use span::SpanStyle;
pub use values::{FontStyle, FontWeight, TextAlign, TextDecoration, TextDirection};

pub use peniko::Color;
