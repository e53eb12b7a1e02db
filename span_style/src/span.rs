// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::values::{FontStyle, FontWeight, TextDecoration};

/// A partial character-level style record.
///
/// Every field is independently unset (`None`) or set. An unset field
/// inherits from the enclosing span chain; a set field overrides it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanStyle {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub background: Option<Color>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Font weight.
    pub font_weight: Option<FontWeight>,
    /// Font style.
    pub font_style: Option<FontStyle>,
    /// Extra spacing between letters, in pixels.
    pub letter_spacing: Option<f32>,
    /// Decoration lines.
    pub text_decoration: Option<TextDecoration>,
}

/// Compares one field across two records, considering only set values.
///
/// A field set on exactly one side is a mismatch unless its value equals the
/// field's prevailing default (when the field has one).
fn field_eq<T: PartialEq>(a: &Option<T>, b: &Option<T>, default: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y,
        (Some(x), None) | (None, Some(x)) => default.is_some_and(|d| x == d),
    }
}

macro_rules! merge_field {
    ($out:ident, $other:ident, $field:ident) => {
        if $other.$field.is_some() {
            $out.$field = $other.$field.clone();
        }
    };
}

macro_rules! unmerge_field {
    ($out:ident, $other:ident, $field:ident) => {
        if $other.$field.is_some() {
            $out.$field = None;
        }
    };
}

impl SpanStyle {
    /// Creates an empty record with every field unset.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.background.is_none()
            && self.font_size.is_none()
            && self.font_weight.is_none()
            && self.font_style.is_none()
            && self.letter_spacing.is_none()
            && self.text_decoration.is_none()
    }

    /// Sets the foreground color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    /// Sets the font size in pixels.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = Some(font_weight);
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = Some(font_style);
        self
    }

    /// Sets the letter spacing in pixels.
    #[must_use]
    pub fn with_letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = Some(letter_spacing);
        self
    }

    /// Sets the decoration lines.
    #[must_use]
    pub fn with_text_decoration(mut self, text_decoration: TextDecoration) -> Self {
        self.text_decoration = Some(text_decoration);
        self
    }

    /// Merges `other` over `self`: set fields in `other` override, unset
    /// fields leave `self` untouched.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut out = self.clone();
        merge_field!(out, other, color);
        merge_field!(out, other, background);
        merge_field!(out, other, font_size);
        merge_field!(out, other, font_weight);
        merge_field!(out, other, font_style);
        merge_field!(out, other, letter_spacing);
        merge_field!(out, other, text_decoration);
        out
    }

    /// The merge variant used for character styles.
    ///
    /// Today this matches [`merge`](Self::merge); it is a distinct entry point
    /// so that character-style merging can diverge (for example selective
    /// field handling) without touching block-style semantics.
    #[must_use]
    pub fn custom_merge(&self, other: &Self) -> Self {
        self.merge(other)
    }

    /// Clears every field of `self` that is set in `other`, regardless of its
    /// value. Fields unset in `other` are untouched.
    ///
    /// This computes "style with the given attributes toggled off". It is
    /// lossy: merging `other` back does not necessarily restore the original,
    /// but unmerging is idempotent.
    #[must_use]
    pub fn unmerge(&self, other: &Self) -> Self {
        let mut out = self.clone();
        unmerge_field!(out, other, color);
        unmerge_field!(out, other, background);
        unmerge_field!(out, other, font_size);
        unmerge_field!(out, other, font_weight);
        unmerge_field!(out, other, font_style);
        unmerge_field!(out, other, letter_spacing);
        unmerge_field!(out, other, text_decoration);
        out
    }

    /// [`unmerge`](Self::unmerge) against an optional record; `None` leaves
    /// `self` unchanged.
    #[must_use]
    pub fn unmerge_opt(&self, other: Option<&Self>) -> Self {
        match other {
            Some(other) => self.unmerge(other),
            None => self.clone(),
        }
    }

    /// Specified-fields equality: every field set in either record must hold
    /// the same value in both.
    ///
    /// Fields unset on both sides are ignored. A field set on exactly one
    /// side mismatches unless its value equals the field's prevailing default
    /// ([`FontWeight::NORMAL`], [`FontStyle::Normal`],
    /// [`TextDecoration::NONE`]); color, size and spacing fields have no
    /// prevailing default. Reflexive and symmetric; two empty records are
    /// equal.
    pub fn specified_fields_eq(&self, other: &Self) -> bool {
        field_eq(&self.color, &other.color, None)
            && field_eq(&self.background, &other.background, None)
            && field_eq(&self.font_size, &other.font_size, None)
            && field_eq(&self.font_weight, &other.font_weight, Some(&FontWeight::NORMAL))
            && field_eq(&self.font_style, &other.font_style, Some(&FontStyle::Normal))
            && field_eq(&self.letter_spacing, &other.letter_spacing, None)
            && field_eq(
                &self.text_decoration,
                &other.text_decoration,
                Some(&TextDecoration::NONE),
            )
    }

    /// Returns `true` if every field set in `other` holds the same value in
    /// `self`.
    ///
    /// This is the relation style toggling uses: "does the current effective
    /// style already match the requested style on *its* specified fields".
    pub fn contains_specified(&self, other: &Self) -> bool {
        fn covered<T: PartialEq>(own: &Option<T>, requested: &Option<T>) -> bool {
            match requested {
                None => true,
                Some(v) => own.as_ref() == Some(v),
            }
        }
        covered(&self.color, &other.color)
            && covered(&self.background, &other.background)
            && covered(&self.font_size, &other.font_size)
            && covered(&self.font_weight, &other.font_weight)
            && covered(&self.font_style, &other.font_style)
            && covered(&self.letter_spacing, &other.letter_spacing)
            && covered(&self.text_decoration, &other.text_decoration)
    }
}
