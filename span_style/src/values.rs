// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value vocabulary shared by the style records.

/// A font weight on the usual 100..=1000 scale.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 200.
    pub const EXTRA_LIGHT: Self = Self(200.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 800.
    pub const EXTRA_BOLD: Self = Self(800.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub const fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the weight value.
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A font style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FontStyle {
    /// `normal`.
    #[default]
    Normal,
    /// `italic`.
    Italic,
    /// `oblique` with an optional angle in degrees.
    ///
    /// If `None`, the engine-specific default oblique angle is used.
    Oblique(Option<f32>),
}

/// A set of text decoration lines.
///
/// Decorations combine as a bitset so that, for example, underline and
/// strikethrough can coexist on one span. The empty set is a real value
/// distinct from "decoration unset" on a [`SpanStyle`](crate::SpanStyle):
/// a span that *sets* [`TextDecoration::NONE`] suppresses inherited
/// decorations, while one that leaves the field unset inherits them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextDecoration(u8);

impl TextDecoration {
    /// No decoration lines.
    pub const NONE: Self = Self(0);

    /// A line below the text baseline.
    pub const UNDERLINE: Self = Self(1);

    /// A line through the middle of the text.
    pub const LINE_THROUGH: Self = Self(2);

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if every line in `other` is present in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no decoration line is present.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Horizontal alignment of a paragraph's content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Align towards the leading edge of the base direction.
    #[default]
    Start,
    /// Center within the available width.
    Center,
    /// Align towards the trailing edge of the base direction.
    End,
    /// Stretch lines to fill the available width.
    Justify,
}

/// The base direction of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    /// Choose direction automatically (commonly "first-strong").
    #[default]
    Auto,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}
