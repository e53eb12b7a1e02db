// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom span decorations.
//!
//! A decoration augments a span beyond what the style record expresses: it can
//! contribute a character style for measurement, draw its own geometry over
//! the laid-out text (a spellcheck squiggle, for instance), and decide whether
//! typing exactly at its edges extends the decorated span or escapes to a
//! plain sibling.
//!
//! Decorations are a capability trait rather than a closed enum so that
//! consumers can supply their own implementations without touching this
//! crate.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use peniko::Color;
use peniko::color::palette;
use peniko::kurbo::{BezPath, Rect};
use span_style::{SpanStyle, TextDecoration};

/// Decoration-facing configuration shared by the whole editor.
#[derive(Clone, Debug, PartialEq)]
pub struct RichTextConfig {
    /// Foreground color contributed by link spans.
    pub link_color: Color,
    /// Decoration lines contributed by link spans.
    pub link_text_decoration: TextDecoration,
    /// Stroke color of the spellcheck underline.
    pub spell_check_color: Color,
    /// Stroke width of the spellcheck underline, in pixels.
    pub spell_check_stroke_width: f64,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            link_color: palette::css::BLUE,
            link_text_decoration: TextDecoration::UNDERLINE,
            spell_check_color: palette::css::RED,
            spell_check_stroke_width: 2.0,
        }
    }
}

/// Padding the renderer applies around the laid-out text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Space above the first line.
    pub top: f64,
    /// Space before the leading edge.
    pub start: f64,
}

/// A stroke a decoration asks the renderer to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationPrimitive {
    /// The path to stroke.
    pub path: BezPath,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

/// Opaque handle onto a measured text layout.
///
/// Layout is performed outside this crate; decorations only need per-box
/// geometry for a byte range, one [`Rect`] per contiguous rendered box
/// (typically one per line the range touches).
pub trait DecorationLayout {
    /// Returns the bounding box of each contiguous rendered piece of `range`.
    fn bounding_boxes(&self, range: Range<usize>) -> Vec<Rect>;
}

/// A custom span decoration.
pub trait SpanDecoration: Debug {
    /// The character style this decoration contributes, merged over the
    /// span's resolved style when the flattened value is built.
    fn style_contribution(&self, _config: &RichTextConfig) -> SpanStyle {
        SpanStyle::new()
    }

    /// Whether text typed exactly at this span's edges is absorbed into the
    /// span. When `false`, typing at an edge escapes to a plain sibling.
    fn accepts_text_at_edges(&self) -> bool {
        true
    }

    /// Emits render primitives for the span's absolute text `range`, using
    /// the measured `layout` for geometry.
    fn draw(
        &self,
        layout: &dyn DecorationLayout,
        range: Range<usize>,
        config: &RichTextConfig,
        padding: Padding,
        sink: &mut dyn FnMut(DecorationPrimitive),
    );
}

/// A spellcheck mark: a straight underline beneath each rendered box of the
/// span, drawn in the config's spellcheck color.
///
/// Typing at the edges of a misspelled word should not grow the mark, so
/// edge text escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpellCheckUnderline;

impl SpanDecoration for SpellCheckUnderline {
    fn accepts_text_at_edges(&self) -> bool {
        false
    }

    fn draw(
        &self,
        layout: &dyn DecorationLayout,
        range: Range<usize>,
        config: &RichTextConfig,
        padding: Padding,
        sink: &mut dyn FnMut(DecorationPrimitive),
    ) {
        for rect in layout.bounding_boxes(range) {
            let mut path = BezPath::new();
            path.move_to((rect.x0 + padding.start, rect.y1 + padding.top));
            path.line_to((rect.x1 + padding.start, rect.y1 + padding.top));
            sink(DecorationPrimitive {
                path,
                color: config.spell_check_color,
                stroke_width: config.spell_check_stroke_width,
            });
        }
    }
}

/// A hyperlink span.
///
/// Contributes the config's link color and decoration lines; the text layout
/// engine renders those, so `draw` emits nothing. Typing at the edges escapes
/// the link rather than growing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    url: String,
}

impl Link {
    /// Creates a link decoration for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The link target.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SpanDecoration for Link {
    fn style_contribution(&self, config: &RichTextConfig) -> SpanStyle {
        SpanStyle::new()
            .with_color(config.link_color)
            .with_text_decoration(config.link_text_decoration)
    }

    fn accepts_text_at_edges(&self) -> bool {
        false
    }

    fn draw(
        &self,
        _layout: &dyn DecorationLayout,
        _range: Range<usize>,
        _config: &RichTextConfig,
        _padding: Padding,
        _sink: &mut dyn FnMut(DecorationPrimitive),
    ) {
    }
}
