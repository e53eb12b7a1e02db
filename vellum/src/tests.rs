// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use span_style::{FontStyle, FontWeight, ParagraphStyle, SpanStyle, TextAlign, TextDecoration};

use crate::{
    DocumentBuilder, ErrorKind, Link, RichEditor, Selection, SpellCheckUnderline, StyleRun,
};

fn bold() -> SpanStyle {
    SpanStyle::new().with_font_weight(FontWeight::BOLD)
}

fn italic() -> SpanStyle {
    SpanStyle::new().with_font_style(FontStyle::Italic)
}

fn underline() -> SpanStyle {
    SpanStyle::new().with_text_decoration(TextDecoration::UNDERLINE)
}

/// Reports a pure cursor move, as the outer field would.
fn move_cursor(editor: &mut RichEditor, at: usize) {
    let text = editor.text().to_string();
    editor.on_text_change(&text, Selection::collapsed(at));
}

/// Reports typing `s` at byte offset `at`.
fn insert(editor: &mut RichEditor, at: usize, s: &str) {
    let mut text = editor.text().to_string();
    text.insert_str(at, s);
    editor.on_text_change(&text, Selection::collapsed(at + s.len()));
}

/// Reports a backwards deletion of `range`.
fn delete(editor: &mut RichEditor, range: Range<usize>) {
    let mut text = editor.text().to_string();
    text.replace_range(range.clone(), "");
    editor.on_text_change(&text, Selection::collapsed(range.start));
}

/// The run list as `(range, style)` pairs, for compact assertions.
fn runs(editor: &RichEditor) -> Vec<(Range<usize>, SpanStyle)> {
    editor
        .annotated_text()
        .runs()
        .iter()
        .map(|StyleRun { range, style }| (range.clone(), style.clone()))
        .collect()
}

fn plain_editor(text: &str) -> RichEditor {
    let mut builder = DocumentBuilder::new();
    builder.text(text);
    RichEditor::with_document(builder.finish())
}

#[test]
fn typing_into_empty_document() {
    let mut editor = RichEditor::new();
    assert!(editor.document().is_empty());

    insert(&mut editor, 0, "hello");

    assert_eq!(editor.text(), "hello");
    assert_eq!(editor.annotated_text().text(), "hello");
    assert_eq!(runs(&editor), [(0..5, SpanStyle::new())]);
    assert_eq!(editor.selection(), Selection::collapsed(5));
}

#[test]
fn plain_typing_splices_into_existing_span() {
    let mut editor = plain_editor("hello world");

    insert(&mut editor, 5, ",");

    assert_eq!(editor.text(), "hello, world");
    // No style boundary was introduced, so the run count stays at one.
    assert_eq!(runs(&editor), [(0..12, SpanStyle::new())]);
}

#[test]
fn pending_bold_splits_the_active_span() {
    let mut editor = plain_editor("hello world");
    move_cursor(&mut editor, 5);
    editor.toggle_span_style(bold());
    assert!(editor.current_span_style().contains_specified(&bold()));

    insert(&mut editor, 5, "B");

    assert_eq!(editor.text(), "helloB world");
    assert_eq!(
        runs(&editor),
        [
            (0..5, SpanStyle::new()),
            (5..6, bold()),
            (6..12, SpanStyle::new()),
        ]
    );
    // The toggle committed; the cursor style now reads from the tree.
    assert!(editor.current_span_style().contains_specified(&bold()));
}

#[test]
fn italic_typed_inside_bold_hello_splits_head_typed_tail() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("Hello");
    builder.pop_span();
    let mut editor = RichEditor::with_document(builder.finish());

    move_cursor(&mut editor, 2);
    editor.toggle_span_style(italic());
    insert(&mut editor, 2, "y");

    assert_eq!(editor.text(), "Heyllo");
    assert_eq!(
        runs(&editor),
        [
            (0..2, bold()),
            (2..3, bold().custom_merge(&italic())),
            (3..6, bold()),
        ]
    );
    // The bold span keeps "He" and carries the typed and remainder spans as
    // its first children.
    let doc = editor.document();
    let root = doc.paragraphs()[0].children()[0];
    assert_eq!(doc.span(root).text(), "He");
    let children = doc.span(root).children();
    assert_eq!(children.len(), 2);
    assert_eq!(doc.span(children[0]).text(), "y");
    assert_eq!(doc.span(children[1]).text(), "llo");
}

#[test]
fn typing_continues_in_the_committed_style() {
    let mut editor = plain_editor("hello world");
    move_cursor(&mut editor, 5);
    editor.toggle_span_style(bold());
    insert(&mut editor, 5, "B");
    insert(&mut editor, 6, "C");

    assert_eq!(editor.text(), "helloBC world");
    assert_eq!(
        runs(&editor),
        [
            (0..5, SpanStyle::new()),
            (5..7, bold()),
            (7..13, SpanStyle::new()),
        ]
    );
}

#[test]
fn toggling_bold_off_escapes_the_bold_span() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("abcdef");
    builder.pop_span();
    let mut editor = RichEditor::with_document(builder.finish());

    move_cursor(&mut editor, 3);
    assert!(editor.current_span_style().contains_specified(&bold()));
    editor.toggle_span_style(bold());
    assert!(!editor.current_span_style().contains_specified(&bold()));

    insert(&mut editor, 3, "X");

    assert_eq!(editor.text(), "abcXdef");
    assert_eq!(
        runs(&editor),
        [(0..3, bold()), (3..4, SpanStyle::new()), (4..7, bold())]
    );
}

#[test]
fn toggling_off_cascades_later_siblings_with_resolved_styles() {
    // bold span "ab" with an italic child "c|d" and an underlined child "ef";
    // removing bold at the cursor must carry "d" and "ef" out of the bold
    // chain with their previously inherited styles baked in.
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("ab");
    builder.push_span(italic());
    builder.text("cd");
    builder.pop_span();
    builder.push_span(underline());
    builder.text("ef");
    builder.pop_span();
    builder.pop_span();
    let mut editor = RichEditor::with_document(builder.finish());
    assert_eq!(editor.text(), "abcdef");

    move_cursor(&mut editor, 3);
    editor.toggle_span_style(bold());
    insert(&mut editor, 3, "X");

    assert_eq!(editor.text(), "abcXdef");
    assert_eq!(
        runs(&editor),
        [
            (0..2, bold()),
            (2..3, bold().custom_merge(&italic())),
            (3..4, italic()),
            (4..5, bold().custom_merge(&italic())),
            (5..7, bold().custom_merge(&underline())),
        ]
    );
}

#[test]
fn toggle_then_untype_leaves_styles_unchanged() {
    let mut editor = plain_editor("abc");
    move_cursor(&mut editor, 3);

    editor.toggle_span_style(bold());
    assert!(editor.current_span_style().contains_specified(&bold()));
    editor.toggle_span_style(bold());
    assert!(!editor.current_span_style().contains_specified(&bold()));

    insert(&mut editor, 3, "d");

    assert_eq!(editor.text(), "abcd");
    assert_eq!(runs(&editor), [(0..4, SpanStyle::new())]);
}

#[test]
fn pending_styles_clear_after_any_text_change() {
    let mut editor = plain_editor("abc");
    move_cursor(&mut editor, 3);
    editor.toggle_span_style(bold());

    // A cursor move is an equal-length change; it drops the pending toggle.
    move_cursor(&mut editor, 1);
    assert!(!editor.current_span_style().contains_specified(&bold()));

    insert(&mut editor, 1, "x");
    assert_eq!(runs(&editor), [(0..4, SpanStyle::new())]);
}

#[test]
fn adding_a_second_style_nests_pending_deltas() {
    let mut editor = plain_editor("ab");
    move_cursor(&mut editor, 2);
    editor.add_span_style(bold());
    editor.add_span_style(italic());

    insert(&mut editor, 2, "c");

    assert_eq!(
        runs(&editor),
        [(0..2, SpanStyle::new()), (2..3, bold().custom_merge(&italic()))]
    );
}

#[test]
fn deleting_within_one_paragraph_trims_spans() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(SpanStyle::new());
    builder.text("hel");
    builder.push_span(bold());
    builder.text("lo");
    builder.pop_span();
    builder.pop_span();
    let mut editor = RichEditor::with_document(builder.finish());
    assert_eq!(editor.text(), "hello");

    delete(&mut editor, 2..4);

    assert_eq!(editor.text(), "heo");
    assert_eq!(runs(&editor), [(0..2, SpanStyle::new()), (2..3, bold())]);
}

#[test]
fn deleting_a_whole_span_frees_it() {
    let mut editor = plain_editor("hello world");
    delete(&mut editor, 5..11);
    assert_eq!(editor.text(), "hello");
    delete(&mut editor, 0..5);
    assert_eq!(editor.text(), "");
    assert!(editor.document().is_empty());
    // The document keeps its last paragraph; typing still works.
    assert_eq!(editor.document().paragraphs().len(), 1);
    insert(&mut editor, 0, "x");
    assert_eq!(editor.text(), "x");
}

#[test]
fn deleting_across_paragraphs_merges_them() {
    let centered = ParagraphStyle::new().with_text_align(TextAlign::Center);
    let mut builder = DocumentBuilder::new();
    builder.paragraph(ParagraphStyle::new());
    builder.text("AB");
    builder.paragraph(centered);
    builder.text("CD");
    let mut editor = RichEditor::with_document(builder.finish());
    assert_eq!(editor.text(), "ABCD");
    assert_eq!(editor.document().paragraphs().len(), 2);

    delete(&mut editor, 1..3);

    assert_eq!(editor.text(), "AD");
    let paragraphs = editor.document().paragraphs();
    assert_eq!(paragraphs.len(), 1);
    // The earlier paragraph's block style survives the merge.
    assert_eq!(paragraphs[0].style().text_align, None);
}

#[test]
fn deleting_across_paragraphs_drops_enclosed_ones() {
    let mut builder = DocumentBuilder::new();
    builder.paragraph(ParagraphStyle::new());
    builder.text("one");
    builder.paragraph(ParagraphStyle::new());
    builder.text("two");
    builder.paragraph(ParagraphStyle::new());
    builder.text("three");
    let mut editor = RichEditor::with_document(builder.finish());
    assert_eq!(editor.text(), "onetwothree");

    delete(&mut editor, 2..8);

    assert_eq!(editor.text(), "onree");
    assert_eq!(editor.document().paragraphs().len(), 1);
}

#[test]
fn deleting_enclosed_paragraphs_returns_spans_to_the_arena() {
    let mut builder = DocumentBuilder::new();
    builder.paragraph(ParagraphStyle::new());
    builder.text("one");
    builder.paragraph(ParagraphStyle::new());
    builder.text("two");
    builder.paragraph(ParagraphStyle::new());
    builder.text("three");
    let mut editor = RichEditor::with_document(builder.finish());

    delete(&mut editor, 2..8);

    assert_eq!(editor.text(), "onree");
    // The enclosed paragraph's span went back on the free list.
    assert_eq!(editor.document().arena.slot_count(), 3);
    assert_eq!(editor.document().arena.free_slots(), 1);

    // The next split reuses the freed slot instead of growing the arena.
    move_cursor(&mut editor, 5);
    editor.toggle_span_style(bold());
    insert(&mut editor, 5, "X");
    assert_eq!(editor.text(), "onreeX");
    assert_eq!(editor.document().arena.slot_count(), 3);
    assert_eq!(editor.document().arena.free_slots(), 0);
}

#[test]
fn paragraph_style_commits_on_next_text_change() {
    let centered = ParagraphStyle::new().with_text_align(TextAlign::Center);
    let mut editor = plain_editor("abc");
    move_cursor(&mut editor, 1);

    editor.add_paragraph_style(centered.clone());
    // Visible immediately through the cursor style.
    assert_eq!(
        editor.current_paragraph_style().text_align,
        Some(TextAlign::Center)
    );

    insert(&mut editor, 1, "x");
    assert_eq!(
        editor.document().paragraphs()[0].style().text_align,
        Some(TextAlign::Center)
    );
    assert_eq!(
        editor.annotated_text().paragraph_runs()[0].style.text_align,
        Some(TextAlign::Center)
    );
}

#[test]
fn later_paragraph_toggle_wins() {
    let mut editor = plain_editor("abc");
    move_cursor(&mut editor, 1);
    editor.add_paragraph_style(ParagraphStyle::new().with_text_align(TextAlign::Center));
    editor.add_paragraph_style(ParagraphStyle::new().with_text_align(TextAlign::End));
    insert(&mut editor, 1, "x");
    assert_eq!(
        editor.document().paragraphs()[0].style().text_align,
        Some(TextAlign::End)
    );
}

#[test]
fn decorate_splits_exactly_the_requested_range() {
    let mut editor = plain_editor("hello world");
    editor
        .decorate(6..11, Arc::new(SpellCheckUnderline))
        .unwrap();

    let ranges = editor.decorated_ranges();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].0, 6..11);
    // A bare spellcheck mark contributes no character style.
    assert_eq!(runs(&editor), [(0..11, SpanStyle::new())]);
}

#[test]
fn decorate_covering_a_parents_own_text_stays_exact() {
    // "hel" belongs to a span that also has a bold child "lo"; covering
    // exactly the own text must not report the whole subtree as decorated.
    let mut builder = DocumentBuilder::new();
    builder.push_span(SpanStyle::new());
    builder.text("hel");
    builder.push_span(bold());
    builder.text("lo");
    builder.pop_span();
    builder.pop_span();
    let mut editor = RichEditor::with_document(builder.finish());

    editor
        .decorate(0..3, Arc::new(SpellCheckUnderline))
        .unwrap();

    assert_eq!(editor.text(), "hello");
    let ranges = editor.decorated_ranges();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].0, 0..3);
    assert_eq!(runs(&editor), [(0..3, SpanStyle::new()), (3..5, bold())]);
}

#[test]
fn decorate_rejects_bad_ranges() {
    let mut editor = plain_editor("hello");
    let err = editor
        .decorate(2..2, Arc::new(SpellCheckUnderline))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);

    let err = editor
        .decorate(2..9, Arc::new(SpellCheckUnderline))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBounds);

    let mut editor = plain_editor("héllo");
    let err = editor
        .decorate(1..2, Arc::new(SpellCheckUnderline))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
}

#[test]
fn decorate_rejects_ranges_crossing_span_boundaries() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("abc");
    builder.pop_span();
    builder.text("def");
    let mut editor = RichEditor::with_document(builder.finish());

    let err = editor
        .decorate(2..4, Arc::new(SpellCheckUnderline))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CrossesSpanBoundary);
}

#[test]
fn typing_at_spellcheck_edges_escapes_the_mark() {
    let mut editor = plain_editor("wrold");
    editor
        .decorate(0..5, Arc::new(SpellCheckUnderline))
        .unwrap();

    insert(&mut editor, 5, "s");
    let ranges = editor.decorated_ranges();
    assert_eq!(editor.text(), "wrolds");
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].0, 0..5);

    insert(&mut editor, 0, "a");
    let ranges = editor.decorated_ranges();
    assert_eq!(editor.text(), "awrolds");
    assert_eq!(ranges[0].0, 1..6);
}

#[test]
fn typing_inside_a_spellcheck_mark_grows_it() {
    let mut editor = plain_editor("wrold");
    editor
        .decorate(0..5, Arc::new(SpellCheckUnderline))
        .unwrap();

    insert(&mut editor, 2, "x");

    assert_eq!(editor.text(), "wrxold");
    assert_eq!(editor.decorated_ranges()[0].0, 0..6);
}

#[test]
fn links_contribute_the_configured_style() {
    let mut editor = plain_editor("see docs here");
    editor.decorate(4..8, Arc::new(Link::new("https://example.com"))).unwrap();

    let config = editor.config().clone();
    let link_style = SpanStyle::new()
        .with_color(config.link_color)
        .with_text_decoration(config.link_text_decoration);
    assert_eq!(
        runs(&editor),
        [
            (0..4, SpanStyle::new()),
            (4..8, link_style),
            (8..13, SpanStyle::new()),
        ]
    );
}

#[test]
fn adjacent_equal_runs_coalesce() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("ab");
    builder.pop_span();
    builder.push_span(bold());
    builder.text("cd");
    builder.pop_span();
    let editor = RichEditor::with_document(builder.finish());

    assert_eq!(runs(&editor), [(0..4, bold())]);
}

#[test]
fn annotated_text_always_matches_the_buffer() {
    let mut editor = plain_editor("hello world");
    move_cursor(&mut editor, 5);
    editor.toggle_span_style(bold());
    insert(&mut editor, 5, "B");
    delete(&mut editor, 2..8);
    insert(&mut editor, 3, "!");

    assert_eq!(editor.annotated_text().text(), editor.text());
    let runs = editor.annotated_text().runs();
    let mut end = 0;
    for run in runs {
        assert_eq!(run.range.start, end);
        end = run.range.end;
    }
    assert_eq!(end, editor.text().len());
}

#[test]
fn multibyte_text_round_trips() {
    let mut editor = plain_editor("héllo");
    move_cursor(&mut editor, 3);
    editor.toggle_span_style(bold());
    insert(&mut editor, 3, "ö");
    assert_eq!(editor.text(), "héöllo");
    delete(&mut editor, 3..5);
    assert_eq!(editor.text(), "héllo");
}

#[test]
fn generation_tracks_observable_changes() {
    let mut editor = plain_editor("abc");
    let initial = editor.generation();
    insert(&mut editor, 3, "d");
    assert_ne!(editor.generation(), initial);
}

#[test]
fn builder_restyles_the_initial_paragraph() {
    let centered = ParagraphStyle::new().with_text_align(TextAlign::Center);
    let mut builder = DocumentBuilder::new();
    builder.paragraph(centered);
    builder.text("abc");
    let doc = builder.finish();
    assert_eq!(doc.paragraphs().len(), 1);
    assert_eq!(
        doc.paragraphs()[0].style().text_align,
        Some(TextAlign::Center)
    );
}

#[test]
fn builder_text_after_nested_span_keeps_order() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("a");
    builder.push_span(italic());
    builder.text("b");
    builder.pop_span();
    builder.text("c");
    builder.pop_span();
    let editor = RichEditor::with_document(builder.finish());

    assert_eq!(editor.text(), "abc");
    assert_eq!(
        runs(&editor),
        [
            (0..1, bold()),
            (1..2, bold().custom_merge(&italic())),
            (2..3, bold()),
        ]
    );
}

#[test]
#[should_panic(expected = "unbalanced pop_span")]
fn builder_rejects_unbalanced_pop() {
    let mut builder = DocumentBuilder::new();
    builder.pop_span();
}

#[test]
fn find_span_reports_the_deepest_span() {
    let mut builder = DocumentBuilder::new();
    builder.push_span(bold());
    builder.text("ab");
    builder.push_span(italic());
    builder.text("cd");
    builder.pop_span();
    builder.pop_span();
    let doc = builder.finish();

    let outer = doc.find_span_at(1).unwrap();
    let inner = doc.find_span_at(2).unwrap();
    assert_ne!(outer.span, inner.span);
    assert_eq!(inner.text_start, 2);
    assert_eq!(
        doc.full_style(inner.span),
        bold().custom_merge(&italic())
    );
    assert!(doc.find_span_at(4).is_none());
}
