//! Integration tests for placeholders and their asynchronous content.

use std::thread;

use quire_layout::{
    ApproximateTextMeasure, AxisBox, Block, BlockKind, ColorValue, ContentError, Document,
    LayoutContext, NodeId, TextureRegion,
};

fn ctx() -> LayoutContext<'static> {
    LayoutContext::new(&ApproximateTextMeasure)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Text and color of the label a placeholder currently shows.
fn shown_label(doc: &Document, placeholder: NodeId) -> Option<(String, ColorValue)> {
    let current = doc.placeholder(placeholder)?.current();
    match &doc.block(current)?.kind {
        BlockKind::Label(label) => Some((label.text.clone(), label.color)),
        _ => None,
    }
}

#[test]
fn test_new_placeholder_shows_loading_label() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();

    let (text, color) = shown_label(&doc, placeholder).unwrap();

    assert_eq!(text, doc.config().loading_text);
    assert_eq!(color, doc.config().loading_color);
    assert_eq!(doc.children(placeholder).len(), 1);
    assert_eq!(doc.pending_placeholders(), 1);
}

#[test]
fn test_poll_without_completion_changes_nothing() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let loading = doc.children(placeholder)[0];

    assert_eq!(doc.poll_placeholders(), 0);

    assert_eq!(doc.children(placeholder), &[loading]);
    assert_eq!(doc.pending_placeholders(), 1);
}

#[test]
fn test_completion_from_another_thread() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, sender) = doc.new_placeholder();
    let column = doc.push(Block::column(AxisBox::new()));
    doc.append_child(column, placeholder);

    let worker = thread::spawn(move || {
        sender.complete(|doc| {
            doc.create(Block::sprite(TextureRegion::whole("result"), 40.0, 20.0))
        });
    });
    worker.join().unwrap();

    // Nothing changes until the UI thread polls.
    assert!(shown_label(&doc, placeholder).is_some());

    assert_eq!(doc.poll_placeholders(), 1);
    assert_eq!(doc.pending_placeholders(), 0);

    let current = doc.placeholder(placeholder).unwrap().current();
    assert_eq!(doc.children(placeholder), &[current]);
    assert_eq!(doc.block(current).unwrap().kind_name(), "sprite");

    doc.update_layout(ctx(), 200.0);
    assert_eq!(doc.bounds_of(placeholder).width, 40.0);
    assert_eq!(doc.bounds_of(placeholder).height, 20.0);
}

#[test]
fn test_failure_shows_error_label() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, sender) = doc.new_placeholder();

    sender.fail_with("page not found");
    assert_eq!(doc.poll_placeholders(), 1);

    let (text, color) = shown_label(&doc, placeholder).unwrap();
    assert_eq!(text, "page not found");
    assert_eq!(color, doc.config().error_color);
}

#[test]
fn test_dropped_sender_abandons_content() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, sender) = doc.new_placeholder();

    drop(sender);
    assert_eq!(doc.poll_placeholders(), 1);

    let (text, _) = shown_label(&doc, placeholder).unwrap();
    assert_eq!(text, ContentError::Abandoned.to_string());
    assert_eq!(doc.children(placeholder).len(), 1);
}

#[test]
fn test_completion_after_document_dropped_is_discarded() {
    init_logging();
    let mut doc = Document::new();
    let (_, sender) = doc.new_placeholder();
    assert!(!sender.is_discarded());

    drop(doc);

    assert!(sender.is_discarded());
    sender.complete(|doc| doc.create(Block::thematic_break()));
}

#[test]
fn test_each_placeholder_resolves_independently() {
    let mut doc = Document::new();
    let (first, first_sender) = doc.new_placeholder();
    let (second, _second_sender) = doc.new_placeholder();

    first_sender.complete(|doc| doc.create(Block::thematic_break()));

    assert_eq!(doc.poll_placeholders(), 1);
    assert!(shown_label(&doc, first).is_none());
    assert_eq!(
        shown_label(&doc, second).map(|(text, _)| text),
        Some(doc.config().loading_text.clone())
    );
    assert_eq!(doc.pending_placeholders(), 1);
}

#[test]
fn test_swap_invalidates_layout() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let column = doc.push(Block::column(AxisBox::new()));
    doc.append_child(column, placeholder);
    doc.update_layout(ctx(), 100.0);

    let content = doc.create(Block::thematic_break());
    doc.set_placeholder_content(placeholder, content);

    assert!(doc.layout().is_none());
}

#[test]
fn test_setting_same_content_keeps_layout() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let _ = doc.push(Block::column(AxisBox::new()));
    doc.update_layout(ctx(), 100.0);
    let current = doc.placeholder(placeholder).unwrap().current();

    doc.set_placeholder_content(placeholder, current);

    assert!(doc.layout().is_some());
}

#[test]
fn test_swapped_out_content_is_detached() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let first = doc.create(Block::thematic_break());
    let second = doc.create(Block::thematic_break());

    doc.set_placeholder_content(placeholder, first);
    doc.set_placeholder_content(placeholder, second);

    assert_eq!(doc.parent(first), None);
    assert_eq!(doc.children(placeholder), &[second]);
}

#[test]
fn test_set_content_on_non_placeholder_is_ignored() {
    let mut doc = Document::new();
    let column = doc.push(Block::column(AxisBox::new()));
    let content = doc.create(Block::thematic_break());

    doc.set_placeholder_content(column, content);

    assert_eq!(doc.parent(content), None);
}

#[test]
fn test_missing_content_keeps_current_child() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let loading = doc.children(placeholder)[0];

    doc.set_placeholder_content(placeholder, NodeId(999));

    assert_eq!(doc.children(placeholder), &[loading]);
    assert_eq!(doc.placeholder(placeholder).unwrap().current(), loading);
}

#[test]
fn test_ancestor_content_keeps_current_child() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let column = doc.push(Block::column(AxisBox::new()));
    doc.append_child(column, placeholder);
    let loading = doc.children(placeholder)[0];

    doc.set_placeholder_content(placeholder, column);
    doc.set_placeholder_content(placeholder, placeholder);

    assert_eq!(doc.children(placeholder), &[loading]);
    assert_eq!(doc.top_level(), &[column]);
}

#[test]
fn test_builder_returning_ancestor_shows_error_label() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, sender) = doc.new_placeholder();
    let column = doc.push(Block::column(AxisBox::new()));
    doc.append_child(column, placeholder);

    sender.complete(move |_| column);
    assert_eq!(doc.poll_placeholders(), 1);

    let (text, color) = shown_label(&doc, placeholder).unwrap();
    assert_eq!(text, ContentError::Unplaceable(column).to_string());
    assert_eq!(color, doc.config().error_color);
    assert_eq!(doc.children(placeholder).len(), 1);
    assert_eq!(doc.top_level(), &[column]);
    assert_eq!(doc.parent(placeholder), Some(column));
}

#[test]
fn test_builder_returning_missing_node_shows_error_label() {
    init_logging();
    let mut doc = Document::new();
    let (placeholder, sender) = doc.new_placeholder();

    sender.complete(|_| NodeId(999));
    assert_eq!(doc.poll_placeholders(), 1);

    let (text, _) = shown_label(&doc, placeholder).unwrap();
    assert_eq!(text, ContentError::Unplaceable(NodeId(999)).to_string());
    assert_eq!(doc.children(placeholder).len(), 1);
}
