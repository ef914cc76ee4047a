//! Terminal output: the laid-out block tree and pick results.

use owo_colors::OwoColorize;
use quire_layout::{Block, BlockKind, Document, HitTestResult, NodeId, Rect};

/// Print the block tree below `id` with its bounds.
pub fn print_layout(doc: &Document, id: NodeId, depth: usize) {
    let Some(block) = doc.block(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    let detail = describe(doc, id).map(|text| format!(" {}", text.dimmed()));
    println!(
        "{indent}{} {}{} {}",
        block.kind_name().cyan().bold(),
        format!("#{}", id.0).dimmed(),
        detail.unwrap_or_default(),
        format_rect(block.bounds()).yellow(),
    );

    if block.is_interactive() {
        println!("{indent}  {}", "interactive".magenta());
    }
    for run in doc.inline_runs(id) {
        println!(
            "{indent}  {} {}",
            run.id.to_string().green(),
            format_rect(run.bounds).yellow()
        );
    }

    for &child in doc.children(id) {
        print_layout(doc, child, depth + 1);
    }
}

/// Print what lies under `(x, y)` and the tooltip it would show.
pub fn print_pick(doc: &Document, x: f32, y: f32, hit: Option<HitTestResult>) {
    let Some(hit) = hit else {
        println!("{} ({x}, {y}): {}", "pick".bold(), "nothing".dimmed());
        return;
    };

    let kind = doc.block(hit.node).map_or("missing", Block::kind_name);
    let content = hit
        .content
        .map(|run| format!(" {}", run.to_string().green()))
        .unwrap_or_default();
    println!(
        "{} ({x}, {y}): {} {}{}",
        "pick".bold(),
        kind.cyan().bold(),
        format!("#{}", hit.node.0).dimmed(),
        content,
    );

    let path: Vec<String> = doc
        .ancestors(hit.node)
        .filter_map(|id| doc.block(id).map(|block| format!("{}#{}", block.kind_name(), id.0)))
        .collect();
    if !path.is_empty() {
        println!("  {} {}", "in".dimmed(), path.join(" < "));
    }
    if let Some(handler) = doc.interactive_ancestor(hit.node) {
        println!("  {} #{}", "handler".magenta(), handler.0);
    }
    if let Some(tooltip) = doc.tooltip(&hit) {
        println!("  {} {}", "tooltip".green(), tooltip);
    }
}

fn describe(doc: &Document, id: NodeId) -> Option<String> {
    match &doc.block(id)?.kind {
        BlockKind::Label(label) => Some(format!("{:?}", label.text)),
        BlockKind::Slot(slot) => slot.stack.as_ref().map(|stack| stack.item.clone()),
        BlockKind::ItemImage(item) => Some(item.stack.item.clone()),
        BlockKind::Image(image) => Some(image.image.id().to_string()),
        BlockKind::Sprite(sprite) => Some(sprite.region.texture.clone()),
        BlockKind::Scene(scene) => Some(scene.scene.clone()),
        BlockKind::Placeholder(placeholder) => {
            Some(format!("showing #{}", placeholder.current().0))
        }
        BlockKind::Box(_) | BlockKind::ThematicBreak => None,
    }
}

fn format_rect(rect: Rect) -> String {
    format!(
        "x={:.1} y={:.1} w={:.1} h={:.1}",
        rect.x, rect.y, rect.width, rect.height
    )
}
