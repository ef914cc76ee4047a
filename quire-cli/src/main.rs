//! Quire CLI
//!
//! A headless inspector for Quire documents: builds a document from a JSON
//! page description, lays it out for a width and prints the result.

mod page;
mod print;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use quire_common::warning::clear_warnings;
use quire_layout::{
    ApproximateTextMeasure, Document, LayoutConfig, LayoutContext, Rect, RecordingContext,
};

/// Quire CLI - inspect the layout of a page description
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the layout tree
    quire demos/inventory.json

    # Lay out for a narrower window and pick a point
    quire --width 180 --pick 30,40 demos/inventory.json

    # Dump the display list as JSON
    quire --display-list demos/inventory.json
"#)]
struct Cli {
    /// Path to a JSON page description
    #[arg(value_name = "PAGE")]
    page: PathBuf,

    /// Available width for layout
    #[arg(long, default_value = "320")]
    width: f32,

    /// Viewport height used for culling the display list
    #[arg(long, default_value = "240")]
    height: f32,

    /// Resolve a point to a block; may be repeated
    #[arg(long, value_name = "X,Y")]
    pick: Vec<Point>,

    /// Dispatch a click at a point; may be repeated
    #[arg(long, value_name = "X,Y")]
    click: Vec<Point>,

    /// Print the layout snapshot as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Print the display list as JSON
    #[arg(long)]
    display_list: bool,

    /// Layout configuration (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How long to wait for deferred content before laying out
    #[arg(long, default_value = "500")]
    wait_ms: u64,

    /// Log engine diagnostics at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// A point given as `X,Y`.
#[derive(Debug, Clone, Copy)]
struct Point {
    x: f32,
    y: f32,
}

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid coordinate `{value}`: {e}"))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LayoutConfig::default(),
    };
    let source = fs::read_to_string(&cli.page)
        .with_context(|| format!("failed to read {}", cli.page.display()))?;
    let page: page::Page = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse {}", cli.page.display()))?;

    clear_warnings();
    let mut doc = Document::with_config(config);
    page::build(&mut doc, &page);
    wait_for_content(&mut doc, Duration::from_millis(cli.wait_ms));

    doc.update_layout(LayoutContext::new(&ApproximateTextMeasure), cli.width);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc.snapshot())?);
    } else {
        let title = page.title.as_deref().unwrap_or("untitled");
        println!(
            "=== {} (width {}, content height {:.1}) ===",
            title.bold(),
            cli.width,
            doc.content_height()
        );
        print::print_layout(&doc, doc.root(), 0);
    }

    if cli.display_list {
        let mut recorder = RecordingContext::new(Rect::new(0.0, 0.0, cli.width, cli.height));
        doc.render(&mut recorder);
        println!("{}", serde_json::to_string_pretty(recorder.display_list())?);
    }

    for point in &cli.pick {
        let hit = doc.pick(point.x, point.y);
        doc.set_hovered_element(hit);
        print::print_pick(&doc, point.x, point.y, hit);
    }

    for point in &cli.click {
        let handled = doc.click(point.x, point.y);
        let outcome = if handled {
            "handled".green().to_string()
        } else {
            "unhandled".dimmed().to_string()
        };
        println!("{} ({}, {}): {outcome}", "click".bold(), point.x, point.y);
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<LayoutConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Poll placeholders until none is pending or `timeout` passes.
fn wait_for_content(doc: &mut Document, timeout: Duration) {
    let start = Instant::now();
    loop {
        let resolved = doc.poll_placeholders();
        if resolved > 0 {
            log::debug!("resolved {resolved} placeholder(s)");
        }
        if doc.pending_placeholders() == 0 {
            return;
        }
        if start.elapsed() >= timeout {
            log::warn!(
                "{} placeholder(s) still loading after {}ms",
                doc.pending_placeholders(),
                timeout.as_millis()
            );
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
}
