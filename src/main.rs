//! Highlight text in a markup file and print the result.
//!
//! ```text
//! touchmark page.html --text "quick brown" --text fox --color "#aaccff"
//! touchmark page.html --swipe 4,10:80,10 --config highlighter.toml
//! ```

use clap::Parser;
use core_types::{Point, TouchEvent, TouchId, TouchPhase, TouchPoint};
use highlight::{DocumentAdapter, Highlighter, HighlighterConfig, MemoryHost, Range};
use html::{Document, NodeId};
use std::path::PathBuf;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "touchmark", version, about = "Highlight text inside a markup document")]
struct CliArgs {
    /// Markup file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Highlighter options (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the highlight colour
    #[arg(long)]
    color: Option<String>,

    /// First element with this tag name becomes the context (default: first element)
    #[arg(long, value_name = "TAG")]
    context: Option<String>,

    /// Highlight the first occurrence of this text; repeatable
    #[arg(long = "text", value_name = "TEXT")]
    texts: Vec<String>,

    /// Simulate a touch swipe, "x1,y1:x2,y2" in page pixels; repeatable
    #[arg(long = "swipe", value_name = "GESTURE")]
    swipes: Vec<String>,

    /// Remove every highlight before printing
    #[arg(long)]
    clear: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    match run(args) {
        Ok(markup) => {
            println!("{markup}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("touchmark: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<String, Box<dyn std::error::Error>> {
    let markup = std::fs::read_to_string(&args.input)?;
    let mut config = match &args.config {
        Some(path) => HighlighterConfig::load(path)?,
        None => HighlighterConfig::default(),
    };
    if let Some(color) = args.color {
        config.color = color;
    }

    let host = MemoryHost::from_markup(&markup);
    let context = find_context(host.document(), args.context.as_deref())
        .ok_or("no matching context element")?;
    let mut hl = Highlighter::attach(host, context, config, highlight::DefaultHooks)?;

    for text in &args.texts {
        let doc = hl.host().document();
        let Some(range) = Range::find_text(doc, context, text) else {
            log::warn!("text {text:?} not found");
            continue;
        };
        hl.host_mut().select(range);
        hl.on_pointer_up()?;
    }

    for (i, gesture) in args.swipes.iter().enumerate() {
        let (from, to) = parse_swipe(gesture).ok_or_else(|| format!("bad swipe {gesture:?}"))?;
        let id = TouchId(i as u32);
        for (phase, position) in [(TouchPhase::Start, from), (TouchPhase::End, to)] {
            let point = TouchPoint {
                id,
                position,
                target: None,
            };
            hl.on_touch(&TouchEvent::new(phase, vec![point]))?;
        }
    }

    if args.clear {
        hl.remove_highlights(None)?;
    }
    Ok(hl.serialize())
}

fn find_context(doc: &Document, tag: Option<&str>) -> Option<NodeId> {
    doc.descendants(doc.root()).into_iter().find(|&id| match tag {
        Some(tag) => doc.is_element_named(id, &tag.to_ascii_lowercase()),
        None => doc.is_element(id),
    })
}

// "x1,y1:x2,y2"
fn parse_swipe(input: &str) -> Option<(Point, Point)> {
    let (from, to) = input.split_once(':')?;
    Some((parse_point(from)?, parse_point(to)?))
}

fn parse_point(input: &str) -> Option<Point> {
    let (x, y) = input.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}
