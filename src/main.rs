//! lexlight - highlight text from stdin in the terminal
//!
//! Replays the input through the incremental highlighter one line at a
//! time, as if it were being typed, then prints the result.

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use lexlight::render;
use lexlight::{
    AnnotationSink, Config, Document, Highlighter, Recorder, Result, StyledLines, TextChange,
    TrackingMode,
};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    no_highlight: bool,
    narrow: bool,
    plain: bool,
    config: Option<PathBuf>,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEXLIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// What the command line asks for
#[derive(Debug)]
enum Command {
    Help,
    Version,
    Highlight(Options),
}

fn parse_args<I>(mut args: I) -> std::result::Result<Command, String>
where
    I: Iterator<Item = String>,
{
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-highlight" => options.no_highlight = true,
            "--narrow" => options.narrow = true,
            "--plain" => options.plain = true,
            "--config" => match args.next() {
                Some(path) => options.config = Some(PathBuf::from(path)),
                None => return Err("Option --config requires a path".to_string()),
            },
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(Command::Highlight(options))
}

fn run() -> Result<()> {
    let options = match parse_args(env::args().skip(1)) {
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("lexlight {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(Command::Highlight(options)) => options,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            process::exit(2);
        }
    };

    let mut config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if options.no_highlight {
        config.enabled = false;
    }
    if options.narrow {
        config.mode = TrackingMode::Narrow;
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut highlighter = Highlighter::from_config(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.plain {
        let mut recorder = Recorder::new();
        let doc = replay(&input, &mut highlighter, &mut recorder, |_, _| {});
        tracing::debug!(lines = doc.line_count(), annotations = recorder.len(), "replayed input");
        render::dump(&mut out, &recorder.calls)?;
    } else {
        let mut styled = StyledLines::new();
        let doc = replay(&input, &mut highlighter, &mut styled, StyledLines::notify);
        render::render(&mut out, &doc, &styled)?;
    }

    Ok(())
}

/// Feed `input` into a fresh document line by line
///
/// `forward` passes structural changes on to sinks that track rows.
fn replay<K, F>(
    input: &str,
    highlighter: &mut Highlighter,
    sink: &mut K,
    mut forward: F,
) -> Document
where
    K: AnnotationSink,
    F: FnMut(&mut K, &TextChange),
{
    let mut doc = Document::new();
    for (idx, text) in input.lines().enumerate() {
        let change = if idx == 0 {
            doc.set_line(0, text)
        } else {
            Some(doc.push_line(text))
        };
        if let Some(change) = change {
            forward(sink, &change);
            highlighter.notify(change);
        }
        highlighter.on_content_changed(&doc, sink);
    }
    while highlighter.is_enabled() && highlighter.pending() > 0 {
        highlighter.on_content_changed(&doc, sink);
    }
    doc
}

fn print_usage() {
    println!("lexlight {} - incremental lexical highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: lexlight [OPTIONS] < FILE");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!("      --no-highlight Start with highlighting disabled");
    println!("      --narrow       Only re-highlight when the tracked line is emptied");
    println!("      --plain        Print annotations instead of colored text");
    println!("      --config PATH  Read configuration from PATH");
    println!();
    println!("Set LEXLIGHT_LOG (e.g. LEXLIGHT_LOG=debug) to log to stderr.");
}
