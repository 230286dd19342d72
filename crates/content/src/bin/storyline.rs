// ABOUTME: CLI binary for the storyline content normalizer.
// ABOUTME: Reads story content from a file or stdin and prints sanitized HTML, plain text, or JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use storyline_content::{
    OutputFormat, SanitizedStory, Sanitizer, DEFAULT_EXCERPT_LENGTH, DEFAULT_WORDS_PER_MINUTE,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyline")]
#[command(about = "Normalize story content into clean HTML")]
struct Args {
    /// File to read (default: stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output format: html (default), text/txt, json
    #[arg(short = 'f', long = "format", default_value = "html")]
    format: String,

    /// Reading speed used for the reading-time estimate
    #[arg(long = "wpm", default_value_t = DEFAULT_WORDS_PER_MINUTE)]
    wpm: u32,

    /// Maximum excerpt length in characters
    #[arg(long = "excerpt-length", default_value_t = DEFAULT_EXCERPT_LENGTH)]
    excerpt_length: usize,

    /// Reject input larger than this many bytes
    #[arg(long = "max-bytes")]
    max_bytes: Option<usize>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Render the story in the requested format.
fn format_output(story: &SanitizedStory, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(story.content.clone()),
        OutputFormat::Text => Ok(story.plain_text.clone()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(story).context("serializing story")
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut builder = Sanitizer::builder()
        .words_per_minute(args.wpm)
        .excerpt_length(args.excerpt_length);
    if let Some(limit) = args.max_bytes {
        builder = builder.max_input_bytes(limit);
    }
    let sanitizer = builder.build();

    let content = read_input(args.input.as_ref())?;
    let format = OutputFormat::from(args.format.as_str());
    debug!(bytes = content.len(), %format, "read input");

    let start = Instant::now();
    let story = sanitizer
        .prepare(&content)
        .context("sanitizing content")?;
    let elapsed = start.elapsed();

    let output_str = format_output(&story, format)?;
    match &args.output {
        Some(path) => fs::write(path, &output_str)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", output_str),
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
