use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use serde_json::json;
use std::{path::PathBuf, time::Instant};

use suffixtree::alphabet::Alphabet;
use suffixtree::loader::{load_text_file, TextFileFormat};
use suffixtree::SuffixIndex;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the text file to index
    #[arg(short, long)]
    path: PathBuf,

    /// Compression of the text file: plain, gzip or zstd
    #[arg(short, long, default_value = "plain")]
    format: TextFileFormat,

    /// Alphabet symbols following the terminal, smallest first [default: A-Z]
    #[arg(short, long, conflicts_with = "infer_alphabet")]
    alphabet: Option<String>,

    /// Use the distinct symbols of the text, in byte order, as the alphabet
    #[arg(long)]
    infer_alphabet: bool,

    /// Terminal symbol appended to the text
    #[arg(short, long, default_value_t = '$')]
    terminal: char,

    /// Print the suffix tree before the query results
    #[arg(long)]
    tree: bool,

    /// Log timings of each build phase (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Patterns to search for
    patterns: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let terminal = Alphabet::terminal_symbol(args.terminal)?;

    let start = Instant::now();
    let text = load_text_file(&args.path, args.format)?;
    info!("Loaded {} symbols in {:?}", text.len(), start.elapsed());

    let alphabet = match (&args.alphabet, args.infer_alphabet) {
        (Some(symbols), _) => Alphabet::new(terminal, symbols.as_bytes())?,
        (None, true) => Alphabet::inferred(&text, terminal)?,
        (None, false) => Alphabet::uppercase(terminal)?,
    };

    let start = Instant::now();
    let index = SuffixIndex::build(&text, alphabet)
        .with_context(|| format!("cannot index {}", args.path.display()))?;
    info!("Built index in {:?}", start.elapsed());

    if args.tree {
        println!("{}", index.render_tree());
    }

    let start = Instant::now();
    let results = index.find_all(&args.patterns[..]);
    for (pattern, positions) in args.patterns.iter().zip(results) {
        println!("{}", json!({ "pattern": pattern, "positions": positions }));
    }
    info!("Answered {} queries in {:?}", args.patterns.len(), start.elapsed());
    Ok(())
}
