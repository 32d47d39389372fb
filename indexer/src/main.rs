use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hashdex_core::corpus::read_stopwords;
use hashdex_core::{DocScore, IndexConfig, SearchEngine, SearchError, StopWords, Strategy};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Typed at the prompt to leave the interactive loop.
const EXIT_COMMAND: &str = "q";

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index a directory of text files and rank them against queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct CorpusArgs {
    /// Directory holding the documents to index
    #[arg(long, default_value = "docs")]
    docs: PathBuf,
    /// Whitespace-separated stopword file
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Use the built-in English stopword list when no file is given
    #[arg(long, default_value_t = false)]
    english_stopwords: bool,
    /// Collision strategy: chaining, quadratic or linear
    #[arg(long, default_value = "linear")]
    strategy: Strategy,
    /// Initial slot count of every table
    #[arg(long, default_value_t = hashdex_core::config::DEFAULT_CAPACITY)]
    capacity: usize,
    /// Extension of files picked up from the directory
    #[arg(long, default_value = "txt")]
    ext: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one query, or read queries from stdin until `q`
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Run a single query instead of the interactive loop
        #[arg(long)]
        query: Option<String>,
    },
    /// Print index and table statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query } => {
            let engine = build_engine(&corpus)?;
            let mut out = io::stdout().lock();
            match query {
                Some(q) => print_hits(&mut out, &corpus.docs, &engine.search(&q)?),
                None => run_repl(&engine, &corpus.docs, io::stdin().lock(), out),
            }
        }
        Commands::Stats { corpus, json } => {
            let engine = build_engine(&corpus)?;
            print_stats(&mut io::stdout().lock(), &engine, json)
        }
    }
}

fn build_engine(args: &CorpusArgs) -> Result<SearchEngine> {
    let config = IndexConfig { strategy: args.strategy, initial_capacity: args.capacity, extension: args.ext.clone() };
    let stopwords = match &args.stopwords {
        Some(path) => read_stopwords(path, config.strategy)?,
        None if args.english_stopwords => StopWords::english(&config),
        None => StopWords::empty(config.strategy),
    };
    tracing::info!(docs = %args.docs.display(), strategy = %config.strategy, stopwords = stopwords.len(), "building index");
    Ok(SearchEngine::from_directory(config, stopwords, &args.docs)?)
}

fn print_hits<W: Write>(out: &mut W, dir: &Path, hits: &[DocScore]) -> Result<()> {
    if hits.is_empty() {
        writeln!(out, "no matching documents")?;
    }
    for hit in hits {
        writeln!(out, "{}\t{:.6}", dir.join(&hit.document).display(), hit.score)?;
    }
    Ok(())
}

/// Reads one query per line until `q` or end of input. Unknown terms are
/// reported and the loop carries on with the next query.
fn run_repl<R: BufRead, W: Write>(engine: &SearchEngine, dir: &Path, input: R, mut out: W) -> Result<()> {
    write!(out, "search> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query == EXIT_COMMAND {
            break;
        }
        if !query.is_empty() {
            match engine.search(query) {
                Ok(hits) => print_hits(&mut out, dir, &hits)?,
                Err(err @ SearchError::UnknownTerm(_)) => writeln!(out, "{err}")?,
                Err(err) => return Err(err.into()),
            }
        }
        write!(out, "search> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_stats<W: Write>(out: &mut W, engine: &SearchEngine, json: bool) -> Result<()> {
    let stats = engine.stats();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }
    writeln!(out, "documents: {}", stats.documents)?;
    writeln!(out, "terms:     {}", stats.terms)?;
    for (label, t) in [("term table", &stats.term_table), ("doc lengths", &stats.doc_length_table)] {
        writeln!(
            out,
            "{label:<12} strategy={} size={} capacity={} load={:.3} collisions={}",
            t.strategy, t.size, t.capacity, t.load_factor, t.collisions
        )?;
    }
    Ok(())
}
