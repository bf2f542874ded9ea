//! splitmark CLI application
//!
//! Command-line interface for the splitmark library.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use splitmark::{Config, Segmenter, chunk_texts, read_elements, render_marked_text, segment_files};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splitmark")]
#[command(about = "Plans segmentation markers for word-processor documents")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON); built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan split positions for one document
    Split {
        /// JSON file holding the document's element sequence
        input: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to emit
        #[arg(long, value_enum, default_value_t = Emit::Plan)]
        emit: Emit,
    },

    /// Process many documents in parallel
    Batch {
        /// JSON element files to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the full batch report as JSON to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    /// Split positions and statistics as JSON
    Plan,
    /// Per-chunk text as a JSON array
    Chunks,
    /// The document text with `<!--split-->` markers inserted
    Text,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let segmenter = Segmenter::new(config)?;

    match cli.command {
        Commands::Split {
            input,
            output,
            emit,
        } => split_command(&segmenter, input, output, emit),
        Commands::Batch { inputs, report } => batch_command(&segmenter, inputs, report),
    }
}

fn split_command(
    segmenter: &Segmenter,
    input: PathBuf,
    output: Option<PathBuf>,
    emit: Emit,
) -> anyhow::Result<()> {
    let raw = read_elements(&input).with_context(|| format!("reading {}", input.display()))?;
    let plan = segmenter.segment(&raw);

    let rendered = match emit {
        Emit::Plan => serde_json::to_string_pretty(&plan)?,
        Emit::Chunks => serde_json::to_string_pretty(&chunk_texts(&raw, &plan.splits))?,
        Emit::Text => render_marked_text(&raw, &plan.splits),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("✅ {} -> {}", input.display(), path.display());
            println!("   📊 Splits: {}", plan.stats.split_count);
            println!("   📄 Chunks: {}", plan.stats.chunk_count);
            println!(
                "   📏 Chunk length: min {} / mean {:.0} / max {}",
                plan.stats.min_chunk_length,
                plan.stats.mean_chunk_length,
                plan.stats.max_chunk_length
            );
            if plan.stats.oversized_chunks > 0 {
                println!("   ⚠️  Oversized chunks: {}", plan.stats.oversized_chunks);
            }
            if plan.stats.mid_sentence_splits > 0 {
                println!(
                    "   ⚠️  Mid-sentence splits: {}",
                    plan.stats.mid_sentence_splits
                );
            }
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn batch_command(
    segmenter: &Segmenter,
    inputs: Vec<PathBuf>,
    report_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("📚 Processing {} documents...", inputs.len());

    let report = segment_files(segmenter, &inputs);

    for outcome in &report.files {
        match (&outcome.plan, &outcome.error) {
            (Some(plan), _) => println!(
                "   ✅ {}: {} splits, {} chunks in {:.2}s",
                outcome.path.display(),
                plan.stats.split_count,
                plan.stats.chunk_count,
                outcome.elapsed_secs
            ),
            (None, Some(error)) => {
                eprintln!("   ❌ {}: {}", outcome.path.display(), error)
            }
            (None, None) => {}
        }
    }

    println!("✅ Batch complete!");
    println!("   📊 Succeeded: {}", report.succeeded);
    println!("   ❌ Failed: {}", report.failed);
    println!("   ✂️  Total splits: {}", report.total_splits);

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("   📋 Report: {}", path.display());
    }

    Ok(())
}
