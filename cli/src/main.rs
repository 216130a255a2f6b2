//! Linkrank CLI — analyze a directory of linked documents, or generate one
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); the report goes to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use linkrank::corpus::{generate, write_to_dir};
use linkrank::{AnalysisConfig, AnalysisReport, Analyzer, DirectoryCorpus, LinkPolicy, SyntheticConfig};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkrank", version, about = "Link graph statistics and PageRank for HTML corpora")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the link graph of a directory and rank its documents
    Analyze {
        /// Directory holding the documents
        dir: PathBuf,

        /// YAML or JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Prefix stripped from handles and link targets
        #[arg(long)]
        root: Option<String>,

        /// Document file extension
        #[arg(long)]
        extension: Option<String>,

        /// PageRank damping factor
        #[arg(long)]
        damping: Option<f64>,

        /// Convergence threshold (Euclidean distance between passes)
        #[arg(long)]
        epsilon: Option<f64>,

        /// Iteration cap for the solver
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Entries in each ranked list
        #[arg(long)]
        top_k: Option<usize>,

        /// Worker threads for graph construction
        #[arg(long)]
        workers: Option<usize>,

        /// Fail on the first link that does not resolve to a document
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Write a deterministic synthetic corpus
    Generate {
        /// Number of files
        #[arg(short = 'n', long, default_value_t = 10_000)]
        num_files: usize,

        /// Maximum number of links per file (exclusive)
        #[arg(short = 'm', long, default_value_t = 250)]
        max_refs: usize,

        /// Output directory
        #[arg(short = 'd', long, default_value = "data")]
        directory: PathBuf,

        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            dir,
            config,
            root,
            extension,
            damping,
            epsilon,
            max_iterations,
            top_k,
            workers,
            strict,
            format,
        } => load_config(config)
            .map(|mut cfg| {
                if let Some(root) = root {
                    cfg.corpus_root = root;
                }
                if let Some(extension) = extension {
                    cfg.extension = extension;
                }
                if let Some(d) = damping {
                    cfg.pagerank.damping_factor = d;
                }
                if let Some(e) = epsilon {
                    cfg.pagerank.tolerance = e;
                }
                if let Some(cap) = max_iterations {
                    cfg.pagerank.max_iterations = cap;
                }
                if let Some(k) = top_k {
                    cfg.top_k = k;
                }
                if workers.is_some() {
                    cfg.workers = workers;
                }
                if strict {
                    cfg.link_policy = LinkPolicy::Abort;
                }
                cfg
            })
            .and_then(|cfg| run_analyze(dir, cfg, &format)),
        Commands::Generate {
            num_files,
            max_refs,
            directory,
            seed,
        } => run_generate(num_files, max_refs, directory, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn run_analyze(dir: PathBuf, config: AnalysisConfig, format: &OutputFormat) -> Result<()> {
    let corpus = DirectoryCorpus::new(&dir, config.extension.clone());
    let analyzer = Analyzer::new(config).context("invalid configuration")?;
    let report = analyzer
        .run(&corpus)
        .with_context(|| format!("analyzing {}", dir.display()))?;

    if !report.pagerank.converged {
        warn!(
            "Ranking is a best-effort estimate: no convergence within {} iterations",
            report.pagerank.max_iterations
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Table => print_tables(&report),
    }

    Ok(())
}

fn run_generate(num_files: usize, max_refs: usize, directory: PathBuf, seed: u64) -> Result<()> {
    let config = SyntheticConfig {
        num_files,
        max_refs,
        seed,
        ..Default::default()
    };
    println!("Number of files: {}", num_files);
    println!("Maximum number of references per file: {}", max_refs);

    let documents = generate(&config);
    write_to_dir(&directory, &documents)
        .with_context(|| format!("writing corpus to {}", directory.display()))?;
    Ok(())
}

fn print_tables(report: &AnalysisReport) {
    println!(
        "{} documents, {} links, {} skipped links",
        report.documents, report.links, report.skipped_links
    );

    let mut stats = Table::new();
    stats.set_content_arrangement(ContentArrangement::Dynamic);
    stats.set_header(vec!["", "Incoming", "Outgoing"]);
    let (inc, out) = (&report.incoming, &report.outgoing);
    stats.add_row(vec!["Average".to_string(), format!("{:.4}", inc.mean), format!("{:.4}", out.mean)]);
    stats.add_row(vec!["Median".to_string(), format!("{:.4}", inc.median), format!("{:.4}", out.median)]);
    stats.add_row(vec!["Max".to_string(), inc.max.to_string(), out.max.to_string()]);
    stats.add_row(vec!["Min".to_string(), inc.min.to_string(), out.min.to_string()]);
    for (i, (a, b)) in inc.quintiles.iter().zip(out.quintiles.iter()).enumerate() {
        stats.add_row(vec![format!("P{}", (i + 1) * 20), format!("{:.4}", a), format!("{:.4}", b)]);
    }
    println!("{}", stats);

    let mut ranks = Table::new();
    ranks.set_content_arrangement(ContentArrangement::Dynamic);
    ranks.set_header(vec!["Page", "Handle", "Score"]);
    for page in &report.top_pages {
        ranks.add_row(vec![page.id.to_string(), page.handle.clone(), format!("{:.6}", page.score)]);
    }
    println!("{}", ranks);

    let mut degrees = Table::new();
    degrees.set_content_arrangement(ContentArrangement::Dynamic);
    degrees.set_header(vec!["Most linked-to", "In", "Most linking", "Out"]);
    for (inc, out) in report.top_incoming.iter().zip(report.top_outgoing.iter()) {
        degrees.add_row(vec![
            inc.handle.clone(),
            inc.degree.to_string(),
            out.handle.clone(),
            out.degree.to_string(),
        ]);
    }
    println!("{}", degrees);

    println!(
        "PageRank: {} iterations, converged: {}, delta {:.3e}",
        report.pagerank.iterations, report.pagerank.converged, report.pagerank.delta
    );
    println!("Time Elapsed: {:.2} seconds", report.elapsed_ms as f64 / 1000.0);
}
