#![allow(clippy::doc_markdown)]
//! `taxodepth` CLI - depth-aware taxonomy term matching
//!
//! Usage:
//!   `taxodepth expand ./terms.csv --depth=-1 fruit`
//!   `taxodepth predicate ./terms.csv --depth 2 --field node.tid 12 14`
//!   `taxodepth sql --depth 2 --alias node 12`
//!   `taxodepth config`

mod import;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use taxodepth_core::handler::QueryContext;
use taxodepth_core::{
    expand_report, membership_predicate, FilterOptions, HierarchyStore, LoggingConfig, TaxoConfig,
    TermDepthFilter, TermId,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "taxodepth")]
#[command(
    author,
    version,
    about = "taxodepth CLI - depth-aware taxonomy term matching"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "taxodepth.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for expansion results
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand terms through a hierarchy file
    Expand {
        /// Hierarchy file (CSV or JSONL)
        hierarchy: PathBuf,

        /// Hierarchy depth: positive for ancestors, negative for descendants
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Selected terms
        #[arg(required = true)]
        terms: Vec<TermId>,
    },

    /// Print the membership condition for the selected terms as JSON
    Predicate {
        /// Hierarchy file (CSV or JSONL)
        hierarchy: PathBuf,

        /// Hierarchy depth: positive for ancestors, negative for descendants
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i32>,

        /// Field the condition tests (defaults to `filter.real_field`)
        #[arg(long)]
        field: Option<String>,

        /// Selected terms
        #[arg(required = true)]
        terms: Vec<TermId>,
    },

    /// Render the relational subquery for the selected terms
    Sql {
        /// Hierarchy depth: positive for ancestors, negative for descendants
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i32>,

        /// Table alias the condition attaches to
        #[arg(short, long, default_value = "node")]
        alias: String,

        /// Selected terms
        #[arg(required = true)]
        terms: Vec<TermId>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "compact" {
        registry.with(layer.compact()).init();
    } else {
        registry.with(layer).init();
    }
}

fn load_store(path: &Path) -> anyhow::Result<HierarchyStore> {
    let (store, stats) = import::load_hierarchy(path)?;
    info!(
        path = %path.display(),
        rows = stats.rows,
        edges = stats.edges,
        roots = stats.roots,
        "hierarchy loaded"
    );
    if stats.duplicates > 0 {
        warn!(duplicates = stats.duplicates, "duplicate hierarchy rows ignored");
    }
    Ok(store)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TaxoConfig::load_from_path(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.validate()?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Expand {
            hierarchy,
            depth,
            format,
            terms,
        } => {
            let depth = depth.unwrap_or(config.filter.default_depth);
            let store = load_store(&hierarchy)?;
            let (matched, stats) = expand_report(&terms, depth, &store)?;
            info!(depth, matched = matched.len(), "expansion finished");

            match format {
                OutputFormat::Table => output::print_table(&terms, &matched, &stats),
                OutputFormat::Json => output::print_json(depth, &matched, &stats)?,
            }
        }
        Commands::Predicate {
            hierarchy,
            depth,
            field,
            terms,
        } => {
            let depth = depth.unwrap_or(config.filter.default_depth);
            let field = field.unwrap_or_else(|| config.filter.real_field.clone());
            let store = load_store(&hierarchy)?;
            let (matched, _) = expand_report(&terms, depth, &store)?;

            let condition = membership_predicate(&field, &terms, &matched);
            println!("{}", serde_json::to_string_pretty(&condition)?);
        }
        Commands::Sql {
            depth,
            alias,
            terms,
        } => {
            let options = FilterOptions::from_config(&config.filter)
                .with_depth(depth.unwrap_or(config.filter.default_depth))
                .with_relationship(alias);
            let filter = TermDepthFilter::new(terms, options);
            let ctx = QueryContext::new(config.schema.index_table.clone());

            let clause = filter
                .subquery(&ctx, &config.schema)
                .context("No table alias to attach the condition to")?;
            println!("{}", clause.to_sql());
            println!("{}", serde_json::to_string(&clause.subquery.params)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
