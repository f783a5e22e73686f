//! Hobart CLI binary.
//!
//! Command-line interface for the equity-portfolio research helpers.

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use hobart::universe::{Sp500Universe, Universe};
use hobart_data::{MembershipClient, QuoteClient, ReturnConvention, compute_returns};
use hobart_manifest::{PipInstaller, install_requirements, rewrite_requirements};
use hobart_risk::historical_var;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration as StdDuration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: equity-portfolio research helpers", long_about = None)]
#[command(version)]
struct Cli {
    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current index constituents and print them in batches
    Tickers {
        /// Symbols per batch (the last batch holds the remainder)
        #[arg(long, default_value = "50")]
        batch_size: usize,
    },

    /// Historical VaR over recent returns for one or more symbols
    Var {
        /// Stock symbols
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Confidence level on the upper side (0.975 = 2.5th percentile)
        #[arg(long, default_value = "0.975")]
        alpha: f64,

        /// History length in years
        #[arg(long, default_value = "5")]
        years: u32,

        /// Return compounding convention
        #[arg(long, value_enum, default_value = "simple")]
        convention: Convention,
    },

    /// Dependency-manifest tooling
    Requirements {
        #[command(subcommand)]
        command: RequirementsCommands,
    },
}

#[derive(Subcommand)]
enum RequirementsCommands {
    /// Prepend the attribution header and relax exact pins to lower bounds
    Rewrite {
        /// Manifest file
        #[arg(long, default_value = "requirements.txt")]
        file: PathBuf,

        /// Attribution header text, prepended verbatim
        #[arg(long)]
        header: String,
    },

    /// Install the manifest with pip and echo it back
    Install {
        /// Manifest file
        #[arg(long, default_value = "requirements.txt")]
        file: PathBuf,
    },
}

/// CLI-facing return convention.
#[derive(Clone, Copy, ValueEnum)]
enum Convention {
    /// Arithmetic returns
    Simple,
    /// Continuously-compounded returns
    Log,
}

impl From<Convention> for ReturnConvention {
    fn from(value: Convention) -> Self {
        match value {
            Convention::Simple => Self::Simple,
            Convention::Log => Self::Log,
        }
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "error" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let result = match cli.command {
        Commands::Tickers { batch_size } => run_tickers(batch_size).await,
        Commands::Var {
            symbols,
            alpha,
            years,
            convention,
        } => run_var(&symbols, alpha, years, convention.into()).await,
        Commands::Requirements { command } => match command {
            RequirementsCommands::Rewrite { file, header } => run_rewrite(&file, &header),
            RequirementsCommands::Install { file } => run_install(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run_tickers(batch_size: usize) -> Result<(), Box<dyn Error>> {
    let client = MembershipClient::new()?;
    let universe = Sp500Universe::fetch(&client).await?;
    let batches = universe.batches(batch_size)?;

    println!(
        "{} constituents in {} batches of up to {} symbols",
        universe.size(),
        batches.len(),
        batch_size
    );
    for (i, batch) in batches.iter().enumerate() {
        println!("[{:>2}] ({:>3}) {}", i + 1, batch.len(), batch.join(" "));
    }

    Ok(())
}

async fn run_var(
    symbols: &[String],
    alpha: f64,
    years: u32,
    convention: ReturnConvention,
) -> Result<(), Box<dyn Error>> {
    let client = QuoteClient::new()?;
    let end = Utc::now();
    let start = end - Duration::days(i64::from(years) * 365);

    let pb = ProgressBar::new(symbols.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));

    let mut results = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        pb.set_message(format!("Fetching {symbol}..."));
        let prices = client.close_history(symbol, start, end).await?;
        let returns = compute_returns(&prices, convention)?;
        let var = historical_var(returns.column("return")?.as_materialized_series(), alpha)?;
        results.push((symbol, var));
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("Historical VaR ({convention} returns, alpha = {alpha}):");
    for (symbol, var) in results {
        println!("{symbol:<8} {var:>10.6}");
    }

    Ok(())
}

fn run_rewrite(file: &Path, header: &str) -> Result<(), Box<dyn Error>> {
    // A bare --header is usually a single line; make sure the manifest
    // contents start on their own line.
    let header = if header.is_empty() || header.ends_with('\n') {
        header.to_string()
    } else {
        format!("{header}\n")
    };

    rewrite_requirements(file, &header)?;
    println!("Rewrote {}", file.display());

    Ok(())
}

fn run_install(file: &Path) -> Result<(), Box<dyn Error>> {
    let installer = PipInstaller::new();
    let contents = install_requirements(&installer, file)?;

    println!("Requirements installed.");
    print!("{contents}");

    Ok(())
}
