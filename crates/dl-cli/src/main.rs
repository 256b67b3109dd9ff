//! Domain List CLI
//!
//! CLI tool for compiling domain lists into proxy rule sets and inspecting
//! how their includes resolve.

mod config;
mod loader;
mod rules;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use dl_compiler::{resolve, OutputFormat, ResolvedList};
use dl_core::EntryKind;

use crate::config::{Config, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_DIR};

#[derive(Parser)]
#[command(name = "dl-cli")]
#[command(version, about = "Domain list compiler for proxy rule sets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(long, global = true, value_name = "LEVEL", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every list under the data directory into rule files
    Compile {
        /// Path to your custom 'data' directory
        #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_PATH)]
        datapath: PathBuf,

        /// Directory to place all generated files
        #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
        outputdir: PathBuf,

        /// Output type: surge, quantumult or quantumultx
        #[arg(long, value_name = "FORMAT", default_value = "surge")]
        outputformat: OutputFormat,

        /// Report failing lists and continue with the rest
        #[arg(long)]
        keep_going: bool,
    },

    /// Show how lists resolve
    Info {
        /// Path to your custom 'data' directory
        #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_PATH)]
        datapath: PathBuf,

        /// Only show this list
        #[arg(short, long)]
        list: Option<String>,

        /// Print resolved lists as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        cli.log_level.into()
    };
    init_logging(level);

    let result = match cli.command {
        Commands::Compile {
            datapath,
            outputdir,
            outputformat,
            keep_going,
        } => cmd_compile(&Config {
            data_path: datapath,
            output_dir: outputdir,
            format: outputformat,
            keep_going,
        }),
        Commands::Info {
            datapath,
            list,
            json,
        } => cmd_info(&datapath, list.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the command-line level when set.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .format_timestamp(None)
        .init();
}

fn cmd_compile(config: &Config) -> Result<()> {
    let start = Instant::now();
    log::info!("Use domain lists in {}", config.data_path.display());

    let universe = loader::load_universe(&config.data_path)?;
    let stats = rules::compile_universe(&universe, config)?;

    println!(
        "Compiled {} domain lists to '{}' ({})",
        stats.lists,
        config.output_dir.display(),
        config.format
    );
    println!("  Files:    {}", stats.files);
    println!("  Rules:    {}", stats.rules);
    println!("  Skipped:  {} (unsupported by {})", stats.skipped, config.format);
    println!("  Time:     {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    if stats.failed > 0 {
        bail!("{} domain list(s) failed to compile", stats.failed);
    }
    Ok(())
}

fn cmd_info(datapath: &Path, only: Option<&str>, json: bool) -> Result<()> {
    let universe = loader::load_universe(datapath)?;

    let selected: Vec<_> = match only {
        Some(name) => {
            let name = name.to_lowercase();
            let list = universe
                .get(&name)
                .with_context(|| format!("List '{}' not found in '{}'", name, datapath.display()))?;
            vec![list]
        }
        None => universe.lists().collect(),
    };

    let resolved = selected
        .into_iter()
        .map(|list| resolve(list, &universe))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    for list in &resolved {
        print_resolved(list, universe.get(&list.name).map_or(0, |l| l.entries().len()));
    }
    Ok(())
}

fn print_resolved(list: &ResolvedList, source_entries: usize) {
    let count = |kind: EntryKind| list.entries.iter().filter(|e| e.kind == kind).count();

    println!("List: {}", list.name);
    println!("  Source:      {} entries", source_entries);
    println!("  Resolved:    {} entries", list.entries.len());
    println!(
        "  Kinds:       domain={} full={} keyword={} regexp={}",
        count(EntryKind::Domain),
        count(EntryKind::Full),
        count(EntryKind::Keyword),
        count(EntryKind::Regexp)
    );
    if !list.inclusion_keys.is_empty() {
        let keys: Vec<_> = list.inclusion_keys.iter().map(String::as_str).collect();
        println!("  Includes:    {}", keys.join(", "));
    }
    println!();
}
