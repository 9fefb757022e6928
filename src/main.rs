// Mon Oct 19 2026 - Alex

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use xenon_form_recovery::{
    config::Config,
    form::FormType,
    memory::{DumpReader, MemoryContext, MmapDump, RegionMap},
    readers::{discover, DiscoveryReport, Reconstructor},
    scan::{ObjectScanner, ProgressSink},
    structure::{BuildIdentifier, LayoutResolver},
    utils::{format_bytes, format_duration, LoggingUtils},
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Rebuilds game forms from Xbox 360 crash dumps", long_about = None)]
struct Args {
    /// Raw dump image
    dump: PathBuf,

    /// JSON sidecar listing captured regions and module ranges
    #[arg(short, long)]
    regions: Option<PathBuf>,

    /// Build string, e.g. "release" or "debug"
    #[arg(short, long)]
    build: Option<String>,

    /// Comma separated signatures to reconstruct, e.g. NPC_,WEAP,INFO
    #[arg(short, long, value_delimiter = ',')]
    types: Vec<String>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write records here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    threads: Option<usize>,

    /// Append log lines to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output<'a> {
    build: BuildIdentifier,
    #[serde(flatten)]
    report: &'a DiscoveryReport,
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let level = LoggingUtils::level_from_verbosity(args.verbose);
    match &args.log_file {
        Some(path) => {
            if let Err(e) = LoggingUtils::init_logger_with_file(level, path) {
                eprintln!("{} Failed to open log file {}: {}", "[!]".red(), path.display(), e);
                LoggingUtils::init_logger(level, true);
            }
        }
        None if std::env::var_os("RUST_LOG").is_some() => LoggingUtils::init_from_env(level),
        None => LoggingUtils::init_logger(level, true),
    }
}

fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(&args)?;
    let build = config.build_identifier();
    let types = parse_types(&args.types)?;

    eprintln!("{} Loading dump: {}", "[*]".blue(), args.dump.display());
    let dump = MmapDump::open(&args.dump).with_context(|| format!("opening {}", args.dump.display()))?;
    let resolver = match &args.regions {
        Some(path) => RegionMap::from_json_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            eprintln!("{} No region map given, pointers cannot be followed", "[!]".yellow());
            RegionMap::empty()
        }
    };
    eprintln!(
        "{} {} dump, {} region(s), {} module range(s), {} build",
        "[+]".green(),
        format_bytes(dump.len()),
        resolver.regions().len(),
        resolver.modules().len(),
        build
    );

    let ctx = MemoryContext::new(Arc::new(dump), Arc::new(resolver))
        .with_max_string_length(config.limits.max_string_length);
    let reconstructor = Reconstructor::new(&ctx, build, config.limits.clone());
    let scanner = ObjectScanner::new(config.scan.clone());

    let progress_bar = (config.enable_progress_bars && !args.no_progress).then(|| {
        let pb = ProgressBar::new(1000);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Scanning...");
        pb
    });
    let sink: ProgressSink<'_> = &|fraction: f64| {
        if let Some(pb) = &progress_bar {
            pb.set_position((fraction * 1000.0) as u64);
        }
    };

    let report = discover(&scanner, &reconstructor, &types, Some(sink));
    if let Some(pb) = &progress_bar {
        pb.finish_with_message("done");
    }

    print_summary(&report);
    write_output(&Output { build, report: &report }, config.output_file.as_ref())?;

    eprintln!(
        "{} Finished in {}",
        "[+]".green(),
        format_duration(start_time.elapsed())
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(build) = &args.build {
        config = config.with_build(build.clone());
    }
    if let Some(threads) = args.threads {
        config = config.with_max_threads(threads);
    }
    if let Some(output) = &args.output {
        config = config.with_output_file(output.clone());
    }
    if let Err(e) = config.validate() {
        bail!("invalid configuration: {}", e);
    }
    Ok(config)
}

/// Every type with a reader when none are named.
fn parse_types(names: &[String]) -> Result<Vec<FormType>> {
    if names.is_empty() {
        return Ok(FormType::ALL
            .iter()
            .copied()
            .filter(|t| LayoutResolver::baseline_size(*t).is_some())
            .collect());
    }
    names
        .iter()
        .map(|name| FormType::from_signature(name).with_context(|| format!("unknown form type '{}'", name)))
        .collect()
}

fn print_summary(report: &DiscoveryReport) {
    let summary = &report.summary;
    eprintln!();
    eprintln!("{}", "Reconstruction summary".cyan().bold());
    eprintln!("{}", "=".repeat(40).cyan());
    eprintln!("  Scanned:     {}", format_bytes(summary.bytes_scanned));
    eprintln!("  Groups:      {}{}", summary.groups, if summary.used_regions { "" } else { " (whole file)" });
    eprintln!("  Candidates:  {}", summary.candidates);
    eprintln!("  Rejected:    {}", report.rejected);
    eprintln!();

    for (form_type, count) in report.records.counts_by_type() {
        eprintln!("  {:<6} {:>8}", form_type.signature().yellow(), count.to_string().green());
    }
    eprintln!("  {:<6} {:>8}", "total".bold(), report.records.len().to_string().green().bold());
    eprintln!();
}

fn write_output(output: &Output<'_>, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, output)?;
            writer.flush()?;
            eprintln!("{} Records saved to: {}", "[+]".green(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, output)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
