mod cli;
mod terminal;

use tubeprep::{
    config,
    conversion::{
        ConversionOrchestrator, ConversionSettings, ConversionStatus, LogObserver, SkipReason,
    },
    scanner::{self, FileGrouper},
};
use tubeprep_av::{FfmpegToolkit, MediaToolkit, ToolRegistry};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tubeprep=trace,tubeprep_av=debug,tubeprep_common=debug".to_string()
        } else {
            "tubeprep=info,tubeprep_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Convert { dir, yes, dry_run } => convert_dir(&dir, config_path, yes, dry_run),
        Commands::Scan { dir, json } => scan_dir(&dir, config_path, json),
        Commands::Check { dir } => check_dir(&dir, config_path),
        Commands::Validate { dir } => validate_dir(&dir, config_path),
        Commands::Probe { file, json } => probe_file(&file, config_path, json),
        Commands::CheckTools => check_tools(config_path),
        Commands::Version => {
            println!("tubeprep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn toolkit(config: &config::Config) -> FfmpegToolkit {
    FfmpegToolkit::new(ToolRegistry::discover(&config.tools))
}

fn scan(dir: &Path, config: &config::Config) -> Result<Vec<scanner::MediaItem>> {
    FileGrouper::new(config.extensions.clone()).scan_directory(dir)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn convert_dir(dir: &Path, config_path: Option<&Path>, yes: bool, dry_run: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !dry_run && !yes {
        if !confirm(&format!(
            "Convert every video in {:?}? Original media files will be deleted.",
            dir
        ))? {
            println!("Aborted.");
            return Ok(());
        }
        if !confirm("Have you backed up this directory?")? {
            println!("Aborted. Back up the directory first.");
            return Ok(());
        }
    }

    let partition = scanner::partition(scan(dir, &config)?);
    for item in &partition.orphans {
        println!("Orphan {}: files present without media", item.id);
    }
    for item in &partition.missing {
        println!("Missing {}: no media file", item.id);
    }

    let settings = ConversionSettings::from(&config.conversion).with_dry_run(dry_run);
    let orchestrator = ConversionOrchestrator::new(settings, Arc::new(toolkit(&config)));

    let report = if dry_run {
        orchestrator.run(partition.usable, &mut LogObserver::default())?
    } else {
        orchestrator.run(partition.usable, &mut terminal::BarObserver::default())?
    };

    if dry_run {
        for result in &report.results {
            if result.status == ConversionStatus::Skipped(SkipReason::DryRun) {
                println!("[DRY RUN] {}", result.id);
                for output in &result.outputs {
                    println!("  -> {}", output.display());
                }
            } else {
                println!("[DRY RUN] {}: {:?}", result.id, result.status);
            }
        }
    }

    println!("\n{}", report.summary);
    for failure in report.failures() {
        if let Some(e) = &failure.error {
            println!("  {} failed during {}: {}", failure.id, failure.stage, e);
        }
    }

    if report.summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

fn scan_dir(dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let items = scan(dir, &config)?;

    if json {
        let entries: Vec<_> = items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "status": scanner::classify(item),
                    "item": item,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for item in &items {
        println!("{} [{}]", item.id, scanner::classify(item));
        for path in item.paths() {
            println!("  {}", path.display());
        }
    }
    println!("\n{} items", items.len());

    Ok(())
}

fn check_dir(dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let items = scan(dir, &config)?;
    let problems = scanner::import_problems(&items);

    if problems.is_empty() {
        println!("All videos have the necessary files");
        return Ok(());
    }

    println!("Videos missing files:");
    for problem in &problems {
        println!("  {}", problem);
    }
    std::process::exit(1);
}

fn validate_dir(dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let toolkit = toolkit(&config);
    toolkit
        .tools()
        .require(tubeprep_av::tools::FFPROBE)
        .context("ffprobe is required for validation")?;

    let items = scan(dir, &config)?;
    let report = scanner::validate_media(&toolkit, &items);

    println!("{} valid media files", report.valid.len());
    for path in &report.invalid {
        println!("✗ invalid: {}", path.display());
    }
    for id in &report.no_media {
        println!("✗ no media: {}", id);
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let report = toolkit(&config).probe(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", report.file_path.display());
    if let Some(ref container) = report.container {
        println!("Container: {}", container);
    }
    if let Some(ref duration) = report.duration {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let hours = mins / 60;
        println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
    }

    println!("\nStreams: {}", report.streams.len());
    for stream in &report.streams {
        print!("  [{}] {} {}", stream.index, stream.codec_type, stream.codec_name);
        if let Some(lang) = stream.language() {
            print!(" ({})", lang);
        }
        if let Some(name) = stream.tag("filename") {
            print!(" {}", name);
        }
        println!();
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to convert videos.");
    }

    Ok(())
}
