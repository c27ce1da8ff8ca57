//! wfbench CLI Entry Point
//!
//! Benchmarks every workflow of a run manifest and writes one JSON report per
//! workflow.
//!
//! # Usage
//!
//! ```bash
//! # Benchmark all candidates of a run
//! wfbench candidates.yaml
//!
//! # Custom output directory and run ID
//! wfbench candidates.yaml --output-dir /data/benchmarks --run-id run_0042
//!
//! # Fetch each distinct tool once, 8 workflows at a time
//! wfbench candidates.yaml --dedupe --parallel 8
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use colored::*;
use log::{error, info, warn};

use wfbench::evaluation::{BatchRunner, BatchSummary, RunContext, WorkflowBenchmarkComputer};
use wfbench::registry::{CachedSource, MetadataSource, RegistryClient};
use wfbench::report::{FsReportWriter, ScoringService};
use wfbench::workflow::{load_manifest, validate_run_id};
use wfbench::{BenchConfig, APP_NAME, VERSION};

/// Command-line options parsed from arguments.
#[derive(Debug, Default)]
struct CliOptions {
    manifest_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    run_id: Option<String>,
    max_parallel: Option<usize>,
    dedupe: bool,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Design-time workflow quality benchmarks");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: wfbench [OPTIONS] <MANIFEST>");
    println!();
    println!("Arguments:");
    println!("  <MANIFEST>          Run manifest or single workflow (YAML or JSON)");
    println!();
    println!("Options:");
    println!("  --config PATH       YAML configuration file");
    println!("  --output-dir PATH   Root directory for reports (default: ./benchmarks)");
    println!("  --run-id ID         Run identifier (default: from manifest, else timestamp)");
    println!("  --parallel N        Workflows benchmarked at once (default: CPU count)");
    println!("  --dedupe            Fetch each distinct tool once per run");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Environment:");
    println!("  WFBENCH_TOOL_REGISTRY_URL, WFBENCH_METRICS_REGISTRY_URL,");
    println!("  WFBENCH_TIMEOUT_SECS, WFBENCH_MAX_REQUESTS,");
    println!("  WFBENCH_SCORING_SERVICE (host:port), WFBENCH_OUTPUT_DIR");
    println!();
    println!("Examples:");
    println!("  wfbench candidates.yaml");
    println!("  wfbench candidates.yaml --run-id run_0042 --parallel 8");
}

/// Parses command-line arguments into CLI options.
fn parse_arguments(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 1; // Skip program name

    let value_of = |i: &mut usize, flag: &str| -> Result<String, String> {
        *i += 1;
        args.get(*i)
            .cloned()
            .ok_or_else(|| format!("{} requires an argument", flag))
    };

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--dedupe" => {
                options.dedupe = true;
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--config" => {
                options.config_path = Some(PathBuf::from(value_of(&mut i, arg)?));
            }
            "--output-dir" => {
                options.output_dir = Some(PathBuf::from(value_of(&mut i, arg)?));
            }
            "--run-id" => {
                let run_id = value_of(&mut i, arg)?;
                validate_run_id(&run_id).map_err(|e| e.to_string())?;
                options.run_id = Some(run_id);
            }
            "--parallel" => {
                let value = value_of(&mut i, arg)?;
                let parallel: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid parallel value: {}", value))?;
                if parallel == 0 {
                    return Err("--parallel must be at least 1".to_string());
                }
                options.max_parallel = Some(parallel);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if options.manifest_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                options.manifest_path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    if options.manifest_path.is_none() {
        return Err("Missing <MANIFEST> argument".to_string());
    }

    Ok(options)
}

/// Prints one line per workflow and the run totals.
fn print_summary(summary: &BatchSummary) {
    println!();
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(written) => println!(
                "  {} {} -> {}",
                "✓".green().bold(),
                outcome.workflow_name,
                written.path.display()
            ),
            Err(e) => println!(
                "  {} {}: {}",
                "✗".red().bold(),
                outcome.workflow_name,
                e.to_string().red()
            ),
        }
    }
    println!();

    let totals = format!(
        "{} succeeded, {} failed in {:.2?}",
        summary.succeeded(),
        summary.failed(),
        summary.elapsed
    );
    if summary.all_succeeded() {
        println!("{}", totals.green());
    } else {
        println!("{}", totals.yellow());
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Main application entry point.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let options = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(options.verbose);
    print_banner();

    // Resolve configuration: defaults < file < environment < CLI
    let mut config = BenchConfig::load(options.config_path.as_deref())?;
    if let Some(dir) = options.output_dir {
        config.output_dir = dir;
    }
    if let Some(parallel) = options.max_parallel {
        config.max_parallel_workflows = parallel;
    }
    config.dedupe_fetches |= options.dedupe;
    config.validate()?;

    // Load manifest
    let manifest_path = options.manifest_path.unwrap_or_default();
    info!("Loading manifest: {}", manifest_path.display());
    let manifest = load_manifest(&manifest_path).map_err(|e| {
        error!("Failed to load manifest: {}", e);
        format!(
            "Could not load manifest from '{}': {}",
            manifest_path.display(),
            e
        )
    })?;

    let run_id = options.run_id.or_else(|| manifest.run_id.clone());
    let run = match run_id {
        Some(run_id) => RunContext::new(run_id, manifest.domain_id.clone()),
        None => RunContext::generated(manifest.domain_id.clone()),
    };
    info!(
        "Run '{}': {} workflows, domain '{}'",
        run.run_id,
        manifest.workflows.len(),
        run.domain_id
    );

    // Metadata source
    let client = RegistryClient::new(&config.http, &config.endpoints)?;
    let source: Arc<dyn MetadataSource> = if config.dedupe_fetches {
        info!("Fetch deduplication enabled");
        Arc::new(CachedSource::new(client))
    } else {
        Arc::new(client)
    };

    let mut computer = WorkflowBenchmarkComputer::new(source);
    if let Some(endpoint) = &config.scoring_service {
        info!("Scoring service: {}", endpoint);
        computer = computer.with_scoring_service(ScoringService::new(endpoint, config.timeout())?);
    }

    // Benchmark
    info!("Reports directory: {}", config.output_dir.display());
    let writer = Arc::new(FsReportWriter::new(config.output_dir.clone()));
    let mut runner = BatchRunner::new(computer, writer);
    runner.set_max_parallel(config.max_parallel_workflows);

    let summary = runner
        .run_until(&manifest.workflows, &run, shutdown_signal())
        .await?;

    print_summary(&summary);

    if !summary.all_succeeded() {
        return Err(format!(
            "{} of {} workflows failed",
            summary.failed(),
            summary.outcomes.len()
        )
        .into());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
