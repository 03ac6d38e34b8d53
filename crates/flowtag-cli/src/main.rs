use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use flowtag_core::{
    Aggregator, LookupTable, ProtocolRegistry, Report, analyze_flow_log_file, load_lookup_file,
    write_report, write_report_file, write_report_json, write_report_json_file,
};
use glob::glob;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowtag")]
#[command(version)]
#[command(
    about = "Tag version 2 flow log records by destination port/protocol and count them.",
    long_about = None,
    after_help = "Examples:\n  flowtag flow_logs.txt lookup_table.csv output_results.txt\n  flowtag 'logs/*.log' lookup_table.csv --stdout\n  flowtag flow_logs.txt lookup_table.csv report.json --json --pretty"
)]
struct Cli {
    /// Flow log file, or a glob pattern matching exactly one file
    #[arg(default_value = "flow_logs.txt")]
    log: PathBuf,

    /// Lookup table CSV (dstport,protocol,tag); when missing, every record is Untagged
    #[arg(default_value = "lookup_table.csv")]
    lookup: PathBuf,

    /// Output report path (overwritten)
    #[arg(default_value = "output_results.txt")]
    output: PathBuf,

    /// Write the report to stdout instead of the output path
    #[arg(long)]
    stdout: bool,

    /// Write the report as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

/// How far a run got when it did not fail outright.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Complete,
    Partial,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(Outcome::Complete) => ExitCode::SUCCESS,
        Ok(Outcome::Partial) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn run(cli: &Cli) -> Result<Outcome, CliError> {
    let log = resolve_input_path(&cli.log)?;
    if !cli.stdout {
        ensure_distinct_output(&cli.output, &[log.as_path(), cli.lookup.as_path()])?;
    }

    let registry = ProtocolRegistry::new();
    let mut outcome = Outcome::Complete;

    let mut lookup = LookupTable::new();
    if let Err(err) = load_lookup_file(Some(&cli.lookup), &mut lookup) {
        error!(path = %cli.lookup.display(), "failed to read lookup table: {err}");
        outcome = Outcome::Partial;
    }

    let mut aggregator = Aggregator::new();
    if let Err(err) = analyze_flow_log_file(&log, &registry, &lookup, &mut aggregator) {
        error!(path = %log.display(), "failed to process flow log: {err}");
        outcome = Outcome::Partial;
    }

    let report = aggregator.into_report();
    if cli.stdout {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        emit_report(&mut sink, &report, cli.json, cli.pretty)
            .context("failed to write report to stdout")?;
        return Ok(outcome);
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory: {}", parent.display())
            })?;
        }
    }
    let written = if cli.json {
        write_report_json_file(&cli.output, &report, cli.pretty)
    } else {
        write_report_file(&cli.output, &report)
    };
    written.with_context(|| format!("failed to write report: {}", cli.output.display()))?;

    if !cli.quiet {
        eprintln!("OK: report written -> {}", cli.output.display());
    }
    Ok(outcome)
}

fn emit_report<W: Write>(
    sink: &mut W,
    report: &Report,
    json: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    if json {
        write_report_json(sink, report, pretty)?;
    } else {
        write_report(sink, report)?;
    }
    sink.flush()?;
    Ok(())
}

fn ensure_distinct_output(output: &Path, inputs: &[&Path]) -> Result<(), CliError> {
    let Some(output_abs) = absolute_target(output) else {
        return Ok(());
    };
    for input in inputs {
        let Ok(input_abs) = fs::canonicalize(input) else {
            continue;
        };
        if input_abs == output_abs {
            return Err(CliError::new(
                format!(
                    "output path must differ from input: {}",
                    output.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn absolute_target(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok()?,
        _ => fs::canonicalize(".").ok()?,
    };
    Some(parent.join(path.file_name()?))
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid log pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid log pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single flow log file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str("; matches: ");
        message.push_str(&listed);
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
