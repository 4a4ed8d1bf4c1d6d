use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fs_err as fs;
use hebfix_engine::table::{self, TableHazard, SUBSTITUTIONS};
use hebfix_engine::{discover_html, fix_file, preview_patch, ApplyOptions, DEFAULT_ROOTS};
use hebfix_types::outcome::{FileOutcome, FileStatus, RunSummary};
use hebfix_types::report::{HebfixReport, RunInfo, ToolInfo};
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "hebfix",
    version,
    about = "Repairs mojibake Hebrew text in HTML assets."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a fix pass over the configured roots (the default command).
    Fix(FixArgs),
    /// Print the substitution table.
    Rules(RulesArgs),
}

#[derive(Debug, Default, Parser)]
struct FixArgs {
    /// Root directory to scan; repeatable (default: public, page-creator).
    #[arg(long)]
    root: Vec<Utf8PathBuf>,

    /// Process and report without writing anything; prints a unified diff
    /// for each file that would change.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a hebfix.report.v1 JSON artifact to this path.
    #[arg(long)]
    report_json: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct RulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::Fix(args)) => cmd_fix(args),
        Some(Command::Rules(args)) => cmd_rules(args),
        // Bare `hebfix` keeps the original tool's contract: one fix pass,
        // compiled-in defaults, no arguments needed.
        None => cmd_fix(FixArgs::default()),
    }
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<()> {
    let roots: Vec<Utf8PathBuf> = if args.root.is_empty() {
        DEFAULT_ROOTS.iter().copied().map(Utf8PathBuf::from).collect()
    } else {
        args.root.clone()
    };

    for hazard in table::audit(SUBSTITUTIONS) {
        match hazard {
            // Span detection copes with nested garbled fragments; a corrected
            // text that reintroduces one is a table defect.
            TableHazard::Reintroduces { .. } => warn!("substitution table: {hazard}"),
            TableHazard::Contains { .. } => debug!("substitution table: {hazard}"),
        }
    }

    let started_at = Utc::now();
    let opts = ApplyOptions {
        dry_run: args.dry_run,
    };

    let files = discover_html(&roots).context("discover html files")?;

    let mut results: Vec<FileOutcome> = Vec::with_capacity(files.len());
    let mut summary = RunSummary::default();

    for path in &files {
        println!("processing {path}");
        let outcome = fix_file(path, SUBSTITUTIONS, &opts);
        print_outcome(&outcome, args.dry_run);

        if args.dry_run && outcome.status == FileStatus::Fixed {
            match preview_patch(path, SUBSTITUTIONS) {
                Ok(patch) => print!("{patch}"),
                Err(e) => warn!("could not render diff for {path}: {e}"),
            }
        }

        summary.record(&outcome);
        results.push(outcome);
    }

    println!(
        "fixed {} of {} file(s)",
        summary.files_fixed, summary.files_scanned
    );
    if summary.files_failed > 0 {
        println!("{} file(s) failed; see messages above", summary.files_failed);
    }

    if let Some(path) = &args.report_json {
        let report = build_report(&roots, args.dry_run, started_at, results, summary);
        write_json(path, &report)?;
    }

    Ok(())
}

fn print_outcome(outcome: &FileOutcome, dry_run: bool) {
    for hit in &outcome.hits {
        let (from, to) = match table::substitution(&hit.rule_id) {
            Some(sub) => (preview(sub.garbled), preview(sub.corrected)),
            None => ("?".to_string(), "?".to_string()),
        };
        println!(
            "  {}: {} occurrence(s), '{}' -> '{}'",
            hit.rule_id, hit.occurrences, from, to
        );
    }

    match outcome.status {
        FileStatus::Fixed if dry_run => {
            println!("  dry-run: not written ({} replacements)", outcome.replacements);
        }
        FileStatus::Fixed => {
            println!("  saved {} ({} replacements)", outcome.path, outcome.replacements);
        }
        FileStatus::Clean => println!("  no changes needed"),
        FileStatus::Failed => println!(
            "  error: {}",
            outcome.message.as_deref().unwrap_or("unknown failure")
        ),
    }

    if outcome.residual_markers > 0 {
        println!(
            "  note: {} geresh marker(s) remain that the table does not cover",
            outcome.residual_markers
        );
    }
}

/// First 20 chars, ellipsized, for one-line previews.
fn preview(s: &str) -> String {
    const LIMIT: usize = 20;
    if s.chars().count() <= LIMIT {
        return s.to_string();
    }
    let mut out: String = s.chars().take(LIMIT).collect();
    out.push_str("...");
    out
}

fn build_report(
    roots: &[Utf8PathBuf],
    dry_run: bool,
    started_at: DateTime<Utc>,
    results: Vec<FileOutcome>,
    summary: RunSummary,
) -> HebfixReport {
    let mut report = HebfixReport::new(tool_info());
    report.run = RunInfo {
        run_id: Some(Uuid::new_v4()),
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
        roots: roots.iter().map(|r| r.to_string()).collect(),
    };
    report.dry_run = dry_run;
    report.results = results;
    report.summary = summary;
    report
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "hebfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn cmd_rules(args: RulesArgs) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => {
            println!("Substitution table ({} rules):\n", SUBSTITUTIONS.len());
            println!("  {:<36} GARBLED -> CORRECTED", "ID");
            println!("  {:<36} -------------------", "--");
            for sub in SUBSTITUTIONS {
                println!(
                    "  {:<36} '{}' -> '{}'",
                    sub.id,
                    preview(sub.garbled),
                    preview(sub.corrected)
                );
            }
            println!();
            println!("Run 'hebfix fix' to apply them.");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(SUBSTITUTIONS)?);
        }
    }
    Ok(())
}
