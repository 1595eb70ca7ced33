use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use ofp_tools::{format_pretty, format_schema_table, inspect_stream, schema_rows, FrameReport};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "ofp-tools",
    version,
    about = "OpenFlow message inspection tools"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode every message in a dump file or directory of dumps.
    Inspect {
        /// Path to the raw message bytes.
        dump_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected dumps.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected dumps (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// List registered message types.
    Schemas {
        /// Only list one wire version.
        #[arg(long)]
        version: Option<u8>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let registry = catalog::registry().context("build message registry")?;

    match cli.command {
        Command::Inspect {
            dump_path,
            glob,
            sort,
            limit,
            format,
        } => {
            if dump_path.is_dir() {
                let entries = collect_dump_entries(&dump_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let reports = inspect_file(registry, &entry.path)?;
                    if matches!(format, OutputFormat::Pretty) {
                        println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    }
                    print_reports(&reports, format)?;
                }
            } else {
                let reports = inspect_file(registry, &dump_path)?;
                print_reports(&reports, format)?;
            }
        }
        Command::Schemas { version, format } => {
            let rows = schema_rows(registry, version)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&rows).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => print!("{}", format_schema_table(&rows)),
            }
        }
    }
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn inspect_file(registry: &wire::Registry, path: &Path) -> Result<Vec<FrameReport>> {
    let bytes = fs::read(path).with_context(|| format!("read dump {}", path.display()))?;
    let reports = inspect_stream(registry, &bytes, &wire::Limits::default());
    let failed = reports.iter().filter(|report| !report.is_ok()).count();
    tracing::info!(
        path = %path.display(),
        messages = reports.len(),
        failed,
        "inspected dump"
    );
    Ok(reports)
}

fn print_reports(reports: &[FrameReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reports).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                print!("{}", format_pretty(report));
            }
        }
    }
    Ok(())
}

struct DumpEntry {
    path: PathBuf,
    size: u64,
}

fn collect_dump_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<DumpEntry>> {
    let mut entries = Vec::new();
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(DumpEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<DumpEntry>, sort: Option<InspectSort>) -> Vec<DumpEntry> {
    if let Some(InspectSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}
