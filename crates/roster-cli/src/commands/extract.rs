//! Extract command - build a contact roster from resume documents.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use roster_core::{
    build_roster, recognizers_from_config, DocumentFormat, DocumentResult, EmitPolicy, LoneFields,
    OutputKind, RosterExtractor,
};

use super::load_config;
use crate::output::{write_roster, DocumentReport, DocumentStatus};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Keep pages that carry only an email or only a phone
    #[arg(long)]
    keep_lone_fields: bool,

    /// When to emit a record for a name
    #[arg(long, value_enum)]
    emit: Option<EmitArg>,

    /// Analyze pages sequentially
    #[arg(long)]
    no_parallel: bool,

    /// Directory holding a token-classification model and tokenizer
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Stop at the first document that cannot be read
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
    Text,
}

impl From<OutputFormat> for OutputKind {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => OutputKind::Xlsx,
            OutputFormat::Csv => OutputKind::Csv,
            OutputFormat::Json => OutputKind::Json,
            OutputFormat::Text => OutputKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmitArg {
    /// Emit as soon as a name has an email or a phone
    FirstContact,
    /// Wait until a name has both an email and a phone
    AllFields,
}

impl From<EmitArg> for EmitPolicy {
    fn from(emit: EmitArg) -> Self {
        match emit {
            EmitArg::FirstContact => EmitPolicy::FirstContact,
            EmitArg::AllFields => EmitPolicy::AllFields,
        }
    }
}

fn extension(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Xlsx => "xlsx",
        OutputKind::Csv => "csv",
        OutputKind::Json => "json",
        OutputKind::Text => "txt",
    }
}

fn kind_from_path(path: &Path) -> Option<OutputKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "xlsx" => Some(OutputKind::Xlsx),
        "csv" => Some(OutputKind::Csv),
        "json" => Some(OutputKind::Json),
        "txt" | "text" => Some(OutputKind::Text),
        _ => None,
    }
}

/// Output format and path from the flags, the output extension and the config.
fn resolve_output(
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    default_kind: OutputKind,
    default_path: &Path,
) -> (OutputKind, PathBuf) {
    match (format.map(OutputKind::from), output) {
        (Some(kind), Some(path)) => (kind, path),
        (None, Some(path)) => (kind_from_path(&path).unwrap_or(default_kind), path),
        (Some(kind), None) => (kind, default_path.with_extension(extension(kind))),
        (None, None) => (default_kind, default_path.with_extension(extension(default_kind))),
    }
}

fn is_supported(path: &Path) -> bool {
    DocumentFormat::from_path(path).is_ok()
}

/// Expand inputs into document paths, in the order they were given.
///
/// Existing files are taken as given so unsupported ones are reported;
/// directories and glob patterns contribute their supported documents in
/// sorted order. A path named twice is kept at its first position.
fn collect_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for input in inputs {
        let path = Path::new(input);
        let expanded = if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            let pattern = if path.is_dir() {
                path.join("*").to_string_lossy().into_owned()
            } else {
                input.clone()
            };

            let mut matched: Vec<PathBuf> = glob(&pattern)?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file() && is_supported(p))
                .collect();
            if matched.is_empty() {
                warn!("No matching documents for {}", input);
            }
            matched.sort();
            matched
        };

        for file in expanded {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.keep_lone_fields {
        config.extraction.lone_fields = LoneFields::Keep;
    }
    if let Some(emit) = args.emit {
        config.extraction.emit = emit.into();
    }
    if args.no_parallel {
        config.extraction.parallel_pages = false;
    }
    if let Some(model_dir) = &args.model_dir {
        config.recognizers.model_dir = model_dir.clone();
        config.recognizers.token_classifier = true;
    }

    let files = collect_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No documents found for: {}", args.inputs.join(", "));
    }

    let (kind, output_path) = resolve_output(
        args.format,
        args.output.clone(),
        config.output.format,
        &config.output.path,
    );

    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        files.len()
    );

    // Recognizers are loaded once and shared by every document.
    let recognizers = recognizers_from_config(&config.recognizers);
    info!("Using {} entity recognizers", recognizers.len());
    let extractor = RosterExtractor::from_config(&config, recognizers);

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut documents: Vec<DocumentResult> = Vec::with_capacity(files.len());
    let mut reports = Vec::with_capacity(files.len());

    for path in &files {
        let file_start = Instant::now();
        match extractor.extract_file(path) {
            Ok(result) => {
                reports.push(DocumentReport {
                    path: path.display().to_string(),
                    status: DocumentStatus::Success,
                    records: result.records.len(),
                    pages: result.pages,
                    warnings: result.warnings.clone(),
                    error: None,
                    processing_time_ms: result.processing_time_ms,
                });
                documents.push(result);
            }
            Err(e) => {
                if args.fail_fast {
                    progress.abandon();
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), e);
                }
                warn!("Failed to process {}: {}", path.display(), e);
                reports.push(DocumentReport {
                    path: path.display().to_string(),
                    status: DocumentStatus::Failed,
                    records: 0,
                    pages: 0,
                    warnings: Vec::new(),
                    error: Some(e.to_string()),
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                });
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    let roster = build_roster(&documents);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_roster(kind, &output_path, &roster, &reports)?;

    print_summary(&reports);
    println!(
        "{} Wrote {} contacts from {} documents to {} in {:?}",
        style("✓").green(),
        roster.len(),
        documents.len(),
        output_path.display(),
        start.elapsed()
    );

    Ok(())
}

fn print_summary(reports: &[DocumentReport]) {
    println!();
    for report in reports.iter().filter(|r| r.status == DocumentStatus::Success) {
        println!(
            "  {} {} ({} pages, {} records)",
            style("✓").green(),
            report.path,
            report.pages,
            report.records
        );
        for warning in &report.warnings {
            println!("      {}", style(warning).yellow());
        }
    }

    let failed: Vec<&DocumentReport> = reports
        .iter()
        .filter(|r| r.status == DocumentStatus::Failed)
        .collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red().bold());
        for report in failed {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                report.path,
                report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_output() {
        let default = Path::new("output/output.xlsx");
        assert_eq!(
            resolve_output(None, None, OutputKind::Xlsx, default),
            (OutputKind::Xlsx, PathBuf::from("output/output.xlsx"))
        );
        assert_eq!(
            resolve_output(Some(OutputFormat::Csv), None, OutputKind::Xlsx, default),
            (OutputKind::Csv, PathBuf::from("output/output.csv"))
        );
        assert_eq!(
            resolve_output(None, Some("roster.json".into()), OutputKind::Xlsx, default),
            (OutputKind::Json, PathBuf::from("roster.json"))
        );
        assert_eq!(
            resolve_output(None, Some("roster.out".into()), OutputKind::Csv, default),
            (OutputKind::Csv, PathBuf::from("roster.out"))
        );
    }

    #[test]
    fn test_collect_inputs_filters_globs_but_keeps_named_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.pdf", "c.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let from_dir = collect_inputs(&[dir.path().display().to_string()]).unwrap();
        let names: Vec<String> = from_dir
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.pdf".to_string()]);

        let named = collect_inputs(&[dir.path().join("c.png").display().to_string()]).unwrap();
        assert_eq!(named.len(), 1);
    }

    #[test]
    fn test_collect_inputs_keeps_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"x").unwrap();

        let inputs = [
            b.display().to_string(),
            a.display().to_string(),
            b.display().to_string(),
        ];
        assert_eq!(collect_inputs(&inputs).unwrap(), vec![b.clone(), a.clone()]);

        // a glob after a named file does not repeat it
        let pattern = dir.path().join("*.txt").display().to_string();
        assert_eq!(
            collect_inputs(&[b.display().to_string(), pattern]).unwrap(),
            vec![b, a]
        );
    }
}
