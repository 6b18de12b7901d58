pub mod check;
pub mod convert;
pub mod watch;

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::transpiler::diagnostics::{Diagnostic, DiagnosticKind};
use crate::transpiler::{convert_with_options, ConversionResult, ConvertOptions};

/// What a PATH argument refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single layout file
    File(PathBuf),
    /// A directory searched recursively for `.xml` files
    Directory(PathBuf),
}

/// Detect whether the target is a layout file or a directory of layouts
pub fn detect_target(target: &str) -> Result<Target> {
    let path = Path::new(target);
    if path.is_dir() {
        return Ok(Target::Directory(path.to_path_buf()));
    }
    if !path.exists() {
        anyhow::bail!("File not found: {}", target);
    }
    if !is_layout_file(path) {
        anyhow::bail!("File must have .xml extension: {}", target);
    }
    Ok(Target::File(path.to_path_buf()))
}

pub fn is_layout_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("xml")
}

/// Every `.xml` file under `dir`, sorted for stable output
pub fn collect_layouts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_layout_file(path))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No .xml files found in {}", dir.display());
    }
    files.sort();
    Ok(files)
}

/// Read and convert one layout file
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<ConversionResult> {
    let source = fs::read_to_string(path)
        .context(format!("Failed to read {}", path.display()))?;
    log::info!("converting {}", path.display());
    Ok(convert_with_options(&source, options))
}

/// File stem used to name batch outputs (`activity_main.xml` -> `activity_main`)
pub fn layout_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("layout")
}

fn label(kind: DiagnosticKind) -> colored::ColoredString {
    match kind {
        DiagnosticKind::Syntax | DiagnosticKind::Limit => "error:".red().bold(),
        DiagnosticKind::Unsupported | DiagnosticKind::Deprecated => "warning:".yellow().bold(),
        DiagnosticKind::Performance => "tip:".cyan().bold(),
        DiagnosticKind::BestPractice | DiagnosticKind::Migration => "suggestion:".blue().bold(),
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("  {} {}", label(diagnostic.kind), diagnostic);
}

/// Print a file's diagnostics to stderr; nothing when it has none
pub fn print_diagnostics(path: &Path, result: &ConversionResult) {
    if result.warnings.is_empty() && result.suggestions.is_empty() {
        return;
    }
    eprintln!("{}", path.display().to_string().bold());
    for diagnostic in result.warnings.iter().chain(result.suggestions.iter()) {
        print_diagnostic(diagnostic);
    }
}
