use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{collect_layouts, convert_file, detect_target, print_diagnostics, Target};
use crate::config::Config;
use crate::transpiler::diagnostics::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Per-file entry of `check --format json`
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub success: bool,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<Diagnostic>,
}

/// Convert every layout and report diagnostics only; fails when any
/// layout cannot be parsed
pub fn execute(config: &Config, target: &str, format: OutputFormat) -> Result<()> {
    let files = match detect_target(target)? {
        Target::File(path) => vec![path],
        Target::Directory(dir) => collect_layouts(&dir)?,
    };

    let reports = check_files(config, &files)?;
    let failed = reports.iter().filter(|r| !r.success).count();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
            let suggestions: usize = reports.iter().map(|r| r.suggestions.len()).sum();
            println!(
                "   {} {} file(s): {} warning(s), {} suggestion(s)",
                "Checked".green().bold(),
                reports.len(),
                warnings,
                suggestions
            );
        }
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) failed to parse", failed);
    }
    Ok(())
}

fn check_files(config: &Config, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let options = config.to_options();
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let result = convert_file(path, &options)?;
        print_diagnostics(path, &result);
        reports.push(FileReport {
            file: path.display().to_string(),
            success: !result.is_failure(),
            warnings: result.warnings,
            suggestions: result.suggestions,
        });
    }
    Ok(reports)
}
