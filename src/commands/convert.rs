use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::commands::{collect_layouts, convert_file, detect_target, layout_stem, print_diagnostics, Target};
use crate::config::{self, Config};
use crate::transpiler::export::{file_name_for, function_name_for, wrap_for_export};
use crate::transpiler::ConvertOptions;

/// Default output directory for batch conversion
pub const DEFAULT_OUT_DIR: &str = "compose-out";

pub struct ConvertArgs<'a> {
    pub path: &'a str,
    pub out: Option<&'a str>,
    pub package: Option<&'a str>,
    pub no_package: bool,
    pub name: Option<&'a str>,
}

/// Convert one layout (to stdout or `--out`) or a directory of layouts
pub fn execute(config: &Config, args: &ConvertArgs) -> Result<()> {
    let package = resolve_package(config, args)?;

    match detect_target(args.path)? {
        Target::File(path) => execute_single_file(config, args, &path, package.as_deref()),
        Target::Directory(dir) => {
            if args.name.is_some() {
                anyhow::bail!("--name only applies to a single layout file");
            }
            let out_dir = PathBuf::from(args.out.unwrap_or(DEFAULT_OUT_DIR));
            execute_directory(config, &dir, &out_dir, package.as_deref())
        }
    }
}

/// `None` when the package line should be omitted
fn resolve_package(config: &Config, args: &ConvertArgs) -> Result<Option<String>> {
    if args.no_package {
        return Ok(None);
    }
    let package = args.package.unwrap_or(&config.export.package);
    config::validate_package_name(package)?;
    Ok(Some(package.to_string()))
}

fn execute_single_file(
    config: &Config,
    args: &ConvertArgs,
    path: &Path,
    package: Option<&str>,
) -> Result<()> {
    let mut options = config.to_options();
    if let Some(name) = args.name {
        config::validate_function_name(name)?;
        options.function_name = name.to_string();
    }

    let result = convert_file(path, &options)?;
    print_diagnostics(path, &result);
    let kotlin = wrap_for_export(&result, package);

    match args.out {
        Some(out) => {
            let file_name = match args.name {
                Some(name) => format!("{}.kt", name),
                None => config.export.file_name.clone(),
            };
            let target = Path::new(out).join(file_name);
            write_output(&target, &kotlin)?;
            println!("   {} {} -> {}", "Converted".green().bold(), path.display(), target.display());
        }
        None => print!("{}", kotlin),
    }

    if result.is_failure() {
        anyhow::bail!("{} could not be converted", path.display());
    }
    Ok(())
}

fn execute_directory(config: &Config, dir: &Path, out_dir: &Path, package: Option<&str>) -> Result<()> {
    let start = Instant::now();
    let layouts = collect_layouts(dir)?;
    let base_options = config.to_options();

    let pb = ProgressBar::new(layouts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.dim} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut failed = Vec::new();
    for layout in &layouts {
        let stem = layout_stem(layout);
        pb.set_message(stem.to_string());

        let options = ConvertOptions {
            function_name: function_name_for(stem),
            ..base_options.clone()
        };
        let result = convert_file(layout, &options)?;
        pb.suspend(|| print_diagnostics(layout, &result));
        if result.is_failure() {
            failed.push(layout.display().to_string());
        }

        let target = output_path(dir, layout, out_dir);
        write_output(&target, &wrap_for_export(&result, package))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "   {} {} layout(s) into {} in {:.2}s",
        "Converted".green().bold(),
        layouts.len() - failed.len(),
        out_dir.display(),
        start.elapsed().as_secs_f64()
    );

    if !failed.is_empty() {
        for file in &failed {
            eprintln!("  {} - could not be parsed", file);
        }
        anyhow::bail!("{} layout(s) failed to convert", failed.len());
    }
    Ok(())
}

/// Mirror the layout's directory below `root` inside `out_dir`, naming
/// the file after its stem (`res/layout/activity_main.xml` ->
/// `out/layout/ActivityMainScreen.kt`)
pub fn output_path(root: &Path, layout: &Path, out_dir: &Path) -> PathBuf {
    let relative_dir = layout
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));
    out_dir.join(relative_dir).join(file_name_for(layout_stem(layout)))
}

pub fn write_output(target: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }
    fs::write(target, contents).context(format!("Failed to write {}", target.display()))?;
    log::debug!("wrote {}", target.display());
    Ok(())
}
