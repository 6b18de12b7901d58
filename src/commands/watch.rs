use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::convert::{output_path, write_output};
use crate::commands::{collect_layouts, convert_file, detect_target, is_layout_file, layout_stem, print_diagnostics, Target};
use crate::config::Config;
use crate::transpiler::export::{function_name_for, wrap_for_export};
use crate::transpiler::ConvertOptions;

/// Convert the target now and again on every change until Ctrl-C
pub fn execute(config: &Config, target: &str, out: Option<&str>) -> Result<()> {
    let (root, watch_path, mode) = match detect_target(target)? {
        Target::File(path) => {
            let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (root, path, RecursiveMode::NonRecursive)
        }
        Target::Directory(dir) => (dir.clone(), dir, RecursiveMode::Recursive),
    };
    let session = WatchSession {
        config,
        root,
        out_dir: out.map(PathBuf::from),
        package: Some(config.export.package.clone()),
    };

    // Initial conversion
    let initial = if watch_path.is_dir() {
        collect_layouts(&watch_path)?
    } else {
        vec![watch_path.clone()]
    };
    for layout in &initial {
        session.run(layout);
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;
    watcher.watch(&watch_path, mode)?;

    println!("{}", "   Watching for changes... (Ctrl-C to quit)".green().bold());

    while running.load(Ordering::SeqCst) {
        let event = match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let mut changed = changed_layouts(&event);
        // Editors emit bursts of events per save
        while let Ok(more) = rx.try_recv() {
            changed.extend(changed_layouts(&more));
        }
        changed.sort();
        changed.dedup();

        for layout in changed.iter().filter(|p| p.exists()) {
            println!("\nChange detected in {}", layout.display());
            session.run(layout);
        }
    }

    println!("\n   Exiting watch mode");
    Ok(())
}

struct WatchSession<'a> {
    config: &'a Config,
    root: PathBuf,
    out_dir: Option<PathBuf>,
    package: Option<String>,
}

impl WatchSession<'_> {
    /// Convert one layout, reporting errors instead of stopping the watch
    fn run(&self, layout: &Path) {
        let start = Instant::now();
        match self.convert(layout) {
            Ok(()) => println!(
                "   {} `{}` in {}ms",
                "Converted".green().bold(),
                layout.display(),
                format!("{}", start.elapsed().as_millis()).cyan()
            ),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    }

    fn convert(&self, layout: &Path) -> Result<()> {
        let options = ConvertOptions {
            function_name: function_name_for(layout_stem(layout)),
            ..self.config.to_options()
        };
        let result = convert_file(layout, &options)?;
        print_diagnostics(layout, &result);
        let kotlin = wrap_for_export(&result, self.package.as_deref());

        match &self.out_dir {
            Some(out_dir) => write_output(&output_path(&self.root, layout, out_dir), &kotlin)?,
            None => println!("{}", kotlin),
        }

        if result.is_failure() {
            anyhow::bail!("{} could not be converted", layout.display());
        }
        Ok(())
    }
}

/// Layout files touched by a create or modify event
fn changed_layouts(event: &Event) -> Vec<PathBuf> {
    use notify::EventKind::*;

    match event.kind {
        Modify(_) | Create(_) => event
            .paths
            .iter()
            .filter(|p| is_layout_file(p))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}
