use clap::{Parser, Subcommand};
use colored::Colorize;
use xml2compose::commands;
use xml2compose::commands::check::OutputFormat;
use xml2compose::config;

#[derive(Parser)]
#[command(name = "xml2compose")]
#[command(about = "Convert Android XML layouts into Jetpack Compose code", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (default: ./xml2compose.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a layout file, or every .xml file under a directory
    Convert {
        /// Path to an .xml layout or a directory of layouts
        path: String,
        /// Write .kt files into this directory instead of stdout
        #[arg(long)]
        out: Option<String>,
        /// Package for the generated file (default from config: com.example.app.ui)
        #[arg(long)]
        package: Option<String>,
        /// Omit the package declaration (for pasting into existing files)
        #[arg(long)]
        no_package: bool,
        /// Name of the generated composable function (single file only)
        #[arg(long)]
        name: Option<String>,
    },
    /// Report warnings and suggestions without writing code
    Check {
        /// Path to an .xml layout or a directory of layouts
        path: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Watch layouts and convert them again whenever they change
    Watch {
        /// Path to an .xml layout or a directory of layouts
        path: String,
        /// Write .kt files into this directory instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
}

fn setup_logging(verbose_count: u8) {
    let log_level = match verbose_count {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::from_default_env();
    // RUST_LOG wins when set
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log_level);
    }
    builder.format_timestamp_secs().init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = config::load_or_default(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Convert { path, out, package, no_package, name } => {
                let args = commands::convert::ConvertArgs {
                    path: &path,
                    out: out.as_deref(),
                    package: package.as_deref(),
                    no_package,
                    name: name.as_deref(),
                };
                commands::convert::execute(&config, &args)
            }
            Commands::Check { path, format } => {
                commands::check::execute(&config, &path, format)
            }
            Commands::Watch { path, out } => {
                commands::watch::execute(&config, &path, out.as_deref())
            }
        }
    });

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
