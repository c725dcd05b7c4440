// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use bracks::app_config::{Config, LogLevel};
use bracks::app_controller::Controller;
use bracks::watcher;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for bracks
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// bracks - bracket shorthand to HTML/EJS
///
/// Converts documents written in the bracks shorthand into regular HTML
/// (.html sources) or EJS templates (.ejs sources).
#[derive(Parser, Debug)]
#[command(name = "bracks")]
#[command(disable_version_flag = true)]
#[command(about = "Convert bracks-style documents to HTML and EJS")]
#[command(long_about = "bracks converts bracks-style documents to regular HTML and EJS.

EXAMPLES:
    bracks -o ./bracks ./views      # Convert every .html/.ejs file once
    bracks -w ./bracks ./views      # Convert, then re-convert on every change
    bracks -v                       # Print the version
    bracks completions bash > bracks.bash

The output path of each file is the part of its path that follows the
'bracks' directory, placed under the target directory.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Parse all files under the bracks directory and write the results to the target directory
    #[arg(short = 'o', num_args = 0..=2, value_names = ["BRACKS_DIR", "TARGET_DIR"], conflicts_with = "watch")]
    once: Option<Vec<PathBuf>>,

    /// Watch the bracks directory and re-convert all files on any change
    #[arg(short = 'w', num_args = 0..=2, value_names = ["BRACKS_DIR", "TARGET_DIR"])]
    watch: Option<Vec<PathBuf>>,

    /// Output the current version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "bracks.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "bracks", &mut std::io::stdout());
        return Ok(());
    }

    if cli.version {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = Config::load(&cli.config_path)
        .context("Failed to load configuration")?;
    if let Some(log_level) = cli.log_level.clone() {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.into());
    debug!("Using configuration: {:?}", config);

    if let Some(paths) = cli.once {
        let (source_dir, target_dir) = require_dirs(&paths)?;
        return run_once(config, source_dir, target_dir).await;
    }

    if let Some(paths) = cli.watch {
        let (source_dir, target_dir) = require_dirs(&paths)?;
        return run_watch(config, source_dir, target_dir).await;
    }

    eprintln!("|\n--> bracks error: command not found. please type 'bracks -h' to get more help.\n");
    Err(anyhow!("no command given"))
}

/// Both directories are required for -o and -w
fn require_dirs(paths: &[PathBuf]) -> Result<(&Path, &Path)> {
    match paths {
        [source_dir, target_dir] => Ok((source_dir.as_path(), target_dir.as_path())),
        _ => {
            eprintln!(
                "|\n--> bracks error: source and destination cannot be null. please type 'bracks -h' to get more help.\n"
            );
            Err(anyhow!("missing source or destination directory"))
        }
    }
}

async fn run_once(config: Config, source_dir: &Path, target_dir: &Path) -> Result<()> {
    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?
        .with_progress(true);

    let report = controller
        .run_once(source_dir, target_dir)
        .await
        .with_context(|| format!("Failed to convert {:?}", source_dir))?;

    if report.is_success() {
        println!("|\n--> bracks finished successfully.\n");
        return Ok(());
    }

    for (_, e) in &report.failures {
        eprintln!("|\n--> bracks error: {}\n", e);
    }
    Err(anyhow!(
        "{} of {} file(s) failed to convert",
        report.failures.len(),
        report.total()
    ))
}

async fn run_watch(config: Config, source_dir: &Path, target_dir: &Path) -> Result<()> {
    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    watcher::watch(&controller, source_dir, target_dir, shutdown)
        .await
        .with_context(|| format!("Failed to watch {:?}", source_dir))
}
