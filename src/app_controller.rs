use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{BracksError, Result};
use crate::file_utils::{self, FileManager, ResolveMode};
use crate::transpiler::{self, Dialect};

// @module: Application controller for bracks conversion

/// Outcome of converting one source tree
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files that were written
    pub converted: Vec<PathBuf>,
    /// Sources that failed, with their error
    pub failures: Vec<(PathBuf, BracksError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len()
    }
}

/// Main application controller for bracks conversion
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Arc<Config>,
    // @field: Draw a progress bar while converting
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a single source file and write the result below `target_root`.
    ///
    /// Returns the path that was written.
    pub fn convert_file(&self, source: &Path, mode: ResolveMode, target_root: &Path) -> Result<PathBuf> {
        let dialect = Dialect::from_path(source).ok_or_else(|| BracksError::NullInput {
            path: source.to_path_buf(),
        })?;

        let relative = file_utils::resolve_output_path(source, &self.config.anchor_segment, mode)?;
        let content = FileManager::read_source(source)?;
        let converted = transpiler::transpile_with(&content, dialect, &self.config.transpile);

        let output_path = target_root.join(relative);
        FileManager::write_to_file(&output_path, &converted)?;

        debug!("{:?} -> {:?} ({})", source, output_path, dialect);
        Ok(output_path)
    }

    /// Convert every source under `source_dir` (one-shot `-o` mode).
    pub async fn run_once(&self, source_dir: &Path, target_dir: &Path) -> Result<BatchReport> {
        self.run_batch(source_dir, target_dir, ResolveMode::StripThroughAnchor).await
    }

    /// Discover, convert and write every source under `source_dir`.
    ///
    /// A failing file is recorded in the report; the other files are still
    /// converted.
    pub async fn run_batch(&self, source_dir: &Path, target_root: &Path, mode: ResolveMode) -> Result<BatchReport> {
        if !FileManager::dir_exists(source_dir) {
            return Err(BracksError::SourceDirMissing(source_dir.to_path_buf()));
        }

        // Sources are resolved through the anchor, so they need the full path.
        // Symlinks are kept as given so the anchor segment survives.
        let source_dir = std::path::absolute(source_dir).map_err(|e| BracksError::io(source_dir, e))?;
        // A target nested in the source tree holds converted output, not sources
        let target_abs = std::path::absolute(target_root).map_err(|e| BracksError::io(target_root, e))?;
        let excluded = (target_abs != source_dir && target_abs.starts_with(&source_dir)).then_some(target_abs.as_path());
        let sources = FileManager::find_sources_excluding(&source_dir, excluded)?;

        let progress_bar = self.create_progress_bar(sources.len() as u64);
        let target_root = target_root.to_path_buf();

        let results = stream::iter(sources)
            .map(|source| {
                let controller = self.clone();
                let target_root = target_root.clone();
                let progress_bar = progress_bar.clone();

                async move {
                    let task_source = source.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        controller.convert_file(&task_source, mode, &target_root)
                    })
                    .await
                    .unwrap_or_else(|join_error| {
                        Err(BracksError::io(&source, std::io::Error::other(join_error.to_string())))
                    });

                    progress_bar.inc(1);
                    (source, result)
                }
            })
            .buffer_unordered(self.config.concurrent_conversions)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        let mut report = BatchReport::default();
        for (source, result) in results {
            match result {
                Ok(output_path) => report.converted.push(output_path),
                Err(e) => {
                    error!("{}", e);
                    report.failures.push((source, e));
                }
            }
        }

        // Keep the report stable regardless of completion order
        report.converted.sort();
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));

        info!(
            "Converted {} of {} file(s) from {:?}",
            report.converted.len(),
            report.total(),
            source_dir
        );

        Ok(report)
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar
    }
}
