/*!
 * On-demand conversion for request handlers.
 *
 * Mirrors a web-framework middleware: every call converts the bracks tree and
 * then hands control to `next`, passing the first failure (if any) so the
 * host's error handler can deal with it. The tree is rewritten in place: the
 * anchor segment is dropped from each source path, so
 * `<project>/bracks/views/index.ejs` lands in `<project>/views/index.ejs`.
 */

use log::warn;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::app_controller::{BatchReport, Controller};
use crate::errors::BracksError;
use crate::file_utils::ResolveMode;

/// Converts a bracks tree each time a request passes through
#[derive(Debug, Clone)]
pub struct OnDemandConverter {
    controller: Controller,
    source_root: PathBuf,
    output_root: PathBuf,
}

impl OnDemandConverter {
    /// `output_root` only matters for relative source roots; resolved
    /// absolute paths replace it when joined.
    pub fn new(controller: Controller, source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            controller,
            source_root: source_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Run one conversion and return the report
    pub async fn convert(&self) -> Result<BatchReport, BracksError> {
        self.controller
            .run_batch(&self.source_root, &self.output_root, ResolveMode::DropAnchor)
            .await
    }

    /// Convert, then call `next` with `None` or the first error.
    pub async fn handle<N, Fut>(&self, next: N) -> Fut::Output
    where
        N: FnOnce(Option<BracksError>) -> Fut,
        Fut: Future,
    {
        let forwarded = match self.convert().await {
            Ok(report) => {
                let mut failures = report.failures.into_iter().map(|(_, e)| e);
                let first = failures.next();
                for extra in failures {
                    warn!("Additional conversion failure: {}", extra);
                }
                first
            }
            Err(e) => Some(e),
        };

        next(forwarded).await
    }
}
