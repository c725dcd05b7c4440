/*!
 * Watch mode.
 *
 * Converts the bracks tree once, then re-converts it whenever a source file
 * is created, modified or removed. Events arriving within the debounce
 * window are folded into a single re-conversion.
 */

use log::{debug, error, info, warn};
use notify::{RecursiveMode, Watcher};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app_controller::Controller;
use crate::errors::{BracksError, Result};
use crate::transpiler::Dialect;

/// Returns true for the event kinds that can change a conversion result.
fn is_relevant_kind(kind: &notify::EventKind) -> bool {
    matches!(
        kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
    )
}

/// Decide whether a changed path should trigger a re-conversion.
///
/// Only bracks sources count, and nothing below the target directory: the
/// target may live inside the watched tree.
pub fn should_reconvert(path: &Path, target_dir: &Path) -> bool {
    if path.starts_with(target_dir) {
        return false;
    }
    Dialect::from_path(path).is_some()
}

/// Drain everything queued in the debounce window.
async fn debounce(rx: &mut mpsc::UnboundedReceiver<PathBuf>, window: Duration) -> usize {
    tokio::time::sleep(window).await;
    let mut drained = 0;
    while rx.try_recv().is_ok() {
        drained += 1;
    }
    drained
}

/// Convert `source_dir` into `target_dir` and keep doing so on every change
/// until `shutdown` completes.
pub async fn watch<F>(controller: &Controller, source_dir: &Path, target_dir: &Path, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    // Event paths are compared against the target, so both must be absolute
    let source_dir = std::path::absolute(source_dir).map_err(|e| BracksError::io(source_dir, e))?;
    let target_dir = std::path::absolute(target_dir).map_err(|e| BracksError::io(target_dir, e))?;

    // Per-file failures are logged by the controller; a missing source
    // directory stops here
    controller.run_once(&source_dir, &target_dir).await?;

    let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
    let filter_target = target_dir.clone();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                warn!("File watcher error: {}", e);
                return;
            }
        };
        if !is_relevant_kind(&event.kind) {
            return;
        }
        for path in event.paths {
            if should_reconvert(&path, &filter_target) {
                // The receiver only goes away on shutdown
                let _ = tx.send(path);
            }
        }
    })?;
    watcher.watch(&source_dir, RecursiveMode::Recursive)?;

    info!("bracks has started watching [{}]..", source_dir.display());

    let window = Duration::from_millis(controller.config().watch_debounce_ms);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopped watching [{}]", source_dir.display());
                break;
            }
            changed = rx.recv() => {
                let Some(path) = changed else { break };
                let folded = debounce(&mut rx, window).await;
                debug!("Change detected at {:?} (+{} more), converting", path, folded);

                if let Err(e) = controller.run_once(&source_dir, &target_dir).await {
                    error!("bracks error: {}", e);
                }
            }
        }
    }

    Ok(())
}
