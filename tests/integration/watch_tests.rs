/*!
 * Integration tests for watch mode
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tokio::sync::oneshot;
use bracks::app_config::Config;
use bracks::app_controller::Controller;
use bracks::watcher;
use crate::common;

/// Poll `condition` for up to five seconds
async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

fn read_or_empty(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// Test the first conversion, a re-conversion after an edit, and shutdown
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watch_withSourceEdit_shouldReconvertUntilShutdown() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let bracks_dir = temp_dir.path().join("bracks");
    let source = common::create_test_file(&bracks_dir, "views/index.html", "p[first]p")?;
    // Target inside the watched tree: its events must not feed back
    let target_dir = bracks_dir.join("out");
    let output = target_dir.join("views/index.html");

    let config = Config {
        watch_debounce_ms: 50,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let watching = watcher::watch(&controller, &bracks_dir, &target_dir, async {
        let _ = shutdown_rx.await;
    });

    let driver = async {
        let converted = wait_until(|| read_or_empty(&output) == "<p>first</p>").await;

        // Give the watcher time to register before editing
        tokio::time::sleep(Duration::from_millis(300)).await;
        fs::write(&source, "p[second]p").expect("failed to edit source");
        let reconverted = wait_until(|| read_or_empty(&output) == "<p>second</p>").await;

        let _ = shutdown_tx.send(());
        (converted, reconverted)
    };

    let (watch_result, (converted, reconverted)) = tokio::join!(watching, driver);

    assert!(watch_result.is_ok(), "watch failed: {:?}", watch_result);
    assert!(converted, "initial conversion was not written");
    assert!(reconverted, "edit was not re-converted");
    assert!(!target_dir.join("out").exists());
    Ok(())
}

/// Test that a missing source directory stops watch mode up front
#[tokio::test]
async fn test_watch_withMissingSourceDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = watcher::watch(
        &controller,
        &temp_dir.path().join("bracks"),
        &temp_dir.path().join("out"),
        std::future::pending::<()>(),
    )
    .await;

    assert!(result.is_err());
    Ok(())
}
