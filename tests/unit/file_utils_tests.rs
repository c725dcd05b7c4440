/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use bracks::errors::BracksError;
use bracks::file_utils::{resolve_output_path, FileManager, ResolveMode};
use crate::common;

/// Test that the CLI mode keeps only the path below the anchor
#[test]
fn test_resolve_output_path_withStripMode_shouldReturnRelativeTail() -> Result<()> {
    let resolved = resolve_output_path(
        Path::new("/srv/site/bracks/views/partials/nav.ejs"),
        "bracks",
        ResolveMode::StripThroughAnchor,
    )?;
    assert_eq!(resolved, PathBuf::from("views/partials/nav.ejs"));
    assert!(resolved.is_relative());
    Ok(())
}

/// Test that the on-demand mode removes the anchor in place
#[test]
fn test_resolve_output_path_withDropMode_shouldKeepPrefix() -> Result<()> {
    let resolved = resolve_output_path(
        Path::new("/srv/site/bracks/views/index.html"),
        "bracks",
        ResolveMode::DropAnchor,
    )?;
    assert_eq!(resolved, PathBuf::from("/srv/site/views/index.html"));
    Ok(())
}

/// Test that a missing anchor is reported with the offending path
#[test]
fn test_resolve_output_path_withoutAnchor_shouldFailWithPathResolution() {
    let result = resolve_output_path(Path::new("/srv/site/src/index.html"), "bracks", ResolveMode::StripThroughAnchor);
    match result {
        Err(BracksError::PathResolution { path, anchor }) => {
            assert_eq!(path, PathBuf::from("/srv/site/src/index.html"));
            assert_eq!(anchor, "bracks");
        }
        other => panic!("expected a path resolution error, got {:?}", other),
    }
}

/// Test that a custom anchor name is honoured
#[test]
fn test_resolve_output_path_withCustomAnchor_shouldUseIt() -> Result<()> {
    let resolved = resolve_output_path(Path::new("project/shorthand/a.html"), "shorthand", ResolveMode::StripThroughAnchor)?;
    assert_eq!(resolved, PathBuf::from("a.html"));
    Ok(())
}

/// Test that discovery returns only html and ejs sources, sorted
#[test]
fn test_find_sources_withMixedTree_shouldReturnSourcesOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.html", "p[b]p")?;
    common::create_test_file(root, "nested/a.ejs", "p[a]p")?;
    common::create_test_file(root, "nested/UPPER.HTML", "p[u]p")?;
    common::create_test_file(root, "style.css", "body {}")?;
    common::create_test_file(root, "notes.txt", "")?;

    let sources = FileManager::find_sources(root)?;

    assert_eq!(
        sources,
        vec![
            root.join("b.html"),
            root.join("nested/UPPER.HTML"),
            root.join("nested/a.ejs"),
        ]
    );
    Ok(())
}

/// Test that discovery skips an excluded subtree
#[test]
fn test_find_sources_excluding_withNestedTarget_shouldSkipIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "a.html", "p[a]p")?;
    common::create_test_file(root, "out/a.html", "<p>a</p>")?;
    common::create_test_file(root, "outline/b.ejs", "p[b]p")?;

    let sources = FileManager::find_sources_excluding(root, Some(&root.join("out")))?;

    assert_eq!(sources, vec![root.join("a.html"), root.join("outline/b.ejs")]);
    Ok(())
}

/// Test that a directory named like a source cannot be read
#[test]
fn test_read_source_withDirectory_shouldFailWithNullInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fake_source = temp_dir.path().join("fake.html");
    fs::create_dir_all(&fake_source)?;

    let err = FileManager::read_source(&fake_source).unwrap_err();
    assert!(matches!(err, BracksError::NullInput { .. }));
    Ok(())
}

/// Test that an empty file is valid input
#[test]
fn test_read_source_withEmptyFile_shouldReturnEmptyString() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "empty.html", "")?;
    assert_eq!(FileManager::read_source(&source)?, "");
    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParents_shouldCreateThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/er/out.html");

    FileManager::write_to_file(&target, "<p>x</p>")?;

    assert_eq!(fs::read_to_string(&target)?, "<p>x</p>");
    Ok(())
}

/// Test that dir_exists and file_exists distinguish entries
#[test]
fn test_exists_helpers_withFileAndDir_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "x.html", "")?;
    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}
