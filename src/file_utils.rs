use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{BracksError, Result};
use crate::transpiler::Dialect;

// @module: File and directory utilities

/// How a source path is mapped to its output path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Keep only what follows the anchor (`/p/bracks/views/a.html` -> `views/a.html`)
    StripThroughAnchor,
    /// Remove the anchor segment in place (`/p/bracks/views/a.html` -> `/p/views/a.html`)
    DropAnchor,
}

/// Map a source path to its output path using the first `anchor` segment.
pub fn resolve_output_path<P: AsRef<Path>>(path: P, anchor: &str, mode: ResolveMode) -> Result<PathBuf> {
    let path = path.as_ref();
    let components: Vec<Component<'_>> = path.components().collect();

    let anchor_index = components
        .iter()
        .position(|component| matches!(component, Component::Normal(name) if *name == anchor))
        .ok_or_else(|| BracksError::PathResolution {
            path: path.to_path_buf(),
            anchor: anchor.to_string(),
        })?;

    if anchor_index + 1 == components.len() {
        // Nothing below the anchor to write to
        return Err(BracksError::PathResolution {
            path: path.to_path_buf(),
            anchor: anchor.to_string(),
        });
    }

    let resolved: PathBuf = match mode {
        ResolveMode::StripThroughAnchor => components[anchor_index + 1..].iter().collect(),
        ResolveMode::DropAnchor => components
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != anchor_index)
            .map(|(_, component)| component)
            .collect(),
    };

    Ok(resolved)
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| BracksError::io(path, e))?;
        }
        Ok(())
    }

    /// Find every bracks source (`.html`, `.ejs`) below a directory.
    ///
    /// Entries are matched on name only, so a directory called `x.html` is
    /// returned as well; reading it fails with `NullInput`.
    pub fn find_sources<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Self::find_sources_excluding(dir, None)
    }

    /// Like `find_sources`, but never descends into `excluded`.
    pub fn find_sources_excluding<P: AsRef<Path>>(dir: P, excluded: Option<&Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        let walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| excluded.is_none_or(|excluded| !entry.path().starts_with(excluded)));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("file system loop"));
                BracksError::io(path, source)
            })?;

            if Dialect::from_path(entry.path()).is_some() {
                result.push(entry.into_path());
            }
        }

        result.sort();
        debug!("Found {} bracks source(s) under {:?}", result.len(), dir);
        Ok(result)
    }

    /// Read a bracks source. Invalid UTF-8 is replaced, not rejected.
    pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(BracksError::NullInput {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| BracksError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content).map_err(|e| BracksError::io(path.as_ref(), e))
    }
}
