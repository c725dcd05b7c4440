/*!
 * # bracks - bracket shorthand to HTML/EJS
 *
 * A Rust library for converting documents written in the compact "bracks"
 * shorthand into regular HTML, or HTML with EJS template delimiters.
 *
 * ## Features
 *
 * - Ordered regex rewrite tables for ~100 standard elements
 * - HTML (`.html`) and EJS (`.ejs`) output dialects
 * - One-shot conversion of a whole bracks tree
 * - Watch mode that re-converts on change
 * - On-demand conversion for request handlers
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transpiler`: The rewrite engine:
 *   - `transpiler::rules`: Element vocabulary and rule tables
 *   - `transpiler::engine`: Table driver and cleanup passes
 * - `file_utils`: Source discovery, output path resolution and file I/O
 * - `app_controller`: Batch conversion of a source tree
 * - `watcher`: File system watch mode
 * - `middleware`: Request-triggered conversion
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod middleware;
pub mod transpiler;
pub mod watcher;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchReport, Controller};
pub use errors::BracksError;
pub use file_utils::{resolve_output_path, ResolveMode};
pub use middleware::OnDemandConverter;
pub use transpiler::{transpile, transpile_with, Dialect, TranspileOptions};
