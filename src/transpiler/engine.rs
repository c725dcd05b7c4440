/*!
 * Rewrite driver.
 *
 * Threads a document through the rule tables in their fixed order, then runs
 * the cleanup passes. The driver never fails: shorthand that no rule matches
 * is left in the output as-is.
 */

use log::trace;
use regex::NoExpand;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::rules::{self, RuleTable, ATTR_CLOSE, ATTR_OR_VOID_CLOSE, EJS_TAGS};

/// Escape marker used inside attribute values
const ESCAPE_MARKER: char = '\\';

/// Output flavour of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain HTML
    Markup,
    /// HTML plus EJS template delimiters
    Templating,
}

impl Dialect {
    /// Dialect for a file extension (`html` or `ejs`, any case)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "html" => Some(Self::Markup),
            "ejs" => Some(Self::Templating),
            _ => None,
        }
    }

    /// Dialect for a path, based on its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn uses_templating(&self) -> bool {
        matches!(self, Self::Templating)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markup => write!(f, "markup"),
            Self::Templating => write!(f, "markup+templating"),
        }
    }
}

/// Behaviour switches that differ between releases of the bracks format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileOptions {
    /// Rewrite the void close spelling `)/]` as well as `)[`
    #[serde(default = "default_true")]
    pub normalize_void_close: bool,

    /// Collapse `> <` between sibling tags into `><`
    #[serde(default)]
    pub collapse_sibling_whitespace: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            normalize_void_close: true,
            collapse_sibling_whitespace: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Apply every rule of a table to the whole text.
pub fn apply_rule_table(text: &str, table: &RuleTable) -> String {
    let mut document = text.to_string();
    for rule in &table.rules {
        // replace_all borrows the document, so only reallocate on a match
        if rule.matcher.is_match(&document) {
            document = rule
                .matcher
                .replace_all(&document, NoExpand(&rule.replacement))
                .into_owned();
        }
    }
    trace!("Applied {} table ({} rules)", table.name, table.len());
    document
}

/// Convert bracks shorthand to the given dialect with default options.
pub fn transpile(source: &str, dialect: Dialect) -> String {
    transpile_with(source, dialect, &TranspileOptions::default())
}

/// Convert bracks shorthand to the given dialect.
pub fn transpile_with(source: &str, dialect: Dialect, options: &TranspileOptions) -> String {
    let mut document = source.to_string();

    for table in rules::markup_tables() {
        document = apply_rule_table(&document, table);
    }

    document = normalize_closing_brackets(&document, options.normalize_void_close);
    document = strip_escapes(&document);

    if dialect.uses_templating() {
        document = apply_rule_table(&document, &EJS_TAGS);
    }

    if options.collapse_sibling_whitespace {
        document = document.replace("> <", "><");
    }

    document
}

/// Rewrite the attribute-list close markers to `>`.
pub fn normalize_closing_brackets(text: &str, include_void_close: bool) -> String {
    let matcher = if include_void_close {
        &*ATTR_OR_VOID_CLOSE
    } else {
        &*ATTR_CLOSE
    };
    matcher.replace_all(text, NoExpand(">")).into_owned()
}

/// Drop every escape marker.
pub fn strip_escapes(text: &str) -> String {
    text.chars().filter(|c| *c != ESCAPE_MARKER).collect()
}
