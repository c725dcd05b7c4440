/*!
 * Rewrite rule tables for the bracks shorthand.
 *
 * Every table is generated once from the element vocabulary below. A table
 * is an ordered list of rules; rules inside one table target distinct tag
 * names, so only the order of the tables themselves matters.
 */

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Elements that open and close (`div[`, `div(`, `]div`)
pub const CONTAINER_TAGS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo",
    "blockquote", "body", "button", "canvas", "caption", "cite", "code",
    "colgroup", "datalist", "dd", "del", "details", "dfn", "div", "dl", "dt",
    "em", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "hgroup", "html", "i", "iframe",
    "ins", "kbd", "label", "legend", "li", "map", "mark", "menu", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "pre",
    "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "section",
    "select", "small", "span", "strong", "style", "sub", "summary", "sup",
    "table", "tbody", "td", "textarea", "tfoot", "th", "thead", "time",
    "title", "tr", "u", "ul", "var", "video",
];

/// Elements that open but are never closed in the shorthand
pub const OPEN_ONLY_TAGS: &[&str] = &["command"];

/// Void elements (`[br]`, `br(`)
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

/// A single matcher/replacement pair.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Tag name or delimiter the rule targets
    pub name: &'static str,
    /// Shorthand pattern
    pub matcher: Regex,
    /// Literal markup written in place of every match
    pub replacement: String,
}

impl RewriteRule {
    /// Patterns are compiled with Unicode off, so `\b` is an ASCII word
    /// boundary: `éb[` still opens a `b` element.
    fn new(name: &'static str, pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            name,
            matcher: RegexBuilder::new(pattern)
                .unicode(false)
                .build()
                .expect("Invalid rewrite rule pattern"),
            replacement: replacement.into(),
        }
    }
}

/// An ordered set of rules applied together in one pass.
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub name: &'static str,
    pub rules: Vec<RewriteRule>,
}

impl RuleTable {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the rule for a tag name or delimiter
    pub fn rule(&self, name: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// `c/[ ... ]/c`. Close is rewritten first.
pub static COMMENT_TAGS: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "comment",
    rules: vec![
        RewriteRule::new("c", r"\]/\bc\b", "-->"),
        RewriteRule::new("c", r"\bc\b/\[", "<!--"),
    ],
});

/// `[br]` -> `<br>`
pub static VOID_TAGS_WITHOUT_ATTR: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "void",
    rules: VOID_TAGS
        .iter()
        .map(|tag| RewriteRule::new(*tag, &format!(r"\[\b{}\b\]", tag), format!("<{}>", tag)))
        .collect(),
});

/// `]div` -> `</div>`
pub static END_TAGS: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "end",
    rules: CONTAINER_TAGS
        .iter()
        .map(|tag| RewriteRule::new(*tag, &format!(r"\]\b{}\b", tag), format!("</{}>", tag)))
        .collect(),
});

/// `div[` -> `<div>`
pub static START_TAGS_WITHOUT_ATTR: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "start",
    rules: CONTAINER_TAGS
        .iter()
        .chain(OPEN_ONLY_TAGS)
        .map(|tag| RewriteRule::new(*tag, &format!(r"\b{}\b\[", tag), format!("<{}>", tag)))
        .collect(),
});

/// `div(` -> `<div ` and `img(` -> `<img `
pub static START_VOID_TAGS_WITH_ATTR: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "start-with-attributes",
    rules: CONTAINER_TAGS
        .iter()
        .chain(OPEN_ONLY_TAGS)
        .chain(VOID_TAGS)
        .map(|tag| RewriteRule::new(*tag, &format!(r"\b{}\b\(", tag), format!("<{} ", tag)))
        .collect(),
});

/// EJS delimiters. The order here is significant: `[%` must become `<%`
/// before the bare `%=`/`%-` forms are looked at.
pub static EJS_TAGS: Lazy<RuleTable> = Lazy::new(|| RuleTable {
    name: "ejs",
    rules: vec![
        RewriteRule::new("[%", r"\[%", "<%"),
        RewriteRule::new("%=", r"%=", "<%="),
        RewriteRule::new("%-", r"%-", "<%-"),
        RewriteRule::new("%#", r"%#", "<%#"),
        RewriteRule::new("%%", r"%%", "<%%"),
        RewriteRule::new("%]", r"%\]", "%>"),
        RewriteRule::new("-%", r"-%", "-%>"),
        RewriteRule::new("%_", r"%_", "<%_"),
        RewriteRule::new("_%", r"_%", "_%>"),
    ],
});

/// `)[` closes an attribute list on a container
pub static ATTR_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\)\[").expect("Invalid attribute close regex")
});

/// `)[` or the void spelling `)/]`
pub static ATTR_OR_VOID_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\)\[)|(?:\)/\])").expect("Invalid attribute close regex")
});

/// Markup-only tables, in application order
pub fn markup_tables() -> [&'static RuleTable; 5] {
    [
        &*COMMENT_TAGS,
        &*VOID_TAGS_WITHOUT_ATTR,
        &*END_TAGS,
        &*START_TAGS_WITHOUT_ATTR,
        &*START_VOID_TAGS_WITH_ATTR,
    ]
}
