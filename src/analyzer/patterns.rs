use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::AnalyzerError;

static PATTERNS: Lazy<Result<Patterns, regex::Error>> = Lazy::new(Patterns::compile);

/// Words that can follow a table reference without being its alias.
const NON_ALIAS_KEYWORDS: &[&str] = &[
    "and", "as", "cross", "else", "end", "except", "fetch", "for", "from", "full", "group",
    "having", "inner", "intersect", "join", "lateral", "left", "limit", "natural", "offset",
    "on", "or", "order", "outer", "qualify", "returning", "right", "select", "set", "then",
    "union", "using", "values", "when", "where", "window", "with",
];

/// Every regular expression the pipeline needs, compiled once per process.
#[derive(Debug)]
pub struct Patterns {
    pub line_comment: Regex,
    pub block_comment: Regex,
    pub word_literal: Regex,
    pub extract_call: Regex,
    /// `WITH [RECURSIVE] name AS (`
    pub cte_head: Regex,
    /// `, name AS (` right after a closed CTE body
    pub cte_chain: Regex,
    /// `SELECT <list> FROM <path>` inside a CTE body
    pub cte_select: Regex,
    pub table_ref: Regex,
    /// optional `[AS] alias` right after a table reference
    pub trailing_alias: Regex,
    pub qualified_column: Regex,
    /// `<expr> AS <alias>` select item
    pub item_alias: Regex,
    pub identifier_path: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            line_comment: Regex::new(r"--[^\n]*")?,
            block_comment: Regex::new(r"(?s)/\*.*?\*/")?,
            word_literal: Regex::new(r"'\w+'")?,
            extract_call: Regex::new(r"(?i)\bEXTRACT\s*\([^)]+\)")?,
            cte_head: Regex::new(r"(?i)\bWITH\s+(?:RECURSIVE\s+)?([a-zA-Z0-9_]+)\s+AS\s*\(")?,
            cte_chain: Regex::new(r"(?i)^\s*,\s*([a-zA-Z0-9_]+)\s+AS\s*\(")?,
            cte_select: Regex::new(r"(?is)\bSELECT\s+(.*?)\s+FROM\s+([a-zA-Z0-9_.]+)")?,
            table_ref: Regex::new(r"(?i)\b(?:FROM|JOIN)\s+([a-zA-Z0-9_.]+)")?,
            trailing_alias: Regex::new(r"(?i)^\s+(?:AS\s+)?([a-zA-Z0-9_]+)")?,
            qualified_column: Regex::new(r"\b([a-zA-Z0-9_]+)\.([a-zA-Z0-9_]+)\b")?,
            item_alias: Regex::new(r"(?is)^(.*?)\s+AS\s+([a-zA-Z0-9_]+)$")?,
            identifier_path: Regex::new(r"^[a-zA-Z0-9_]+(?:\.[a-zA-Z0-9_]+)*$")?,
        })
    }

    /// Returns the alias following a table reference, if `rest` starts with one.
    ///
    /// `rest` is the text right after the table path. Keywords such as `WHERE`
    /// or `JOIN` are not aliases.
    pub fn alias_after(&self, rest: &str) -> Option<String> {
        let caps = self.trailing_alias.captures(rest)?;
        let alias = caps[1].to_lowercase();
        if NON_ALIAS_KEYWORDS.contains(&alias.as_str()) {
            return None;
        }
        Some(alias)
    }
}

/// Shared compiled patterns, or `AnalyzerError::Pattern` if compilation failed.
pub fn patterns() -> Result<&'static Patterns, AnalyzerError> {
    PATTERNS
        .as_ref()
        .map_err(|err| AnalyzerError::Pattern(err.to_string()))
}

/// Last `.`-separated segment of a table path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
