use crate::analyzer::Patterns;

/// Cleans raw query text before any clause matching.
pub struct Normalizer;

impl Normalizer {
    /// Strips comments, word-only string literals and (optionally) `EXTRACT(...)` calls.
    ///
    /// Literals holding spaces or punctuation are left alone. `EXTRACT` is
    /// removed because its argument (`YEAR FROM t.created_at`) looks like both a
    /// table reference and a column reference.
    pub fn normalize(patterns: &Patterns, query: &str, strip_extract: bool) -> String {
        let text = patterns.line_comment.replace_all(query, "");
        let text = patterns.block_comment.replace_all(&text, "");
        let text = patterns.word_literal.replace_all(&text, "");
        if !strip_extract {
            return text.into_owned();
        }
        patterns.extract_call.replace_all(&text, "").into_owned()
    }
}
