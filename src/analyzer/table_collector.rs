use std::collections::BTreeSet;

use crate::analyzer::Patterns;

/// Which part of the normalized text is scanned for `FROM`/`JOIN` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableScope {
    /// Only the outer query; tables read solely inside CTE bodies are skipped.
    #[default]
    OuterQuery,
    /// The whole text, CTE bodies included.
    Everywhere,
}

pub struct TableCollector;

impl TableCollector {
    /// Lower-cased, schema-qualified `FROM`/`JOIN` targets that are not CTEs.
    pub fn collect(patterns: &Patterns, text: &str, cte_names: &BTreeSet<String>) -> BTreeSet<String> {
        patterns
            .table_ref
            .captures_iter(text)
            .map(|caps| Self::canonical(&caps[1]))
            .filter(|path| Self::is_physical(path, cte_names))
            .collect()
    }

    /// Lower-cases a captured path and drops trailing separators.
    pub fn canonical(path: &str) -> String {
        path.trim_end_matches('.').to_lowercase()
    }

    /// A bare name is a CTE or a derived-table alias, never a physical table.
    /// A schema that happens to share a CTE's name does not hide its tables.
    pub fn is_physical(path: &str, cte_names: &BTreeSet<String>) -> bool {
        let Some((root, _)) = path.split_once('.') else {
            return false;
        };
        !root.is_empty() && !cte_names.contains(path)
    }
}
