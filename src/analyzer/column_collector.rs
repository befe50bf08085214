use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::analyzer::{AnalysisContext, Patterns};

pub struct ColumnCollector;

impl ColumnCollector {
    /// Columns referenced as `prefix.column`, grouped by physical table.
    ///
    /// A prefix is resolved through the CTE column map first (directly, or via
    /// an alias of the CTE reference), then through the table alias map.
    /// Anything else is out of scope and dropped. Every known table gets an
    /// entry, even when no column was found for it.
    pub fn collect(patterns: &Patterns, text: &str, ctx: &AnalysisContext) -> BTreeMap<String, BTreeSet<String>> {
        let mut columns: BTreeMap<String, BTreeSet<String>> =
            ctx.tables.iter().map(|table| (table.clone(), BTreeSet::new())).collect();

        for caps in patterns.qualified_column.captures_iter(text) {
            let prefix = caps[1].to_lowercase();
            let column = caps[2].to_lowercase();

            let cte = ctx.cte_aliases.get(&prefix).unwrap_or(&prefix);
            if let Some(source) = ctx.cte_columns.get(&format!("{cte}.{column}")) {
                if let Some((table, source_column)) = source.rsplit_once('.') {
                    if let Some(set) = columns.get_mut(table) {
                        set.insert(source_column.to_string());
                    }
                }
                continue;
            }

            if let Some(set) = ctx.resolve_alias(&prefix).and_then(|table| columns.get_mut(table)) {
                set.insert(column);
            }
        }

        debug!(
            tables = columns.len(),
            columns = columns.values().map(BTreeSet::len).sum::<usize>(),
            "collected columns"
        );
        columns
    }
}
