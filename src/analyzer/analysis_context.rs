use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::analyzer::{AliasResolver, CteDefinition, CteExtractor, Patterns, TableCollector, TableScope};

/// Everything learned about one query, built fresh for every call.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub ctes: Vec<CteDefinition>,
    pub cte_names: BTreeSet<String>,
    /// `cte.column` -> `source_table.column`
    pub cte_columns: IndexMap<String, String>,
    /// physical, schema-qualified tables
    pub tables: BTreeSet<String>,
    /// visible name (alias or bare table name) -> physical table
    pub aliases: IndexMap<String, String>,
    /// alias of a CTE reference -> CTE name
    pub cte_aliases: IndexMap<String, String>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_alias(&mut self, visible: impl Into<String>, backing: impl Into<String>) {
        self.aliases.insert(visible.into(), backing.into());
    }

    pub fn resolve_alias(&self, visible: &str) -> Option<&str> {
        self.aliases.get(visible).map(String::as_str)
    }

    pub fn is_table(&self, name: &str) -> bool {
        self.tables.contains(name)
    }

    pub fn is_cte(&self, name: &str) -> bool {
        self.cte_names.contains(name)
    }

    /// Runs only the CTE and table stages; alias maps stay empty.
    pub fn build_tables(patterns: &Patterns, text: &str, scope: TableScope) -> Self {
        let ctes = CteExtractor::extract(patterns, text);
        let cte_names = CteExtractor::names(&ctes);

        let tables = match scope {
            TableScope::OuterQuery => {
                let outer = CteExtractor::outer_text(text, &ctes);
                TableCollector::collect(patterns, &outer, &cte_names)
            }
            TableScope::Everywhere => TableCollector::collect(patterns, text, &cte_names),
        };

        debug!(ctes = ctes.len(), tables = tables.len(), "collected tables");
        Self {
            ctes,
            cte_names,
            tables,
            ..Self::default()
        }
    }

    /// Runs the CTE, table and alias stages over already normalized text.
    pub fn build(patterns: &Patterns, text: &str, scope: TableScope, resolve_cte_columns: bool) -> Self {
        let mut ctx = Self::build_tables(patterns, text, scope);

        if resolve_cte_columns {
            ctx.cte_columns = CteExtractor::resolve_columns(patterns, text, &ctx.ctes);
        }
        ctx.cte_aliases = AliasResolver::resolve_ctes(patterns, text, &ctx.cte_names);
        for (visible, backing) in AliasResolver::resolve(patterns, text, &ctx.tables) {
            ctx.add_alias(visible, backing);
        }

        debug!(
            ctes = ctx.ctes.len(),
            tables = ctx.tables.len(),
            aliases = ctx.aliases.len(),
            "built analysis context"
        );
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::patterns;

    const QUERY: &str = "WITH active AS (SELECT id FROM public.users) \
        SELECT a.id, o.total FROM active a JOIN sales.orders o ON o.user_id = a.id";

    #[test]
    fn test_build_outer_scope() {
        let ctx = AnalysisContext::build(patterns().unwrap(), QUERY, TableScope::OuterQuery, false);

        assert!(ctx.is_cte("active"));
        assert!(ctx.is_table("sales.orders"));
        assert!(!ctx.is_table("public.users"));
        assert!(ctx.cte_columns.is_empty());
        assert_eq!(ctx.resolve_alias("o"), Some("sales.orders"));
        assert_eq!(ctx.resolve_alias("a"), None);
        assert_eq!(ctx.cte_aliases.get("a").map(String::as_str), Some("active"));
    }

    #[test]
    fn test_build_everywhere_scope() {
        let ctx = AnalysisContext::build(patterns().unwrap(), QUERY, TableScope::Everywhere, true);

        assert!(ctx.is_table("public.users"));
        assert!(ctx.is_table("sales.orders"));
        assert_eq!(ctx.resolve_alias("users"), Some("public.users"));
        assert_eq!(ctx.cte_columns.get("active.id").map(String::as_str), Some("public.users.id"));
    }

    #[test]
    fn test_build_tables_skips_aliases() {
        let ctx = AnalysisContext::build_tables(patterns().unwrap(), QUERY, TableScope::OuterQuery);

        assert!(ctx.is_table("sales.orders"));
        assert!(ctx.is_cte("active"));
        assert!(ctx.aliases.is_empty());
        assert!(ctx.cte_aliases.is_empty());
        assert!(ctx.cte_columns.is_empty());
    }

    #[test]
    fn test_add_alias_overrides() {
        let mut ctx = AnalysisContext::new();
        ctx.add_alias("t", "s.a");
        ctx.add_alias("t", "s.b");
        assert_eq!(ctx.resolve_alias("t"), Some("s.b"));
    }
}
