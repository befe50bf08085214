use tracing::debug;

use crate::{
    analyzer::{
        patterns, AnalysisContext, AnalyzerError, ColumnCollector, Normalizer, TableColumns, TableNames,
        TableScope,
    },
    AnalyzerConfig,
};

/// Best-effort extraction of tables and columns from raw SQL text.
///
/// This is a lexical heuristic over normalized text, not a SQL parser:
/// - only schema-qualified `FROM`/`JOIN` targets (`schema.table`) count as
///   physical tables, bare names are taken to be CTEs or derived tables;
/// - CTEs are traced one level deep, through the first `SELECT … FROM` of
///   their body;
/// - nested or mutually referencing CTEs, subqueries in `FROM`, comma-joined
///   `FROM` lists and `SELECT *` are not resolved.
///
/// Every call is independent; the analyzer holds nothing but its config.
#[derive(Debug, Clone, Default)]
pub struct QueryAnalyzer {
    config: AnalyzerConfig,
}

impl QueryAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Sorted, unique physical tables referenced by the query.
    ///
    /// CTE names never appear. Unless `include_cte_sources_in_names` is set,
    /// tables read only inside a CTE body are left out as well.
    pub fn extract_table_names(&self, query: &str) -> Result<TableNames, AnalyzerError> {
        let patterns = patterns()?;
        let text = Normalizer::normalize(patterns, query, self.config.strip_extract_calls);

        let scope = if self.config.include_cte_sources_in_names {
            TableScope::Everywhere
        } else {
            TableScope::OuterQuery
        };
        let ctx = AnalysisContext::build_tables(patterns, &text, scope);

        debug!(tables = ctx.tables.len(), "extracted table names");
        Ok(TableNames::from(ctx.tables))
    }

    /// Columns used per physical table, tables without columns included.
    pub fn extract_table_columns(&self, query: &str) -> Result<TableColumns, AnalyzerError> {
        let patterns = patterns()?;
        let text = Normalizer::normalize(patterns, query, self.config.strip_extract_calls);

        let ctx = AnalysisContext::build(patterns, &text, TableScope::Everywhere, self.config.resolve_cte_columns);
        let columns = ColumnCollector::collect(patterns, &text, &ctx);

        debug!(tables = columns.len(), "extracted table columns");
        Ok(TableColumns::from(columns))
    }
}
