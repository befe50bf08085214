pub mod analyzer;
pub use analyzer::{AnalyzerError, QueryAnalyzer, TableColumns, TableNames};

pub mod config;
pub use config::{AnalyzerConfig, HeaderStyle};

pub mod report;
pub use report::{read_query_file, Report, ReportKind};

/// Sorted, unique physical tables referenced by `query`, using the default config.
pub fn extract_table_names(query: &str) -> Result<TableNames, AnalyzerError> {
    QueryAnalyzer::default().extract_table_names(query)
}

/// Columns used per physical table in `query`, using the default config.
pub fn extract_table_columns(query: &str) -> Result<TableColumns, AnalyzerError> {
    QueryAnalyzer::default().extract_table_columns(query)
}
