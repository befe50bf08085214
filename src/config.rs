use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerError;

/// Header row used for the table/column report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// `["Table Name", "Column Name"]`
    #[default]
    Descriptive,
    /// `["Table", "Column"]`
    Short,
}

impl HeaderStyle {
    pub fn table_columns_header(&self) -> [&'static str; 2] {
        match self {
            HeaderStyle::Descriptive => ["Table Name", "Column Name"],
            HeaderStyle::Short => ["Table", "Column"],
        }
    }
}

/// Analyzer and report configuration.
///
/// - `strip_extract_calls` removes `EXTRACT(...)` before matching.
/// - `resolve_cte_columns` traces `cte.column` references back to the CTE's source table.
/// - `include_cte_sources_in_names` reports tables read only inside CTE bodies as names too.
/// - `header_style` picks the header row of the table/column report.
/// - `max_query_length` caps the query size accepted by the report boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub strip_extract_calls: bool,
    pub resolve_cte_columns: bool,
    pub include_cte_sources_in_names: bool,
    pub header_style: HeaderStyle,
    pub max_query_length: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            strip_extract_calls: true,
            resolve_cte_columns: true,
            include_cte_sources_in_names: false,
            header_style: HeaderStyle::default(),
            max_query_length: None,
        }
    }
}

impl AnalyzerConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain alias-based column matching, without tracing columns through CTEs.
    pub fn simple() -> Self {
        Self {
            resolve_cte_columns: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AnalyzerError> {
        let config: Self = serde_json::from_str(json).map_err(|err| AnalyzerError::InvalidConfig(err.to_string()))?;
        if config.max_query_length == Some(0) {
            return AnalyzerError::InvalidConfig("max_query_length must be greater than zero".into()).err();
        }
        Ok(config)
    }

    pub fn with_strip_extract_calls(mut self, strip: bool) -> Self { self.strip_extract_calls = strip; self }
    pub fn with_cte_resolution(mut self, resolve: bool) -> Self { self.resolve_cte_columns = resolve; self }
    pub fn with_cte_sources_in_names(mut self, include: bool) -> Self { self.include_cte_sources_in_names = include; self }
    pub fn with_header_style(mut self, style: HeaderStyle) -> Self { self.header_style = style; self }
    pub fn with_max_query_length(mut self, limit: usize) -> Self { self.max_query_length = Some(limit); self }
}
