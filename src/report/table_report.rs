use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    analyzer::{AnalyzerError, QueryAnalyzer, TableColumns, TableNames},
    report::ReportKind,
    AnalyzerConfig, HeaderStyle,
};

/// Tabular rendering of an extraction: a title, a fixed header row and data rows.
///
/// This is the shape a spreadsheet or CSV writer consumes; `Report` itself only
/// serializes to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Validate `query`, run the extraction selected by `kind` and render it.
    ///
    /// A blank query or one longer than `config.max_query_length` is rejected
    /// before any analysis runs.
    pub fn build(query: &str, kind: ReportKind, config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let result = Self::validate(query, config).and_then(|_| {
            let analyzer = QueryAnalyzer::new(config.clone());
            match kind {
                ReportKind::TableNames => analyzer
                    .extract_table_names(query)
                    .map(|names| Self::from_table_names(&names)),
                ReportKind::TableColumns => analyzer
                    .extract_table_columns(query)
                    .map(|columns| Self::from_table_columns(&columns, config.header_style)),
            }
        });

        match &result {
            Ok(report) => debug!(kind = %kind, rows = report.rows.len(), "built report"),
            Err(err) => warn!(kind = %kind, error = %err, "failed to build report"),
        }
        result
    }

    fn validate(query: &str, config: &AnalyzerConfig) -> Result<(), AnalyzerError> {
        if query.trim().is_empty() {
            return AnalyzerError::EmptyQuery.err();
        }
        if let Some(limit) = config.max_query_length {
            if query.len() > limit {
                return AnalyzerError::QueryTooLarge { length: query.len(), limit }.err();
            }
        }
        Ok(())
    }

    pub fn from_table_names(names: &TableNames) -> Self {
        Self {
            title: ReportKind::TableNames.title().to_string(),
            header: vec!["Table Name".to_string()],
            rows: names.iter().map(|name| vec![name.to_string()]).collect(),
        }
    }

    /// One row per `(table, column)`; tables without columns produce no row.
    pub fn from_table_columns(columns: &TableColumns, style: HeaderStyle) -> Self {
        Self {
            title: ReportKind::TableColumns.title().to_string(),
            header: style.table_columns_header().iter().map(|h| h.to_string()).collect(),
            rows: columns
                .rows()
                .map(|(table, column)| vec![table.to_string(), column.to_string()])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json(&self) -> Result<String, AnalyzerError> {
        serde_json::to_string_pretty(self).map_err(|err| AnalyzerError::Serialization(err.to_string()))
    }

    /// Save the report as pretty-printed JSON.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), AnalyzerError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| AnalyzerError::io(path, err))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, self).map_err(|err| AnalyzerError::Serialization(err.to_string()))
    }
}
