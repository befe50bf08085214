use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerError;

/// Which of the two extractions a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    TableNames,
    TableColumns,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::TableNames => "Table Names",
            ReportKind::TableColumns => "Table Columns",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::TableNames => "table_names.json",
            ReportKind::TableColumns => "table_columns.json",
        }
    }
}

impl FromStr for ReportKind {
    type Err = AnalyzerError;

    /// Accepts the form action names (`download_tables`, `download_columns`)
    /// as well as the short forms `tables`/`columns`.
    fn from_str(action: &str) -> Result<Self, Self::Err> {
        match action.trim().to_ascii_lowercase().as_str() {
            "download_tables" | "tables" | "table_names" => Ok(ReportKind::TableNames),
            "download_columns" | "columns" | "table_columns" => Ok(ReportKind::TableColumns),
            _ => AnalyzerError::InvalidAction(action.to_string()).err(),
        }
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
