use thiserror::Error;

/// Hard failures of the analyzer and of the report boundary.
///
/// Malformed CTE bodies are not errors: they are skipped and the analysis
/// carries on with whatever could be extracted. An empty result is not an
/// error either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("no SQL query provided")]
    EmptyQuery,

    #[error("query is {length} bytes long, the limit is {limit}")]
    QueryTooLarge { length: usize, limit: usize },

    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A built-in pattern failed to compile, so no structured result can be produced.
    #[error("failed to compile pattern: {0}")]
    Pattern(String),

    #[error("i/o error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyzerError {
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_string_lossy().into_owned(),
            message: err.to_string(),
        }
    }

    pub fn err<T>(self) -> Result<T, AnalyzerError> {
        Err(self)
    }
}
