use std::{fs, path::Path};

use crate::analyzer::AnalyzerError;

/// Read SQL text from a file.
pub fn read_query_file(path: impl AsRef<Path>) -> Result<String, AnalyzerError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| AnalyzerError::io(path, err))
}
