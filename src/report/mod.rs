pub mod report_kind;
pub use report_kind::*;

pub mod table_report;
pub use table_report::*;

pub mod query_file;
pub use query_file::*;
