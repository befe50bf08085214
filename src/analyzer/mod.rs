pub mod analyzer_error;
pub use analyzer_error::*;

pub mod patterns;
pub use patterns::*;

pub mod normalizer;
pub use normalizer::*;

pub mod cte_extractor;
pub use cte_extractor::*;

pub mod table_collector;
pub use table_collector::*;

pub mod alias_resolver;
pub use alias_resolver::*;

pub mod analysis_context;
pub use analysis_context::*;

pub mod column_collector;
pub use column_collector::*;

pub mod results;
pub use results::*;

pub mod query_analyzer;
pub use query_analyzer::*;
