//! Query call-site extraction: the source scanner proper.

pub mod extractor;
pub mod literal;
pub mod scope;
pub mod types;

pub use extractor::QueryCallExtractor;
pub use types::{FileQueryCalls, FileScan, QueryCall};
