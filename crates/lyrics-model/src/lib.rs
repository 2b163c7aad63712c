pub mod query;
pub mod record;
pub mod sanitize;
pub mod document;

pub use query::*;
pub use record::*;
pub use document::*;
