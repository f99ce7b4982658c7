//! Dataset and query models

mod dataset;
mod query;

pub use dataset::Dataset;
pub use query::{DatasetQuery, QueryMode};
