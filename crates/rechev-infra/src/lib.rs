//! Infrastructure layer for rechev-lookup

pub mod ckan;

pub use ckan::{CkanClient, CkanClientConfig, DEFAULT_BASE_URL};
