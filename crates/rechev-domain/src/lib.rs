//! Domain layer for rechev-lookup
//!
//! Dataset definitions, the datastore contract, and the rules for merging
//! registry rows into a single vehicle record.

pub mod model;
pub mod repository;
pub mod service;
