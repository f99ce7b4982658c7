//! Datastore contract

use rechev_types::Result;
use serde_json::{Map, Value};

use crate::model::DatasetQuery;

/// Remote source of registry rows
pub trait Datastore {
    /// Run one search and return the raw JSON response
    fn search(&self, query: &DatasetQuery) -> Result<Value>;
}

impl<T: Datastore + ?Sized> Datastore for &T {
    fn search(&self, query: &DatasetQuery) -> Result<Value> {
        (**self).search(query)
    }
}

impl<T: Datastore + ?Sized> Datastore for Box<T> {
    fn search(&self, query: &DatasetQuery) -> Result<Value> {
        (**self).search(query)
    }
}

/// Rows of a datastore response (`result.records`); empty when absent
pub fn records(response: &Value) -> Vec<&Map<String, Value>> {
    response
        .get("result")
        .and_then(|r| r.get("records"))
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// First row of a datastore response
pub fn first_record(response: &Value) -> Option<&Map<String, Value>> {
    records(response).into_iter().next()
}
