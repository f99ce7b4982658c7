//! Datastore queries

use rechev_store::CacheKey;
use rechev_types::value_text;
use serde_json::{Map, Value};

use super::Dataset;

/// How rows are matched
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMode {
    /// Free-text search across indexed fields (`q`)
    Search(String),
    /// Exact equality on named fields (`filters`), in order
    Filters(Vec<(String, Value)>),
}

/// A single datastore search request
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetQuery {
    pub dataset: Dataset,
    pub mode: QueryMode,
    pub limit: u32,
}

impl DatasetQuery {
    fn search(dataset: Dataset, term: &str) -> Self {
        Self {
            dataset,
            mode: QueryMode::Search(term.to_string()),
            limit: dataset.limit(),
        }
    }

    fn filtered(dataset: Dataset, filters: Vec<(&str, Value)>) -> Self {
        Self {
            dataset,
            mode: QueryMode::Filters(
                filters
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
            limit: dataset.limit(),
        }
    }

    pub fn vehicle(plate: &str) -> Self {
        Self::search(Dataset::Vehicle, plate)
    }

    pub fn personal_import(plate: &str) -> Self {
        Self::search(Dataset::PersonalImport, plate)
    }

    pub fn disability(plate: &str) -> Self {
        Self::search(Dataset::Disability, plate)
    }

    pub fn price(model_code: &Value, manufacturer_code: &Value) -> Self {
        Self::filtered(
            Dataset::Price,
            vec![
                ("degem_cd", model_code.clone()),
                ("tozeret_cd", manufacturer_code.clone()),
            ],
        )
    }

    pub fn technical_details(model_code: &Value, manufacturer_code: &Value, year: &Value) -> Self {
        Self::filtered(
            Dataset::TechnicalDetails,
            vec![
                ("degem_cd", model_code.clone()),
                ("tozeret_cd", manufacturer_code.clone()),
                ("shnat_yitzur", year.clone()),
            ],
        )
    }

    /// `filters` parameter: each value wrapped in a one-element list
    pub fn filters_json(&self) -> Option<String> {
        match &self.mode {
            QueryMode::Filters(filters) => {
                let map: Map<String, Value> = filters
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::Array(vec![v.clone()])))
                    .collect();
                Some(Value::Object(map).to_string())
            }
            QueryMode::Search(_) => None,
        }
    }

    /// Cache key built from the dataset and the query's key fields
    pub fn cache_key(&self) -> CacheKey {
        let parts: Vec<String> = match &self.mode {
            QueryMode::Search(term) => vec![term.clone()],
            QueryMode::Filters(filters) => filters.iter().map(|(_, v)| value_text(v)).collect(),
        };
        CacheKey::new(self.dataset.cache_kind(), parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_json_wraps_values() {
        let query = DatasetQuery::price(&json!(5), &json!(9));
        assert_eq!(
            query.filters_json().as_deref(),
            Some(r#"{"degem_cd":[5],"tozeret_cd":[9]}"#)
        );
        assert_eq!(query.limit, 100);
        assert!(DatasetQuery::vehicle("1234567").filters_json().is_none());
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(
            DatasetQuery::vehicle("1234567").cache_key().file_name(),
            "veh_1234567.json"
        );
        assert_eq!(
            DatasetQuery::personal_import("1234567").cache_key().file_name(),
            "personal_1234567.json"
        );
        assert_eq!(
            DatasetQuery::technical_details(&json!(5), &json!(9), &json!(2019))
                .cache_key()
                .file_name(),
            "details_5_9_2019.json"
        );
        assert_eq!(
            DatasetQuery::price(&json!(5), &json!(9)).cache_key().raw(),
            "price_5_9"
        );
    }
}
