//! Integration tests for the lookup pipeline and report export

use chrono::{DateTime, Duration, Utc};
use rechev_app::report::{export_html, status_line, table_row};
use rechev_app::LookupService;
use rechev_domain::model::{Dataset, DatasetQuery, QueryMode};
use rechev_domain::repository::Datastore;
use rechev_store::{Clock, ResponseCache};
use rechev_types::{Error, PriceRange, Result, NOT_RECORDED};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// In-memory datastore that records every query it receives
#[derive(Default)]
struct FakeDatastore {
    responses: HashMap<Dataset, Value>,
    failing: Option<Dataset>,
    queries: Mutex<Vec<DatasetQuery>>,
}

impl FakeDatastore {
    fn with(mut self, dataset: Dataset, records: Value) -> Self {
        self.responses
            .insert(dataset, json!({"success": true, "result": {"records": records}}));
        self
    }

    fn failing_on(mut self, dataset: Dataset) -> Self {
        self.failing = Some(dataset);
        self
    }

    fn calls(&self, dataset: Dataset) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.dataset == dataset)
            .count()
    }

    fn query(&self, dataset: Dataset) -> DatasetQuery {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.dataset == dataset)
            .cloned()
            .expect("dataset was not queried")
    }
}

impl Datastore for FakeDatastore {
    fn search(&self, query: &DatasetQuery) -> Result<Value> {
        self.queries.lock().unwrap().push(query.clone());
        if self.failing == Some(query.dataset) {
            return Err(Error::Http("connection refused".to_string()));
        }
        Ok(self
            .responses
            .get(&query.dataset)
            .cloned()
            .unwrap_or_else(|| json!({"success": true, "result": {"records": []}})))
    }
}

fn example_store() -> FakeDatastore {
    FakeDatastore::default()
        .with(
            Dataset::Vehicle,
            json!([{
                "mispar_rechev": 1234567,
                "tozeret_nm": "יונדאי",
                "degem_nm": "i20",
                "shnat_yitzur": 2019,
                "tzeva_rechev": "לבן",
                "misgeret": "KMH123",
                "degem_cd": 5,
                "tozeret_cd": 9
            }]),
        )
        .with(
            Dataset::Price,
            json!([
                {"mehir": "100000", "shem_yevuan": "כלמוביל"},
                {"mehir": "150,000"}
            ]),
        )
}

fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
    let now = Arc::new(Mutex::new(start));
    let handle = Arc::clone(&now);
    let clock: Clock = Arc::new(move || *handle.lock().unwrap());
    (clock, now)
}

#[test]
fn test_example_plate_lookup_and_export() {
    let store = example_store();
    let service = LookupService::new(&store, None);

    let outcome = service.lookup("1234567").unwrap();
    assert_eq!(outcome.price_range, PriceRange { min: 100000.0, max: 150000.0 });
    assert!(!outcome.disability.present);
    assert!(!outcome.personal_import);
    assert_eq!(outcome.record.text("yevuan_rehev"), "כלמוביל");
    assert_eq!(store.calls(Dataset::PersonalImport), 0);

    assert_eq!(
        table_row(&outcome),
        [
            "1234567".to_string(),
            "יונדאי".to_string(),
            "i20".to_string(),
            "2019".to_string(),
            "לבן".to_string(),
            "KMH123".to_string(),
        ]
    );
    assert_eq!(
        status_line(&outcome),
        "מחיר יבואן: ₪100000–₪150000 | תג נכה: אין"
    );

    let dir = tempdir().unwrap();
    let path = dir.path().join("1234567.html");
    export_html(&outcome, &path).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    let tag_row = html
        .split("<div class=\"grid-item\">")
        .find(|item| item.contains("<span class=\"label\">תג נכה</span>"))
        .unwrap();
    assert!(tag_row.contains("bi-x-circle-fill"));
    assert!(!tag_row.contains("bi-check-circle-fill"));
    assert!(!html.contains("סוג תג"));
    assert!(!html.contains("תאריך הפקה"));
}

#[test]
fn test_join_queries_use_vehicle_codes() {
    let store = example_store();
    LookupService::new(&store, None).lookup("1234567").unwrap();

    let price = store.query(Dataset::Price);
    assert_eq!(
        price.mode,
        QueryMode::Filters(vec![
            ("degem_cd".to_string(), json!(5)),
            ("tozeret_cd".to_string(), json!(9)),
        ])
    );
    assert_eq!(price.limit, 100);

    let details = store.query(Dataset::TechnicalDetails);
    assert_eq!(
        details.filters_json().as_deref(),
        Some(r#"{"degem_cd":[5],"tozeret_cd":[9],"shnat_yitzur":[2019]}"#)
    );

    let disability = store.query(Dataset::Disability);
    assert_eq!(disability.mode, QueryMode::Search("1234567".to_string()));
    assert_eq!(disability.limit, 5);
}

#[test]
fn test_unknown_plate_is_not_found() {
    let store = FakeDatastore::default();
    let service = LookupService::new(&store, None);

    let err = service.lookup("9999999").unwrap_err();
    assert!(matches!(err, Error::NotFound(ref plate) if plate == "9999999"));
    assert_eq!(err.to_string(), "No data found for plate 9999999");
    assert_eq!(store.calls(Dataset::Vehicle), 1);
    assert_eq!(store.calls(Dataset::PersonalImport), 1);
    assert_eq!(store.calls(Dataset::Price), 0);
}

#[test]
fn test_personal_import_fallback() {
    let store = FakeDatastore::default()
        .with(
            Dataset::PersonalImport,
            json!([{"mispar_rechev": 7654321, "tozeret_nm": "TESLA"}]),
        )
        .with(
            Dataset::Disability,
            json!([{"SUG TAV": "תג נכה", "TAARICH HAFAKAT TAG": "2022-02-02"}]),
        );
    let outcome = LookupService::new(&store, None).lookup("7654321").unwrap();

    assert!(outcome.personal_import);
    assert_eq!(store.query(Dataset::PersonalImport).limit, 1);
    assert!(outcome.disability.present);
    assert_eq!(outcome.disability.issued.as_deref(), Some("2022-02-02"));
    assert_eq!(
        store.query(Dataset::Price).filters_json().as_deref(),
        Some(r#"{"degem_cd":[0],"tozeret_cd":[0]}"#)
    );
    assert_eq!(outcome.price_range, PriceRange { min: 0.0, max: 0.0 });
    assert!(status_line(&outcome).ends_with(" | תג נכה: קיים | יבוא אישי"));
}

#[test]
fn test_unparseable_prices_give_zero_range() {
    let store = example_store().with(Dataset::Price, json!([{"mehir": "n/a"}, {"mehir": null}]));
    let outcome = LookupService::new(&store, None).lookup("1234567").unwrap();
    assert_eq!(outcome.price_range, PriceRange { min: 0.0, max: 0.0 });
}

#[test]
fn test_missing_technical_field_is_not_recorded() {
    let store = example_store().with(
        Dataset::TechnicalDetails,
        json!([{"abs_ind": 1, "koah_sus": 100}, {"automatic_ind": 1}]),
    );
    let outcome = LookupService::new(&store, None).lookup("1234567").unwrap();

    assert_eq!(outcome.record.text("automatic_ind"), NOT_RECORDED);
    assert_eq!(outcome.record.text("koah_sus"), "100");
    assert!(outcome.record.get("abs_ind").is_affirmative());
}

#[test]
fn test_stage_failure_aborts_lookup() {
    let store = example_store().failing_on(Dataset::TechnicalDetails);
    let result = LookupService::new(&store, None).lookup("1234567");
    assert!(matches!(result, Err(Error::Http(_))));
    assert_eq!(store.calls(Dataset::Disability), 0);
}

#[test]
fn test_empty_plate_is_rejected() {
    let store = FakeDatastore::default();
    let result = LookupService::new(&store, None).lookup("   ");
    assert!(matches!(result, Err(Error::InvalidPlate)));
    assert_eq!(store.calls(Dataset::Vehicle), 0);
}

#[test]
fn test_repeat_lookup_uses_cache_for_seven_days() {
    let dir = tempdir().unwrap();
    let start = Utc::now();
    let (clock, now) = manual_clock(start);
    let cache = ResponseCache::new(dir.path().to_path_buf())
        .unwrap()
        .with_clock(clock);
    let store = example_store();
    let service = LookupService::new(&store, Some(cache));

    let first = service.lookup("1234567").unwrap();
    assert_eq!(store.calls(Dataset::Vehicle), 1);

    *now.lock().unwrap() = start + Duration::days(6) + Duration::hours(23);
    let second = service.lookup("1234567").unwrap();
    assert_eq!(store.calls(Dataset::Vehicle), 1);
    assert_eq!(store.calls(Dataset::Price), 1);
    assert_eq!(first, second);

    *now.lock().unwrap() = start + Duration::days(7) + Duration::minutes(1);
    service.lookup("1234567").unwrap();
    assert_eq!(store.calls(Dataset::Vehicle), 2);

    assert!(dir.path().join("veh_1234567.json").exists());
    assert!(dir.path().join("details_5_9_2019.json").exists());
}

#[test]
fn test_failed_fetch_is_not_cached() {
    let dir = tempdir().unwrap();
    let cache = ResponseCache::new(dir.path().to_path_buf()).unwrap();
    let failing = example_store().failing_on(Dataset::Price);

    assert!(LookupService::new(&failing, Some(cache.clone()))
        .lookup("1234567")
        .is_err());
    assert!(!dir.path().join("price_5_9.json").exists());

    let healthy = example_store();
    let outcome = LookupService::new(&healthy, Some(cache))
        .lookup("1234567")
        .unwrap();
    assert_eq!(healthy.calls(Dataset::Vehicle), 0);
    assert_eq!(healthy.calls(Dataset::Price), 1);
    assert_eq!(outcome.price_range.max, 150000.0);
}
