//! Importer price parsing

use rechev_types::{PriceRange, VehicleRecord};
use serde_json::{Map, Value};

/// Parse a `mehir` value.
///
/// Accepts JSON numbers and numeric strings, including comma-grouped ones
/// like `"120,000"`. Anything else, and non-finite results, yield `None`.
pub fn parse_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .or_else(|| s.replace(',', "").trim().parse::<f64>().ok()),
        _ => None,
    };
    parsed.filter(|p| p.is_finite())
}

/// Price range over every row whose `mehir` parses
pub fn price_range(rows: &[&Map<String, Value>]) -> PriceRange {
    PriceRange::from_samples(rows.iter().filter_map(|row| row.get("mehir").and_then(parse_price)))
}

/// Fill `yevuan_rehev` from the first price row naming an importer,
/// unless the record already has one.
pub fn backfill_importer(record: &mut VehicleRecord, rows: &[&Map<String, Value>]) {
    if record.has_value("yevuan_rehev") {
        return;
    }
    let importer = rows
        .iter()
        .filter_map(|row| row.get("shem_yevuan"))
        .find(|v| !v.is_null());
    if let Some(importer) = importer {
        record.set("yevuan_rehev", importer.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: &Value) -> Vec<&Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap())
            .collect()
    }

    #[test]
    fn test_parse_price_formats() {
        assert_eq!(parse_price(&json!("120,000")), Some(120000.0));
        assert_eq!(parse_price(&json!("100000")), Some(100000.0));
        assert_eq!(parse_price(&json!(" 99500.5 ")), Some(99500.5));
        assert_eq!(parse_price(&json!(87000)), Some(87000.0));
        assert_eq!(parse_price(&json!("N/A")), None);
        assert_eq!(parse_price(&json!("")), None);
        assert_eq!(parse_price(&json!("NaN")), None);
        assert_eq!(parse_price(&json!(null)), None);
    }

    #[test]
    fn test_price_range_skips_bad_values() {
        let data = json!([
            {"mehir": "100000"},
            {"mehir": "150,000"},
            {"mehir": "לא ידוע"},
            {"shem_yevuan": "no price here"}
        ]);
        let range = price_range(&rows(&data));
        assert_eq!(range, PriceRange { min: 100000.0, max: 150000.0 });
        assert!(range.min <= range.max);

        let data = json!([{"mehir": "?"}]);
        assert_eq!(price_range(&rows(&data)), PriceRange { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_backfill_importer_only_when_unset() {
        let data = json!([
            {"mehir": "1"},
            {"mehir": "2", "shem_yevuan": null},
            {"mehir": "3", "shem_yevuan": "כלמוביל"},
            {"mehir": "4", "shem_yevuan": "אחר"}
        ]);

        let mut record = VehicleRecord::default();
        backfill_importer(&mut record, &rows(&data));
        assert_eq!(record.text("yevuan_rehev"), "כלמוביל");

        let mut record = VehicleRecord::default();
        record.set("yevuan_rehev", json!("קיים"));
        backfill_importer(&mut record, &rows(&data));
        assert_eq!(record.text("yevuan_rehev"), "קיים");
    }
}
