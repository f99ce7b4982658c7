//! Vehicle record and lookup result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display text for a technical field the registry left empty
pub const NOT_RECORDED: &str = "לא רשום";

/// Render a JSON scalar the way the registry data is shown to users
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Whether a value counts as "filled in" (non-empty, non-zero, non-null)
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A field looked up on a merged vehicle record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Value as delivered by one of the registries
    Value(&'a Value),
    /// Technical details were found but this field was absent from them
    NotRecorded,
    /// The field does not exist on the record
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Whether the field should be shown at all
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Value(v) => is_truthy(v),
            FieldValue::NotRecorded => true,
            FieldValue::Missing => false,
        }
    }

    /// Text to display for this field
    pub fn display(&self) -> String {
        match self {
            FieldValue::Value(v) => value_text(v),
            FieldValue::NotRecorded => NOT_RECORDED.to_string(),
            FieldValue::Missing => String::new(),
        }
    }

    /// Whether the field is a registry "yes" flag (literal `1`)
    pub fn is_affirmative(&self) -> bool {
        matches!(self, FieldValue::Value(v) if value_text(v) == "1")
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            FieldValue::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Technical-detail fields merged onto a vehicle record.
///
/// Each entry is `None` when the details record did not carry the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDetails {
    pub fields: Vec<(String, Option<Value>)>,
}

impl TechnicalDetails {
    fn lookup(&self, name: &str) -> Option<&Option<Value>> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

/// Vehicle record taken from the first matching registry row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    technical: Option<TechnicalDetails>,
}

impl VehicleRecord {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            technical: None,
        }
    }

    /// Raw registry fields, without the technical overlay
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn technical(&self) -> Option<&TechnicalDetails> {
        self.technical.as_ref()
    }

    pub fn set_technical(&mut self, details: TechnicalDetails) {
        self.technical = Some(details);
    }

    /// Set a registry field, keeping its position if it already exists
    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Whether the field holds a non-null value
    pub fn has_value(&self, name: &str) -> bool {
        self.get(name).as_value().map_or(false, |v| !v.is_null())
    }

    /// Look up a field; technical details take precedence over registry fields
    pub fn get(&self, name: &str) -> FieldValue<'_> {
        if let Some(details) = &self.technical {
            if let Some(entry) = details.lookup(name) {
                return match entry {
                    Some(v) => FieldValue::Value(v),
                    None => FieldValue::NotRecorded,
                };
            }
        }
        match self.fields.get(name) {
            Some(v) => FieldValue::Value(v),
            None => FieldValue::Missing,
        }
    }

    /// Display text of a field, empty when missing
    pub fn text(&self, name: &str) -> String {
        self.get(name).display()
    }

    /// All field names in order: registry fields first, then technical
    /// fields the registry did not already have.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        if let Some(details) = &self.technical {
            for (name, _) in &details.fields {
                if !self.fields.contains_key(name) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }

    /// Chassis number, falling back to the engine/shilda number
    pub fn identity_number(&self) -> String {
        let misgeret = self.get("misgeret");
        if misgeret.is_present() {
            return misgeret.display();
        }
        self.text("shilda")
    }
}

/// Importer price range across all matching price records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Reduce samples to (min, max); (0.0, 0.0) when empty
    pub fn from_samples<I: IntoIterator<Item = f64>>(samples: I) -> Self {
        let mut range: Option<(f64, f64)> = None;
        for s in samples {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(s), hi.max(s)),
                None => (s, s),
            });
        }
        let (min, max) = range.unwrap_or((0.0, 0.0));
        Self { min, max }
    }

    /// False for the (0.0, 0.0) "no price" range
    pub fn is_known(&self) -> bool {
        !(self.min == 0.0 && self.max == 0.0)
    }
}

/// Disability tag registry status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisabilityStatus {
    pub present: bool,
    pub kind: Option<String>,
    pub issued: Option<String>,
}

/// Merged result of one plate lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    /// Plate as entered
    pub plate: String,
    pub record: VehicleRecord,
    pub price_range: PriceRange,
    pub disability: DisabilityStatus,
    /// Record came from the personal-import registry
    pub personal_import: bool,
}
