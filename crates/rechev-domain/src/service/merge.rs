//! Technical-detail merge and disability extraction

use rechev_types::{DisabilityStatus, TechnicalDetails, VehicleRecord};
use serde_json::{Map, Value};

/// Fields copied from the technical-details registry onto the vehicle record
pub const TECHNICAL_FIELDS: [&str; 19] = [
    "automatic_ind",
    "merkav",
    "nefah_manoa",
    "kvuzat_agra_cd",
    "abs_ind",
    "kariot_avir_source",
    "hege_koah_ind",
    "halonot_hashmal_source",
    "halon_bagg_ind",
    "mispar_dlatot",
    "koah_sus",
    "mispar_moshavim",
    "bakarat_yatzivut_ind",
    "kosher_grira_im_blamim",
    "kosher_grira_bli_blamim",
    "kvutzat_zihum",
    "bakarat_stiya_menativ_ind",
    "nitur_merhak_milfanim_ind",
    "zihuy_beshetah_nistar_ind",
];

/// Codes joining the vehicle to the price and technical registries
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCodes {
    pub model_code: Value,
    pub manufacturer_code: Value,
    pub year: Value,
}

/// `degem_cd` / `tozeret_cd` default to 0, `shnat_yitzur` to null
pub fn join_codes(record: &VehicleRecord) -> JoinCodes {
    let field = |name: &str| record.fields().get(name).cloned();
    JoinCodes {
        model_code: field("degem_cd").unwrap_or_else(|| Value::from(0)),
        manufacturer_code: field("tozeret_cd").unwrap_or_else(|| Value::from(0)),
        year: field("shnat_yitzur").unwrap_or(Value::Null),
    }
}

/// Technical overlay from a details row, each field independently optional
pub fn technical_overlay(row: &Map<String, Value>) -> TechnicalDetails {
    TechnicalDetails {
        fields: TECHNICAL_FIELDS
            .iter()
            .map(|name| (name.to_string(), row.get(*name).cloned()))
            .collect(),
    }
}

/// Disability tag status from the first registry row, if any
pub fn disability_status(row: Option<&Map<String, Value>>) -> DisabilityStatus {
    let text = |row: &Map<String, Value>, name: &str| {
        row.get(name)
            .map(rechev_types::value_text)
            .unwrap_or_default()
    };
    match row {
        Some(row) => DisabilityStatus {
            present: true,
            kind: Some(text(row, "SUG TAV")),
            issued: Some(text(row, "TAARICH HAFAKAT TAG")),
        },
        None => DisabilityStatus::default(),
    }
}
