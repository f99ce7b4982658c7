//! Presentation of a lookup outcome: table row, status line, report entries

mod html;

pub use html::{export_html, open_in_viewer, ReportRenderer};

use rechev_types::{FieldValue, LookupOutcome, PriceRange, VehicleRecord, NOT_RECORDED};

/// Column headers of the result table
pub const TABLE_HEADERS: [&str; 6] = ["מס' רכב", "יצרן", "דגם", "שנה", "צבע", "מס' שלדה"];

/// Report section a field is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    General,
    Licensing,
    Technical,
    Safety,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::General,
        Section::Licensing,
        Section::Technical,
        Section::Safety,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::General => "פרטים כלליים",
            Section::Licensing => "רישוי ובעלות",
            Section::Technical => "מפרט טכני",
            Section::Safety => "מערכות בטיחות ופיצ'רים",
        }
    }

    /// bootstrap-icons class for the section heading
    pub fn icon_class(&self) -> &'static str {
        match self {
            Section::General => "bi-info-circle",
            Section::Licensing => "bi-card-list",
            Section::Technical => "bi-gear",
            Section::Safety => "bi-shield-check",
        }
    }
}

/// Value cell of a report entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Text(String),
    /// Yes/no indicator
    Icon(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub label: String,
    pub value: EntryValue,
    pub section: Section,
}

impl ReportEntry {
    fn text(label: &str, value: String, section: Section) -> Self {
        Self {
            label: label.to_string(),
            value: EntryValue::Text(value),
            section,
        }
    }

    fn icon(label: &str, yes: bool, section: Section) -> Self {
        Self {
            label: label.to_string(),
            value: EntryValue::Icon(yes),
            section,
        }
    }
}

/// Display label for a registry field
pub fn field_label(name: &str) -> Option<&'static str> {
    let label = match name {
        "mispar_rechev" => "מספר רכב",
        "tozeret_nm" => "יצרן",
        "degem_nm" => "דגם",
        "degem_manoa" => "דגם מנוע",
        "shnat_yitzur" => "שנת יצור",
        "tzeva_rechev" => "צבע",
        "sug_delek_nm" => "סוג דלק",
        "merkav" => "מבנה רכב",
        "nefah_manoa" | "nefach_manoa" => "נפח מנוע",
        "koah_sus" => "כוח סוס",
        "mispar_dlatot" => "מספר דלתות",
        "mispar_moshavim" => "מספר מושבים",
        "baalut" => "בעלות",
        "tokef_dt" => "תוקף רישום",
        "mivchan_acharon_dt" => "מבחן אחרון",
        "kvuzat_agra_cd" => "קבוצת רישוי",
        "automatic_ind" => "תיבת הילוכים אוטומטית",
        "abs_ind" => "מערכת בלימה ABS",
        "hege_koah_ind" => "הגה כוח",
        "kariot_avir_source" => "כמות כריות אוויר",
        "bakarat_stiya_menativ_ind" => "בקרת סטייה מנתיב",
        "bakarat_yatzivut_ind" => "בקרת יציבות",
        "halon_bagg_ind" => "חלון בגג",
        "nitur_merhak_milfanim_ind" => "ניטור מרחק מלפנים",
        "zihuy_beshetah_nistar_ind" => "זיהוי בשטח נסתר",
        _ => return None,
    };
    Some(label)
}

const CORE_FIELDS: [&str; 7] = [
    "mispar_rechev",
    "tozeret_nm",
    "degem_manoa",
    "degem_nm",
    "shnat_yitzur",
    "tzeva_rechev",
    "sug_delek_nm",
];

const DETAIL_FIELDS: [(&str, Section); 10] = [
    ("merkav", Section::Technical),
    ("nefah_manoa", Section::Technical),
    ("koah_sus", Section::Technical),
    ("mispar_dlatot", Section::Technical),
    ("mispar_moshavim", Section::Technical),
    ("baalut", Section::Licensing),
    ("tokef_dt", Section::Licensing),
    ("mivchan_acharon_dt", Section::Licensing),
    ("kvuzat_agra_cd", Section::Licensing),
    ("kariot_avir_source", Section::Safety),
];

/// Ordered report entries, each assigned to its section
pub fn report_entries(outcome: &LookupOutcome) -> Vec<ReportEntry> {
    let record = &outcome.record;
    let mut entries = vec![ReportEntry::text(
        "מס' שלדה/מנוע",
        record.identity_number(),
        Section::General,
    )];

    for name in CORE_FIELDS {
        push_if_present(&mut entries, record, name, Section::General);
    }

    let disability = &outcome.disability;
    entries.push(ReportEntry::icon("תג נכה", disability.present, Section::Licensing));
    if disability.present {
        entries.push(ReportEntry::text(
            "סוג תג",
            disability.kind.clone().unwrap_or_default(),
            Section::Licensing,
        ));
        entries.push(ReportEntry::text(
            "תאריך הפקה",
            disability.issued.clone().unwrap_or_default(),
            Section::Licensing,
        ));
    }
    entries.push(ReportEntry::icon("ייבוא אישי", outcome.personal_import, Section::Licensing));

    for (name, section) in DETAIL_FIELDS {
        push_if_present(&mut entries, record, name, section);
    }

    let names = record.field_names();
    for name in &names {
        if let Some(stem) = name.strip_suffix("_ind") {
            let label = field_label(name).unwrap_or(stem);
            entries.push(ReportEntry::icon(
                label,
                record.get(name).is_affirmative(),
                Section::Safety,
            ));
        }
    }

    for name in &names {
        if let Some(stem) = name.strip_suffix("_nm") {
            let value = record.get(name);
            if value.is_present() && field_label(name).is_none() {
                entries.push(ReportEntry::text(stem, value.display(), Section::General));
            }
        }
    }

    entries
}

fn push_if_present(
    entries: &mut Vec<ReportEntry>,
    record: &VehicleRecord,
    name: &str,
    section: Section,
) {
    let value = record.get(name);
    if value.is_present() {
        let label = field_label(name).unwrap_or(name);
        entries.push(ReportEntry::text(label, value.display(), section));
    }
}

/// Entries of one section, in report order
pub fn section_entries(entries: &[ReportEntry], section: Section) -> Vec<&ReportEntry> {
    entries.iter().filter(|e| e.section == section).collect()
}

/// One row of the result table
pub fn table_row(outcome: &LookupOutcome) -> [String; 6] {
    let record = &outcome.record;
    let color = match record.get("tzeva_rechev") {
        FieldValue::Value(v) if !v.is_null() => rechev_types::value_text(v),
        _ => NOT_RECORDED.to_string(),
    };
    [
        record.text("mispar_rechev"),
        record.text("tozeret_nm"),
        record.text("degem_nm"),
        record.text("shnat_yitzur"),
        color,
        record.identity_number(),
    ]
}

/// Summary line: price range, disability tag, personal import
pub fn status_line(outcome: &LookupOutcome) -> String {
    let range = outcome.price_range;
    let mut line = if range.is_known() {
        format!("מחיר יבואן: ₪{}–₪{}", range.min as i64, range.max as i64)
    } else {
        "מחיר יבואן לא נמצא".to_string()
    };

    if outcome.disability.present {
        line.push_str(" | תג נכה: קיים");
    } else {
        line.push_str(" | תג נכה: אין");
    }

    if outcome.personal_import {
        line.push_str(" | יבוא אישי");
    }
    line
}

/// Whole shekels with thousands separators, e.g. `120,000`
pub fn format_shekels(amount: f64) -> String {
    let whole = amount as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Proportional low/high bar shown under the report
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    /// low / high as a whole percentage
    pub fill_percent: u32,
    pub low: String,
    pub high: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceDisplay {
    pub text: String,
    pub bar: Option<PriceBar>,
}

pub fn price_display(range: PriceRange) -> PriceDisplay {
    if !range.is_known() {
        return PriceDisplay {
            text: "מחיר יבואן: לא זמין".to_string(),
            bar: None,
        };
    }

    let (low, high) = (range.min, range.max);
    let text = if low != high {
        format!(
            "מחיר יבואן משוער: ₪{} – ₪{}",
            format_shekels(low),
            format_shekels(high)
        )
    } else {
        format!("מחיר יבואן משוער: ₪{}", format_shekels(low))
    };

    let bar = (high > 0.0).then(|| PriceBar {
        fill_percent: ((low / high) * 100.0).clamp(0.0, 100.0) as u32,
        low: format_shekels(low),
        high: format_shekels(high),
    });

    PriceDisplay { text, bar }
}
