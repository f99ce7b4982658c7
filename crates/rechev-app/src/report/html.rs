//! HTML report rendering

use chrono::{DateTime, Local};
use log::{debug, info};
use rechev_types::{Error, LookupOutcome, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use super::{price_display, report_entries, section_entries, EntryValue, Section};

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../../templates/report.html");

#[derive(Serialize)]
struct EntryView {
    label: String,
    is_icon: bool,
    yes: bool,
    text: String,
}

#[derive(Serialize)]
struct SectionView {
    title: &'static str,
    icon: &'static str,
    entries: Vec<EntryView>,
}

#[derive(Serialize)]
struct PriceView {
    text: String,
    importer: String,
    has_bar: bool,
    fill_percent: u32,
    low: String,
    high: String,
}

/// Renders lookup outcomes into a standalone HTML document
pub struct ReportRenderer {
    tera: Tera,
}

fn template_error(e: tera::Error) -> Error {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    Error::Template(message)
}

impl ReportRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { tera })
    }

    /// Render the report; values are HTML-escaped by the template engine
    pub fn render(&self, outcome: &LookupOutcome, generated_at: DateTime<Local>) -> Result<String> {
        let entries = report_entries(outcome);
        let sections: Vec<SectionView> = Section::ALL
            .iter()
            .map(|section| SectionView {
                title: section.title(),
                icon: section.icon_class(),
                entries: section_entries(&entries, *section)
                    .into_iter()
                    .map(|entry| match &entry.value {
                        EntryValue::Text(text) => EntryView {
                            label: entry.label.clone(),
                            is_icon: false,
                            yes: false,
                            text: text.clone(),
                        },
                        EntryValue::Icon(yes) => EntryView {
                            label: entry.label.clone(),
                            is_icon: true,
                            yes: *yes,
                            text: String::new(),
                        },
                    })
                    .collect(),
            })
            .collect();

        let price = price_display(outcome.price_range);
        let price_view = PriceView {
            text: price.text,
            importer: outcome.record.text("yevuan_rehev"),
            has_bar: price.bar.is_some(),
            fill_percent: price.bar.as_ref().map_or(0, |b| b.fill_percent),
            low: price.bar.as_ref().map(|b| b.low.clone()).unwrap_or_default(),
            high: price.bar.as_ref().map(|b| b.high.clone()).unwrap_or_default(),
        };

        let mut context = Context::new();
        context.insert("plate", &outcome.record.text("mispar_rechev"));
        context.insert("generated_at", &generated_at.format("%Y-%m-%d %H:%M:%S").to_string());
        context.insert("sections", &sections);
        context.insert("price", &price_view);

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(template_error)
    }
}

/// Write the report for `outcome` to `path`, creating parent directories
pub fn export_html(outcome: &LookupOutcome, path: &Path) -> Result<PathBuf> {
    let renderer = ReportRenderer::new()?;
    let document = renderer.render(outcome, Local::now())?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, document)?;
    info!("report for plate {} written to {}", outcome.plate, path.display());
    Ok(path.to_path_buf())
}

/// Open a file in the platform's default viewer; failures are only logged
pub fn open_in_viewer(path: &Path) {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(&path)
        .spawn();

    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(&path).spawn();

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(&path).spawn();

    if let Err(e) = result {
        debug!("could not open {} in viewer: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rechev_types::{DisabilityStatus, PriceRange, VehicleRecord};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn outcome(fields: Value, price_range: PriceRange) -> LookupOutcome {
        let map = match fields {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        };
        LookupOutcome {
            plate: "1234567".to_string(),
            record: VehicleRecord::from_map(map),
            price_range,
            disability: DisabilityStatus::default(),
            personal_import: false,
        }
    }

    fn render(outcome: &LookupOutcome) -> String {
        let at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        ReportRenderer::new().unwrap().render(outcome, at).unwrap()
    }

    #[test]
    fn test_render_sections_and_price_bar() {
        let mut out = outcome(
            json!({"mispar_rechev": 1234567, "tozeret_nm": "קיה", "yevuan_rehev": "טלקאר"}),
            PriceRange { min: 100000.0, max: 150000.0 },
        );
        out.record.set("abs_ind", json!("1"));
        let html = render(&out);

        for section in Section::ALL {
            assert!(html.contains(&format!("{}</h2>", section.title())));
        }
        assert!(html.contains("2026-01-02 03:04:05"));
        assert!(html.contains("bootstrap-icons"));
        assert!(html.contains("width:66%"));
        assert!(html.contains("₪100,000"));
        assert!(html.contains("טלקאר"));
        assert!(html.contains("bi-check-circle-fill"));
    }

    #[test]
    fn test_render_without_price_and_escaping() {
        let out = outcome(
            json!({"mispar_rechev": "<b>1</b>", "tozeret_nm": "A & B"}),
            PriceRange::default(),
        );
        let html = render(&out);

        assert!(html.contains("מחיר יבואן: לא זמין"));
        assert!(!html.contains("class=\"price-fill\""));
        assert!(html.contains("&lt;b&gt;1&lt;&#x2F;b&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("<b>1</b>"));
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("1234567.html");
        let out = outcome(json!({"mispar_rechev": 1234567}), PriceRange::default());

        let written = export_html(&out, &path).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!doctype html>"));
    }
}
