//! Output formatting module

use rechev_app::report::{
    price_display, report_entries, status_line, table_row, EntryValue, Section, TABLE_HEADERS,
};
use rechev_types::{LookupOutcome, OutputFormat, Result};

pub fn output_outcome(output_format: OutputFormat, outcome: &LookupOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(outcome)?;
        println!("{}", content);
        return Ok(());
    }

    let row = table_row(outcome);
    println!("\nVehicle");
    println!("=======");
    for (header, value) in TABLE_HEADERS.iter().zip(row.iter()) {
        println!("{:<12} {}", header, value);
    }
    println!("\n{}", status_line(outcome));

    let entries = report_entries(outcome);
    for section in Section::ALL {
        let in_section: Vec<_> = entries.iter().filter(|e| e.section == section).collect();
        if in_section.is_empty() {
            continue;
        }
        println!("\n--- {} ---", section.title());
        for entry in in_section {
            let value = match &entry.value {
                EntryValue::Text(text) => text.clone(),
                EntryValue::Icon(true) => "✓".to_string(),
                EntryValue::Icon(false) => "✕".to_string(),
            };
            println!("{}: {}", entry.label, value);
        }
    }

    println!("\n{}", price_display(outcome.price_range).text);
    Ok(())
}
