//! Plate lookup panel
//!
//! Plate entry, search and export buttons, the result table and the status
//! line. Searches run on a background thread held in a [`TaskSlot`].

use eframe::egui::{self, Color32, RichText, Ui};
use log::{error, info};
use rechev_app::report::{export_html, open_in_viewer, status_line, table_row, TABLE_HEADERS};
use rechev_app::{Config, LookupService, TaskSlot};
use rechev_types::{Error, LookupOutcome};

type SearchResult = Result<LookupOutcome, String>;

/// Panel for looking up a vehicle by plate
pub struct LookupPanel {
    /// Plate text input
    plate_input: String,
    /// Running search, if any
    tasks: TaskSlot<SearchResult>,
    /// Last successful lookup
    outcome: Option<LookupOutcome>,
    /// Status line under the table
    status: String,
    /// Message shown in the error dialog
    error_dialog: Option<String>,
}

impl LookupPanel {
    pub fn new() -> Self {
        Self {
            plate_input: String::new(),
            tasks: TaskSlot::new(),
            outcome: None,
            status: "מחיר יבואן: -".to_string(),
            error_dialog: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &Config) {
        self.poll_search(ui.ctx());

        ui.heading("חיפוש רכב");
        ui.add_space(10.0);

        self.render_search_row(ui, config);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_table(ui);

        ui.add_space(10.0);
        ui.label(RichText::new(&self.status).size(15.0));
        ui.add_space(10.0);

        let can_export = self.outcome.is_some();
        if ui
            .add_enabled(can_export, egui::Button::new("Export to HTML"))
            .clicked()
        {
            self.export(config);
        }

        self.render_error_dialog(ui);
    }

    /// Take the search result once the background thread is done
    fn poll_search(&mut self, ctx: &egui::Context) {
        if !self.tasks.is_running() {
            return;
        }

        let Some(finished) = self.tasks.poll() else {
            ctx.request_repaint();
            return;
        };

        match finished.result {
            Some(Ok(outcome)) => {
                self.status = status_line(&outcome);
                self.outcome = Some(outcome);
            }
            Some(Err(message)) => {
                self.status = "שגיאה בחיפוש".to_string();
                self.error_dialog = Some(message);
            }
            None => {
                self.status = "שגיאה בחיפוש".to_string();
                self.error_dialog = Some(format!(
                    "Search for plate {} ended unexpectedly",
                    finished.plate
                ));
            }
        }
    }

    fn render_search_row(&mut self, ui: &mut Ui, config: &Config) {
        let searching = self.tasks.is_running();

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.plate_input)
                    .desired_width(240.0)
                    .hint_text("Enter license plate"),
            );
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let clicked = ui
                .add_enabled(!searching, egui::Button::new("Search"))
                .clicked();

            if (clicked || submitted) && !searching {
                self.start_search(config);
            }

            if searching {
                ui.spinner();
            }
        });
    }

    /// Start a lookup on a background thread
    fn start_search(&mut self, config: &Config) {
        let plate = self.plate_input.trim().to_string();
        if plate.is_empty() {
            self.error_dialog = Some(Error::InvalidPlate.to_string());
            return;
        }

        self.status = "מחפש...".to_string();
        let config = config.clone();
        let worker_plate = plate.clone();
        let id = self.tasks.start(&plate, move || {
            LookupService::from_config(&config, true)
                .and_then(|service| service.lookup(&worker_plate))
                .map_err(|e| e.to_string())
        });
        info!("search {} started for plate {}", id, plate);
    }

    fn render_table(&self, ui: &mut Ui) {
        egui::Grid::new("lookup_result")
            .num_columns(TABLE_HEADERS.len())
            .spacing([14.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for header in TABLE_HEADERS {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                if let Some(ref outcome) = self.outcome {
                    for cell in table_row(outcome) {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    }

    /// Ask for a path and write the HTML report
    fn export(&mut self, config: &Config) {
        let Some(ref outcome) = self.outcome else {
            self.error_dialog = Some("No data to export.".to_string());
            return;
        };

        let suggested = format!("{}.html", outcome.record.text("mispar_rechev"));
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save HTML")
            .add_filter("HTML Files", &["html"])
            .set_file_name(suggested)
            .save_file()
        else {
            return;
        };

        match export_html(outcome, &path) {
            Ok(written) => {
                if config.open_after_export {
                    open_in_viewer(&written);
                }
            }
            Err(e) => {
                error!("export to {} failed: {}", path.display(), e);
                self.error_dialog = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn render_error_dialog(&mut self, ui: &mut Ui) {
        let Some(message) = self.error_dialog.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(RichText::new(message).color(Color32::LIGHT_RED));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.error_dialog = None;
                }
            });
    }
}

impl Default for LookupPanel {
    fn default() -> Self {
        Self::new()
    }
}
