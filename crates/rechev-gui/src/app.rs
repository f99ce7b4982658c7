//! Main application structure

use eframe::egui::{self, RichText};
use log::{info, warn};
use rechev_app::Config;

use crate::lookup_panel::LookupPanel;

const WELCOME_TEXT: &str = "Welcome to the Vehicle License Plate Indexing System!\n\
This application allows efficient searching, organizing, and indexing of vehicle plate data.\n\n\
ברוכים הבאים למערכת לאינדוקס לוחיות רישוי!\n\
באמצעות תוכנה זו ניתן לבצע חיפוש, סידור ואינדוקס חכם של נתוני רכבים בצורה יעילה, אינטואיטיבית ומהירה.\n\n\
Data source: data.gov.il";

/// Main application state
pub struct RechevApp {
    /// Lookup panel state
    lookup_panel: LookupPanel,
    /// Application configuration
    config: Config,
    /// Welcome dialog still open
    show_welcome: bool,
}

impl RechevApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();

        // Default egui fonts have no Hebrew glyphs
        if let Some(font_data) = Self::load_system_font() {
            fonts.font_data.insert(
                "hebrew".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .insert(0, "hebrew".to_owned());
            }
        } else {
            warn!("no Hebrew-capable system font found");
        }

        cc.egui_ctx.set_fonts(fonts);

        let config = Config::load().unwrap_or_else(|e| {
            warn!("using default configuration: {}", e);
            Config::default()
        });
        info!("cache enabled: {}", config.cache_enabled);

        Self {
            lookup_panel: LookupPanel::new(),
            show_welcome: config.show_welcome,
            config,
        }
    }

    /// Load a system font that covers Hebrew
    fn load_system_font() -> Option<Vec<u8>> {
        let font_paths = [
            "C:/Windows/Fonts/arial.ttf",
            "C:/Windows/Fonts/segoeui.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/noto/NotoSansHebrew-Regular.ttf",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    fn render_welcome(&mut self, ctx: &egui::Context) {
        if !self.show_welcome {
            return;
        }

        egui::Window::new("Vehicle License Plate Indexing | קבלת פנים")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(WELCOME_TEXT));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.show_welcome = false;
                }
            });
    }
}

impl eframe::App for RechevApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!self.show_welcome, |ui| {
                self.lookup_panel.ui(ui, &self.config);
            });
        });

        self.render_welcome(ctx);
    }
}
