//! GUI entry point for Rechev Lookup

mod app;
mod lookup_panel;

use app::RechevApp;
use eframe::egui;
use env_logger::Env;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 420.0])
            .with_min_inner_size([600.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Vehicle Lookup",
        options,
        Box::new(|cc| Ok(Box::new(RechevApp::new(cc)))),
    )
}
