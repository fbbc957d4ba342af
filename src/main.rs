use clap::Parser;
use csv_filter_viewer::app::CsvFilterApp;
use csv_filter_viewer::config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::parse();
    log::info!(
        "starting with source {} (page size {}, {} filtering)",
        config.source,
        config.page_size,
        config.filter_mode
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Filter for small dataset",
        options,
        Box::new(move |cc| Ok(Box::new(CsvFilterApp::new(&cc.egui_ctx, &config)))),
    )
}
