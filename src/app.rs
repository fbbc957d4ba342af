use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvFilterApp {
    pub state: AppState,
}

impl CsvFilterApp {
    /// Build the app and kick off the initial load of `config.source`.
    pub fn new(ctx: &egui::Context, config: &Config) -> Self {
        let repaint = ctx.clone();
        let mut state = AppState::new(config, move || repaint.request_repaint());
        state.start_load(config.source.clone());
        Self { state }
    }
}

impl eframe::App for CsvFilterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_table(ui, &mut self.state);
        });

        // Apply what the widgets emitted this frame; redraw with the result.
        if self.state.has_pending_events() {
            self.state.process_events();
            ctx.request_repaint();
        }
    }
}
