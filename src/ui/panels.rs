use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::loader::Source;
use crate::state::{AppState, UiEvent};

// ---------------------------------------------------------------------------
// Left side panel – one value selector per column
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.controller.is_none() {
        ui.label(if state.is_loading() {
            "Loading…"
        } else {
            "No dataset loaded."
        });
        return;
    }

    let mut events = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in state.schema {
                let Some(values) = state.options.get(col.name) else {
                    continue;
                };

                ui.strong(col.name);
                let sentinel = format!("Select {}...", col.name);
                let current = state.selections.get(col.name);
                let shown = match current {
                    Some(v) if !v.is_empty() => v.as_str(),
                    _ => sentinel.as_str(),
                };

                egui::ComboBox::from_id_salt(col.name)
                    .selected_text(shown)
                    .width(ui.available_width() - 8.0)
                    .show_ui(ui, |ui: &mut Ui| {
                        // The sentinel is a real choice: it filters on "".
                        let choices = std::iter::once(("", sentinel.as_str()))
                            .chain(values.iter().map(|v| (v.as_str(), v.as_str())));
                        for (value, label) in choices {
                            let is_current = current.is_some_and(|c| c == value);
                            if ui.selectable_label(is_current, label).clicked() {
                                events.push(UiEvent::FilterChanged {
                                    column: col.name.to_string(),
                                    value: value.to_string(),
                                });
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });

    for event in events {
        state.push_event(event);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_reload = state.source.is_some() && !state.is_loading();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                state.push_event(UiEvent::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(RichText::new(source.to_string()).weak());
            ui.separator();
        }

        if let Some(ctl) = &state.controller {
            ui.label(format!(
                "{} records loaded, {} visible ({})",
                ctl.dataset().len(),
                ctl.len(),
                ctl.state()
            ));
            if let Some(active) = ctl.active_filter() {
                ui.separator();
                ui.label(format!(
                    "last filter ({}): {} = {:?}",
                    ctl.mode(),
                    active.column,
                    active.value
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(ui.visuals().error_fg_color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.push_event(UiEvent::Open(Source::Path(path)));
    }
}
