use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, LoadStatus, UiEvent};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page cursor over the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: usize,
    /// Zero-based page index.
    pub page: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Pagination {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Number of pages for `total` rows; an empty view still has one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Row range `start..end` of the current page.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        (start, end)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Pull the cursor back onto the last page if the view shrank.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }
}

// ---------------------------------------------------------------------------
// Table (central panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

/// Render the current page of the view with a fixed header and a pager.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    if let Some(page) = draw_table(ui, state) {
        state.push_event(UiEvent::PageChanged(page));
    }
}

/// Draw the table; returns the page the user asked for, if any.
fn draw_table(ui: &mut Ui, state: &AppState) -> Option<usize> {
    let ctl = match (&state.load_status, &state.controller) {
        (_, Some(ctl)) => ctl,
        (LoadStatus::Loading, None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
            return None;
        }
        (LoadStatus::Failed(reason), None) => {
            let color = ui.visuals().error_fg_color;
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(RichText::new(format!("Data failed to load.\n{reason}")).color(color));
            });
            return None;
        }
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to view it  (File → Open…)");
            });
            return None;
        }
    };

    let total = ctl.len();
    let (start, end) = state.pagination.bounds(total);

    // Pager sits below the table; reserve its height first.
    let requested = egui::TopBottomPanel::bottom("pager")
        .show_inside(ui, |ui: &mut Ui| pager(ui, &state.pagination, total))
        .inner;

    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No records to display");
        });
        return requested;
    }

    let schema = state.schema;
    let rows: Vec<_> = ctl.view_slice(start, end).collect();

    TableBuilder::new(ui)
        .id_salt("data_table")
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::initial(120.0).at_least(60.0).clip(true), schema.len())
        .header(HEADER_HEIGHT, |mut header| {
            for col in schema {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.label);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let record = rows[row.index()];
                for col in schema {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.get(col.name).unwrap_or_default());
                    });
                }
            });
        });

    requested
}

fn pager(ui: &mut Ui, pagination: &Pagination, total: usize) -> Option<usize> {
    let pages = pagination.page_count(total);
    let page = pagination.page;
    let (start, end) = pagination.bounds(total);

    let mut requested = None;
    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
        if ui.add_enabled(page + 1 < pages, egui::Button::new("Next ›")).clicked() {
            requested = Some(page + 1);
        }
        ui.label(format!("page {} of {pages}", page + 1));
        if ui.add_enabled(page > 0, egui::Button::new("‹ Prev")).clicked() {
            requested = page.checked_sub(1);
        }
        if total > 0 {
            ui.label(format!("{}–{end} of {total}", start + 1));
        }
    });
    requested
}
