use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use crate::config::Config;
use crate::data::error::DataError;
use crate::data::filter::{FilterController, FilterMode};
use crate::data::loader::{PendingLoad, Source};
use crate::data::model::{ColumnSpec, Dataset, FilterOptions, SCHEMA};
use crate::data::options::derive_options;
use crate::ui::table::Pagination;

// ---------------------------------------------------------------------------
// Events emitted by the widgets
// ---------------------------------------------------------------------------

/// Something the user did. Widgets only queue events; the state applies
/// them in order once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A selector picked `value` for `column` (the empty sentinel included).
    FilterChanged { column: String, value: String },
    PageChanged(usize),
    /// Load the current source again from scratch.
    Reload,
    /// Load a different source.
    Open(Source),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
pub struct AppState {
    pub schema: &'static [ColumnSpec],

    pub filter_mode: FilterMode,

    /// Source of the current (or last attempted) load.
    pub source: Option<Source>,

    /// Distinct values per schema column of the loaded dataset.
    pub options: FilterOptions,

    /// Current view (None until a load succeeds).
    pub controller: Option<FilterController>,

    /// Last value picked in each selector, for display only.
    pub selections: BTreeMap<String, String>,

    pub pagination: Pagination,

    pub load_status: LoadStatus,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pending: Option<PendingLoad>,
    events: VecDeque<UiEvent>,
    waker: Waker,
}

impl AppState {
    /// `waker` is called from the loader thread when a load finishes.
    pub fn new(config: &Config, waker: impl Fn() + Send + Sync + 'static) -> Self {
        AppState {
            schema: SCHEMA,
            filter_mode: config.filter_mode,
            source: None,
            options: FilterOptions::new(),
            controller: None,
            selections: BTreeMap::new(),
            pagination: Pagination::new(config.page_size),
            load_status: LoadStatus::Idle,
            status_message: None,
            pending: None,
            events: VecDeque::new(),
            waker: Arc::new(waker),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_status == LoadStatus::Loading
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // -- loading --

    /// Begin a fresh load. Drops the current dataset, options, view and
    /// selections; an older load still in flight is abandoned.
    pub fn start_load(&mut self, source: Source) {
        log::info!("loading {source}");
        self.options.clear();
        self.controller = None;
        self.selections.clear();
        self.pagination.page = 0;
        self.status_message = None;
        self.load_status = LoadStatus::Loading;

        let waker = Arc::clone(&self.waker);
        self.pending = Some(PendingLoad::spawn(source.clone(), move || waker()));
        self.source = Some(source);
    }

    /// Pick up the result of the pending load, if it has finished.
    pub fn poll_load(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        self.pending = None;
        self.finish_load(result);
    }

    /// Ingest a load result: derive options and start an unfiltered view,
    /// or record a visible failure.
    pub fn finish_load(&mut self, result: Result<Dataset, DataError>) {
        match result.and_then(|ds| self.set_dataset(ds)) {
            Ok(()) => {
                self.load_status = LoadStatus::Ready;
            }
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.options.clear();
                self.controller = None;
                self.status_message = Some(format!("Data failed to load: {e}"));
                self.load_status = LoadStatus::Failed(e.to_string());
            }
        }
    }

    fn set_dataset(&mut self, dataset: Dataset) -> Result<(), DataError> {
        let options = derive_options(&dataset, self.schema)?;
        log::info!(
            "Loaded {} records with columns {:?}",
            dataset.len(),
            dataset.headers
        );
        self.options = options;
        self.controller = Some(FilterController::new(Arc::new(dataset), self.filter_mode));
        self.pagination.page = 0;
        Ok(())
    }

    // -- events --

    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    /// Apply all queued events in the order they were emitted.
    pub fn process_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::FilterChanged { column, value } => {
                let Some(ctl) = self.controller.as_mut() else {
                    log::debug!("ignoring filter on {column}: no dataset loaded");
                    return;
                };
                ctl.apply_filter(&column, &value);
                self.pagination.clamp(ctl.len());
                self.selections.insert(column, value);
            }
            UiEvent::PageChanged(page) => {
                let total = self.controller.as_ref().map_or(0, FilterController::len);
                self.pagination.set_page(page, total);
            }
            UiEvent::Reload => {
                if let Some(source) = self.source.clone() {
                    self.start_load(source);
                }
            }
            UiEvent::Open(source) => self.start_load(source),
        }
    }

    #[cfg(test)]
    fn wait_for_load(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait();
            self.finish_load(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::loader::tests::serve_once;

    const CSV: &str = "number,mod3,mod4,mod5,mod6\n\
        1,1,1,1,1\n2,2,2,2,2\n3,0,3,3,3\n4,1,0,4,4\n";

    fn state_with(page_size: usize) -> AppState {
        let cfg = Config::try_parse_from([
            "csv-filter-viewer",
            "--page-size",
            page_size.to_string().as_str(),
        ])
        .unwrap();
        AppState::new(&cfg, || {})
    }

    fn loaded_state() -> AppState {
        let mut state = state_with(100);
        state.finish_load(parse_csv(CSV));
        state
    }

    fn visible_numbers(state: &AppState) -> Vec<String> {
        state
            .controller
            .as_ref()
            .unwrap()
            .view()
            .map(|r| r.get("number").unwrap().to_string())
            .collect()
    }

    fn filter(column: &str, value: &str) -> UiEvent {
        UiEvent::FilterChanged {
            column: column.into(),
            value: value.into(),
        }
    }

    #[test]
    fn successful_load_derives_options_and_shows_everything() {
        let state = loaded_state();
        assert_eq!(state.load_status, LoadStatus::Ready);
        assert_eq!(state.options.len(), 5);
        assert_eq!(state.options["mod3"].len(), 3);
        assert_eq!(visible_numbers(&state), vec!["1", "2", "3", "4"]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selector_events_narrow_cumulatively() {
        let mut state = loaded_state();
        state.push_event(filter("mod3", "1"));
        state.process_events();
        assert_eq!(visible_numbers(&state), vec!["1", "4"]);

        state.push_event(filter("number", "4"));
        state.process_events();
        assert_eq!(visible_numbers(&state), vec!["4"]);
        assert_eq!(state.selections["mod3"], "1");
        assert_eq!(state.selections["number"], "4");
        // options still describe the full dataset
        assert_eq!(state.options["number"].len(), 4);
    }

    #[test]
    fn picking_the_sentinel_empties_the_view() {
        let mut state = loaded_state();
        state.push_event(filter("mod4", ""));
        state.process_events();
        assert!(state.controller.as_ref().unwrap().is_empty());
    }

    #[test]
    fn failed_load_is_visible_and_leaves_no_data() {
        let mut state = loaded_state();
        state.finish_load(Err(DataError::Load {
            source_id: "data/missing.csv".into(),
            reason: "not found".into(),
        }));
        assert!(matches!(state.load_status, LoadStatus::Failed(_)));
        assert!(state.controller.is_none());
        assert!(state.options.is_empty());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Data failed to load")));

        state.push_event(filter("mod3", "1"));
        state.process_events();
        assert!(state.controller.is_none());
    }

    #[test]
    fn schema_mismatch_fails_the_load() {
        let mut state = state_with(100);
        state.finish_load(parse_csv("number,mod3\n1,1\n"));
        assert!(matches!(state.load_status, LoadStatus::Failed(ref m) if m.contains("mod4")));
        assert!(state.options.is_empty());
    }

    #[test]
    fn http_404_leaves_options_empty() {
        let mut state = state_with(100);
        state.push_event(UiEvent::Open(Source::Url(serve_once("404 Not Found", ""))));
        state.process_events();
        assert!(state.is_loading());
        state.wait_for_load();
        assert!(matches!(state.load_status, LoadStatus::Failed(_)));
        assert!(state.options.is_empty());
        assert!(state.controller.is_none());
    }

    #[test]
    fn reload_resets_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("data.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut state = state_with(100);
        state.push_event(UiEvent::Open(Source::Path(path)));
        state.process_events();
        state.wait_for_load();
        state.push_event(filter("mod3", "0"));
        state.process_events();
        assert_eq!(visible_numbers(&state), vec!["3"]);

        state.push_event(UiEvent::Reload);
        state.process_events();
        assert!(state.controller.is_none());
        assert!(state.selections.is_empty());
        state.wait_for_load();
        assert_eq!(visible_numbers(&state), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn filtering_clamps_the_page() {
        let mut state = state_with(2);
        state.finish_load(parse_csv(CSV));
        state.push_event(UiEvent::PageChanged(1));
        state.process_events();
        assert_eq!(state.pagination.page, 1);

        state.push_event(filter("mod3", "1"));
        state.process_events();
        assert_eq!(state.pagination.page, 0);

        state.push_event(UiEvent::PageChanged(5));
        state.process_events();
        assert_eq!(state.pagination.page, 0);
    }
}
