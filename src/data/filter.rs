use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter mode and state
// ---------------------------------------------------------------------------

/// What a filter event narrows.
///
/// `Cumulative` filters whatever is currently shown, so successive events on
/// different columns intersect and an earlier constraint can never be
/// widened again. `FromDataset` always starts from the full dataset, so only
/// the latest (column, value) pair is in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Cumulative,
    FromDataset,
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cumulative" => Ok(FilterMode::Cumulative),
            "from-dataset" => Ok(FilterMode::FromDataset),
            other => Err(format!(
                "unknown filter mode '{other}' (expected 'cumulative' or 'from-dataset')"
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Cumulative => write!(f, "cumulative"),
            FilterMode::FromDataset => write!(f, "from-dataset"),
        }
    }
}

/// The most recent selection applied to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The view is the whole dataset; no filter event has happened since load.
    Unfiltered,
    Filtered,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Unfiltered => write!(f, "unfiltered"),
            ViewState::Filtered => write!(f, "filtered"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterController – owns the current view of one session
// ---------------------------------------------------------------------------

/// Holds the filtered view over an immutable dataset.
///
/// The view is a list of indices into the dataset, in source order.
/// `apply_filter` is the only mutation; there is no reset; a fresh load
/// builds a new controller.
#[derive(Debug, Clone)]
pub struct FilterController {
    dataset: Arc<Dataset>,
    mode: FilterMode,
    visible_indices: Vec<usize>,
    active: Option<ActiveFilter>,
}

impl FilterController {
    /// Start with the view equal to the full dataset.
    pub fn new(dataset: Arc<Dataset>, mode: FilterMode) -> Self {
        let visible_indices = (0..dataset.len()).collect();
        FilterController {
            dataset,
            mode,
            visible_indices,
            active: None,
        }
    }

    /// Keep only records whose `column` is exactly `value`.
    ///
    /// The empty string is an ordinary value here: it matches records whose
    /// cell is empty, it does not clear the filter. An empty view is a valid
    /// result and stays empty under further cumulative filtering.
    pub fn apply_filter(&mut self, column: &str, value: &str) {
        let dataset = &self.dataset;
        if !dataset.has_column(column) {
            log::warn!("filter on unknown column '{column}' matches nothing");
        }
        let before = self.visible_indices.len();
        match self.mode {
            FilterMode::Cumulative => {
                self.visible_indices
                    .retain(|&i| dataset.records()[i].matches(column, value));
            }
            FilterMode::FromDataset => {
                self.visible_indices = dataset
                    .records()
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.matches(column, value))
                    .map(|(i, _)| i)
                    .collect();
            }
        }
        log::info!(
            "filter {column} == {value:?} ({}): {before} -> {} records",
            self.mode,
            self.visible_indices.len()
        );

        self.active = Some(ActiveFilter {
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    pub fn state(&self) -> ViewState {
        if self.active.is_some() {
            ViewState::Filtered
        } else {
            ViewState::Unfiltered
        }
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.active.as_ref()
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Number of records in the current view.
    pub fn len(&self) -> usize {
        self.visible_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_indices.is_empty()
    }

    /// Records of the current view, in source order.
    pub fn view(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible_indices
            .iter()
            .map(move |&i| &self.dataset.records()[i])
    }

    /// Records `start..end` of the current view (clamped to its length).
    pub fn view_slice(&self, start: usize, end: usize) -> impl Iterator<Item = &Record> + '_ {
        let end = end.min(self.visible_indices.len());
        let start = start.min(end);
        self.visible_indices[start..end]
            .iter()
            .map(move |&i| &self.dataset.records()[i])
    }
}
