use clap::Parser;

use crate::data::filter::FilterMode;
use crate::data::loader::Source;

/// Browse a CSV file as a paginated table and filter it by column value.
#[derive(Debug, Clone, Parser)]
#[command(name = "csv-filter-viewer", version, about)]
pub struct Config {
    /// CSV to load at startup: a file path or an http(s) URL.
    #[arg(short, long, default_value = "data/dataset_small.csv")]
    pub source: Source,

    /// Rows per table page.
    #[arg(long, default_value_t = 100, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_size: usize,

    /// `cumulative` narrows the shown rows on every selection;
    /// `from-dataset` filters the full dataset by the latest selection only.
    #[arg(long, default_value_t = FilterMode::Cumulative)]
    pub filter_mode: FilterMode,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["csv-filter-viewer"]).unwrap();
        assert_eq!(cfg.source, Source::Path(PathBuf::from("data/dataset_small.csv")));
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.filter_mode, FilterMode::Cumulative);
    }

    #[test]
    fn overrides() {
        let cfg = Config::try_parse_from([
            "csv-filter-viewer",
            "--source",
            "http://localhost:8000/data.csv",
            "--page-size",
            "25",
            "--filter-mode",
            "from-dataset",
        ])
        .unwrap();
        assert!(matches!(cfg.source, Source::Url(_)));
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.filter_mode, FilterMode::FromDataset);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Config::try_parse_from(["csv-filter-viewer", "--page-size", "0"]).is_err());
    }
}
