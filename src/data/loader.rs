use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::error::{DataError, Result};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Source – where the CSV text comes from
// ---------------------------------------------------------------------------

/// A data source addressed by a single identifier: either a local path or
/// an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::Path(PathBuf::from(s)))
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read `source` and parse it into a [`Dataset`].
///
/// Transport failures (missing file, refused connection, non-2xx status)
/// become [`DataError::Load`]; malformed text becomes [`DataError::Parse`].
pub fn load(source: &Source) -> Result<Dataset> {
    let bytes = fetch(source)?;
    // Invalid UTF-8 is replaced rather than rejected, like a browser decoder.
    let text = String::from_utf8_lossy(&bytes);
    let dataset = parse_csv(&text)?;
    log::debug!(
        "parsed {} records with header {:?} from {source}",
        dataset.len(),
        dataset.headers
    );
    Ok(dataset)
}

fn fetch(source: &Source) -> Result<Vec<u8>> {
    let load_err = |reason: String| DataError::Load {
        source_id: source.to_string(),
        reason,
    };

    match source {
        Source::Path(path) => std::fs::read(path).map_err(|e| load_err(e.to_string())),
        Source::Url(url) => {
            let response = reqwest::blocking::get(url)
                .and_then(|r| r.error_for_status())
                .map_err(|e| load_err(e.to_string()))?;
            let body = response.bytes().map_err(|e| load_err(e.to_string()))?;
            Ok(body.to_vec())
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: first row is the header, every later non-empty row becomes
/// one [`Record`] keyed by header name. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut seen = BTreeSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(DataError::Parse(format!("duplicate column '{dup}' in header")));
    }

    let records = reader
        .deserialize::<Record>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Dataset::new(headers, records))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// A load running on a worker thread. The UI polls it once per frame.
pub struct PendingLoad {
    pub source: Source,
    rx: Receiver<Result<Dataset>>,
}

impl PendingLoad {
    /// Start loading `source`; `notify` runs on the worker once the result
    /// is ready (used to wake the UI).
    pub fn spawn(source: Source, notify: impl FnOnce() + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_source = source.clone();
        thread::spawn(move || {
            let result = load(&worker_source);
            // Receiver gone means the session moved on to another load.
            let _ = tx.send(result);
            notify();
        });
        PendingLoad { source, rx }
    }

    /// The finished result, or `None` while the worker is still busy.
    pub fn poll(&self) -> Option<Result<Dataset>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(DataError::Load {
                source_id: self.source.to_string(),
                reason: "loader thread exited without a result".to_string(),
            })),
        }
    }

    #[cfg(test)]
    pub fn wait(self) -> Result<Dataset> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(DataError::Load {
                source_id: self.source.to_string(),
                reason: "loader thread exited without a result".to_string(),
            })
        })
    }
}
