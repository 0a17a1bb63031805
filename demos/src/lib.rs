//! Shared pieces of the `wavemaze-solve` and `wavemaze-bench` binaries.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wavemaze_core::{GridError, Labyrinth};
use wavemaze_gen::{Layout, LayoutError};

/// Install the `tracing` subscriber. `log` records from the library crates
/// are forwarded to it. `RUST_LOG` overrides `default`.
pub fn init_logging(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Errors from reading a labyrinth file.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(LayoutError),
    Grid(GridError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read labyrinth: {e}"),
            Self::Json(e) => write!(f, "bad labyrinth array: {e}"),
            Self::Layout(e) => e.fmt(f),
            Self::Grid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Layout(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

/// Parse labyrinth text: either a JSON array of code rows such as
/// `[[2, 0, 1], [1, 1, 3]]`, or a text [`Layout`].
pub fn parse_labyrinth(text: &str) -> Result<Labyrinth, LoadError> {
    if text.trim_start().starts_with('[') {
        let rows: Vec<Vec<i32>> = serde_json::from_str(text).map_err(LoadError::Json)?;
        Labyrinth::from_codes(&rows).map_err(LoadError::Grid)
    } else {
        Layout::parse(text).map_err(LoadError::Layout)
    }
}

/// Read and parse a labyrinth file.
pub fn load_labyrinth(path: &Path) -> Result<Labyrinth, LoadError> {
    let text = std::fs::read_to_string(path).map_err(LoadError::Io)?;
    parse_labyrinth(&text)
}

/// Timing and outcome tally over many solves.
#[derive(Debug, Clone, Default)]
pub struct BenchStats {
    times: Vec<Duration>,
    steps: usize,
    solved: usize,
}

impl BenchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one solve. `steps` counts for the mean either way.
    pub fn record(&mut self, time: Duration, steps: usize, solved: bool) {
        self.times.push(time);
        self.steps += steps;
        if solved {
            self.solved += 1;
        }
    }

    pub fn runs(&self) -> usize {
        self.times.len()
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    pub fn total(&self) -> Duration {
        self.times.iter().sum()
    }

    pub fn min(&self) -> Duration {
        self.times.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.times.iter().copied().max().unwrap_or_default()
    }

    pub fn mean_steps(&self) -> f64 {
        if self.times.is_empty() {
            return 0.0;
        }
        self.steps as f64 / self.times.len() as f64
    }

    /// Split `min..=max` into `buckets` equal bins and count the runs in
    /// each. Returns `(upper edge, count)` per bin.
    pub fn histogram(&self, buckets: usize) -> Vec<(Duration, usize)> {
        if buckets == 0 || self.times.is_empty() {
            return Vec::new();
        }
        let (lo, hi) = (self.min(), self.max());
        let width = (hi - lo).as_secs_f64() / buckets as f64;
        let mut counts = vec![0; buckets];
        for &t in &self.times {
            let i = if width > 0.0 {
                ((t - lo).as_secs_f64() / width) as usize
            } else {
                0
            };
            counts[i.min(buckets - 1)] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(i, n)| (lo + Duration::from_secs_f64(width * (i + 1) as f64), n))
            .collect()
    }
}
