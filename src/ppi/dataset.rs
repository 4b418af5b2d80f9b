use std::collections::BTreeSet;
use std::sync::OnceLock;

use tracing::{info, warn};

use super::parse::{SCORE_COLUMN, parse_interactions};
use super::{DataSource, LoadError};

/// One interaction record. `fields` keeps every CSV cell so columns beyond
/// the three we interpret survive into the table and the CSV export.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionRow {
    pub protein_a: String,
    pub protein_b: String,
    pub score: Option<f64>,
    pub fields: Vec<String>,
}

impl InteractionRow {
    pub fn involves(&self, protein: &str) -> bool {
        self.protein_a == protein || self.protein_b == protein
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<InteractionRow>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<InteractionRow>) -> Self {
        Self { headers, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[InteractionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table carries a confidence score column at all.
    pub fn has_score_column(&self) -> bool {
        self.headers.iter().any(|name| name == SCORE_COLUMN)
    }

    pub fn protein_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| [row.protein_a.as_str(), row.protein_b.as_str()])
            .collect::<BTreeSet<_>>()
            .len()
    }

    #[cfg(test)]
    pub(crate) fn from_triples(triples: &[(&str, &str, f64)]) -> Self {
        let headers = ["Protein_A", "Protein_B", "combined_score"]
            .map(str::to_owned)
            .to_vec();
        let rows = triples
            .iter()
            .map(|&(a, b, score)| InteractionRow {
                protein_a: a.to_owned(),
                protein_b: b.to_owned(),
                score: Some(score),
                fields: vec![a.to_owned(), b.to_owned(), score.to_string()],
            })
            .collect();
        Self::new(headers, rows)
    }
}

/// Outcome of a load. A failed load still yields a (empty) dataset so every
/// downstream stage can run unchanged; `error` carries the message to show.
#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub error: Option<LoadError>,
}

impl LoadedDataset {
    pub fn failed(error: LoadError) -> Self {
        Self {
            dataset: Dataset::empty(),
            error: Some(error),
        }
    }
}

/// Load-once holder for the interaction table.
///
/// The first call decides the value for the lifetime of the cache; later calls
/// return it untouched, whatever source they pass. There is no invalidation.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceLock<LoadedDataset>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load(&self, source: &DataSource) -> &LoadedDataset {
        self.get_or_init_with(|| load_uncached(source))
    }

    pub fn get_or_init_with(&self, loader: impl FnOnce() -> LoadedDataset) -> &LoadedDataset {
        self.cell.get_or_init(loader)
    }

    pub fn get(&self) -> Option<&LoadedDataset> {
        self.cell.get()
    }
}

static DATASET: DatasetCache = DatasetCache::new();

/// Process-wide memoized load.
pub fn load(source: &DataSource) -> &'static LoadedDataset {
    DATASET.get_or_load(source)
}

/// Settles the process-wide cache with a failure when the loader never
/// reported back. Returns whatever the cache holds afterwards.
pub fn settle_with_failure(error: LoadError) -> &'static LoadedDataset {
    DATASET.get_or_init_with(|| LoadedDataset::failed(error))
}

pub fn load_uncached(source: &DataSource) -> LoadedDataset {
    info!(%source, "loading interaction table");

    match source.fetch().and_then(|raw| parse_interactions(&raw)) {
        Ok(dataset) => {
            info!(
                rows = dataset.len(),
                proteins = dataset.protein_count(),
                columns = dataset.headers().len(),
                scored = dataset.has_score_column(),
                "interaction table loaded"
            );
            LoadedDataset {
                dataset,
                error: None,
            }
        }
        Err(error) => {
            warn!(%source, %error, "interaction table unavailable, using an empty dataset");
            LoadedDataset::failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;

    use super::*;

    #[test]
    fn cache_runs_the_loader_once() {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);
        let loader = || {
            calls.set(calls.get() + 1);
            LoadedDataset {
                dataset: Dataset::from_triples(&[("P1", "P2", 0.9)]),
                error: None,
            }
        };

        let first = cache.get_or_init_with(loader) as *const LoadedDataset;
        let second = cache.get_or_init_with(|| {
            calls.set(calls.get() + 1);
            LoadedDataset::failed(LoadError::MissingColumn("Protein_A"))
        }) as *const LoadedDataset;

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.get().map(|loaded| loaded.dataset.len()), Some(1));
    }

    #[test]
    fn untouched_cache_is_empty() {
        assert!(DatasetCache::new().get().is_none());
    }

    #[test]
    fn loads_from_a_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Protein_A ,Protein_B, combined_score").unwrap();
        writeln!(file, "TP53,MDM2,0.999").unwrap();
        writeln!(file, "BRCA1,BARD1,0.95").unwrap();

        let cache = DatasetCache::new();
        let loaded = cache.get_or_load(&DataSource::Path(file.path().to_path_buf()));

        assert!(loaded.error.is_none());
        assert_eq!(loaded.dataset.len(), 2);
        assert_eq!(loaded.dataset.protein_count(), 4);
        assert_eq!(loaded.dataset.headers()[2], "combined_score");
    }

    #[test]
    fn failed_load_yields_empty_dataset_and_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gene,score").unwrap();
        writeln!(file, "TP53,0.5").unwrap();

        let loaded = load_uncached(&DataSource::Path(file.path().to_path_buf()));

        assert!(loaded.dataset.is_empty());
        assert!(matches!(loaded.error, Some(LoadError::MissingColumn("Protein_A"))));
    }

    #[test]
    fn process_wide_load_keeps_the_first_value() {
        let mut first_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(first_file, "Protein_A,Protein_B,combined_score").unwrap();
        writeln!(first_file, "P1,P2,0.9").unwrap();
        let mut second_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(second_file, "Protein_A,Protein_B").unwrap();
        writeln!(second_file, "P3,P4").unwrap();
        writeln!(second_file, "P5,P6").unwrap();

        let first = load(&DataSource::Path(first_file.path().to_path_buf()));
        let second = load(&DataSource::Path(second_file.path().to_path_buf()));
        let settled = settle_with_failure(LoadError::MissingColumn("Protein_A"));

        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, settled));
        assert_eq!(first.dataset.len(), 1);
        assert!(first.error.is_none());
    }
}
