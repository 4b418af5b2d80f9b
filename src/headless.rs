use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::pipeline::{PipelineOptions, QueryOutcome, handle_query};
use crate::ppi::{LoadedDataset, Query, to_csv_bytes};
use crate::render::{RenderOptions, RenderOutcome, render_network_png, render_score_chart_png};

#[derive(Debug, Default)]
pub struct ExportTargets {
    pub csv: Option<PathBuf>,
    pub network: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

fn write_png(path: &Path, rendered: RenderOutcome) -> Result<()> {
    match rendered {
        RenderOutcome::Png(bytes) => write_file(path, &bytes),
        RenderOutcome::Empty => {
            warn!(path = %path.display(), "nothing to draw, skipping export");
            Ok(())
        }
    }
}

/// Evaluates one query against the loaded dataset and writes the requested
/// files. An unmatched query is reported and produces no files.
pub fn run(
    loaded: &LoadedDataset,
    protein: &str,
    proteins: &str,
    options: &PipelineOptions,
    targets: &ExportTargets,
) -> Result<()> {
    let query = Query::from_inputs(protein, proteins);

    let view = match handle_query(&loaded.dataset, &query, options) {
        QueryOutcome::Ready(view) => view,
        QueryOutcome::Empty => {
            warn!(query = %query.describe(), "no interactions found");
            return Ok(());
        }
    };

    if let Some(path) = &targets.csv {
        let bytes = to_csv_bytes(loaded.dataset.headers(), &view.rows)?;
        write_file(path, &bytes)?;
    }
    if let Some(path) = &targets.network {
        let rendered = render_network_png(&view.visual, &RenderOptions::NETWORK)?;
        write_png(path, rendered)?;
    }
    if let Some(path) = &targets.chart {
        let rendered = render_score_chart_png(&view.visual, &RenderOptions::CHART)?;
        write_png(path, rendered)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::ppi::{DataSource, LoadError, load_uncached};

    #[test]
    fn headless_run_writes_requested_exports() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("ppi.csv");
        let mut file = fs::File::create(&source_path).unwrap();
        writeln!(file, "Protein_A,Protein_B,combined_score").unwrap();
        writeln!(file, "P1,P2,0.95").unwrap();
        writeln!(file, "P2,P3,0.6").unwrap();
        writeln!(file, "P4,P5,0.8").unwrap();
        drop(file);

        let targets = ExportTargets {
            csv: Some(dir.path().join("out/filtered.csv")),
            network: Some(dir.path().join("out/network.png")),
            chart: Some(dir.path().join("out/chart.png")),
        };
        let loaded = load_uncached(&DataSource::Path(source_path));
        run(&loaded, "P2", "", &PipelineOptions::default(), &targets).unwrap();

        let csv = fs::read_to_string(dir.path().join("out/filtered.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(!csv.contains("P4"));
        assert!(dir.path().join("out/network.png").exists());
        assert!(dir.path().join("out/chart.png").exists());
    }

    #[test]
    fn failed_load_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = LoadedDataset::failed(LoadError::MissingColumn("Protein_A"));
        let targets = ExportTargets {
            csv: Some(dir.path().join("filtered.csv")),
            ..ExportTargets::default()
        };

        run(&loaded, "", "", &PipelineOptions::default(), &targets).unwrap();
        assert!(!dir.path().join("filtered.csv").exists());
    }
}
