use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ppi_explorer::encode::NodeColoring;
use ppi_explorer::layout::{DEFAULT_ITERATIONS, DEFAULT_SEED, LayoutConfig};
use ppi_explorer::pipeline::PipelineOptions;
use ppi_explorer::ppi::{self, DataSource};
use ppi_explorer::{app, headless};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV file path or http(s) URL with Protein_A, Protein_B and combined_score columns.
    #[arg(long, default_value = ppi::DEFAULT_SOURCE)]
    source: String,

    /// Show interactions involving this protein.
    #[arg(long, default_value = "")]
    protein: String,

    /// Comma-separated proteins; overrides --protein when non-empty.
    #[arg(long, default_value = "")]
    proteins: String,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Upper bound on spring layout iterations.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Color nodes randomly from a pastel palette.
    #[arg(long)]
    decorative_colors: bool,

    /// Directory the viewer's download buttons write into.
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Write the filtered table as CSV and exit without opening the viewer.
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Write the network diagram as PNG and exit without opening the viewer.
    #[arg(long)]
    export_png: Option<PathBuf>,

    /// Write the score chart as PNG and exit without opening the viewer.
    #[arg(long)]
    export_chart: Option<PathBuf>,
}

impl Args {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            layout: LayoutConfig {
                seed: self.seed,
                iterations: self.iterations,
            },
            coloring: if self.decorative_colors {
                NodeColoring::Decorative
            } else {
                NodeColoring::Uniform
            },
        }
    }

    fn is_headless(&self) -> bool {
        self.export_csv.is_some() || self.export_png.is_some() || self.export_chart.is_some()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let source = DataSource::parse(&args.source);
    let options = args.pipeline_options();

    if args.is_headless() {
        return headless::run(
            ppi::load(&source),
            &args.protein,
            &args.proteins,
            &options,
            &headless::ExportTargets {
                csv: args.export_csv,
                network: args.export_png,
                chart: args.export_chart,
            },
        );
    }

    let settings = app::ViewerSettings {
        source,
        pipeline: options,
        export_dir: args.export_dir,
        initial_protein: args.protein,
        initial_proteins: args.proteins,
    };
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ppi-explorer",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::PpiExplorerApp::new(cc, settings)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
