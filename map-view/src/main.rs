//! Application entry point for the logistic map bifurcation viewer.
//!
//! The binary parses the command line, builds the [`Config`], runs the whole
//! `r` sweep, and only then opens the window. [`Viewer`] receives the
//! finished diagram and never sees a partial result.

mod viewer;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use map_core::Config;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

const DEFAULT_LOG_FILTER: &str = "logistic_map=info,map_core=info";
const WINDOW_TITLE: &str = "Logistic Map";

/// Bifurcation diagram of the logistic map x' = r·x·(1 − x).
#[derive(Parser, Debug)]
#[command(name = "logistic_map", version, about)]
struct Cli {
    /// TOML config file; missing keys use the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Left bound of the r range
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f64>,

    /// Right bound of the r range
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f64>,

    /// Starting population, strictly between 0 and 1
    #[arg(long)]
    x0: Option<f64>,

    /// Samples per unit of r
    #[arg(long)]
    accuracy: Option<f64>,

    /// Decimal places kept when comparing iterates
    #[arg(long, allow_negative_numbers = true)]
    precision: Option<i32>,

    /// Iteration cap per r
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Compute the diagram, log its statistics and exit without a window
    #[arg(long, default_value_t = false)]
    summary: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Core(#[from] map_core::Error),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    fn build_config(&self) -> map_core::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(v) = self.min {
            cfg.sweep.min = v;
        }
        if let Some(v) = self.max {
            cfg.sweep.max = v;
        }
        if let Some(v) = self.accuracy {
            cfg.sweep.accuracy = v;
        }
        if let Some(v) = self.x0 {
            cfg.orbit.x0 = v;
        }
        if let Some(v) = self.precision {
            cfg.orbit.precision = v;
        }
        if let Some(v) = self.max_iterations {
            cfg.orbit.max_iterations = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    init_tracing();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the sweep, then the native eframe window.
///
/// ### Returns
/// - `Ok(())` once the window is closed (or right away with `--summary`).
/// - `Err` for an invalid configuration or if eframe cannot create the window.
fn run(cli: &Cli) -> Result<(), AppError> {
    let cfg = cli.build_config()?;

    let diagram = Arc::new(map_core::sample(&cfg)?);
    if cli.summary {
        return Ok(());
    }

    let display = cfg.display;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([display.width as f32, display.height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    let (width, height) = (display.width, display.height);
    tracing::info!(width, height, "opening window");

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(diagram, display)))),
    )?;
    Ok(())
}
