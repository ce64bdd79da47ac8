use clap::Parser;
use color_eyre::eyre::WrapErr;
use portvar::{App, AppConfig, ConfigOverrides, TableAnalyzer, init_logging};
use portvar_core::loader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portvar")]
#[command(about = "Chart how portfolio variance falls as tickers are added")]
struct Args {
    /// Price sheet to analyse (xlsx workbook or CSV with date, Name and close columns)
    #[arg(short = 'f', long)]
    data_file: Option<PathBuf>,

    /// Path to the data directory (default: ~/.portvar/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seed for the ticker draw; omit for a fresh draw every run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Return lag in periods
    #[arg(long)]
    lag: Option<usize>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".portvar")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config = AppConfig::load(&data_dir)?.with_overrides(ConfigOverrides {
        data_file: args.data_file,
        seed: args.seed,
        return_lag: args.lag,
    });

    let table = loader::load(&config.data_file)
        .wrap_err_with(|| format!("failed to load {}", config.data_file.display()))?;
    tracing::info!(
        path = %config.data_file.display(),
        tickers = table.n_tickers(),
        dates = table.dates().len(),
        "price data loaded"
    );

    let analyzer = TableAnalyzer::new(
        config.data_file.clone(),
        table,
        config.analysis.clone(),
        config.seed,
    );
    let mut app = App::new(Box::new(analyzer), &config);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}
