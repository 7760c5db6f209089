use anyhow::{Context, Result};
use clap::Parser;
use ptlx::{cli::Cli, config::SimulationConfig, simulation::Simulation};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file if given, otherwise the embedded reference run
fn load_config(args: &Cli) -> Result<SimulationConfig> {
    let base = match &args.config {
        Some(path) => SimulationConfig::from_toml(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => SimulationConfig::reference().context("Failed to parse embedded reference config")?,
    };

    args.apply_overrides(base)
        .context("Invalid simulation parameters")
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let csv_path = config.output.csv_path.clone();
    let plot_path = config.output.plot_path.clone();

    let report = Simulation::new(config)?
        .with_plot(!args.no_plot)
        .run()
        .with_context(|| {
            format!(
                "Simulation failed (csv: {}, plot: {})",
                csv_path.display(),
                plot_path.display()
            )
        })?;

    let summary = report
        .render(args.format)
        .context("Failed to render run summary")?;
    println!("{}", summary);

    Ok(())
}
