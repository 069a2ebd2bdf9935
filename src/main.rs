mod app;
mod layout;
mod network;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Production network JSON with `nodes`, `suppliers` and `customers`.
    #[arg(long, default_value = "production_network.json")]
    data: PathBuf,
    /// Industry code shown first; defaults to Farms.
    #[arg(long, default_value = "111CA")]
    focus: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let launch = app::LaunchConfig {
        dataset_path: args.data,
        initial_focus: args.focus,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "production-network",
        options,
        Box::new(move |cc| Ok(Box::new(app::ProductionNetworkApp::new(cc, launch)))),
    )
}
