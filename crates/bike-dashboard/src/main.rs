mod bootstrap;

use anyhow::Result;
use dashboard_core::settings::Settings;
use dashboard_core::DashboardError;
use dashboard_data::analysis::build_report;
use dashboard_data::filter::DateRange;
use dashboard_data::reader::load_dataset;
use dashboard_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    let target = bootstrap::log_target(&settings.view, settings.log_file.as_ref());
    bootstrap::setup_logging(&settings.log_level, &target)?;

    tracing::info!("Bike Rental Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    if let Err(e) = run(&settings) {
        let context = bootstrap::failure_context(&e);
        tracing::error!("{context}: {e}");
        return Err(anyhow::Error::new(e).context(context));
    }

    Ok(())
}

fn run(settings: &Settings) -> dashboard_core::Result<()> {
    let cwd = std::env::current_dir()?;
    let (day_path, hour_path) = bootstrap::resolve_data_files(settings, &cwd);
    tracing::info!(
        "Loading {} and {}",
        day_path.display(),
        hour_path.display()
    );

    let dataset = load_dataset(&day_path, &hour_path)?;
    let bounds =
        DateRange::observed(&dataset).ok_or_else(|| DashboardError::NoRows(day_path.clone()))?;
    let range = bootstrap::initial_range(settings, &bounds);

    match settings.view.as_str() {
        "json" => {
            let report = build_report(&dataset, &range);
            let json = report.to_json_pretty().map_err(std::io::Error::from)?;
            println!("{json}");
        }
        "dashboard" => {
            App::new(&settings.theme, dataset, bounds, range).run()?;
        }
        unknown => {
            return Err(DashboardError::Config(format!("unknown view mode: {unknown}")));
        }
    }

    Ok(())
}
