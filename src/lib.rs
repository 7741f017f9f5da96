pub mod config;
pub mod db;
pub mod error;
pub mod pdf;
pub mod report;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

pub use config::Config;

use db::DatabaseProbe;
use report::ReportGenerator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: ReportGenerator,
    pub probe: Arc<dyn DatabaseProbe>,
}

impl AppState {
    pub fn new(config: Config, generator: ReportGenerator, probe: Arc<dyn DatabaseProbe>) -> Self {
        Self {
            config,
            generator,
            probe,
        }
    }

    /// Wires the generator and database probe from configuration.
    pub fn from_config(config: Config) -> Self {
        let generator = ReportGenerator::new(config.report_output_dir.clone());
        let probe = db::probe_from_config(&config);
        Self::new(config, generator, probe)
    }
}
