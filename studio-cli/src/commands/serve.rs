use anyhow::Result;
use std::path::{Path, PathBuf};
use studio_core::config::{StudioConfig, CONFIG_FILE};
use studio_core::http::StudioServer;

/// Command-line values that take priority over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub models_path: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, config: &mut StudioConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.models_path {
            config.storage.models_path = path.display().to_string();
        }
    }
}

pub fn load(config_file: Option<&Path>, overrides: Overrides) -> Result<StudioConfig> {
    let mut config = StudioConfig::load_from(config_file.unwrap_or(Path::new(CONFIG_FILE)))?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

pub async fn run(config_file: Option<&Path>, overrides: Overrides) -> Result<()> {
    let config = load(config_file, overrides)?;
    studio_core::logging::init(&config.logging);
    log::info!("Serving models from {}", config.storage.models_path);
    StudioServer::new(config).serve().await
}
