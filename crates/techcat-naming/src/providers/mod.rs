mod api_namer;
mod heuristic_namer;

use std::sync::Arc;

use techcat_core::config::NamingConfig;
use techcat_core::errors::{ConfigError, TechcatResult};
use techcat_core::traits::ICanonicalNamer;
use tracing::info;

pub use api_namer::ApiNamer;
pub use heuristic_namer::HeuristicNamer;

/// Build the naming provider named in config.
pub fn create_namer(config: &NamingConfig) -> TechcatResult<Arc<dyn ICanonicalNamer>> {
    let namer: Arc<dyn ICanonicalNamer> = match config.provider.as_str() {
        "api" => Arc::new(ApiNamer::from_config(config)?),
        "heuristic" => Arc::new(HeuristicNamer),
        other => {
            return Err(ConfigError::UnknownProvider {
                component: "naming".to_string(),
                provider: other.to_string(),
            }
            .into())
        }
    };
    info!(provider = namer.name(), "naming provider created");
    Ok(namer)
}
