mod api_provider;
mod hashed_provider;

use std::sync::Arc;

use techcat_core::config::EmbeddingConfig;
use techcat_core::errors::{ConfigError, TechcatResult};
use techcat_core::traits::IEmbeddingProvider;
use tracing::info;

pub use api_provider::ApiEmbeddingProvider;
pub use hashed_provider::HashedEmbeddingProvider;

/// Build the provider named in config.
pub fn create_provider(config: &EmbeddingConfig) -> TechcatResult<Arc<dyn IEmbeddingProvider>> {
    let provider: Arc<dyn IEmbeddingProvider> = match config.provider.as_str() {
        "api" => Arc::new(ApiEmbeddingProvider::from_config(config)?),
        "hashed" => Arc::new(HashedEmbeddingProvider::new(config.dimensions)),
        other => {
            return Err(ConfigError::UnknownProvider {
                component: "embedding".to_string(),
                provider: other.to_string(),
            }
            .into())
        }
    };
    info!(
        provider = provider.name(),
        dims = provider.dimensions(),
        "embedding provider created"
    );
    Ok(provider)
}
