/// Startup configuration errors. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    #[error("missing input file: {path}")]
    MissingFile { path: String },

    #[error("missing credential: environment variable {env_var} is not set for {provider}")]
    MissingCredential { provider: String, env_var: String },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("unknown provider {provider} for {component}")]
    UnknownProvider { component: String, provider: String },
}
