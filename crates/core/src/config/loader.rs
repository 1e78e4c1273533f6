use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable holding the inference API credential.
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

/// Prefix for environment overrides, nested with `__` (e.g. `FAQBOT_SERVER__PORT`).
pub const ENV_PREFIX: &str = "FAQBOT_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(with_env(defaults().merge(Toml::file(path))))
}

/// Load configuration from built-in defaults and the environment only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(with_env(defaults()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn with_env(figment: Figment) -> Figment {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&[TOKEN_ENV_VAR])
                .map(|_| "remote.api_token".into()),
        )
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
