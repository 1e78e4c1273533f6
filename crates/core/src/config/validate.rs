use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Remote model id is set and at least one attempt is allowed
/// - Wait durations are finite and not negative
/// - Confidence threshold lies in [0, 1]
/// - FAQ corpus is not empty and has no blank questions
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Remote validation
    let remote = &config.remote;
    if remote.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "remote.model cannot be empty".to_string(),
        ));
    }
    if remote.api_base.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "remote.api_base cannot be empty".to_string(),
        ));
    }
    if remote.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "remote.max_attempts must be at least 1".to_string(),
        ));
    }
    if remote.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "remote.timeout_secs cannot be 0".to_string(),
        ));
    }
    for (name, value) in [
        ("remote.max_loading_wait_secs", remote.max_loading_wait_secs),
        ("remote.retry_delay_secs", remote.retry_delay_secs),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    // Resolver validation
    let threshold = config.resolver.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ValidationError(format!(
            "resolver.confidence_threshold must be between 0 and 1, got {}",
            threshold
        )));
    }

    // FAQ validation
    if config.faq.is_empty() {
        return Err(ConfigError::ValidationError(
            "faq must contain at least one entry".to_string(),
        ));
    }
    if let Some(pos) = config.faq.iter().position(|e| e.question.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "faq[{}].question cannot be empty",
            pos
        )));
    }

    Ok(())
}
