use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Engine paths are non-empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.engines.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "engines.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if config.engines.soffice_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "engines.soffice_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
