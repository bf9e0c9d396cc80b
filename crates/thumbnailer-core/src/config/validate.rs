//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.width == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.width must be > 0".into(),
            ));
        }
        if self.thumbnail.height == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.height must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::ValidationError(
                "thumbnail.quality must be between 1 and 100".into(),
            ));
        }
        if self.pipeline.buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.buffer_size must be > 0".into(),
            ));
        }
        if self.input_dir() == self.output_dir() {
            return Err(ConfigError::ValidationError(
                "directories.input and directories.output must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = Config::default();
        config.thumbnail.width = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thumbnail.width"));

        let mut config = Config::default();
        config.thumbnail.height = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thumbnail.height"));
    }

    #[test]
    fn test_validate_rejects_quality_out_of_range() {
        let mut config = Config::default();
        config.thumbnail.quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));

        config.thumbnail.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let mut config = Config::default();
        config.pipeline.buffer_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn test_validate_rejects_same_directories() {
        let mut config = Config::default();
        config.directories.output = PathBuf::from("producer");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }
}
