use crate::error::{PlannerError, Result};
use std::{env, path::PathBuf};

const ENV_OUTPUT_DIR: &str = "SEAT_PLANNER_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub output_dir: Option<PathBuf>,
}

impl OutputConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_value(env::var(ENV_OUTPUT_DIR).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(output_dir) = value
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(PlannerError::InvalidConfiguration(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            config.output_dir = Some(path);
        } else {
            config.output_dir = Some(PathBuf::from(DEFAULT_OUTPUT_DIR));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = OutputConfig::default();
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_unset_uses_default_dir() {
        let config = OutputConfig::from_value(None).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from(DEFAULT_OUTPUT_DIR)));
    }

    #[test]
    fn test_whitespace_only_uses_default_dir() {
        let config = OutputConfig::from_value(Some("   \t\n   ".to_string())).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from(DEFAULT_OUTPUT_DIR)));
    }

    #[test]
    fn test_valid_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path().to_path_buf();

        let config =
            OutputConfig::from_value(Some(temp_path.to_string_lossy().to_string())).unwrap();
        assert_eq!(config.output_dir, Some(temp_path));
    }

    #[test]
    fn test_missing_dir_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("not-yet-created");

        let config = OutputConfig::from_value(Some(path.to_string_lossy().to_string())).unwrap();
        assert_eq!(config.output_dir, Some(path));
    }

    #[test]
    fn test_file_path_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("seating.csv");
        std::fs::write(&file, "").unwrap();

        let result = OutputConfig::from_value(Some(file.to_string_lossy().to_string()));
        assert!(matches!(
            result,
            Err(PlannerError::InvalidConfiguration(_))
        ));
    }
}
