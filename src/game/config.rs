use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square game grid, in cells
    pub grid_size: usize,
    /// Size of one cell in pixels, used for event coordinates
    pub cell_pixel_size: u32,

    /// Score granted per food eaten
    pub food_reward: u32,
    /// Score needed to climb one speed level
    pub score_per_level: u32,
    /// Highest reachable speed level
    pub max_level: u8,
    /// Speed level every session starts at, including after a reset
    pub start_level: u8,

    /// Tick interval at level 1
    pub base_interval_ms: u64,
    /// Interval reduction per level
    pub interval_step_ms: u64,
    /// Lower bound on the tick interval
    pub min_interval_ms: u64,

    /// Let the head move into the cell the tail vacates on the same tick.
    ///
    /// Off by default: the vacating tail still counts as a collision.
    pub tail_follow: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_pixel_size: 20,
            food_reward: 10,
            score_per_level: 50,
            max_level: 10,
            start_level: 1,
            base_interval_ms: 150,
            interval_step_ms: 15,
            min_interval_ms: 50,
            tail_follow: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(5)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=100).contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be in [2, 100], got {}",
                self.grid_size
            ));
        }

        if self.cell_pixel_size == 0 {
            return Err("cell_pixel_size must be at least 1".to_string());
        }

        if self.food_reward == 0 {
            return Err("food_reward must be positive".to_string());
        }

        if self.score_per_level == 0 {
            return Err("score_per_level must be positive".to_string());
        }

        if self.max_level == 0 {
            return Err("max_level must be at least 1".to_string());
        }

        if !(1..=self.max_level).contains(&self.start_level) {
            return Err(format!(
                "start_level must be in [1, {}], got {}",
                self.max_level, self.start_level
            ));
        }

        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }

        if self.min_interval_ms > self.base_interval_ms {
            return Err(format!(
                "min_interval_ms ({}) cannot exceed base_interval_ms ({})",
                self.min_interval_ms, self.base_interval_ms
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.base_interval_ms, 150);
        assert!(!config.tail_follow);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.max_level, 10);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = GameConfig::new(1);
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.score_per_level = 0;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.min_interval_ms = 200;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.max_level = 0;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.start_level = 0;
        assert!(config.validate().is_err());
        config.start_level = 11;
        assert!(config.validate().is_err());
        config.start_level = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 12, "tail_follow": true }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 12);
        assert!(config.tail_follow);
        assert_eq!(config.food_reward, 10);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }
}
