use serde::{Deserialize, Serialize};

const MIN_GRID_SIZE: usize = 4;
const MAX_GRID_SIZE: usize = 64;

/// Dimensions of the playing field.
///
/// Missing fields fall back to the classic 10×20 field when deserializing.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "height": 24 }"#).unwrap();
/// assert_eq!(config.width, 10);
/// assert_eq!(config.height, 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

impl GameConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Checks that every catalog piece fits and the field stays renderable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.width) {
            return Err(ConfigError::InvalidWidth { width: self.width });
        }
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.height) {
            return Err(ConfigError::InvalidHeight {
                height: self.height,
            });
        }
        Ok(())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid width {width} is out of range {}..={}", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    InvalidWidth { width: usize },
    #[display("grid height {height} is out of range {}..={}", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    InvalidHeight { height: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_field() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        let ok = [(4, 4), (64, 64), (7, 30)];
        for (width, height) in ok {
            assert!(GameConfig { width, height }.validate().is_ok());
        }

        let err = GameConfig {
            width: 3,
            height: 20,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWidth { width: 3 }));
        assert_eq!(err.to_string(), "grid width 3 is out of range 4..=64");

        let err = GameConfig {
            width: 10,
            height: 65,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeight { height: 65 }));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "depth": 3 }"#).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GameConfig {
            width: 12,
            height: 22,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"width":12,"height":22}"#);
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }
}
