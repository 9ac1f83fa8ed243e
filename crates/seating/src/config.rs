use crate::{
    constants::{DEFAULT_COLS, DEFAULT_ROWS, MIN_COLS, MIN_ROWS, SEATS_PER_DESK},
    error::{Result, SeatingError},
    geometry::SeatId,
    pairing::PairingPolicy,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure (TOML file)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Room shape and pairing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// same-gender mode only: leftovers may share a desk across genders
    pub allow_mixed_gender: bool,
    /// prefer mixed-gender desks outright
    pub ignore_gender: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            allow_mixed_gender: false,
            ignore_gender: false,
        }
    }
}

impl GridConfig {
    /// Same-gender grid of the given size. Zero dimensions are raised to 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
        .clamped()
    }

    pub fn with_mixed_leftovers(mut self, allow: bool) -> Self {
        self.allow_mixed_gender = allow;
        self
    }

    pub fn with_ignore_gender(mut self, ignore: bool) -> Self {
        self.ignore_gender = ignore;
        self
    }

    /// Copy with rows/cols raised to their minimum
    pub fn clamped(self) -> Self {
        if self.rows >= MIN_ROWS && self.cols >= MIN_COLS {
            return self;
        }
        warn!(
            "Grid {}x{} is too small, clamping to at least {}x{}",
            self.rows, self.cols, MIN_ROWS, MIN_COLS
        );
        Self {
            rows: self.rows.max(MIN_ROWS),
            cols: self.cols.max(MIN_COLS),
            ..self
        }
    }

    pub fn seat_count(&self) -> usize {
        self.rows * self.cols * SEATS_PER_DESK
    }

    pub fn contains(&self, seat: SeatId) -> bool {
        seat.is_within(self.rows, self.cols)
    }

    pub fn pairing_policy(&self) -> PairingPolicy {
        if self.ignore_gender {
            PairingPolicy::MixedPreferred
        } else {
            PairingPolicy::SameGender {
                allow_mixed_leftovers: self.allow_mixed_gender,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub displacement: DisplacementPolicy,
}

/// What toggle-disable does with an occupant when no empty seat is left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplacementPolicy {
    /// remove the occupant from the layout and report it
    #[default]
    Drop,
    /// refuse the toggle
    Reject,
}

impl Config {
    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SeatingError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.rows < MIN_ROWS || self.grid.cols < MIN_COLS {
            return Err(SeatingError::Config(format!(
                "grid must be at least {}x{}, got {}x{}",
                MIN_ROWS, MIN_COLS, self.grid.rows, self.grid.cols
            )));
        }
        Ok(())
    }
}
