use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeatingError>;

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid seat id: {0}")]
    InvalidSeatId(String),

    #[error("Seat {seat} is outside the {rows}x{cols} grid")]
    SeatOutOfGrid {
        seat: String,
        rows: usize,
        cols: usize,
    },

    #[error("Seat {0} is disabled")]
    SeatDisabled(String),

    #[error("No vacant seat left for {name} displaced from {seat}")]
    NoVacancy { seat: String, name: String },
}

impl From<toml::de::Error> for SeatingError {
    fn from(err: toml::de::Error) -> Self {
        SeatingError::Config(format!("TOML parse error: {}", err))
    }
}
