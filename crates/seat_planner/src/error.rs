use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid swap '{0}': expected <seat>:<seat>")]
    InvalidSwap(String),

    #[error(transparent)]
    Seating(#[from] seating::SeatingError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
