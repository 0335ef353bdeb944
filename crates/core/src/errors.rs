use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Insufficient remaining slots: no room to complete {duration}h, missing hour {missing_hour}:00")]
    InsufficientSlots { duration: u32, missing_hour: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
