use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Log not found: {0}")]
    LogNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
