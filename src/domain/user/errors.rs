use thiserror::Error;

/// Errors that can occur while operating on the user directory
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("All fields are required")]
    MissingFields,

    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;
