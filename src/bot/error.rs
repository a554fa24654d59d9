use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Invalid date `{0}`. Use DD-MM-YYYY.")]
    InvalidDateFormat(String),

    #[error("Start date must be before end date.")]
    InvalidDateRange,

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }

    /// Whether this error is a user-facing validation failure (safe to echo
    /// back to the submitter) rather than an internal fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidDateFormat(_) | Error::InvalidDateRange)
    }
}
