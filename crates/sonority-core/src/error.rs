use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "song {name} ({year}) does not exist in the catalog or the year is wrong; \
         use search first if you are not sure"
    )]
    NotFound { name: String, year: i32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("catalog is missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },
}

impl Error {
    /// Returns `true` when the error was caused by caller input and the
    /// request can be retried with corrected values.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
