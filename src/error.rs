/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Batch aborted after {failed} unresolved titles out of {total}")]
    BatchAborted { failed: usize, total: usize },
}

impl AppError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::BatchAborted { .. } => 2,
            _ => 1,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
