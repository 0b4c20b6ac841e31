/// Application-level errors
///
/// These never reach the chat user: catalog clients convert them into a
/// [`Lookup::Failed`](crate::services::providers::Lookup) at the trait boundary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

pub type AppResult<T> = Result<T, AppError>;
