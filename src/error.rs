use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("DIFY_API_KEY is not set. Please check your .env file.")]
    MissingApiKey,

    #[error("Dify API error: {status} {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<&str> for ChatError {
    fn from(error: &str) -> Self {
        ChatError::Store(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
