use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgoraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("you must be a member of community '{0}' to do that")]
    NotMember(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("rate limited, try again in {0}s")]
    RateLimited(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid page {0}: pages start at 1")]
    InvalidPage(u32),

    #[error("{0}")]
    Other(String),
}

impl AgoraError {
    /// Message suitable for a toast.
    ///
    /// Server-provided messages are shown as-is; transport failures collapse
    /// to a generic fallback so users are not shown reqwest internals.
    pub fn user_message(&self) -> String {
        match self {
            AgoraError::Api(msg) | AgoraError::Validation(msg) | AgoraError::Auth(msg) => {
                msg.clone()
            }
            AgoraError::Http(_) | AgoraError::Io(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgoraError>;
