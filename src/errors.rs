use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Assistant transport error: {0}")]
    Transport(String),

    #[error("Page fixture error: {0}")]
    Fixture(String),

    #[error("Chat session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

impl serde::Serialize for GuideError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type GuideResult<T> = Result<T, GuideError>;
