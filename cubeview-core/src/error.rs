/// Error type shared by the scene core
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color {0:?}: expected #rrggbb, #rgb or a known color name")]
    InvalidColor(String),

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
