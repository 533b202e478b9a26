use thiserror::Error;

/// Failures at the boundary between the game core and the browser.
///
/// None of these are fatal: callers log them and skip the operation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("missing page element `{0}`")]
    MissingElement(String),
    #[error("canvas unavailable: {0}")]
    Canvas(String),
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
    #[error("storage write failed: {0}")]
    Storage(String),
    #[error("could not parse game config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
