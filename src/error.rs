use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid scroll marker: {0}")]
    InvalidMarker(String),

    #[error("Unknown ease: {0}")]
    InvalidEase(String),

    #[error("Invalid swipe direction: {0}")]
    InvalidDirection(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, MotionError>;
