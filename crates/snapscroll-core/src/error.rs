use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Scroll listener is already registered")]
    AlreadyRegistered,

    #[error("Trying to unregister a scroll listener that is not registered")]
    NotRegistered,

    #[error("Section index {index} is out of range ({len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Unknown easing preset: {0}")]
    UnknownEasing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
