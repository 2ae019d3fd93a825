use thiserror::Error;

use crate::charts::RenderError;
use crate::data::{LoaderError, ProcessorError};
use crate::skills::VocabularyError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DataAccess(#[from] LoaderError),

    #[error(transparent)]
    Schema(#[from] ProcessorError),

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
