use std::path::PathBuf;
use thiserror::Error;

use crate::import::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Topic \"{0}\" not found")]
    TopicNotFound(String),

    #[error("Dataset file {file:?} could not be read")]
    DatasetUnavailable {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset file {file:?} is not valid JSON")]
    MalformedDataset {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Page limit must be at least 1")]
    InvalidLimit,

    #[error("Search query cannot be blank")]
    EmptyQuery,

    #[error("Could not write CSV export")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
