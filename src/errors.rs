use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0} store is not open")]
    NotOpen(&'static str),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
