use crate::ndjson::NdjsonError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Ndjson(#[from] NdjsonError),
    #[error("the catalog at {path} contains no rounds")]
    Empty { path: PathBuf },
}
