use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Callers only pass ids taken from the catalog, so this is a contract
    /// violation rather than a user-facing miss.
    #[error("Unknown settings page: {0}")]
    UnknownPage(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate page id: {0}")]
    DuplicatePage(String),

    #[error("Page id must not be empty")]
    EmptyId,

    #[error("Page {0} has an empty command")]
    EmptyCommand(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
