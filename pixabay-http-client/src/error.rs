use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("url Error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Request to {url} failed with status {status_code}")]
    HttpError { url: String, status_code: u16 },
    #[error("No hits returned from {0}")]
    EmptyHits(String),
    #[error("Config field not found: {0:?}")]
    Config(String),
    #[error("Error while reading file: {0:?}")]
    FileRead(io::Error),
    #[error("Error while parsing Toml: {0:?}")]
    Toml(toml::de::Error),
}
