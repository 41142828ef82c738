use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum Error {
    #[error("Expected a key=value pair, got {0:?}")]
    MalformedParameter(String),
    #[error("Parameter {key:?} must be a non-negative integer, got {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("Parameter `future` must be a YYYY-MM-DD date, got {0:?}")]
    InvalidDate(String),
    #[error("Unknown edition kind: {0:?}")]
    UnknownEdition(String),
    #[error("Unknown payment preset: {0:?}")]
    UnknownPaymentPreset(String),
    #[error("Backoffice reported no live authors or sellers")]
    NoAuthorsOrSellers,
    #[error("Author/seller ID {0} not found in any listing page")]
    IdentityNotFound(u64),
    #[error("No NFT ID available for author/seller ID {0}")]
    NftIdUnavailable(u64),
    #[error("NFT creation rejected with status {status_code}; check the metadata")]
    CreationFailed { status_code: u16 },
    #[error("Static template must be a JSON object: {0:?}")]
    StaticTemplate(PathBuf),
    #[error("Record file already exists: {0:?}")]
    RecordExists(PathBuf),
    #[error("Malformed media response: {0}")]
    MalformedMedia(String),
    #[error("Shortening failed for {url}: {reason}")]
    Shortening { url: String, reason: String },
    #[error("In-memory fake failed: {0}")]
    InMemory(String),
    #[error("Config field not found: {0:?}")]
    Config(String),
    #[error("Error while reading config: {0:?}")]
    Toml(#[from] toml::de::Error),
    #[error("reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("url Error: {0}")]
    Url(#[from] url::ParseError),
    #[error("json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io Error: {0}")]
    Io(#[from] io::Error),
    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR Error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    #[error("Pixabay Error: {0}")]
    Pixabay(#[from] pixabay_http_client::error::Error),
}
