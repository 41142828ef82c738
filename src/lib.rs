//! Builds NFT edition listings from stock media and key/value parameters and submits them
//! through the backoffice admin API.

pub mod admin_client;
pub mod airdrop;
pub mod config;
pub mod error;
pub mod media;
pub mod metadata;
pub mod params;
pub mod record_file;
pub mod session;
pub mod shortener;
pub mod workflow;

pub use error::{Error, Result};
pub use params::{EditionKind, ParameterSet, Toggles};
pub use workflow::{create_edition, RunReport};
