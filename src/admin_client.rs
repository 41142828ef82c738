use crate::{error::Result, params::EditionKind};
use async_trait::async_trait;
use serde_json::Value;

pub mod backoffice_http;
pub mod in_memory_admin;
pub mod schemas;

pub use backoffice_http::BackofficeHttp;
pub use in_memory_admin::InMemoryAdmin;
use schemas::{ContractState, Listing, NftIdResponse};

/// Author/seller and listing status codes used by the backoffice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListingStatus {
    Draft,
    Live,
}

impl ListingStatus {
    pub fn code(&self) -> u8 {
        match self {
            ListingStatus::Draft => 1,
            ListingStatus::Live => 3,
        }
    }
}

/// One page of an author/seller listing restricted to a single status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub status: ListingStatus,
}

/// Raw calls against the backoffice admin API. Each call maps to exactly one request.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Author listing for eth/auction editions, seller listing otherwise. `None` fetches the
    /// unfiltered first page.
    async fn listing(&self, kind: EditionKind, page: Option<PageQuery>) -> Result<Listing>;

    /// Candidate NFT ID for the given author/seller, as known to the database.
    async fn next_nft_id(&self, kind: EditionKind, identity: u64) -> Result<NftIdResponse>;

    /// Whether the contract already holds the NFT ID.
    async fn contract_state(&self, kind: EditionKind, nft_id: u64) -> Result<ContractState>;

    /// Returns the HTTP status code of the creation request.
    async fn create_nft(&self, kind: EditionKind, payload: &Value) -> Result<u16>;

    /// Returns the HTTP status code of the status transition.
    async fn update_status(
        &self,
        kind: EditionKind,
        nft_id: u64,
        status: ListingStatus,
    ) -> Result<u16>;
}
