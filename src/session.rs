use crate::{
    admin_client::{schemas::Listing, AdminApi, ListingStatus},
    error::{Error, Result},
    params::EditionKind,
};
use serde_json::Value;
use tracing::{info, warn};

pub mod page_scan;

use page_scan::{PageScan, PAGE_SIZE};

/// Admin-side steps of a run for one author/seller, in the order they must be called:
/// listing, identity check, NFT ID resolution, creation.
pub struct AdminSession<'a, A: AdminApi> {
    api: &'a A,
    kind: EditionKind,
    identity: u64,
}

impl<'a, A: AdminApi> AdminSession<'a, A> {
    pub fn new(api: &'a A, kind: EditionKind, identity: u64) -> Self {
        AdminSession {
            api,
            kind,
            identity,
        }
    }

    pub fn kind(&self) -> EditionKind {
        self.kind
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }

    pub async fn list_authors_or_sellers(&self) -> Result<Listing> {
        let listing = self.api.listing(self.kind, None).await?;
        if listing.count() == 0 {
            return Err(Error::NoAuthorsOrSellers);
        }
        Ok(listing)
    }

    /// Small listings are checked in place; larger ones page through the backoffice.
    pub async fn verify_identity_exists(&self, listing: &Listing) -> Result<()> {
        let found = if listing.count() <= PAGE_SIZE {
            listing.contains(self.identity)
        } else {
            let mut scan = PageScan::new(listing.count());
            while let Some(query) = scan.next_query() {
                let page = self.api.listing(self.kind, Some(query)).await?;
                scan.record(page.contains(self.identity));
            }
            scan.is_found()
        };
        if found {
            info!(identity = self.identity, "Author/seller found in listing");
            Ok(())
        } else {
            Err(Error::IdentityNotFound(self.identity))
        }
    }

    /// Takes the database's candidate and bumps it once if the contract already knows it.
    /// The bumped value is not checked again.
    pub async fn resolve_nft_id(&self) -> Result<u64> {
        let candidate = self
            .api
            .next_nft_id(self.kind, self.identity)
            .await?
            .nft_id()
            .ok_or(Error::NftIdUnavailable(self.identity))?;
        let state = self.api.contract_state(self.kind, candidate).await?;
        if state.is_existing() {
            let next = candidate + 1;
            warn!(
                nft_id = candidate,
                next, "NFT ID already exists on contract, using the next one"
            );
            Ok(next)
        } else {
            Ok(candidate)
        }
    }

    /// Creates the NFT and moves it to live.
    pub async fn submit_creation(&self, nft_id: u64, payload: &Value) -> Result<()> {
        info!(nft_id, "Creating NFT");
        let status_code = self.api.create_nft(self.kind, payload).await?;
        if !(200..300).contains(&status_code) {
            return Err(Error::CreationFailed { status_code });
        }
        let status_code = self
            .api
            .update_status(self.kind, nft_id, ListingStatus::Live)
            .await?;
        if (200..300).contains(&status_code) {
            info!(nft_id, "Edition is now live");
        } else {
            warn!(nft_id, status_code, "Edition created but could not be set live");
        }
        Ok(())
    }
}
