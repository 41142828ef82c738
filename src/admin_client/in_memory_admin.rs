use super::{
    schemas::{ContractState, ListedIdentity, Listing, NftIdResponse},
    AdminApi, ListingStatus, PageQuery,
};
use crate::{
    error::{Error, Result},
    params::EditionKind,
    session::page_scan::PAGE_SIZE,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

/// Requests observed by [`InMemoryAdmin`], in order.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminCall {
    Listing(Option<PageQuery>),
    NextNftId(u64),
    ContractState(u64),
    CreateNft(Value),
    UpdateStatus(u64, ListingStatus),
}

/// Backoffice stand-in holding authors/sellers, NFT IDs and contract state in memory.
#[derive(Debug, Default)]
pub struct InMemoryAdmin {
    identities: Vec<(u64, ListingStatus)>,
    nft_ids: HashMap<u64, u64>,
    existing_on_contract: HashSet<u64>,
    creation_status: u16,
    calls: Arc<Mutex<Vec<AdminCall>>>,
}

impl InMemoryAdmin {
    pub fn new() -> Self {
        InMemoryAdmin {
            creation_status: 200,
            ..Default::default()
        }
    }

    pub fn with_identity(mut self, id: u64, status: ListingStatus) -> Self {
        self.identities.push((id, status));
        self
    }

    pub fn with_nft_id(mut self, identity: u64, nft_id: u64) -> Self {
        self.nft_ids.insert(identity, nft_id);
        self
    }

    pub fn with_existing_on_contract(mut self, nft_id: u64) -> Self {
        self.existing_on_contract.insert(nft_id);
        self
    }

    pub fn with_creation_status(mut self, status: u16) -> Self {
        self.creation_status = status;
        self
    }

    pub fn calls(&self) -> Result<Vec<AdminCall>> {
        let calls = self
            .calls
            .lock()
            .map_err(|e| Error::InMemory(format!("{:?}", e)))?
            .clone();
        Ok(calls)
    }

    fn record(&self, call: AdminCall) -> Result<()> {
        self.calls
            .lock()
            .map_err(|e| Error::InMemory(format!("{:?}", e)))?
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl AdminApi for InMemoryAdmin {
    async fn listing(&self, _kind: EditionKind, page: Option<PageQuery>) -> Result<Listing> {
        self.record(AdminCall::Listing(page))?;
        let count = self.identities.len() as u64;
        let list = match page {
            Some(PageQuery { page, status }) => self
                .identities
                .iter()
                .filter(|(_, s)| *s == status)
                .skip((page.saturating_sub(1) * PAGE_SIZE) as usize)
                .take(PAGE_SIZE as usize)
                .map(|(id, _)| ListedIdentity::new(*id))
                .collect(),
            None => self
                .identities
                .iter()
                .take(PAGE_SIZE as usize)
                .map(|(id, _)| ListedIdentity::new(*id))
                .collect(),
        };
        Ok(Listing::new(count, list))
    }

    async fn next_nft_id(&self, _kind: EditionKind, identity: u64) -> Result<NftIdResponse> {
        self.record(AdminCall::NextNftId(identity))?;
        Ok(NftIdResponse::new(self.nft_ids.get(&identity).copied()))
    }

    async fn contract_state(&self, _kind: EditionKind, nft_id: u64) -> Result<ContractState> {
        self.record(AdminCall::ContractState(nft_id))?;
        Ok(ContractState::new(self.existing_on_contract.contains(&nft_id)))
    }

    async fn create_nft(&self, _kind: EditionKind, payload: &Value) -> Result<u16> {
        self.record(AdminCall::CreateNft(payload.clone()))?;
        Ok(self.creation_status)
    }

    async fn update_status(
        &self,
        _kind: EditionKind,
        nft_id: u64,
        status: ListingStatus,
    ) -> Result<u16> {
        self.record(AdminCall::UpdateStatus(nft_id, status))?;
        Ok(200)
    }
}
