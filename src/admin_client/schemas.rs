use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    list: Vec<ListedIdentity>,
}

impl Listing {
    pub fn new(count: u64, list: Vec<ListedIdentity>) -> Self {
        Listing { count, list }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn list(&self) -> &[ListedIdentity] {
        &self.list
    }

    pub fn contains(&self, identity: u64) -> bool {
        self.list.iter().any(|entry| entry.id == identity)
    }
}

/// Author or seller entry. Other fields of the record are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedIdentity {
    id: u64,
}

impl ListedIdentity {
    pub fn new(id: u64) -> Self {
        ListedIdentity { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NftIdResponse {
    #[serde(default)]
    nft_id: Option<u64>,
}

impl NftIdResponse {
    pub fn new(nft_id: Option<u64>) -> Self {
        NftIdResponse { nft_id }
    }

    /// The backoffice answers `0` or nothing when no ID can be handed out.
    pub fn nft_id(&self) -> Option<u64> {
        self.nft_id.filter(|id| *id != 0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractState {
    #[serde(default)]
    is_existing: bool,
}

impl ContractState {
    pub fn new(is_existing: bool) -> Self {
        ContractState { is_existing }
    }

    pub fn is_existing(&self) -> bool {
        self.is_existing
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: u64,
    pub status: u8,
}
