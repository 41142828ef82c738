use super::{
    schemas::{ContractState, Listing, NftIdResponse, StatusUpdate},
    AdminApi, ListingStatus, PageQuery,
};
use crate::{
    error::{Error, Result},
    params::EditionKind,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Bearer-authenticated session against the backoffice admin API.
pub struct BackofficeHttp {
    parent_url: String,
    client: reqwest::Client,
}

impl BackofficeHttp {
    pub fn new(url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=UTF-8"),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("admin_token".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        let mut parent_url = url.to_string();
        if !parent_url.ends_with('/') {
            parent_url.push('/');
        }
        Ok(BackofficeHttp { parent_url, client })
    }

    fn endpoint(&self, ext: &str) -> Result<Url> {
        Ok(Url::parse(&self.parent_url)?.join(ext)?)
    }

    async fn get_endpoint<T: DeserializeOwned>(&self, ext: &str) -> Result<T> {
        self.get_endpoint_with_params(ext, &[]).await
    }

    async fn get_endpoint_with_params<T: DeserializeOwned>(
        &self,
        ext: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut url = self.endpoint(ext)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        let res = self.client.get(url).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }
}

fn listing_ext(kind: EditionKind) -> &'static str {
    if kind.is_author_listing() {
        "authors"
    } else {
        "sellers"
    }
}

#[async_trait]
impl AdminApi for BackofficeHttp {
    async fn listing(&self, kind: EditionKind, page: Option<PageQuery>) -> Result<Listing> {
        let ext = listing_ext(kind);
        match page {
            Some(PageQuery { page, status }) => {
                let params = [("page", page.to_string()), ("status", status.code().to_string())];
                self.get_endpoint_with_params(ext, &params).await
            }
            None => self.get_endpoint(ext).await,
        }
    }

    async fn next_nft_id(&self, kind: EditionKind, identity: u64) -> Result<NftIdResponse> {
        let ext = format!("{}/nftId/{}", kind.path(), identity);
        self.get_endpoint(&ext).await
    }

    async fn contract_state(&self, kind: EditionKind, nft_id: u64) -> Result<ContractState> {
        let ext = format!("{}/{}/contract", kind.path(), nft_id);
        self.get_endpoint(&ext).await
    }

    async fn create_nft(&self, kind: EditionKind, payload: &Value) -> Result<u16> {
        let url = self.endpoint(kind.path())?;
        let res = self.client.post(url).json(payload).send().await?;
        Ok(res.status().as_u16())
    }

    async fn update_status(
        &self,
        kind: EditionKind,
        nft_id: u64,
        status: ListingStatus,
    ) -> Result<u16> {
        let ext = format!("{}/{}/status", kind.path(), nft_id);
        let url = self.endpoint(&ext)?;
        let body = StatusUpdate {
            id: nft_id,
            status: status.code(),
        };
        let res = self.client.put(url).json(&body).send().await?;
        Ok(res.status().as_u16())
    }
}
