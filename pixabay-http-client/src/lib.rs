use crate::models::{Hits, ImageHit, VideoHit};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{fs, path::Path};
use url::Url;

use crate::error::{Error, Result};

pub mod error;
pub mod models;

pub const PIXABAY_URL: &str = "https://pixabay.com/api/";
// Must include a TOML file at your project root with the field:
//   api_key = <INSERT API KEY HERE>
const CONFIG_PATH: &str = ".pixabay.toml";

fn load_key_from_file(key_path: &str) -> Result<String> {
    let path = Path::new(key_path);
    let text = fs::read_to_string(path).map_err(Error::FileRead)?;
    let config: toml::Value = toml::from_str(&text).map_err(Error::Toml)?;
    let field = "api_key";
    let api_key = config[field]
        .as_str()
        .ok_or_else(|| Error::Config(field.to_string()))?
        .to_string();
    Ok(api_key)
}

pub fn get_test_pixabay_client() -> Result<PixabayHttp> {
    let key = load_key_from_file(CONFIG_PATH)?;
    let client = PixabayHttp::new(PIXABAY_URL, &key);
    Ok(client)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Popular,
    Latest,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Popular => "popular",
            Order::Latest => "latest",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    min_width: u32,
    order: Order,
    per_page: u32,
}

impl SearchQuery {
    pub fn new(min_width: u32, order: Order, per_page: u32) -> Self {
        SearchQuery {
            min_width,
            order,
            per_page,
        }
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_width", self.min_width.to_string()),
            ("order", self.order.as_str().to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery::new(1920, Order::Popular, 200)
    }
}

pub struct PixabayHttp {
    parent_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[async_trait]
pub trait PixabayHttpTrait: Send + Sync {
    async fn images(&self, query: &SearchQuery) -> Result<Vec<ImageHit>>;

    async fn videos(&self, query: &SearchQuery) -> Result<Vec<VideoHit>>;

    /// Raw bytes behind a hit's asset URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl PixabayHttpTrait for PixabayHttp {
    async fn images(&self, query: &SearchQuery) -> Result<Vec<ImageHit>> {
        let ext = "./";
        let hits: Hits<ImageHit> = self.get_endpoint_with_params(ext, &query.params()).await?;
        non_empty(hits, ext)
    }

    async fn videos(&self, query: &SearchQuery) -> Result<Vec<VideoHit>> {
        let ext = "./videos/";
        let hits: Hits<VideoHit> = self.get_endpoint_with_params(ext, &query.params()).await?;
        non_empty(hits, ext)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(redacted)?;
        check_status(&url, res.status())?;
        let bytes = res.bytes().await.map_err(redacted)?;
        Ok(bytes.to_vec())
    }
}

impl PixabayHttp {
    pub fn new(url: &str, key: &str) -> Self {
        let mut parent_url = url.to_string();
        if !parent_url.ends_with('/') {
            parent_url.push('/');
        }
        let api_key = key.to_string();
        PixabayHttp {
            parent_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_endpoint_with_params<T: DeserializeOwned>(
        &self,
        ext: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut url = self.endpoint(ext)?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .extend_pairs(params);
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(redacted)?;
        check_status(&url, res.status())?;
        let res = res.json().await.map_err(redacted)?;
        Ok(res)
    }

    fn endpoint(&self, ext: &str) -> Result<Url> {
        Ok(Url::parse(&self.parent_url)?.join(ext)?)
    }
}

fn non_empty<T>(hits: Hits<T>, ext: &str) -> Result<Vec<T>> {
    let hits = hits.into_hits();
    if hits.is_empty() {
        Err(Error::EmptyHits(ext.to_string()))
    } else {
        Ok(hits)
    }
}

// reqwest errors print their URL, which carries the api key
fn redacted(error: reqwest::Error) -> Error {
    Error::Reqwest(error.without_url())
}

fn check_status(url: &Url, status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        let mut shown = url.clone();
        shown.set_query(None);
        Err(Error::HttpError {
            url: shown.to_string(),
            status_code: status.as_u16(),
        })
    }
}
