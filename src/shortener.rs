use crate::error::{Error, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use url::Url;

#[async_trait]
pub trait UrlShortener: Send + Sync {
    /// Maps every requested URL to its shortened form.
    async fn shorten_urls(&self, urls: &[String]) -> Result<HashMap<String, String>>;
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    link: String,
}

/// bit.ly v4 client spreading requests over a pool of account tokens.
pub struct BitlyShortener {
    parent_url: String,
    tokens: Vec<String>,
    client: reqwest::Client,
}

impl BitlyShortener {
    pub fn new(url: &str, tokens: &[String]) -> Result<Self> {
        if tokens.is_empty() {
            return Err(Error::Config("bitly_tokens".to_string()));
        }
        let mut parent_url = url.to_string();
        if !parent_url.ends_with('/') {
            parent_url.push('/');
        }
        Ok(BitlyShortener {
            parent_url,
            tokens: tokens.to_vec(),
            client: reqwest::Client::new(),
        })
    }

    fn pick_token(&self) -> Result<&str> {
        self.tokens
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .ok_or_else(|| Error::Config("bitly_tokens".to_string()))
    }

    async fn shorten(&self, long_url: &str) -> Result<String> {
        let endpoint = Url::parse(&self.parent_url)?.join("shorten")?;
        let token = self.pick_token()?;
        let res = self
            .client
            .post(endpoint)
            .bearer_auth(token)
            .json(&ShortenRequest { long_url })
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Shortening {
                url: long_url.to_string(),
                reason: format!("status {}", status.as_u16()),
            });
        }
        let body: ShortenResponse = res.json().await?;
        Ok(body.link)
    }
}

#[async_trait]
impl UrlShortener for BitlyShortener {
    async fn shorten_urls(&self, urls: &[String]) -> Result<HashMap<String, String>> {
        let mut shortened = HashMap::new();
        for url in urls {
            let link = self.shorten(url).await?;
            shortened.insert(url.clone(), link);
        }
        Ok(shortened)
    }
}

/// Hands out `https://bit.ly/fake-N` links and remembers what it was asked for.
#[derive(Debug, Default, Clone)]
pub struct FakeShortener {
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeShortener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> Result<Vec<String>> {
        let requested = self
            .requested
            .lock()
            .map_err(|e| Error::InMemory(format!("{:?}", e)))?
            .clone();
        Ok(requested)
    }
}

#[async_trait]
impl UrlShortener for FakeShortener {
    async fn shorten_urls(&self, urls: &[String]) -> Result<HashMap<String, String>> {
        let mut requested = self
            .requested
            .lock()
            .map_err(|e| Error::InMemory(format!("{:?}", e)))?;
        let mut shortened = HashMap::new();
        for url in urls {
            requested.push(url.clone());
            shortened.insert(url.clone(), format!("https://bit.ly/fake-{}", requested.len()));
        }
        Ok(shortened)
    }
}
