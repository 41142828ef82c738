use crate::error::{Error, Result};
use dirs::home_dir;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const ADMIN_URL: &str = "https://qa.backoffice.admin.nftcreate.com/";
pub const SITE_URL: &str = "https://qa.nftcreate.com/";
pub const BITLY_URL: &str = "https://api-ssl.bitly.com/v4/";

pub const CONFIG_FILE: &str = "edition-maker.toml";
pub const CONFIG_FOLDER: &str = ".edition-maker";
pub const HOME_CONFIG_FILE: &str = "config.toml";

/// Everything a run needs from the outside world. Secrets have no defaults.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    admin_url: String,
    site_url: String,
    admin_token: Option<String>,
    pixabay_url: String,
    pixabay_key: Option<String>,
    bitly_url: String,
    bitly_tokens: Vec<String>,
    static_path: PathBuf,
    record_path: PathBuf,
    qr_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            admin_url: ADMIN_URL.to_string(),
            site_url: SITE_URL.to_string(),
            admin_token: None,
            pixabay_url: pixabay_http_client::PIXABAY_URL.to_string(),
            pixabay_key: None,
            bitly_url: BITLY_URL.to_string(),
            bitly_tokens: Vec::new(),
            static_path: PathBuf::from("static.json"),
            record_path: PathBuf::from("senddata.json"),
            qr_dir: PathBuf::from("QR"),
        }
    }
}

pub fn path_to_home_config_file() -> Option<PathBuf> {
    let mut dir = home_dir()?;
    dir.push(CONFIG_FOLDER);
    dir.push(HOME_CONFIG_FILE);
    Some(dir)
}

impl Settings {
    /// Working-directory file first, then the home directory, then env overrides.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(CONFIG_FILE);
        let file = if local.exists() {
            Some(local)
        } else {
            path_to_home_config_file().filter(|path| path.exists())
        };
        let settings = match file {
            Some(path) => Settings::from_file(&path)?,
            None => Settings::default(),
        };
        Ok(settings.with_overrides(|key| env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Settings::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `EDITION_*`, `PIXABAY_*` and `BITLY_*` values from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("EDITION_ADMIN_URL") {
            self.admin_url = url;
        }
        if let Some(url) = lookup("EDITION_SITE_URL") {
            self.site_url = url;
        }
        if let Some(token) = lookup("EDITION_ADMIN_TOKEN") {
            self.admin_token = Some(token);
        }
        if let Some(url) = lookup("PIXABAY_URL") {
            self.pixabay_url = url;
        }
        if let Some(key) = lookup("PIXABAY_API_KEY") {
            self.pixabay_key = Some(key);
        }
        if let Some(url) = lookup("BITLY_URL") {
            self.bitly_url = url;
        }
        if let Some(tokens) = lookup("BITLY_TOKENS") {
            self.bitly_tokens = tokens
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
        }
        self
    }

    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn admin_token(&self) -> Result<&str> {
        self.admin_token
            .as_deref()
            .ok_or_else(|| Error::Config("admin_token".to_string()))
    }

    pub fn pixabay_url(&self) -> &str {
        &self.pixabay_url
    }

    pub fn pixabay_key(&self) -> Result<&str> {
        self.pixabay_key
            .as_deref()
            .ok_or_else(|| Error::Config("pixabay_key".to_string()))
    }

    pub fn bitly_url(&self) -> &str {
        &self.bitly_url
    }

    pub fn bitly_tokens(&self) -> &[String] {
        &self.bitly_tokens
    }

    pub fn static_path(&self) -> &Path {
        &self.static_path
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    pub fn qr_dir(&self) -> &Path {
        &self.qr_dir
    }

    pub fn with_paths(mut self, static_path: &Path, record_path: &Path, qr_dir: &Path) -> Self {
        self.static_path = static_path.to_path_buf();
        self.record_path = record_path.to_path_buf();
        self.qr_dir = qr_dir.to_path_buf();
        self
    }
}
