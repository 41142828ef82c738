use crate::{
    error::{Error, Result},
    params::EditionKind,
    shortener::UrlShortener,
};
use image::Luma;
use qrcode::{EcLevel, QrCode};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Public detail page of a listing.
pub fn listing_url(site_url: &str, kind: EditionKind, nft_id: u64) -> String {
    let site = site_url.trim_end_matches('/');
    format!("{site}/{}/detail/{nft_id}", kind.path())
}

/// Deep links handing the listing to the app's airdrop flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AirdropLinks {
    full: String,
    intalk: String,
}

impl AirdropLinks {
    pub fn new(site_url: &str, kind: EditionKind, nft_id: u64) -> Self {
        let site = site_url.trim_end_matches('/');
        let full = format!(
            "{site}/?target=/external?target_key=airdrop&target_link={}",
            listing_url(site_url, kind, nft_id)
        );
        let intalk = format!("{full}&intalk_only=true");
        AirdropLinks { full, intalk }
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn intalk(&self) -> &str {
        &self.intalk
    }

    pub fn preferred(&self, intalk_only: bool) -> &str {
        if intalk_only {
            &self.intalk
        } else {
            &self.full
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCodes {
    pub short_url: String,
    pub android: PathBuf,
    pub ios: PathBuf,
}

/// Shortens the preferred link and writes one QR image per platform into `qr_dir`. Android
/// gets the short link, iOS the long one.
pub async fn publish_qr_codes<S: UrlShortener>(
    shortener: &S,
    links: &AirdropLinks,
    intalk_only: bool,
    qr_dir: &Path,
    nft_id: u64,
) -> Result<QrCodes> {
    let long_url = links.preferred(intalk_only).to_string();
    if intalk_only {
        info!("Building the in-app airdrop link");
    }
    let shortened = shortener
        .shorten_urls(std::slice::from_ref(&long_url))
        .await?;
    let short_url = shortened
        .get(&long_url)
        .cloned()
        .ok_or_else(|| Error::Shortening {
            url: long_url.clone(),
            reason: "missing from shortener response".to_string(),
        })?;
    info!(short_url = %short_url, "Shortened airdrop link");

    if !qr_dir.exists() {
        info!(dir = ?qr_dir, "Creating QR folder");
        fs::create_dir_all(qr_dir)?;
    }
    let android = qr_dir.join(format!("aos_QR_{nft_id}.png"));
    render_qr(&short_url, &android)?;
    info!(path = ?android, "Android QR code written");
    let ios = qr_dir.join(format!("ios_QR_{nft_id}.png"));
    render_qr(&long_url, &ios)?;
    info!(path = ?ios, "iOS QR code written");

    Ok(QrCodes {
        short_url,
        android,
        ios,
    })
}

pub fn render_qr(data: &str, path: &Path) -> Result<()> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(10, 10)
        .quiet_zone(true)
        .build();
    image.save(path)?;
    Ok(())
}
