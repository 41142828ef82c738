use crate::{
    admin_client::AdminApi,
    airdrop::{listing_url, publish_qr_codes, AirdropLinks, QrCodes},
    config::Settings,
    error::{Error, Result},
    media::MediaSource,
    metadata::MetadataAssembler,
    params::ParameterSet,
    record_file::RecordFile,
    session::AdminSession,
    shortener::UrlShortener,
};
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub nft_id: u64,
    pub listing_url: String,
    /// Only for airdrops.
    pub qr_codes: Option<QrCodes>,
}

/// One complete run: identity checks, NFT ID, metadata, submission, and the airdrop QR codes
/// when the edition is free.
pub async fn create_edition<A, M, S>(
    params: &ParameterSet,
    settings: &Settings,
    now: DateTime<Utc>,
    admin: &A,
    media: &M,
    shortener: Option<&S>,
) -> Result<RunReport>
where
    A: AdminApi,
    M: MediaSource,
    S: UrlShortener,
{
    let kind = params.edition();
    let assembler = MetadataAssembler::new(params, now)?;
    let airdrop_shortener = if assembler.transfer_agreement()?.is_airdrop() {
        Some(shortener.ok_or_else(|| Error::Config("bitly_tokens".to_string()))?)
    } else {
        None
    };
    let session = AdminSession::new(admin, kind, params.identity()?);

    let listing = session.list_authors_or_sellers().await?;
    session.verify_identity_exists(&listing).await?;
    let nft_id = session.resolve_nft_id().await?;

    let record_file = RecordFile::new(settings.record_path());
    record_file.remove_stale()?;
    let record = assembler
        .assemble(settings.static_path(), nft_id, media)
        .await?;
    record_file.write_new(&record)?;

    let payload = record_file.read()?;
    session.submit_creation(nft_id, &payload).await?;
    let listing_url = listing_url(settings.site_url(), kind, nft_id);
    info!(url = %listing_url, "Edition created");

    let qr_codes = if let Some(shortener) = airdrop_shortener {
        let links = AirdropLinks::new(settings.site_url(), kind, nft_id);
        let codes = publish_qr_codes(
            shortener,
            &links,
            params.toggles().intalk_only,
            settings.qr_dir(),
            nft_id,
        )
        .await?;
        Some(codes)
    } else {
        info!("Not an airdrop, skipping airdrop links");
        None
    };

    Ok(RunReport {
        nft_id,
        listing_url,
        qr_codes,
    })
}
