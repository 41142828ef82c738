use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use edition_maker::{
    admin_client::BackofficeHttp, config::Settings, create_edition, media::PixabayMedia,
    shortener::BitlyShortener, ParameterSet, RunReport, Toggles,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Edition options, e.g. `-k edition=btc coin=5 totalSupply=10`
    #[clap(short = 'k', multiple_values = true, value_name = "KEY=VALUE")]
    params: Vec<String>,
    /// Embed a stock video
    #[clap(short = 'v', long)]
    video: bool,
    /// Prefer the in-app-only airdrop link
    #[clap(short = 'i', long = "intalk-only")]
    intalk_only: bool,
    /// Mark the edition as offline
    #[clap(short = 'o', long)]
    offline: bool,
}

impl Args {
    fn toggles(&self) -> Toggles {
        Toggles {
            video: self.video,
            intalk_only: self.intalk_only,
            offline: self.offline,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let params = ParameterSet::parse(&args.params, args.toggles())?;
    let settings = Settings::load()?;
    info!(admin = settings.admin_url(), edition = %params.edition(), "Configuration loaded");

    let admin = BackofficeHttp::new(settings.admin_url(), settings.admin_token()?)?;
    let media = PixabayMedia::from_key(settings.pixabay_url(), settings.pixabay_key()?);
    let shortener = if settings.bitly_tokens().is_empty() {
        None
    } else {
        Some(BitlyShortener::new(
            settings.bitly_url(),
            settings.bitly_tokens(),
        )?)
    };

    let report = create_edition(
        &params,
        &settings,
        Utc::now(),
        &admin,
        &media,
        shortener.as_ref(),
    )
    .await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!();
    println!("NFT ID: {}", report.nft_id);
    println!("Listing: {}", report.listing_url);
    if let Some(codes) = &report.qr_codes {
        println!("Airdrop link: {}", codes.short_url);
        println!("Android QR: {}", codes.android.display());
        println!("iOS QR: {}", codes.ios.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_flags() {
        let args = Args::parse_from(["edition-cli", "-k", "edition=btc", "coin=5", "-v", "-o"]);
        assert_eq!(args.params, vec!["edition=btc", "coin=5"]);
        let toggles = args.toggles();
        assert!(toggles.video);
        assert!(toggles.offline);
        assert!(!toggles.intalk_only);
    }

    #[test]
    fn repeated_k_accumulates() {
        let args = Args::parse_from(["edition-cli", "-k", "coin=5", "-i", "-k", "krw=100"]);
        assert_eq!(args.params, vec!["coin=5", "krw=100"]);
        assert!(args.intalk_only);
    }
}
