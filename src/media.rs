use crate::error::{Error, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageReader;
use pixabay_http_client::{
    models::{VideoStream, VideoStreams},
    PixabayHttp, PixabayHttpTrait, SearchQuery,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::debug;
use url::Url;

pub mod fake_media;

/// Width separating low and high resolution variants.
pub const HIRES_THRESHOLD: u32 = 1920;
pub const IMAGE_DATA_PREFIX: &str = "data:image/jpeg;base64,";
pub const VIDEO_DATA_PREFIX: &str = "data:video/mp4;base64,";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// One variant as embedded in the metadata: data URL, file name and pixel size.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    pub file: String,
    pub name: String,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub low_res: EncodedMedia,
    pub high_res: EncodedMedia,
}

#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn fetch_image(&self) -> Result<MediaAsset>;

    async fn fetch_video(&self) -> Result<MediaAsset>;
}

/// Random popular stock media picked from Pixabay search results.
pub struct PixabayMedia<C: PixabayHttpTrait> {
    client: C,
    query: SearchQuery,
}

impl PixabayMedia<PixabayHttp> {
    pub fn from_key(url: &str, key: &str) -> Self {
        PixabayMedia::new(PixabayHttp::new(url, key))
    }
}

impl<C: PixabayHttpTrait> PixabayMedia<C> {
    pub fn new(client: C) -> Self {
        PixabayMedia {
            client,
            query: SearchQuery::default(),
        }
    }
}

#[async_trait]
impl<C: PixabayHttpTrait> MediaSource for PixabayMedia<C> {
    async fn fetch_image(&self) -> Result<MediaAsset> {
        let hits = self.client.images(&self.query).await?;
        let hit = pick_one(hits, &mut rand::thread_rng())?;
        let name = image_name(hit.page_url())?;
        debug!(page = hit.page_url(), "Picked image");

        let low_bytes = self.client.download(hit.large_image_url()).await?;
        let (width, height) = image_dimensions(&low_bytes)?;
        let high_bytes = self.client.download(hit.image_url()).await?;

        let low_res = EncodedMedia {
            file: data_url(IMAGE_DATA_PREFIX, &low_bytes),
            name: name.clone(),
            size: Size { width, height },
        };
        let high_res = EncodedMedia {
            file: data_url(IMAGE_DATA_PREFIX, &high_bytes),
            name,
            size: Size {
                width: hit.image_width(),
                height: hit.image_height(),
            },
        };
        Ok(MediaAsset { low_res, high_res })
    }

    async fn fetch_video(&self) -> Result<MediaAsset> {
        let hits = self.client.videos(&self.query).await?;
        let hit = pick_one(hits, &mut rand::thread_rng())?;
        let streams = hit.videos();
        let name = video_name(streams.large().url())?;
        let (high, low) = select_video_streams(streams)?;
        debug!(page = hit.page_url(), high = high.width(), low = low.width(), "Picked video");

        let high_bytes = self.client.download(high.url()).await?;
        let low_bytes = self.client.download(low.url()).await?;

        Ok(MediaAsset {
            low_res: encoded_video(low, &low_bytes, &name),
            high_res: encoded_video(high, &high_bytes, &name),
        })
    }
}

pub fn pick_one<T, R: Rng>(mut hits: Vec<T>, rng: &mut R) -> Result<T> {
    if hits.is_empty() {
        return Err(Error::MalformedMedia("no hits to pick from".to_string()));
    }
    let index = rng.gen_range(0..hits.len());
    Ok(hits.swap_remove(index))
}

pub fn data_url(prefix: &str, bytes: &[u8]) -> String {
    format!("{prefix}{}", STANDARD.encode(bytes))
}

/// `https://pixabay.com/photos/tree-sunset-12345/` is named `tree-sunset-12345.jpg`.
pub fn image_name(page_url: &str) -> Result<String> {
    let url = Url::parse(page_url)?;
    let slug = url
        .path_segments()
        .and_then(|mut segments| segments.filter(|s| !s.is_empty()).nth(1))
        .ok_or_else(|| Error::MalformedMedia(format!("no slug in page URL {page_url}")))?;
    Ok(format!("{slug}.jpg"))
}

/// File name of a stream URL, without the query.
pub fn video_name(stream_url: &str) -> Result<String> {
    let url = Url::parse(stream_url)?;
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedMedia(format!("no file name in video URL {stream_url}")))
}

/// First bucket at or above the threshold is high-res, first at or below it is low-res.
pub fn select_video_streams(streams: &VideoStreams) -> Result<(&VideoStream, &VideoStream)> {
    let buckets = streams.in_fallback_order();
    let high = buckets
        .iter()
        .find(|stream| stream.width() >= HIRES_THRESHOLD)
        .ok_or_else(|| Error::MalformedMedia("no high resolution video stream".to_string()))?;
    let low = buckets
        .iter()
        .find(|stream| stream.width() <= HIRES_THRESHOLD)
        .ok_or_else(|| Error::MalformedMedia("no low resolution video stream".to_string()))?;
    Ok((*high, *low))
}

/// Reads the pixel size from the encoded image header.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let dimensions = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}

fn encoded_video(stream: &VideoStream, bytes: &[u8], name: &str) -> EncodedMedia {
    EncodedMedia {
        file: data_url(VIDEO_DATA_PREFIX, bytes),
        name: name.to_string(),
        size: Size {
            width: stream.width(),
            height: stream.height(),
        },
    }
}
