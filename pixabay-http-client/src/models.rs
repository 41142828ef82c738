use serde::{Deserialize, Serialize};

/// Envelope shared by the image and video search endpoints.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hits<T> {
    total: u64,
    total_hits: u64,
    hits: Vec<T>,
}

impl<T> Hits<T> {
    pub fn new(hits: Vec<T>) -> Self {
        let total = hits.len() as u64;
        Hits {
            total,
            total_hits: total,
            hits,
        }
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn into_hits(self) -> Vec<T> {
        self.hits
    }
}

// `imageURL` is only served to keys with full API access.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageHit {
    #[serde(rename = "pageURL")]
    page_url: String,
    #[serde(rename = "imageURL")]
    image_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    image_width: u32,
    image_height: u32,
}

impl ImageHit {
    pub fn new(
        page_url: &str,
        image_url: &str,
        large_image_url: &str,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        ImageHit {
            page_url: page_url.to_string(),
            image_url: image_url.to_string(),
            large_image_url: large_image_url.to_string(),
            image_width,
            image_height,
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Full resolution original.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Scaled to 1280px wide.
    pub fn large_image_url(&self) -> &str {
        &self.large_image_url
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoHit {
    #[serde(rename = "pageURL")]
    page_url: String,
    videos: VideoStreams,
}

impl VideoHit {
    pub fn new(page_url: &str, videos: VideoStreams) -> Self {
        VideoHit {
            page_url: page_url.to_string(),
            videos,
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn videos(&self) -> &VideoStreams {
        &self.videos
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoStreams {
    large: VideoStream,
    medium: VideoStream,
    small: VideoStream,
    tiny: VideoStream,
}

impl VideoStreams {
    pub fn new(
        large: VideoStream,
        medium: VideoStream,
        small: VideoStream,
        tiny: VideoStream,
    ) -> Self {
        VideoStreams {
            large,
            medium,
            small,
            tiny,
        }
    }

    pub fn large(&self) -> &VideoStream {
        &self.large
    }

    /// Streams from largest to smallest bucket.
    pub fn in_fallback_order(&self) -> [&VideoStream; 4] {
        [&self.large, &self.medium, &self.small, &self.tiny]
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoStream {
    url: String,
    width: u32,
    height: u32,
}

impl VideoStream {
    pub fn new(url: &str, width: u32, height: u32) -> Self {
        VideoStream {
            url: url.to_string(),
            width,
            height,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
