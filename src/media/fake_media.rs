use super::{EncodedMedia, MediaAsset, MediaSource, Size};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Serves fixed assets and counts how often each kind was requested.
#[derive(Debug, Clone)]
pub struct FakeMedia {
    image: MediaAsset,
    video: Option<MediaAsset>,
    image_fetches: Arc<AtomicUsize>,
    video_fetches: Arc<AtomicUsize>,
}

pub fn fake_variant(name: &str, width: u32, height: u32) -> EncodedMedia {
    EncodedMedia {
        file: format!("data:fake;base64,{name}"),
        name: name.to_string(),
        size: Size { width, height },
    }
}

impl FakeMedia {
    pub fn new(image: MediaAsset) -> Self {
        FakeMedia {
            image,
            video: None,
            image_fetches: Arc::new(AtomicUsize::new(0)),
            video_fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_video(mut self, video: MediaAsset) -> Self {
        self.video = Some(video);
        self
    }

    pub fn image_fetches(&self) -> usize {
        self.image_fetches.load(Ordering::SeqCst)
    }

    pub fn video_fetches(&self) -> usize {
        self.video_fetches.load(Ordering::SeqCst)
    }
}

impl Default for FakeMedia {
    fn default() -> Self {
        let image = MediaAsset {
            low_res: fake_variant("sunset.jpg", 1280, 720),
            high_res: fake_variant("sunset.jpg", 4000, 2250),
        };
        let video = MediaAsset {
            low_res: fake_variant("rain.mp4", 1920, 1080),
            high_res: fake_variant("rain.mp4", 3840, 2160),
        };
        FakeMedia::new(image).with_video(video)
    }
}

#[async_trait]
impl MediaSource for FakeMedia {
    async fn fetch_image(&self) -> Result<MediaAsset> {
        self.image_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.image.clone())
    }

    async fn fetch_video(&self) -> Result<MediaAsset> {
        self.video_fetches.fetch_add(1, Ordering::SeqCst);
        self.video
            .clone()
            .ok_or_else(|| Error::MalformedMedia("no fake video configured".to_string()))
    }
}
