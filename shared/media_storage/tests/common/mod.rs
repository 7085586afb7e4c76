#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, Rgba, RgbaImage};
use media_storage::{ArtifactEncoder, EncodeSetting, EncodingError, MediaFormat, SourceImage};

/// Width that makes [`RecordingEncoder`] fail
pub const FAILING_WIDTH: u32 = 13;

pub const TOKEN: &str = "20240102030405";

pub fn solid_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 40, 90, 255])))
}

pub fn source_image(name: &str, mime: &str) -> SourceImage {
    SourceImage {
        name: name.to_string(),
        mime: mime.to_string(),
        original: solid_image(32, 24),
        thumbnail: solid_image(8, 6),
    }
}

/// Encoder that records its calls and fails on images [`FAILING_WIDTH`] wide
#[derive(Default)]
pub struct RecordingEncoder {
    pub calls: Arc<AtomicUsize>,
    pub settings: Arc<Mutex<Vec<(MediaFormat, EncodeSetting)>>>,
}

impl RecordingEncoder {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArtifactEncoder for RecordingEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        format: MediaFormat,
        setting: EncodeSetting,
    ) -> Result<Vec<u8>, EncodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.settings.lock().unwrap().push((format, setting));

        if image.width() == FAILING_WIDTH {
            return Err(EncodingError::Rejected("bad width".to_string()));
        }

        Ok(format!("{format}:{}x{}", image.width(), image.height()).into_bytes())
    }
}
