//! Image serialization

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, Frame};

use crate::error::EncodingError;
use crate::format::{EncodeSetting, MediaFormat, JPEG_ORIGINAL_QUALITY};

/// Serializes a decoded image into the bytes of a given format
pub trait ArtifactEncoder: Send + Sync {
    /// Encodes `image` as `format` using `setting`
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the codec fails
    fn encode(
        &self,
        image: &DynamicImage,
        format: MediaFormat,
        setting: EncodeSetting,
    ) -> Result<Vec<u8>, EncodingError>;
}

/// Encoder backed by the `image` crate codecs
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterEncoder;

impl RasterEncoder {
    fn encode_png(
        image: &DynamicImage,
        setting: EncodeSetting,
    ) -> Result<Vec<u8>, image::ImageError> {
        let compression = match setting {
            EncodeSetting::BestCompression => CompressionType::Best,
            EncodeSetting::Quality(_) | EncodeSetting::Default => CompressionType::Default,
        };

        let mut buf = Vec::new();
        let encoder = PngEncoder::new_with_quality(&mut buf, compression, FilterType::Adaptive);
        image.write_with_encoder(encoder)?;
        Ok(buf)
    }

    fn encode_jpeg(
        image: &DynamicImage,
        setting: EncodeSetting,
    ) -> Result<Vec<u8>, image::ImageError> {
        let quality = match setting {
            EncodeSetting::Quality(quality) => quality.clamp(1, 100),
            EncodeSetting::BestCompression | EncodeSetting::Default => JPEG_ORIGINAL_QUALITY,
        };

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
        let mut buf = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
        Ok(buf)
    }

    fn encode_gif(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        {
            // the trailer is written when the encoder is dropped
            let mut encoder = GifEncoder::new(&mut buf);
            encoder.encode_frame(Frame::new(image.to_rgba8()))?;
        }
        Ok(buf)
    }
}

impl ArtifactEncoder for RasterEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        format: MediaFormat,
        setting: EncodeSetting,
    ) -> Result<Vec<u8>, EncodingError> {
        let encoded = match format {
            MediaFormat::Png => Self::encode_png(image, setting),
            MediaFormat::Jpeg => Self::encode_jpeg(image, setting),
            MediaFormat::Gif => Self::encode_gif(image),
        };

        encoded.map_err(|source| EncodingError::Codec { format, source })
    }
}
