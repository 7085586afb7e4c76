//! Supported image encodings and their per-variant settings

use std::fmt;
use std::str::FromStr;

use mime::Mime;

use crate::error::MediaError;
use crate::types::SizeClass;

/// JPEG quality used for originals
pub const JPEG_ORIGINAL_QUALITY: u8 = 75;

/// JPEG quality used for thumbnails
pub const JPEG_THUMBNAIL_QUALITY: u8 = 40;

/// Image encodings accepted by the preparer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
    /// `image/gif`
    Gif,
}

/// Codec parameter passed to the encoder for one rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSetting {
    /// Lossless, smallest output
    BestCompression,
    /// Lossy with the given quality factor (1-100)
    Quality(u8),
    /// Codec defaults
    Default,
}

impl MediaFormat {
    /// MIME type of the encoded bytes
    #[must_use]
    pub fn mime(self) -> Mime {
        match self {
            Self::Png => mime::IMAGE_PNG,
            Self::Jpeg => mime::IMAGE_JPEG,
            Self::Gif => mime::IMAGE_GIF,
        }
    }

    /// Encoder setting for the given rendering
    #[must_use]
    pub const fn setting_for(self, size_class: SizeClass) -> EncodeSetting {
        match (self, size_class) {
            (Self::Png, _) => EncodeSetting::BestCompression,
            (Self::Jpeg, SizeClass::Original) => EncodeSetting::Quality(JPEG_ORIGINAL_QUALITY),
            (Self::Jpeg, SizeClass::Thumbnail) => EncodeSetting::Quality(JPEG_THUMBNAIL_QUALITY),
            (Self::Gif, _) => EncodeSetting::Default,
        }
    }
}

impl FromStr for MediaFormat {
    type Err = MediaError;

    /// Parses a MIME type such as `image/png`; parameters are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: Mime = s
            .trim()
            .parse()
            .map_err(|_| MediaError::UnsupportedFormat(s.to_string()))?;

        if parsed.type_() != mime::IMAGE {
            return Err(MediaError::UnsupportedFormat(s.to_string()));
        }

        let subtype = parsed.subtype();
        if subtype == mime::PNG {
            Ok(Self::Png)
        } else if subtype == mime::JPEG {
            Ok(Self::Jpeg)
        } else if subtype == mime::GIF {
            Ok(Self::Gif)
        } else {
            Err(MediaError::UnsupportedFormat(s.to_string()))
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime().essence_str())
    }
}
