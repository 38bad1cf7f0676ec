//! Image attachment handling.
//!
//! Validation matches the limits the backend enforces on upload: a small
//! extension allowlist and a 16 MiB size cap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted attachment size in bytes (16 MiB).
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Image media types accepted for upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMediaType {
    /// JPEG image.
    Jpeg,
    /// PNG image.
    #[default]
    Png,
    /// GIF image.
    Gif,
    /// WebP image.
    Webp,
}

impl ImageMediaType {
    /// Get the MIME type string.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Get the canonical file extension.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Try to detect from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}

impl FromStr for ImageMediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image/jpeg" | "jpeg" | "jpg" => Ok(Self::Jpeg),
            "image/png" | "png" => Ok(Self::Png),
            "image/gif" | "gif" => Ok(Self::Gif),
            "image/webp" | "webp" => Ok(Self::Webp),
            _ => Err(format!("Unknown image media type: {}", s)),
        }
    }
}

/// Errors produced while validating an attachment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// File extension is not in the allowlist.
    #[error("Unsupported image type: {0} (expected png, jpg, jpeg, gif or webp)")]
    UnsupportedType(String),

    /// Payload exceeds [`MAX_IMAGE_BYTES`].
    #[error("Image too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual payload size.
        size: usize,
        /// The enforced cap.
        limit: usize,
    },

    /// Payload is empty.
    #[error("Image file is empty")]
    Empty,
}

/// A validated image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name sent as the multipart part name.
    pub file_name: String,
    /// Detected media type.
    pub media_type: ImageMediaType,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Validate raw bytes against the upload constraints.
    ///
    /// # Errors
    ///
    /// Fails when the file name's extension is not in the allowlist, the
    /// payload is empty, or it exceeds [`MAX_IMAGE_BYTES`].
    pub fn from_bytes(
        file_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Self, AttachmentError> {
        let file_name = file_name.into();

        let media_type = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageMediaType::from_extension)
            .ok_or_else(|| AttachmentError::UnsupportedType(file_name.clone()))?;

        if data.is_empty() {
            return Err(AttachmentError::Empty);
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AttachmentError::TooLarge {
                size: data.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        Ok(Self {
            file_name,
            media_type,
            data,
        })
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty. Always false for validated values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("jpg", Some(ImageMediaType::Jpeg))]
    #[case("JPEG", Some(ImageMediaType::Jpeg))]
    #[case("png", Some(ImageMediaType::Png))]
    #[case("gif", Some(ImageMediaType::Gif))]
    #[case("webp", Some(ImageMediaType::Webp))]
    #[case("bmp", None)]
    #[case("txt", None)]
    fn test_from_extension(#[case] ext: &str, #[case] expected: Option<ImageMediaType>) {
        assert_eq!(ImageMediaType::from_extension(ext), expected);
    }

    #[test]
    fn test_attachment_accepts_allowed_type() {
        let att = Attachment::from_bytes("photo.png", vec![1, 2, 3]).unwrap();
        assert_eq!(att.media_type, ImageMediaType::Png);
        assert_eq!(att.len(), 3);
    }

    #[test]
    fn test_attachment_rejects_unknown_extension() {
        let err = Attachment::from_bytes("notes.txt", vec![1]).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(_)));
    }

    #[test]
    fn test_attachment_rejects_missing_extension() {
        let err = Attachment::from_bytes("photo", vec![1]).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(_)));
    }

    #[test]
    fn test_attachment_rejects_empty() {
        let err = Attachment::from_bytes("photo.png", Vec::new()).unwrap_err();
        assert_eq!(err, AttachmentError::Empty);
    }

    #[test]
    fn test_attachment_rejects_oversize() {
        let err = Attachment::from_bytes("big.jpg", vec![0; MAX_IMAGE_BYTES + 1]).unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { .. }));
    }

    #[test]
    fn test_mime_round_trip() {
        for mt in [
            ImageMediaType::Jpeg,
            ImageMediaType::Png,
            ImageMediaType::Gif,
            ImageMediaType::Webp,
        ] {
            assert_eq!(mt.mime_type().parse::<ImageMediaType>().unwrap(), mt);
        }
    }
}
