//! Uploaded reference images.
//!
//! An asset is an immutable encoded blob. Decoding happens on demand at
//! render time so a corrupt upload only affects the views that draw it.

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use image::{ImageReader, RgbaImage};
use thiserror::Error;

use crate::geometry::SurfaceSize;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("data uri is malformed: {reason}")]
    InvalidDataUri { reason: &'static str },
    #[error("data uri payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image format could not be detected: {0}")]
    Io(#[from] std::io::Error),
}

pub type AssetResult<T> = std::result::Result<T, AssetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u64);

impl AssetId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "img_{}", self.0)
    }
}

/// Encoded image bytes exactly as the host handed them over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    bytes: Arc<[u8]>,
}

impl ImageBlob {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Accepts `data:<mime>;base64,<payload>` as produced by a browser file reader.
    pub fn from_data_uri(uri: &str) -> AssetResult<Self> {
        let rest = uri
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or(AssetError::InvalidDataUri {
                reason: "missing data: prefix",
            })?;
        let (header, payload) = rest.split_once(',').ok_or(AssetError::InvalidDataUri {
            reason: "missing payload separator",
        })?;
        if !header.ends_with(BASE64_MARKER) {
            return Err(AssetError::InvalidDataUri {
                reason: "payload is not base64 encoded",
            });
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn decode_rgba(&self) -> AssetResult<RgbaImage> {
        let image = ImageReader::new(Cursor::new(self.as_bytes()))
            .with_guessed_format()?
            .decode()?;
        Ok(image.to_rgba8())
    }

    /// Reads only the header to find the native pixel size.
    pub fn dimensions(&self) -> AssetResult<SurfaceSize> {
        let (width, height) = ImageReader::new(Cursor::new(self.as_bytes()))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(SurfaceSize::new(width, height))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: AssetId,
    pub blob: ImageBlob,
}

impl ImageAsset {
    pub fn new(id: AssetId, blob: ImageBlob) -> Self {
        Self { id, blob }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ImageBlob;
    use base64::Engine as _;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn solid_png(width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba(fill));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encoding of an in-memory image should succeed");
        bytes
    }

    pub(crate) fn solid_blob(width: u32, height: u32) -> ImageBlob {
        ImageBlob::from_bytes(solid_png(width, height, [20, 30, 40, 255]))
    }

    pub(crate) fn data_uri(bytes: &[u8]) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }
}
