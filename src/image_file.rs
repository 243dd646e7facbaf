//! # ImageFile Artifact
//!
//! The universal exchange format between the engine and its collaborators:
//! encoded image bytes plus a mime type. Every component accepts and/or
//! produces [`ImageFile`]s and nothing else crosses the boundary.
//!
//! Ingest accepts PNG, JPEG and WebP; everything the engine emits is PNG.
//! UIs typically ship these around as `data:image/...;base64,` URIs, so
//! both forms round-trip here.

use std::fmt;
use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::CroquisError;

/// Mime types accepted on ingest. Artifacts are always emitted as PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/webp")]
    Webp,
}

impl MimeType {
    /// The mime string, e.g. `"image/png"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Webp => "image/webp",
        }
    }

    /// Parse a mime string. Unknown types are a decode error — the engine
    /// only understands the three formats it can actually rasterize.
    pub fn parse(s: &str) -> Result<Self, CroquisError> {
        match s {
            "image/png" => Ok(MimeType::Png),
            "image/jpeg" => Ok(MimeType::Jpeg),
            "image/webp" => Ok(MimeType::Webp),
            other => Err(CroquisError::Decode(format!(
                "unsupported mime type: {other}"
            ))),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded image plus its mime type.
///
/// Immutable value object: transformations always produce a new instance,
/// never mutate one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    data: Vec<u8>,
    mime_type: MimeType,
}

impl ImageFile {
    /// Wrap already-encoded bytes.
    pub fn new(data: Vec<u8>, mime_type: MimeType) -> Self {
        Self { data, mime_type }
    }

    /// Encode an RGBA buffer as a PNG artifact.
    pub fn from_rgba(pixels: &RgbaImage) -> Result<Self, CroquisError> {
        let mut bytes = Vec::new();
        pixels
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| CroquisError::Encode(e.to_string()))?;
        Ok(Self {
            data: bytes,
            mime_type: MimeType::Png,
        })
    }

    /// Parse a `data:image/...;base64,` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, CroquisError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CroquisError::Decode("not a data URI".to_string()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| CroquisError::Decode("data URI is not base64".to_string()))?;
        let mime_type = MimeType::parse(mime)?;
        let data = BASE64
            .decode(payload)
            .map_err(|e| CroquisError::Decode(format!("invalid base64: {e}")))?;
        Ok(Self { data, mime_type })
    }

    /// Render as a `data:image/...;base64,` URI for UI preview or a
    /// request payload.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type.as_str(),
            BASE64.encode(&self.data)
        )
    }

    /// Decode to an RGBA pixel buffer.
    ///
    /// Corrupt or mismatched bytes surface as [`CroquisError::Decode`];
    /// no partial result is produced.
    pub fn decode(&self) -> Result<RgbaImage, CroquisError> {
        let format = match self.mime_type {
            MimeType::Png => image::ImageFormat::Png,
            MimeType::Jpeg => image::ImageFormat::Jpeg,
            MimeType::Webp => image::ImageFormat::WebP,
        };
        let img = image::load_from_memory_with_format(&self.data, format)?;
        Ok(img.to_rgba8())
    }

    /// The encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The mime type of the encoded bytes.
    pub fn mime_type(&self) -> MimeType {
        self.mime_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn tiny_png() -> ImageFile {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        ImageFile::from_rgba(&img).unwrap()
    }

    #[test]
    fn test_png_round_trip() {
        let file = tiny_png();
        assert_eq!(file.mime_type(), MimeType::Png);
        let pixels = file.decode().unwrap();
        assert_eq!(pixels.dimensions(), (2, 2));
        assert_eq!(pixels.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_data_uri_round_trip() {
        let file = tiny_png();
        let uri = file.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        let back = ImageFile::from_data_uri(&uri).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn test_data_uri_rejects_garbage() {
        assert!(ImageFile::from_data_uri("http://example.com/a.png").is_err());
        assert!(ImageFile::from_data_uri("data:image/png;base64,!!!").is_err());
        assert!(ImageFile::from_data_uri("data:text/plain;base64,aGk=").is_err());
    }

    #[test]
    fn test_decode_failure_on_corrupt_bytes() {
        let bad = ImageFile::new(vec![0xDE, 0xAD, 0xBE, 0xEF], MimeType::Png);
        assert!(matches!(bad.decode(), Err(CroquisError::Decode(_))));
    }
}
