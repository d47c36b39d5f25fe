//! Binary-text image reference codec.
//!
//! Converts between `data:<media-type>;base64,<payload>` references (what
//! the presentation layer displays) and raw bytes plus a media type (what
//! travels over the wire).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CodecError;

/// Scheme every image reference starts with.
pub const DATA_SCHEME: &str = "data:";

/// Prefix a reference must carry to be accepted as an image.
pub const IMAGE_REFERENCE_PREFIX: &str = "data:image/";

const BASE64_MARKER: &str = ";base64";

/// A decoded image payload ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Render as a displayable image reference.
    pub fn to_reference(&self) -> String {
        encode_image_reference(&self.media_type, &STANDARD.encode(&self.bytes))
    }
}

/// Parse an image reference into its media type and decoded bytes.
pub fn decode_image_reference(reference: &str) -> Result<EncodedImage, CodecError> {
    let (media_type, payload) = split_reference(reference)?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| CodecError::MalformedReference(format!("invalid base64 payload: {e}")))?;

    Ok(EncodedImage::new(media_type, bytes))
}

/// Compose an image reference from a media type and an already base64
/// encoded payload.
pub fn encode_image_reference(media_type: &str, base64_payload: &str) -> String {
    format!("{DATA_SCHEME}{media_type}{BASE64_MARKER},{base64_payload}")
}

fn split_reference(reference: &str) -> Result<(&str, &str), CodecError> {
    let rest = reference
        .strip_prefix(DATA_SCHEME)
        .ok_or_else(|| CodecError::MalformedReference("missing `data:` scheme".into()))?;

    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        CodecError::MalformedReference("missing separator between header and payload".into())
    })?;

    let media_type = header.strip_suffix(BASE64_MARKER).ok_or_else(|| {
        CodecError::MalformedReference("payload is not declared as base64".into())
    })?;

    // Only `;base64` may follow the media type, so encoding reproduces the header.
    if media_type.contains(';') {
        return Err(CodecError::MalformedReference(format!(
            "unsupported header parameters in `{media_type}`"
        )));
    }
    if media_type.trim().is_empty() {
        return Err(CodecError::MalformedReference("missing media type".into()));
    }

    Ok((media_type, payload))
}
