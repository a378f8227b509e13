//! Data URL encoding for slot images
//!
//! A data URL carries the MIME type and the base64 payload in one string,
//! so a record is self-contained and can be shown without the original file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use crate::error::{PortfolioError, Result};

/// MIME type used when the platform reports none
const FALLBACK_MIME: &str = "application/octet-stream";

/// Decoded form of a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Parse a base64 data URL back into its MIME type and bytes
pub fn decode_data_url(url: &str) -> Result<DataUrl> {
    let rest = url.strip_prefix("data:").ok_or(PortfolioError::MalformedDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(PortfolioError::MalformedDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(PortfolioError::MalformedDataUrl)?;

    let bytes = STANDARD.decode(payload)?;

    Ok(DataUrl {
        mime: if mime.is_empty() { FALLBACK_MIME.to_string() } else { mime.to_string() },
        bytes,
    })
}

/// Infer a browser-style MIME type from a file extension.
///
/// Unknown extensions map to `application/octet-stream`, which the
/// validator then rejects, same as a browser reporting an unknown type.
pub fn mime_for_path(path: &Path) -> &'static str {
    let is_svg = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if is_svg {
        return "image/svg+xml";
    }

    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_payload() {
        assert_eq!(encode_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(encode_data_url("", b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_decode_is_lossless_for_binary() {
        let bytes: Vec<u8> = (0..=255).collect();
        let url = encode_data_url("image/jpeg", &bytes);
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let decoded = decode_data_url(&url).unwrap();
        assert_eq!(decoded.mime, "image/jpeg");
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode_data_url("http://x/a.png"), Err(PortfolioError::MalformedDataUrl)));
        assert!(matches!(decode_data_url("data:image/png,plain"), Err(PortfolioError::MalformedDataUrl)));
        assert!(matches!(decode_data_url("data:image/png;base64"), Err(PortfolioError::MalformedDataUrl)));
        assert!(matches!(decode_data_url("data:image/png;base64,@@@"), Err(PortfolioError::Base64(_))));
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("photo.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("no_extension")), "application/octet-stream");
    }
}
