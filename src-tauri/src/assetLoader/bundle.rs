// Decoding of `.b64` asset bundles produced by the packaging tools:
// media is plain base64, stylesheets are zlib-compressed then base64, both
// wrapped at 76 columns.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::AssetError;

/// Image extensions searched for bundled icons, in order
pub const ICON_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

/// Base64 text (line wrapping allowed) to bytes
pub fn decode_b64(text: &str) -> Result<Vec<u8>, AssetError> {
    Ok(STANDARD.decode(strip_whitespace(text))?)
}

pub fn inflate_zlib(bytes: &[u8]) -> Result<Vec<u8>, AssetError> {
    miniz_oxide::inflate::decompress_to_vec_zlib(bytes)
        .map_err(|e| AssetError::Inflate(format!("{:?}", e.status)))
}

/// Turn a packaged stylesheet back into CSS text
pub fn decode_stylesheet(text: &str) -> Result<String, AssetError> {
    let compressed = decode_b64(text)?;
    let css = inflate_zlib(&compressed)?;
    Ok(String::from_utf8(css)?)
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "mp3" => Some("audio/mpeg"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        _ => None,
    }
}

/// `data:` URI for already base64-encoded media. The payload is validated
/// so a corrupt bundle fails here instead of rendering a broken image.
pub fn data_uri(mime: &str, b64_text: &str) -> Result<String, AssetError> {
    let payload = strip_whitespace(b64_text);
    STANDARD.decode(&payload)?;
    Ok(format!("data:{};base64,{}", mime, payload))
}
