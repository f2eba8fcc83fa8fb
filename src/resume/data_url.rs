//! `data:<mime>;base64,<payload>` encoding for stored résumé files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AppError;

pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Split a data URL back into its MIME type and decoded bytes.
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), AppError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| AppError::Decode("data URL has no payload".to_string()))?;

    let meta = header
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Decode("not a data URL".to_string()))?;

    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::Decode("data URL is not base64-encoded".to_string()))?;
    // Parameters such as `;charset=` may sit between the type and `;base64`.
    let mime_type = mime_type.split(';').next().unwrap_or_default().trim();
    if mime_type.is_empty() {
        return Err(AppError::Decode("data URL has no MIME type".to_string()));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::Decode(format!("invalid base64 payload: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}
