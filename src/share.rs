//! Shareable links.
//!
//! The whole [`AppState`] travels in the URL fragment as
//! `#state=<compressed>`, so it never reaches a server. The payload is the
//! JSON form of the state, deflated and encoded as unpadded URL-safe base64
//! (`A-Z a-z 0-9 - _`), which needs no further escaping in a fragment.

use crate::constants::SHARE_STATE_KEY;
use crate::state::AppState;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};
use thiserror::Error;

/// Errors that can occur while decoding a share link
#[derive(Error, Debug)]
pub enum ShareError {
    /// The payload is not valid URL-safe base64
    #[error("Invalid share payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Compression or decompression failed
    #[error("Corrupt share payload: {0}")]
    Compression(#[from] std::io::Error),

    /// The decompressed payload is not a valid state
    #[error("Invalid share state: {0}")]
    Json(#[from] serde_json::Error),

    /// A fragment value is not valid percent-encoded UTF-8
    #[error("Invalid fragment encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias for share link operations
pub type ShareResult<T> = Result<T, ShareError>;

/// Build a share URL for `state` on top of `base_url`.
///
/// Any fragment already present on `base_url` is replaced.
pub fn encode_state_to_url(base_url: &str, state: &AppState) -> ShareResult<String> {
    let base = base_url.split_once('#').map_or(base_url, |(base, _)| base);
    let payload = compress(&serde_json::to_string(state)?)?;
    tracing::debug!(
        rows = state.rows.len(),
        payload_len = payload.len(),
        "Encoded share link"
    );
    Ok(format!("{base}#{SHARE_STATE_KEY}={payload}"))
}

/// Decode the state carried by a URL fragment (including its leading `#`).
///
/// Returns `Ok(None)` when there is nothing to restore: no fragment, no
/// `state` key, or an empty payload. Corrupt payloads are errors.
pub fn decode_state_from_fragment(fragment: &str) -> ShareResult<Option<AppState>> {
    let Some(query) = fragment.strip_prefix('#') else {
        return Ok(None);
    };
    let Some(payload) = fragment_param(query, SHARE_STATE_KEY)? else {
        return Ok(None);
    };
    if payload.is_empty() {
        return Ok(None);
    }

    let json = decompress(&payload)?;
    if json.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&json)?))
}

/// Restore state from a fragment, treating any failure as "nothing to restore"
pub fn restore_from_fragment(fragment: &str) -> Option<AppState> {
    match decode_state_from_fragment(fragment) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Ignoring share link that could not be restored: {}", e);
            None
        }
    }
}

/// The fragment part of a full URL, with its `#`, or "" when there is none
pub fn fragment_of(url: &str) -> &str {
    url.find('#').map_or("", |idx| &url[idx..])
}

/// First value of `key` in a form-encoded `a=1&b=2` string
fn fragment_param(query: &str, key: &str) -> ShareResult<Option<String>> {
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if form_decode(name)? == key {
            return Ok(Some(form_decode(value)?));
        }
    }
    Ok(None)
}

fn form_decode(s: &str) -> ShareResult<String> {
    let spaced = s.replace('+', " ");
    Ok(urlencoding::decode(&spaced)?.into_owned())
}

fn compress(text: &str) -> ShareResult<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(URL_SAFE_NO_PAD.encode(encoder.finish()?))
}

fn decompress(payload: &str) -> ShareResult<String> {
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let mut json = String::new();
    DeflateDecoder::new(bytes.as_slice()).read_to_string(&mut json)?;
    Ok(json)
}
