//! WebSocket push client.
//!
//! Streams image files to a remote endpoint over one persistent WebSocket
//! connection. Each image is re-encoded to the configured wire format,
//! base64-encoded, and wrapped in a JSON envelope sent as a single text
//! frame:
//!
//! ```json
//! {
//!   "type": "image-generated",
//!   "data": {
//!     "mode": "push",
//!     "mimeType": "image/png",
//!     "imageInfo": { "width": 1024, "height": 1024 },
//!     "imageIdx": 0,
//!     "imageLength": 4,
//!     "timestamp": 1700000000000,
//!     "base64Data": "..."
//!   }
//! }
//! ```
//!
//! The receiving end predates this crate, so the envelope shape and field
//! names are a fixed wire contract. `imageIdx` is the 0-based position in
//! the batch and `imageLength` the batch size, letting the receiver track
//! progress; `timestamp` is Unix milliseconds at send time.
//!
//! Any failure aborts the batch with a typed error. The operation is
//! driven interactively and re-running it is cheap, so there are no
//! retries.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::SinkExt;
use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;
use tokio_tungstenite::tungstenite;
use tracing::info;

use crate::config::PushFormat;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: &'static str,
    data: Payload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    mode: &'static str,
    mime_type: &'static str,
    image_info: ImageInfo,
    image_idx: usize,
    image_length: usize,
    timestamp: u128,
    base64_data: String,
}

#[derive(Debug, Serialize)]
struct ImageInfo {
    width: u32,
    height: u32,
}

/// Push `files` to `endpoint` in order, one envelope per image.
///
/// Returns the number of images sent. The connection is opened once for
/// the whole batch and closed cleanly afterwards.
pub async fn push_images(
    endpoint: &str,
    files: &[PathBuf],
    format: PushFormat,
) -> Result<usize, PushError> {
    let url = ws_url(endpoint);
    let (mut ws, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;

    for (idx, path) in files.iter().enumerate() {
        let image = image::open(path)?;
        let envelope = encode_envelope(&image, format, idx, files.len())?;
        ws.send(tungstenite::Message::Text(serde_json::to_string(&envelope)?))
            .await?;
        info!(
            image = %path.display(),
            idx,
            total = files.len(),
            "pushed image"
        );
    }

    ws.close(None).await?;
    Ok(files.len())
}

/// Encode one image into its wire envelope.
fn encode_envelope(
    image: &DynamicImage,
    format: PushFormat,
    idx: usize,
    total: usize,
) -> Result<Envelope, PushError> {
    let bytes = encode_image(image, format)?;

    Ok(Envelope {
        kind: "image-generated",
        data: Payload {
            mode: "push",
            mime_type: format.mime(),
            image_info: ImageInfo {
                width: image.width(),
                height: image.height(),
            },
            image_idx: idx,
            image_length: total,
            timestamp: unix_millis(),
            base64_data: BASE64.encode(&bytes),
        },
    })
}

/// Re-encode a decoded image to the wire format.
///
/// JPEG has no alpha channel, so RGBA inputs are flattened to RGB first;
/// the encoder errors on RGBA otherwise.
fn encode_image(image: &DynamicImage, format: PushFormat) -> Result<Vec<u8>, PushError> {
    let mut cursor = Cursor::new(Vec::new());
    match format {
        PushFormat::Jpeg if image.color().has_alpha() => {
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut cursor, format.image_format())?;
        }
        _ => image.write_to(&mut cursor, format.image_format())?,
    }
    Ok(cursor.into_inner())
}

/// Convert an HTTP(S) URL to the matching WS(S) scheme.
///
/// Passes `ws://` and `wss://` through unchanged; anything else is handed
/// to the connector as-is and fails there if it is not a WebSocket URL.
pub fn ws_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        url.to_string()
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
