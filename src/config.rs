//! Gallery configuration module.
//!
//! Handles loading and validating `gallery.toml`. The file is optional:
//! stock defaults match the values the server historically ran with, and a
//! config file only needs to name the values it overrides. Unknown keys are
//! rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! port = 8888                      # TCP port, bound on all interfaces
//! directory = "/workspace/output"  # Gallery directory to serve
//! page_size = 64                   # Images per gallery page
//!
//! [push]
//! endpoint = "ws://localhost:3000" # WebSocket endpoint for `push`
//! format = "png"                   # Wire format: png | jpeg | webp
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, so override just the values you want:
//!
//! ```toml
//! # Only move the server to another port
//! [server]
//! port = 9090
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// HTTP gallery server settings.
    pub server: ServerConfig,
    /// WebSocket push client settings.
    pub push: PushConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.page_size == 0 {
            return Err(ConfigError::Validation(
                "server.page_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// HTTP gallery server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port the server binds on all interfaces.
    pub port: u16,
    /// Directory whose image files are exposed for browsing.
    pub directory: PathBuf,
    /// Number of images per gallery page.
    pub page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8888,
            directory: PathBuf::from("/workspace/output"),
            page_size: 64,
        }
    }
}

/// WebSocket push client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushConfig {
    /// Endpoint URL. `http://` and `https://` are accepted and converted
    /// to the matching WebSocket scheme at connect time.
    pub endpoint: String,
    /// Wire format images are encoded to before base64 wrapping.
    pub format: PushFormat,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://localhost:3000".to_string(),
            format: PushFormat::Png,
        }
    }
}

/// Image format for the push wire encoding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PushFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl PushFormat {
    /// MIME type sent in the envelope's `mimeType` field.
    pub fn mime(self) -> &'static str {
        match self {
            PushFormat::Png => "image/png",
            PushFormat::Jpeg => "image/jpeg",
            PushFormat::Webp => "image/webp",
        }
    }

    /// Encoder format for the `image` crate.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            PushFormat::Png => image::ImageFormat::Png,
            PushFormat::Jpeg => image::ImageFormat::Jpeg,
            PushFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Load configuration from `path`, falling back to stock defaults when the
/// file does not exist. A file that exists but fails to parse or validate
/// is an error; silently ignoring a broken config would be worse than
/// refusing to start.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if !path.exists() {
        return Ok(GalleryConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A stock `gallery.toml` with every option present and documented.
pub fn stock_config_toml() -> &'static str {
    r#"# output-gal configuration
# All options are optional - the values below are the defaults.

[server]
# TCP port for the gallery server, bound on all interfaces.
port = 8888

# Directory whose image files are exposed for browsing. The server reads
# it fresh on every request; files may come and go while it runs.
directory = "/workspace/output"

# Images per gallery page.
page_size = 64

[push]
# WebSocket endpoint the `push` command streams images to. http:// and
# https:// URLs are converted to ws:// and wss://.
endpoint = "ws://localhost:3000"

# Wire format images are re-encoded to: "png", "jpeg", or "webp".
format = "png"
"#
}
