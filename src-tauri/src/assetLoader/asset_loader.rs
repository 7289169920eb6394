use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::bundle::{data_uri, decode_stylesheet, mime_for_extension, ICON_EXTENSIONS};
use crate::config::DesktopConfig;
use crate::error::AssetError;

/// Information about a loaded asset
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetInfo {
    /// Absolute path to the cached asset file
    pub path: String,
    /// Whether the asset was loaded from cache (true) or freshly downloaded (false)
    pub cached: bool,
    /// The type of asset (e.g., "Image", "Video")
    pub asset_type: String,
}

/// Supported asset types for the loader
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum AssetType {
    Image,
    Video,
    Audio,
    Document,
    Other(String),
}

impl AssetType {
    /// Get the default file extension for this asset type
    fn extension(&self) -> &str {
        match self {
            AssetType::Image => "png",
            AssetType::Video => "mp4",
            AssetType::Audio => "mp3",
            AssetType::Document => "md",
            AssetType::Other(ext) => ext,
        }
    }

    /// Get the subdirectory name for this asset type
    fn subdirectory(&self) -> &str {
        match self {
            AssetType::Image => "images",
            AssetType::Video => "videos",
            AssetType::Audio => "audio",
            AssetType::Document => "documents",
            AssetType::Other(_) => "other",
        }
    }

    /// `Other` extensions end up in a file name and must not carry a path
    fn check_extension(&self) -> Result<(), AssetError> {
        match self {
            AssetType::Other(ext)
                if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Err(AssetError::InvalidExtension(ext.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Get a display name for this asset type
    fn display_name(&self) -> String {
        match self {
            AssetType::Image => "Image".to_string(),
            AssetType::Video => "Video".to_string(),
            AssetType::Audio => "Audio".to_string(),
            AssetType::Document => "Document".to_string(),
            AssetType::Other(ext) => format!("Other({})", ext),
        }
    }
}

/// Where a window icon can be displayed from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "src")]
pub enum IconSource {
    /// Inline `data:` URI built from a bundled icon
    DataUri(String),
    /// Local file the webview reads through the asset protocol
    Cached(String),
}

impl IconSource {
    pub fn into_src(self) -> String {
        match self {
            IconSource::DataUri(uri) => uri,
            IconSource::Cached(path) => path,
        }
    }
}

/// FNV-1a, stable across builds so cache file names survive toolchain upgrades
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Generate a cache key from URL (hash-based filename)
fn url_to_filename(url: &str, asset_type: &AssetType) -> String {
    format!("{:016x}.{}", fnv1a(url.as_bytes()), asset_type.extension())
}

fn is_remote(id: &str) -> bool {
    id.starts_with("http://") || id.starts_with("https://")
}

/// Icon and stylesheet ids are bare names, never paths
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
}

/// Resolves icon ids and stylesheets for the shell.
///
/// Bundled assets live under `asset_root` (`icons/<id>.<ext>.b64`,
/// `styles/<name>.css.b64`); remote assets are downloaded once into `cache_dir`.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    asset_root: PathBuf,
    cache_dir: PathBuf,
    client: reqwest::Client,
}

impl AssetLoader {
    pub fn new(asset_root: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            cache_dir: cache_dir.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &DesktopConfig) -> Self {
        Self::new(&config.asset_root, &config.cache_dir)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Load an asset from a URL, caching it locally
    pub async fn load(&self, url: &str, asset_type: AssetType) -> Result<AssetInfo, AssetError> {
        let file_path = self.cache_path(url, &asset_type)?;

        // Create directory if it doesn't exist
        if let Some(assets_dir) = file_path.parent() {
            tokio::fs::create_dir_all(assets_dir).await?;
        }

        // Check if already cached
        if tokio::fs::try_exists(&file_path).await? {
            return Ok(AssetInfo {
                path: file_path.to_string_lossy().to_string(),
                cached: true,
                asset_type: asset_type.display_name(),
            });
        }

        debug!("[Assets] Downloading {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AssetError::Status(response.status()));
        }

        let bytes = response.bytes().await?;

        // Save to disk
        tokio::fs::write(&file_path, &bytes).await?;

        Ok(AssetInfo {
            path: file_path.to_string_lossy().to_string(),
            cached: false,
            asset_type: asset_type.display_name(),
        })
    }

    /// Clear the asset cache, for one asset type or entirely
    pub async fn clear_cache(&self, asset_type: Option<AssetType>) -> Result<String, AssetError> {
        if let Some(asset_type) = asset_type {
            let type_dir = self.cache_dir.join(asset_type.subdirectory());
            if tokio::fs::try_exists(&type_dir).await? {
                tokio::fs::remove_dir_all(&type_dir).await?;
            }
            info!("[Assets] Cleared cache for {}", asset_type.display_name());
            Ok(format!("Cleared cache for {}", asset_type.display_name()))
        } else {
            if tokio::fs::try_exists(&self.cache_dir).await? {
                tokio::fs::remove_dir_all(&self.cache_dir).await?;
            }
            info!("[Assets] Cleared all asset cache");
            Ok("Cleared all asset cache".to_string())
        }
    }

    /// Check if an asset is already cached
    pub async fn is_cached(&self, url: &str, asset_type: &AssetType) -> Result<bool, AssetError> {
        Ok(tokio::fs::try_exists(self.cache_path(url, asset_type)?).await?)
    }

    /// The path where the asset would be cached (may or may not exist)
    pub fn cache_path(&self, url: &str, asset_type: &AssetType) -> Result<PathBuf, AssetError> {
        asset_type.check_extension()?;
        Ok(self
            .cache_dir
            .join(asset_type.subdirectory())
            .join(url_to_filename(url, asset_type)))
    }

    /// Resolve a window icon id to something the webview can display
    pub async fn resolve_icon(&self, icon_id: &str) -> Result<IconSource, AssetError> {
        if is_remote(icon_id) {
            let info = self.load(icon_id, AssetType::Image).await?;
            return Ok(IconSource::Cached(info.path));
        }

        if !is_plain_name(icon_id) {
            return Err(AssetError::UnknownIcon(icon_id.to_string()));
        }

        let icons_dir = self.asset_root.join("icons");
        for ext in ICON_EXTENSIONS {
            let path = icons_dir.join(format!("{}.{}.b64", icon_id, ext));
            if !tokio::fs::try_exists(&path).await? {
                continue;
            }
            let text = tokio::fs::read_to_string(&path).await?;
            let mime = mime_for_extension(ext).unwrap_or("application/octet-stream");
            return Ok(IconSource::DataUri(data_uri(mime, &text)?));
        }

        Err(AssetError::UnknownIcon(icon_id.to_string()))
    }

    /// Read and decode a packaged stylesheet (`styles/<name>.css.b64`)
    pub async fn load_stylesheet(&self, name: &str) -> Result<String, AssetError> {
        if !is_plain_name(name) {
            return Err(AssetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid stylesheet name '{}'", name),
            )));
        }
        let path = self
            .asset_root
            .join("styles")
            .join(format!("{}.css.b64", name));
        let text = tokio::fs::read_to_string(&path).await?;
        decode_stylesheet(&text)
    }
}
