// Bundled and remote assets for the shell: icons, stylesheets, cached downloads

pub mod asset_loader;
pub mod bundle;

pub use asset_loader::{AssetInfo, AssetLoader, AssetType, IconSource};
