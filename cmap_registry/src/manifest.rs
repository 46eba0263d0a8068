use serde::Deserialize;

use crate::CmapError;

/// Oldest manifest format this crate can consume.
pub const MIN_MANIFEST_VERSION: u32 = 1;

/// The colormap manifest: one entry per bundled color table, with the
/// file path relative to the asset directory.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub colormaps: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub path: String,
}

impl Manifest {
    pub fn from_json(src: &str) -> Result<Self, CmapError> {
        let manifest: Manifest = serde_json::from_str(src).map_err(CmapError::BadManifest)?;

        if manifest.version < MIN_MANIFEST_VERSION {
            return Err(CmapError::UnsupportedManifestVersion(
                manifest.version,
                MIN_MANIFEST_VERSION,
            ));
        }

        Ok(manifest)
    }

    /// The manifest of the bundled corpus.
    pub fn builtin() -> Result<Self, CmapError> {
        Self::from_json(include_str!("../config/manifest.json"))
    }
}
