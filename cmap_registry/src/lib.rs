//! Named colormap registry over the bundled NCL color table corpus.
//!
//! Every bundled colormap is listed in an embedded manifest and is
//! parsed from its `.rgb` file on first access only. Each colormap is
//! available both under its forward name and under a `_r`-suffixed name
//! holding the exact reverse of the color sequence.

mod manifest;
mod names;
mod registry;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use cmap_format::{ColorTable, RgbTableError};
pub use manifest::{Manifest, ManifestEntry, MIN_MANIFEST_VERSION};
pub use names::safe_name;
pub use registry::{CmapRegistry, Colormap, REVERSED_SUFFIX, USER_CMAP_DIR_ENV};

#[derive(Debug, Error)]
pub enum CmapError {
    #[error("Unknown colormap {0}")]
    UnknownColormap(String),
    #[error("Colormap {0} has an empty color table ({1})")]
    EmptyColorTable(String, PathBuf),

    #[error("Malformed colormap manifest: {0}")]
    BadManifest(serde_json::Error),
    #[error("Colormap manifest version {0} is not supported, version {1} or newer is required")]
    UnsupportedManifestVersion(u32, u32),

    #[error("Failed to scan colormap directory {0}: {1}")]
    DirUnreadable(PathBuf, io::Error),

    #[error("{0}")]
    Table(RgbTableError),
}
