use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;

use cmap_format::{read_color_table, ColorTable};

use crate::manifest::Manifest;
use crate::names::safe_name;
use crate::CmapError;

/// Environment variable naming an extra directory of user `.rgb` files.
pub const USER_CMAP_DIR_ENV: &str = "CMAP_DIR";

/// Name suffix selecting the reversed variant of a colormap.
pub const REVERSED_SUFFIX: &str = "_r";

/// A realized colormap: a name plus an ordered color table.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    colors: ColorTable,
}

impl Colormap {
    pub fn new(name: impl Into<String>, colors: ColorTable) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The same table in reverse order, under the `_r`-suffixed name.
    /// Reversing a reversed colormap restores the base name.
    pub fn reversed(&self) -> Colormap {
        let name = match self.name.strip_suffix(REVERSED_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{}", self.name, REVERSED_SUFFIX),
        };

        let mut colors = self.colors.clone();
        colors.reverse();

        Colormap { name, colors }
    }

    /// Sample the colormap at `t` in [0, 1] with piecewise-linear
    /// interpolation between adjacent table entries.
    pub fn sample(&self, t: f32) -> [f32; 3] {
        match self.colors.len() {
            0 => [0.0; 3],
            1 => self.colors[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
                let i = (pos.floor() as usize).min(n - 2);
                let frac = pos - i as f32;

                let lo = self.colors[i];
                let hi = self.colors[i + 1];
                [
                    lo[0] + (hi[0] - lo[0]) * frac,
                    lo[1] + (hi[1] - lo[1]) * frac,
                    lo[2] + (hi[2] - lo[2]) * frac,
                ]
            }
        }
    }
}

/// Lazy colormap registry.
///
/// Holds a source table mapping each base name to its `.rgb` file and a
/// cache of realized colormaps. A colormap file is parsed on the first
/// `get` of its name (forward or reversed); the realized object is
/// cached and every later `get` of that name returns the same `Rc`.
/// Cache entries are never evicted or overwritten.
pub struct CmapRegistry {
    sources: IndexMap<String, PathBuf>,
    cache: RefCell<IndexMap<String, Rc<Colormap>>>,
}

impl CmapRegistry {
    /// An empty registry with no sources. Useful for fully custom
    /// configurations; `add_dir` and `add_source` populate it.
    pub fn new() -> Self {
        Self {
            sources: IndexMap::new(),
            cache: RefCell::new(IndexMap::new()),
        }
    }

    /// The bundled corpus, with `.rgb` files resolved against the
    /// crate's own `colormaps/` asset directory.
    pub fn builtin() -> Result<Self, CmapError> {
        Self::with_asset_dir(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/colormaps")))
    }

    /// The bundled corpus resolved against a caller-supplied asset
    /// directory.
    pub fn with_asset_dir(asset_dir: &Path) -> Result<Self, CmapError> {
        let manifest = Manifest::builtin()?;
        Ok(Self::from_manifest(&manifest, asset_dir))
    }

    pub fn from_manifest(manifest: &Manifest, asset_dir: &Path) -> Self {
        let mut registry = Self::new();
        for entry in &manifest.colormaps {
            registry.add_source(entry.name.clone(), asset_dir.join(&entry.path));
        }
        registry
    }

    /// The bundled corpus plus, if `CMAP_DIR` is set, every `.rgb` file
    /// found there.
    pub fn from_env() -> Result<Self, CmapError> {
        let mut registry = Self::builtin()?;
        if let Ok(dir) = std::env::var(USER_CMAP_DIR_ENV) {
            registry.add_dir(Path::new(&dir))?;
        }
        Ok(registry)
    }

    /// Map `name` to the color table file at `path`.
    ///
    /// The corpus declares a handful of names twice, once per source
    /// directory. The later declaration wins, and the shadowing is
    /// reported rather than silent.
    pub fn add_source(&mut self, name: String, path: PathBuf) {
        if let Some(previous) = self.sources.insert(name.clone(), path.clone()) {
            eprintln!(
                "Colormap {} redefined: {} shadows {}.",
                name,
                path.display(),
                previous.display()
            );
        }
    }

    /// Scan `dir` for `*.rgb` files in sorted order, adding each under
    /// its identifier-safe name. Returns the number of files found.
    pub fn add_dir(&mut self, dir: &Path) -> Result<usize, CmapError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| CmapError::DirUnreadable(dir.to_path_buf(), e))?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CmapError::DirUnreadable(dir.to_path_buf(), e))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "rgb") {
                files.push(path);
            }
        }
        files.sort();

        for path in &files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            self.add_source(safe_name(stem), path.clone());
        }

        Ok(files.len())
    }

    /// Base colormap names, in declaration order. Every name is also
    /// gettable with the `_r` suffix.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok() || self.cache.borrow().contains_key(name)
    }

    /// Fetch `name`, realizing it from its source file on first access.
    ///
    /// A `_r`-suffixed name resolves to the base name's file with the
    /// parsed table reversed. Repeat calls return the cached `Rc`
    /// without touching the file again.
    pub fn get(&self, name: &str) -> Result<Rc<Colormap>, CmapError> {
        if let Some(cmap) = self.cache.borrow().get(name) {
            return Ok(cmap.clone());
        }

        let (base, reverse) = self.resolve(name)?;
        let path = &self.sources[base];

        let mut colors = read_color_table(path).map_err(CmapError::Table)?;
        if colors.is_empty() {
            return Err(CmapError::EmptyColorTable(name.to_string(), path.clone()));
        }
        if reverse {
            colors.reverse();
        }

        let cmap = Rc::new(Colormap::new(name, colors));
        self.cache
            .borrow_mut()
            .insert(name.to_string(), cmap.clone());
        Ok(cmap)
    }

    /// Insert a pre-built colormap under its own name. If that name is
    /// already realized the existing entry is kept and returned; cached
    /// entries are never overwritten.
    pub fn register(&self, cmap: Colormap) -> Rc<Colormap> {
        let mut cache = self.cache.borrow_mut();
        if let Some(existing) = cache.get(cmap.name()) {
            return existing.clone();
        }

        let name = cmap.name().to_string();
        let cmap = Rc::new(cmap);
        cache.insert(name, cmap.clone());
        cmap
    }

    fn resolve<'a>(&self, name: &'a str) -> Result<(&'a str, bool), CmapError> {
        if self.sources.contains_key(name) {
            return Ok((name, false));
        }

        if let Some(base) = name.strip_suffix(REVERSED_SUFFIX) {
            if self.sources.contains_key(base) {
                return Ok((base, true));
            }
        }

        Err(CmapError::UnknownColormap(name.to_string()))
    }
}

impl Default for CmapRegistry {
    fn default() -> Self {
        Self::new()
    }
}
