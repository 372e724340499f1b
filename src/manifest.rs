use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name the manifest is written under, inside the staged folder.
pub const MANIFEST_FILE: &str = ".blitz-manifest.toml";

/// Record of everything staging placed in the destination folder.
///
/// Entries are keyed by path relative to the staged folder and kept in
/// staging order. Nothing reads this back at runtime; it exists so a staged
/// folder can be inspected after the fact.
#[derive(Debug, Serialize)]
pub struct Manifest {
    root: String,
    entries: IndexMap<String, ManifestEntry>,
}

#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub size: u64,
    /// True for files synthesized by staging rather than copied from the
    /// root (the framework config shim, the default tool config).
    pub generated: bool,
}

impl Manifest {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.display().to_string(),
            entries: IndexMap::new(),
        }
    }

    /// Records one staged file. `relative` is the path under the staged
    /// folder, with `/` separators.
    pub fn record(&mut self, relative: &Path, size: u64, generated: bool) {
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        self.entries.insert(key, ManifestEntry { size, generated });
    }

    /// Serializes the manifest and returns the path it should live at under
    /// `staged_folder`.
    pub fn render(&self, staged_folder: &Path) -> Result<(PathBuf, String), toml::ser::Error> {
        let contents = toml::to_string(self)?;

        Ok((staged_folder.join(MANIFEST_FILE), contents))
    }
}
