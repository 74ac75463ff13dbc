use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::config::Settings;

/// File-name tags that mark the upright, regular-weight member of a family.
const PREFERRED_TAGS: [&str; 7] = [
    "Regular",
    "Book",
    "Medium",
    "Normal",
    "400",
    "Demilight",
    "Roman",
];

/// Capability that maps a family name to a loadable font file.
///
/// The core never scans the filesystem itself; callers hand it a resolver.
pub trait FontResolver {
    /// Best font file for `family`, or `None` when the family is unknown.
    fn resolve(&self, family: &str) -> Option<PathBuf>;
}

/// Family name to font files, built from the system font database plus extra directories.
#[derive(Clone, Debug, Default)]
pub struct FontCatalog {
    family_to_paths: BTreeMap<String, Vec<PathBuf>>,
}

impl FontCatalog {
    /// Scan system fonts and every directory in `settings.font_dirs`.
    #[tracing::instrument(skip(settings))]
    pub fn scan(settings: &Settings) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &settings.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        let out = Self::from_database(&db);
        tracing::debug!(families = out.family_to_paths.len(), "font catalog scanned");
        out
    }

    /// Catalog restricted to the given directories (no system fonts).
    pub fn from_dirs<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        Self::from_database(&db)
    }

    fn from_database(db: &usvg::fontdb::Database) -> Self {
        let mut family_to_paths = BTreeMap::<String, Vec<PathBuf>>::new();
        for face in db.faces() {
            let usvg::fontdb::Source::File(path) = &face.source else {
                continue;
            };
            let Some((family, _)) = face.families.first() else {
                continue;
            };
            let paths = family_to_paths.entry(family.clone()).or_default();
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        Self { family_to_paths }
    }

    /// Register `path` under `family` explicitly.
    pub fn insert(&mut self, family: impl Into<String>, path: impl Into<PathBuf>) {
        let path = path.into();
        let paths = self.family_to_paths.entry(family.into()).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    /// Family names sorted case-insensitively.
    pub fn families(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.family_to_paths.keys().map(String::as_str).collect();
        out.sort_by_key(|name| name.to_lowercase());
        out
    }

    pub fn paths(&self, family: &str) -> &[PathBuf] {
        self.family_to_paths
            .get(family)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.family_to_paths.is_empty()
    }
}

impl FontResolver for FontCatalog {
    fn resolve(&self, family: &str) -> Option<PathBuf> {
        let paths = self.paths(family);
        let preferred = paths.iter().find(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            PREFERRED_TAGS
                .iter()
                .any(|tag| name.contains(&tag.to_lowercase()))
        });
        preferred.or_else(|| paths.first()).cloned()
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_fonts_from_dir(db, &path);
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
