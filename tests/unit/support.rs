use std::path::PathBuf;

/// A scalable system font usable for shaping, or `None` on hosts without fonts.
///
/// Font-dependent tests return early when this is `None`.
pub(crate) fn system_font() -> Option<PathBuf> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let mut candidates: Vec<(usize, PathBuf)> = Vec::new();
    for face in db.faces() {
        let usvg::fontdb::Source::File(path) = &face.source else {
            continue;
        };
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if ext != "ttf" && ext != "otf" {
            continue;
        }
        let family = face
            .families
            .first()
            .map(|(name, _)| name.as_str())
            .unwrap_or("");
        let rank = ["DejaVu Sans", "Liberation Sans", "Noto Sans"]
            .iter()
            .position(|f| family == *f)
            .unwrap_or(3);
        let upright = face.style == usvg::fontdb::Style::Normal
            && face.weight == usvg::fontdb::Weight::NORMAL;
        candidates.push((rank * 2 + usize::from(!upright), path.clone()));
    }
    candidates.sort();
    candidates.into_iter().map(|(_, p)| p).next()
}
