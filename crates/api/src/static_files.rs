use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

const ENTRY_DOCUMENT: &str = "index.html";

/// Files under `static_root`, and the SPA entry document for every path that
/// does not name one. A missing entry document yields 404.
pub fn service(static_root: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_root).fallback(ServeFile::new(static_root.join(ENTRY_DOCUMENT)))
}
