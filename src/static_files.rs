//! Traversal-safe static file serving for pre-generated site output.
//!
//! In production the server is pointed at an SSG output directory; any
//! URL that resolves to a file (or to a directory holding an
//! `index.html`) is served as-is, everything else falls through to live
//! SSR.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    /// Map a URL path onto the base directory, rejecting anything that
    /// would escape it (`..`, absolute components).
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "txt" => "text/plain",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "ico" => "image/x-icon",
            "woff2" => "font/woff2",
            _ => "application/octet-stream",
        }
    }

    /// Load the file a URL path points at.
    ///
    /// A directory (the shape generation emits for `/product/42/`)
    /// resolves to its `index.html`; the empty path resolves to the root
    /// index.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let mut path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if path.is_dir() {
            path.push("index.html");
        }
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (tempfile::TempDir, StaticFiles) {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").expect("write");
        fs::create_dir_all(dir.path().join("product/42")).expect("mkdir");
        fs::write(dir.path().join("product/42/index.html"), "<h1>detail</h1>").expect("write");
        fs::write(dir.path().join("app.css"), "body{}").expect("write");
        let base = dir.path().to_path_buf();
        (dir, StaticFiles::new(base))
    }

    #[test]
    fn test_map_path_prevents_traversal() {
        let (_dir, sf) = site();
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.load("/../../etc/passwd").is_err());
    }

    #[test]
    fn test_directory_resolves_to_index() {
        let (_dir, sf) = site();
        let (bytes, ct) = sf.load("/product/42/").expect("should load");
        assert_eq!(ct, "text/html");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "<h1>detail</h1>");
    }

    #[test]
    fn test_root_resolves_to_index() {
        let (_dir, sf) = site();
        let (bytes, _) = sf.load("/").expect("should load");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "<h1>home</h1>");
    }

    #[test]
    fn test_content_type_mapping() {
        let (_dir, sf) = site();
        let (_, ct) = sf.load("/app.css").expect("should load");
        assert_eq!(ct, "text/css");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, sf) = site();
        assert!(sf.load("/nope.html").is_err());
    }
}
