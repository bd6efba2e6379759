//! The `folio://` custom protocol: the page itself at `/`, portfolio files
//! everywhere else.

use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{debug, warn};
use wry::http::{header::CONTENT_TYPE, Response, StatusCode};

use crate::paths::sanitize_name;

pub const PROTOCOL: &str = "folio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Page(String),
    File { bytes: Vec<u8>, mime: &'static str },
    NotFound,
}

/// Serves files below `root`; the page HTML is swapped in place on reload.
#[derive(Debug, Clone)]
pub struct AssetServer {
    root: PathBuf,
    page: Arc<RwLock<String>>,
}

impl AssetServer {
    pub fn new(root: PathBuf, page: String) -> Self {
        Self {
            root,
            page: Arc::new(RwLock::new(page)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_page(&self, page: String) {
        match self.page.write() {
            Ok(mut current) => *current = page,
            Err(e) => warn!("Page store poisoned: {e}"),
        }
    }

    pub fn lookup(&self, url_path: &str) -> Asset {
        let path = url_path.split(['?', '#']).next().unwrap_or_default();
        if path.is_empty() || path == "/" || path == "/index.html" {
            return match self.page.read() {
                Ok(page) => Asset::Page(page.clone()),
                Err(_) => Asset::NotFound,
            };
        }

        let Some(file) = resolve_file(&self.root, path) else {
            debug!("404 {path}");
            return Asset::NotFound;
        };

        match fs::read(&file) {
            Ok(bytes) => Asset::File {
                bytes,
                mime: mime_for(&file),
            },
            Err(e) => {
                warn!("Failed to read {}: {e}", file.display());
                Asset::NotFound
            }
        }
    }

    pub fn respond(&self, url_path: &str) -> Response<Cow<'static, [u8]>> {
        let (status, mime, body): (StatusCode, &str, Cow<'static, [u8]>) = match self.lookup(url_path) {
            Asset::Page(html) => (StatusCode::OK, "text/html; charset=utf-8", html.into_bytes().into()),
            Asset::File { bytes, mime } => (StatusCode::OK, mime, bytes.into()),
            Asset::NotFound => (StatusCode::NOT_FOUND, "text/plain", Cow::Borrowed(&b"not found"[..])),
        };

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, mime)
            .body(body)
            .unwrap_or_else(|e| {
                warn!("Failed to build response for {url_path}: {e}");
                Response::new(Cow::Borrowed(&b""[..]))
            })
    }
}

/// Map a request path to a file under `root`. When the exact name is
/// missing, a sibling whose sanitized name matches is served instead, so
/// normalized URLs still reach files saved with spaces or accents.
pub fn resolve_file(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path.trim_start_matches('/')).ok()?;
    let relative = Path::new(decoded.as_ref());
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        warn!("Rejected path outside the portfolio: {url_path}");
        return None;
    }

    let candidate = root.join(relative);
    if candidate.is_file() {
        return Some(candidate);
    }

    let wanted = sanitize_name(candidate.file_name()?.to_str()?);
    if wanted.is_empty() {
        return None;
    }
    let dir = candidate.parent()?;
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| sanitize_name(n) == wanted)
        })
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "css" => "text/css",
        "js" => "text/javascript",
        "html" | "htm" => "text/html; charset=utf-8",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, AssetServer) {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("Img").join("Fondo");
        fs::create_dir_all(&img).unwrap();
        fs::write(img.join("Vista de inicio.png"), b"png-a").unwrap();
        fs::write(img.join("Foto (1).JPG"), b"jpg-b").unwrap();
        let server = AssetServer::new(dir.path().to_path_buf(), "<html>v1</html>".to_string());
        (dir, server)
    }

    #[test]
    fn test_root_serves_page() {
        let (_dir, server) = fixture();
        assert_eq!(server.lookup("/"), Asset::Page("<html>v1</html>".to_string()));
        server.set_page("<html>v2</html>".to_string());
        assert_eq!(server.lookup("/?t=1"), Asset::Page("<html>v2</html>".to_string()));
    }

    #[test]
    fn test_exact_encoded_path() {
        let (_dir, server) = fixture();
        assert_eq!(
            server.lookup("/Img/Fondo/Vista%20de%20inicio.png"),
            Asset::File {
                bytes: b"png-a".to_vec(),
                mime: "image/png"
            }
        );
    }

    #[test]
    fn test_sanitized_name_falls_back_to_original_file() {
        let (_dir, server) = fixture();
        assert_eq!(
            server.lookup("/Img/Fondo/foto-1.jpg"),
            Asset::File {
                bytes: b"jpg-b".to_vec(),
                mime: "image/jpeg"
            }
        );
        assert_eq!(server.lookup("/Img/Fondo/missing.png"), Asset::NotFound);
    }

    #[test]
    fn test_rejects_parent_components() {
        let (dir, _server) = fixture();
        assert_eq!(resolve_file(dir.path(), "/../etc/passwd"), None);
        assert_eq!(resolve_file(dir.path(), "/Img/%2E%2E/%2E%2E/x"), None);
    }

    #[test]
    fn test_respond_status() {
        let (_dir, server) = fixture();
        assert_eq!(server.respond("/nope.png").status(), StatusCode::NOT_FOUND);
        let ok = server.respond("/Img/Fondo/Vista%20de%20inicio.png");
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.headers()[CONTENT_TYPE], "image/png");
    }
}
