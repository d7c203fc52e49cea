//! Image asset storage for the catalog. Files land under the configured
//! upload directory and are referenced as `/uploads/<name>` path strings.

use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const PUBLIC_PREFIX: &str = "/uploads/";

/// Persists an uploaded image under a fresh UUID name, keeping the original
/// extension, and returns the public path to store on the product.
pub async fn store_image(
    upload_dir: &str,
    original_filename: &str,
    bytes: &[u8],
) -> anyhow::Result<String> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let filename = match extension_of(original_filename) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    let target = Path::new(upload_dir).join(&filename);
    tokio::fs::write(&target, bytes).await?;

    Ok(format!("{}{}", PUBLIC_PREFIX, filename))
}

/// Removes the asset behind a `/uploads/...` path. Best-effort: a missing
/// file only produces a log line, since the catalog row is the source of
/// truth and a stale path must not fail the request.
pub async fn delete_image(upload_dir: &str, public_path: &str) {
    let Some(target) = resolve_public_path(upload_dir, public_path) else {
        tracing::warn!(path = %public_path, "Refusing to delete asset outside the upload dir");
        return;
    };
    if let Err(err) = tokio::fs::remove_file(&target).await {
        tracing::warn!(path = %target.display(), error = %err, "Failed to delete image asset");
    }
}

/// Maps a public `/uploads/<name>` path back to a file inside `upload_dir`.
/// Returns `None` for anything that is not a plain filename under the prefix.
fn resolve_public_path(upload_dir: &str, public_path: &str) -> Option<PathBuf> {
    let name = public_path.strip_prefix(PUBLIC_PREFIX)?;
    if name.is_empty() || name.contains('/') || name.contains("..") {
        return None;
    }
    Some(Path::new(upload_dir).join(name))
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_image_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_str = dir.path().to_str().unwrap();

        let public_path = store_image(dir_str, "photo.png", b"fake-png")
            .await
            .expect("store image");

        assert!(public_path.starts_with(PUBLIC_PREFIX));
        assert!(public_path.ends_with(".png"));
        let on_disk = resolve_public_path(dir_str, &public_path).expect("resolve");
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"fake-png");
    }

    #[tokio::test]
    async fn delete_image_removes_stored_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_str = dir.path().to_str().unwrap();
        let public_path = store_image(dir_str, "photo.jpg", b"bytes")
            .await
            .expect("store image");

        delete_image(dir_str, &public_path).await;

        let on_disk = resolve_public_path(dir_str, &public_path).unwrap();
        assert!(!on_disk.exists());
    }

    #[test]
    fn resolve_public_path_rejects_traversal() {
        assert!(resolve_public_path("./uploads", "/uploads/../etc/passwd").is_none());
        assert!(resolve_public_path("./uploads", "/elsewhere/file.png").is_none());
        assert!(resolve_public_path("./uploads", "/uploads/a/b.png").is_none());
    }

    #[test]
    fn extension_of_ignores_suspicious_names() {
        assert_eq!(extension_of("cat.png"), Some("png"));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("no-extension"), None);
    }
}
