use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, StoreError};

/// Extension given to every stored image.
const IMAGE_EXT: &str = "png";

/// Content store for generated images, keyed by unguessable filenames.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `bytes` under a fresh random filename and return that name.
    pub async fn save(&self, bytes: &[u8]) -> Result<String> {
        let filename = format!("{}.{}", Uuid::new_v4().simple(), IMAGE_EXT);
        fs::write(self.dir.join(&filename), bytes).await?;

        tracing::debug!(filename = %filename, bytes = bytes.len(), "Image stored");
        Ok(filename)
    }

    /// Bytes of a previously stored image.
    ///
    /// `filename` must be a bare name; anything that could resolve outside
    /// the store directory is rejected before touching the filesystem.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let name = sanitize(filename)?;

        match fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Deflate every regular file currently in the store into a flat zip.
    ///
    /// Contents are read at call time with no snapshot taken; files created
    /// or removed while the archive is being built may or may not appear in
    /// it. An absent directory is a not-found condition.
    pub fn archive_all(&self) -> Result<Vec<u8>> {
        if !self.dir.is_dir() {
            return Err(StoreError::NotFound);
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            writer.start_file(name, options)?;
            let mut file = std::fs::File::open(entry.path())?;
            std::io::copy(&mut file, &mut writer)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Accept only a single normal path component, so `..`, absolute paths and
/// separators never reach the filesystem.
fn sanitize(filename: &str) -> Result<&str> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(filename),
        _ => Err(StoreError::InvalidFilename(filename.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_read_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let filename = store.save(b"image bytes").await.unwrap();
        assert!(filename.ends_with(".png"));
        // 32 hex chars plus the extension.
        assert_eq!(filename.len(), 32 + 4);

        let bytes = store.read(&filename).await.unwrap();
        assert_eq!(bytes, b"image bytes");
    }

    #[tokio::test]
    async fn consecutive_saves_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let a = store.save(b"a").await.unwrap();
        let b = store.save(b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn read_of_unknown_filename_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let err = store.read("missing.png").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, b"secret").unwrap();

        let nested = dir.path().join("images");
        std::fs::create_dir(&nested).unwrap();
        let store = ImageStore::new(&nested);

        for name in ["../secret.txt", "a/b.png", "/etc/hostname", ".."] {
            let err = store.read(name).await.unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidFilename(_)),
                "{name} should be rejected, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn archive_of_absent_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("never-created"));

        let err = store.archive_all().unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn archive_contains_each_regular_file_under_its_own_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        std::fs::write(dir.path().join("a.png"), b"aaa").unwrap();
        std::fs::write(dir.path().join("b.png"), b"bbbb").unwrap();
        // Subdirectories are skipped.
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let bytes = store.archive_all().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["a.png", "b.png"]);

        let mut contents = Vec::new();
        std::io::Read::read_to_end(
            &mut archive.by_name("b.png").unwrap(),
            &mut contents,
        )
        .unwrap();
        assert_eq!(contents, b"bbbb");
    }
}
