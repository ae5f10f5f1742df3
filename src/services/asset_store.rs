// src/services/asset_store.rs
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use tokio::fs::{self, File, OpenOptions};

const UPLOADS: &str = "uploads";

static GENERATED_SEQ: AtomicU64 = AtomicU64::new(0);

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Files under `<public_dir>/uploads`, addressed by `uploads/<name>` paths.
#[derive(Debug, Clone)]
pub struct AssetStore {
    public_dir: PathBuf,
}

impl AssetStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self { public_dir: public_dir.into() }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join(UPLOADS)
    }

    pub async fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(self.uploads_dir()).await
    }

    /// `<millis>-<seq>.png`; the sequence keeps same-millisecond requests apart.
    pub fn generated_file_name(now: DateTime<Utc>) -> String {
        let seq = GENERATED_SEQ.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}.png", now.timestamp_millis(), seq)
    }

    /// `<millis>-<original name>`, keeping only the last path component of the original.
    pub fn uploaded_file_name(now: DateTime<Utc>, original: &str) -> String {
        format!("{}-{}", now.timestamp_millis(), upload_base(original))
    }

    fn path_for(&self, file_name: &str) -> io::Result<PathBuf> {
        let safe = sanitize(file_name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"))?;
        Ok(self.uploads_dir().join(safe))
    }

    fn relative(file_name: &str) -> String {
        format!("{}/{}", UPLOADS, file_name)
    }

    /// Writes the bytes and returns the storage-relative path (`uploads/<name>`).
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<String> {
        let path = self.path_for(file_name)?;
        fs::write(&path, bytes).await?;
        Ok(Self::relative(file_name))
    }

    /// Opens a new file for an upload named `original`, never reusing an existing
    /// name: on a clash it falls back to `<millis>-<n>-<original name>`.
    /// Returns the file, its name and its storage-relative path.
    pub async fn create_upload(&self, now: DateTime<Utc>, original: &str) -> io::Result<(File, String, String)> {
        let millis = now.timestamp_millis();
        let base = upload_base(original);

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                Self::uploaded_file_name(now, original)
            } else {
                format!("{}-{}-{}", millis, attempt, base)
            };
            let path = self.path_for(&file_name)?;
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => {
                    let relative = Self::relative(&file_name);
                    return Ok((file, file_name, relative));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free upload name for {} after {} attempts", base, MAX_NAME_ATTEMPTS),
        ))
    }

    pub async fn remove(&self, file_name: &str) -> io::Result<()> {
        fs::remove_file(self.path_for(file_name)?).await
    }

    /// Maps a bare file name or an `uploads/<name>` path to its location on disk.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let name = relative.strip_prefix("uploads/").unwrap_or(relative);
        sanitize(name).map(|n| self.uploads_dir().join(n))
    }
}

fn upload_base(original: &str) -> String {
    sanitize(original).unwrap_or_else(|| "upload".to_string())
}

/// Last path component, rejecting `.`/`..` and empty names.
fn sanitize(name: &str) -> Option<String> {
    let normalized = name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .map(|n| n.to_string())
}
