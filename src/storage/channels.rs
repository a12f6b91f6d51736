use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{AddOutcome, RemoveOutcome, StoreError};
use crate::util::validate_feed_url;

/// Subscription list kept as a plain text file, one feed address per line.
///
/// The file is always written sorted and without duplicates. A missing file
/// reads as an empty list.
#[derive(Debug, Clone)]
pub struct ChannelStore {
    path: PathBuf,
}

impl ChannelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the subscribed addresses in file order.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn read(&self) -> Result<Vec<String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No channel file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replaces the file contents with `channels`, sorted and deduplicated.
    pub fn write(&self, channels: &[String]) -> Result<(), StoreError> {
        let mut channels = channels.to_vec();
        channels.sort();
        channels.dedup();
        atomic_write(&self.path, channels.join("\n").as_bytes())
    }

    /// Sorted list of subscriptions.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut channels = self.read()?;
        channels.sort();
        channels.dedup();
        Ok(channels)
    }

    /// Subscribes to `url` unless it is already in the list.
    pub fn add(&self, url: &str) -> Result<AddOutcome, StoreError> {
        let url = url.trim();
        validate_feed_url(url).map_err(|source| StoreError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut channels = self.list()?;
        if channels.binary_search_by(|c| c.as_str().cmp(url)).is_ok() {
            return Ok(AddOutcome::AlreadySubscribed);
        }

        channels.push(url.to_string());
        self.write(&channels)?;
        tracing::info!(url = %url, "Added channel");
        Ok(AddOutcome::Added)
    }

    /// Unsubscribes from `url`.
    pub fn remove(&self, url: &str) -> Result<RemoveOutcome, StoreError> {
        let url = url.trim();
        let mut channels = self.list()?;
        let Ok(index) = channels.binary_search_by(|c| c.as_str().cmp(url)) else {
            return Ok(RemoveOutcome::NotSubscribed);
        };

        channels.remove(index);
        self.write(&channels)?;
        tracing::info!(url = %url, "Removed channel");
        Ok(RemoveOutcome::Removed)
    }

    /// Drops every subscription, leaving an empty file behind.
    pub fn clear(&self) -> Result<(), StoreError> {
        atomic_write(&self.path, b"")?;
        tracing::info!(path = %self.path.display(), "Cleared all channels");
        Ok(())
    }
}

/// Writes `content` to `dst` via a temp file and rename, so readers never
/// see a partially written list.
fn atomic_write(dst: &Path, content: &[u8]) -> Result<(), StoreError> {
    use std::time::{SystemTime, UNIX_EPOCH};

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    // Unpredictable suffix so a symlink cannot be planted at the temp path.
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let result = (|| {
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        temp_file.write_all(content)?;
        temp_file.sync_all()?;
        drop(temp_file);

        #[cfg(windows)]
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }

        std::fs::rename(&temp_path, dst)
    })();

    result.map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        StoreError::io(dst, e)
    })
}
