//! CLI command implementations

mod books;
mod init;
mod notifications;
mod read;
mod tags;

pub use books::{books, favorites, show};
pub use init::init;
pub use notifications::notifications;
pub use read::read;
pub use tags::tags;

use anyhow::{bail, Context, Result};
use lexshelf_core::seed::seed_library;
use lexshelf_core::storage::{LocalStorage, StorageProvider};
use lexshelf_core::{Library, LibraryConfig};
use std::path::Path;

/// Where a snapshot lives: a storage root plus the file name within it
pub(crate) struct SnapshotFile {
    storage: LocalStorage,
    key: String,
}

impl SnapshotFile {
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let key = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Not a snapshot file path: {}", path.display()))?
            .to_string();
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => ".".into(),
        };
        Ok(Self {
            storage: LocalStorage::new(root),
            key,
        })
    }

    pub(crate) async fn exists(&self) -> Result<bool> {
        Ok(self.storage.exists(&self.key).await?)
    }

    pub(crate) async fn load(&self) -> Result<Option<Library>> {
        Ok(Library::load(&self.storage, &self.key).await?)
    }

    pub(crate) async fn save(&self, library: &Library) -> Result<()> {
        library.save(&self.storage, &self.key).await?;
        Ok(())
    }
}

/// A library plus the snapshot it came from, if any
pub(crate) struct OpenLibrary {
    pub library: Library,
    snapshot: Option<SnapshotFile>,
}

impl OpenLibrary {
    /// Write changes back; the built-in demo library is never saved
    pub(crate) async fn save(&self) -> Result<()> {
        if let Some(snapshot) = &self.snapshot {
            snapshot.save(&self.library).await?;
            tracing::debug!("Saved library snapshot");
        }
        Ok(())
    }
}

/// Load the snapshot at `path`, or the demo library when no path is given
pub(crate) async fn open_library(path: Option<&Path>) -> Result<OpenLibrary> {
    let Some(path) = path else {
        tracing::debug!("No library snapshot given, using the demo catalog");
        return Ok(OpenLibrary {
            library: seed_library(LibraryConfig::default())?,
            snapshot: None,
        });
    };

    let snapshot = SnapshotFile::new(path)?;
    let library = match snapshot
        .load()
        .await
        .with_context(|| format!("Failed to read library snapshot: {}", path.display()))?
    {
        Some(library) => library,
        None => bail!(
            "No library snapshot at {} (create one with `lexshelf init`)",
            path.display()
        ),
    };
    tracing::debug!("Loaded library snapshot from {}", path.display());

    Ok(OpenLibrary {
        library,
        snapshot: Some(snapshot),
    })
}
