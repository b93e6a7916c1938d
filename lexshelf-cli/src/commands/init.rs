//! Init command implementation

use super::SnapshotFile;
use anyhow::{bail, Result};
use lexshelf_core::seed::seed_library;
use lexshelf_core::LibraryConfig;
use std::path::Path;

/// Write the demo library to `path`
pub async fn init(path: &Path, force: bool) -> Result<()> {
    let snapshot = SnapshotFile::new(path)?;
    if !force && snapshot.exists().await? {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let library = seed_library(LibraryConfig::default())?;
    snapshot.save(&library).await?;

    tracing::info!("Wrote library snapshot to {}", path.display());
    println!(
        "Created {} with {} books and {} tags",
        path.display(),
        library.catalog().books().len(),
        library.tags().list_tags().len()
    );
    Ok(())
}
