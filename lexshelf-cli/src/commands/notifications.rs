//! Notifications command implementation

use super::open_library;
use anyhow::Result;
use lexshelf_core::format::format_timestamp;
use std::path::Path;

/// Show the feed, most recent first
pub async fn notifications(library: Option<&Path>, json: bool) -> Result<()> {
    let open = open_library(library).await?;
    let feed = open.library.notifications();
    let entries = feed.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{} unread", feed.unread_count());
    for entry in entries {
        let marker = if entry.read { " " } else { "*" };
        println!(
            "{} {}  {}: {}",
            marker,
            format_timestamp(&entry.timestamp),
            entry.title,
            entry.message
        );
    }
    Ok(())
}
