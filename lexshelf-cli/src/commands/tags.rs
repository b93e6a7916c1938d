//! Tags command implementation

use super::open_library;
use anyhow::Result;
use lexshelf_core::{SectionSummary, TagId};
use std::path::Path;

/// List all tags, or the sections carrying `tag`
pub async fn tags(library: Option<&Path>, tag: Option<TagId>, json: bool) -> Result<()> {
    let open = open_library(library).await?;
    let library = &open.library;

    let Some(id) = tag else {
        let tags = library.tags().list_tags();
        if json {
            println!("{}", serde_json::to_string_pretty(tags)?);
            return Ok(());
        }
        if tags.is_empty() {
            println!("No tags yet");
        }
        for tag in tags {
            println!(
                "{:>4}  {} {}  ({} sections)",
                tag.id,
                tag.color,
                tag.name,
                tag.len()
            );
        }
        return Ok(());
    };

    let summaries = library
        .sections_for_tag(id)?
        .into_iter()
        .map(|s| library.catalog().summarize(s.id))
        .collect::<lexshelf_core::Result<Vec<SectionSummary>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let name = &library.tags().get_tag(id)?.name;
    println!("{}", name);
    if summaries.is_empty() {
        println!("No sections tagged yet");
    }
    for summary in summaries {
        println!("{:>4}  {} ({})", summary.id, summary.title, summary.book_title);
    }
    Ok(())
}
