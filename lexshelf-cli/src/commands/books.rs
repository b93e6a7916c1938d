//! Book listing, book details and favorites

use super::open_library;
use anyhow::Result;
use lexshelf_core::{Book, BookFilter, BookId, BookSort};
use serde::Serialize;
use std::path::Path;

fn flags(book: &Book) -> String {
    let mut flags = Vec::new();
    if book.is_pinned {
        flags.push("pinned");
    }
    if book.is_new {
        flags.push("new");
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

/// List books: search, then filter, then sort
pub async fn books(
    library: Option<&Path>,
    search: Option<&str>,
    filter: BookFilter,
    sort: BookSort,
    json: bool,
) -> Result<()> {
    let open = open_library(library).await?;
    let books = open
        .library
        .catalog()
        .query_books(search.unwrap_or_default(), filter, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books found");
        return Ok(());
    }
    for book in books {
        println!(
            "{:>4}  {}{}  ({} sections, {}% read)",
            book.id,
            book.title,
            flags(book),
            book.section_count,
            book.progress
        );
    }
    Ok(())
}

/// Book details output
#[derive(Serialize)]
struct BookDetails<'a> {
    #[serde(flatten)]
    book: &'a Book,
    sections: Vec<SectionLine<'a>>,
}

#[derive(Serialize)]
struct SectionLine<'a> {
    id: u64,
    title: &'a str,
    description: Option<&'a str>,
    is_favorite: bool,
}

/// Show a book and its sections; viewing counts as opening it
pub async fn show(library: Option<&Path>, id: BookId, json: bool) -> Result<()> {
    let mut open = open_library(library).await?;
    open.library.catalog_mut().open_book(id)?;
    open.save().await?;
    let catalog = open.library.catalog();
    let book = catalog.get_book(id)?;
    let sections: Vec<SectionLine> = catalog
        .list_sections(id)?
        .into_iter()
        .map(|s| SectionLine {
            id: s.id,
            title: &s.title,
            description: s.description.as_deref(),
            is_favorite: s.is_favorite,
        })
        .collect();

    if json {
        let details = BookDetails { book, sections };
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    println!("Title:      {}{}", book.title, flags(book));
    println!("Sections:   {}", book.section_count);
    println!("Progress:   {}%", book.progress);
    println!(
        "Updated:    {}",
        lexshelf_core::format::format_month(&book.last_updated)
    );
    if sections.is_empty() {
        println!("\nNo sections available offline");
    } else {
        println!();
        for section in &sections {
            let star = if section.is_favorite { "*" } else { " " };
            println!("{} {:>4}  {}", star, section.id, section.title);
        }
    }
    Ok(())
}

/// List favorite sections in catalog order
pub async fn favorites(library: Option<&Path>, json: bool) -> Result<()> {
    let open = open_library(library).await?;
    let favorites = open.library.catalog().favorite_sections();

    if json {
        println!("{}", serde_json::to_string_pretty(&favorites)?);
        return Ok(());
    }

    if favorites.is_empty() {
        println!("No favorite sections yet");
    }
    for summary in favorites {
        println!("{:>4}  {} ({})", summary.id, summary.title, summary.book_title);
    }
    Ok(())
}
