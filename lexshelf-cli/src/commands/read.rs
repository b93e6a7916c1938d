//! Read command implementation

use super::open_library;
use anyhow::Result;
use lexshelf_core::types::FONT_SIZE_DEFAULT;
use lexshelf_core::{ReadingPreference, Section, SectionId, TextAlign};
use serde::Serialize;
use std::path::Path;

/// Terminal columns at the default font size
const BASE_WIDTH: usize = 72;

/// Section output
#[derive(Serialize)]
struct Reading<'a> {
    #[serde(flatten)]
    section: &'a Section,
    book_title: &'a str,
    tags: Vec<&'a str>,
    preference: &'a ReadingPreference,
}

/// Text width for a font size; larger type fits fewer columns
fn line_width(font_size: u8) -> usize {
    BASE_WIDTH * usize::from(FONT_SIZE_DEFAULT) / usize::from(font_size.max(1))
}

/// Word-wrap `text` to `width` columns and align each line
fn layout(text: &str, width: usize, align: TextAlign) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
        .into_iter()
        .map(|line| {
            let slack = width.saturating_sub(line.chars().count());
            let pad = match align {
                TextAlign::Left => 0,
                TextAlign::Center => slack / 2,
                TextAlign::Right => slack,
            };
            format!("{}{}", " ".repeat(pad), line)
        })
        .collect()
}

/// Print a section laid out with the saved reading preferences
///
/// Opening a section stamps its book as recently accessed; the change is
/// written back when reading from a snapshot file.
pub async fn read(
    library: Option<&Path>,
    section_id: SectionId,
    next: bool,
    json: bool,
) -> Result<()> {
    let mut open = open_library(library).await?;

    let section = if next {
        match open.library.catalog().next_section(section_id)? {
            Some(section) => section.clone(),
            None => {
                let current = open.library.catalog().get_section(section_id)?;
                let book = open.library.catalog().get_book(current.book_id)?;
                println!("End of {}", book.title);
                return Ok(());
            }
        }
    } else {
        open.library.catalog().get_section(section_id)?.clone()
    };

    open.library.catalog_mut().open_book(section.book_id)?;
    open.save().await?;

    let library = &open.library;
    let book_title = &library.catalog().get_book(section.book_id)?.title;
    let tags: Vec<&str> = library
        .tags()
        .tags_for_section(section.id)
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    let preference = library.preferences().reading_preference();

    if json {
        let reading = Reading {
            section: &section,
            book_title,
            tags,
            preference,
        };
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    let width = line_width(preference.font_size);
    println!("{}", book_title);
    println!("{}", section.title);
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }
    println!("{}", "-".repeat(width));
    for line in layout(&section.content, width, preference.text_align) {
        println!("{}", line);
    }
    Ok(())
}
