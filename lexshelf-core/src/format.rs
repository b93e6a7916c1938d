//! Text formatting helpers shared by the surfaces

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::types::SectionId;
use chrono::{DateTime, Utc};

/// Text handed to the platform share sheet
pub fn share_text(catalog: &CatalogStore, section_id: SectionId) -> Result<String> {
    let section = catalog.get_section(section_id)?;
    let book = catalog.get_book(section.book_id)?;
    Ok(format!(
        "{} from {}\n\n{}",
        section.title, book.title, section.content
    ))
}

/// Short feed timestamp, e.g. "Apr 12, 02:30 PM"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %I:%M %p").to_string()
}

/// Month and year, as shown for "last updated" on book cards
pub fn format_month(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Book, Section};
    use chrono::TimeZone;

    #[test]
    fn test_share_text() {
        let catalog = CatalogStore::from_records(
            vec![Book::new(2, "Indian Penal Code, 1860")],
            vec![Section::new(201, 2, "Section 1", "This Act shall be called the Indian Penal Code.")],
        )
        .unwrap();
        assert_eq!(
            share_text(&catalog, 201).unwrap(),
            "Section 1 from Indian Penal Code, 1860\n\nThis Act shall be called the Indian Penal Code."
        );
        assert!(share_text(&catalog, 202).is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 4, 12, 14, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Apr 12, 02:30 PM");
        assert_eq!(format_month(&ts), "April 2025");
    }
}
