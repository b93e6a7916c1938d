//! Catalog store: books and their ordered sections
//!
//! Records are kept in insertion order, which is the order the catalog
//! defines for sections within a book. All queries are linear scans; the
//! catalog holds a few dozen statutes at most.

use crate::error::{LibraryError, NotFound, Result};
use crate::types::{Book, BookFilter, BookId, BookSort, Section, SectionId, SectionSummary};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Books and sections of the library
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogStore {
    books: Vec<Book>,
    sections: Vec<Section>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, checking that every section's book exists
    pub fn from_records(books: Vec<Book>, sections: Vec<Section>) -> Result<Self> {
        let mut catalog = Self::new();
        for book in books {
            catalog.insert_book(book);
        }
        for section in sections {
            catalog.insert_section(section)?;
        }
        Ok(catalog)
    }

    /// Add a book, replacing any existing book with the same id in place
    pub fn insert_book(&mut self, book: Book) {
        match self.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book,
            None => self.books.push(book),
        }
    }

    /// Add a section to its book
    ///
    /// Fails with `NotFound` if the owning book is not in the catalog.
    pub fn insert_section(&mut self, section: Section) -> Result<()> {
        if !self.contains_book(section.book_id) {
            return Err(NotFound::Book(section.book_id).into());
        }
        match self.sections.iter_mut().find(|s| s.id == section.id) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
        Ok(())
    }

    pub fn contains_book(&self, id: BookId) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    pub fn contains_section(&self, id: SectionId) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// All books in catalog order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All sections in catalog order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Filter, then sort
    pub fn list_books(&self, filter: BookFilter, sort: BookSort) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().filter(|b| filter.matches(b)).collect();
        sort_books(&mut books, sort);
        books
    }

    /// Books whose title contains `query`, ignoring case
    ///
    /// A blank query returns every book in catalog order.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.books.iter().collect();
        }
        self.books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Search, then filter, then sort
    pub fn query_books(&self, query: &str, filter: BookFilter, sort: BookSort) -> Vec<&Book> {
        let mut books: Vec<&Book> = self
            .search_books(query)
            .into_iter()
            .filter(|b| filter.matches(b))
            .collect();
        sort_books(&mut books, sort);
        books
    }

    /// Most recently opened books first, at most `limit`
    pub fn recent_books(&self, limit: usize) -> Vec<&Book> {
        let mut books = self.list_books(BookFilter::All, BookSort::RecentlyAccessed);
        books.truncate(limit);
        books
    }

    pub fn get_book(&self, id: BookId) -> Result<&Book> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Book(id)))
    }

    fn book_mut(&mut self, id: BookId) -> Result<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Book(id)))
    }

    /// View a book: stamps `last_accessed` with the current time
    pub fn open_book(&mut self, id: BookId) -> Result<&Book> {
        let book = self.book_mut(id)?;
        book.last_accessed = Utc::now();
        tracing::debug!(book_id = id, "opened book");
        Ok(book)
    }

    /// Record reading progress, clamped to 100 percent
    pub fn set_progress(&mut self, id: BookId, percent: u8) -> Result<u8> {
        let book = self.book_mut(id)?;
        book.progress = percent.min(100);
        Ok(book.progress)
    }

    /// Flip a book's pin and return the new value
    pub(crate) fn toggle_pin(&mut self, id: BookId) -> Result<bool> {
        let book = self.book_mut(id)?;
        book.is_pinned = !book.is_pinned;
        Ok(book.is_pinned)
    }

    /// Sections of a book in catalog order
    pub fn list_sections(&self, book_id: BookId) -> Result<Vec<&Section>> {
        if !self.contains_book(book_id) {
            return Err(NotFound::Book(book_id).into());
        }
        Ok(self
            .sections
            .iter()
            .filter(|s| s.book_id == book_id)
            .collect())
    }

    pub fn get_section(&self, id: SectionId) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Section(id)))
    }

    /// Flip a section's favorite flag and return the new value
    pub(crate) fn toggle_favorite(&mut self, id: SectionId) -> Result<bool> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Section(id)))?;
        section.is_favorite = !section.is_favorite;
        Ok(section.is_favorite)
    }

    /// The section following `id` within its book, or `None` at the end
    pub fn next_section(&self, id: SectionId) -> Result<Option<&Section>> {
        let (siblings, index) = self.position(id)?;
        Ok(siblings.get(index + 1).copied())
    }

    /// The section preceding `id` within its book, or `None` at the start
    pub fn previous_section(&self, id: SectionId) -> Result<Option<&Section>> {
        let (siblings, index) = self.position(id)?;
        Ok(index.checked_sub(1).and_then(|i| siblings.get(i).copied()))
    }

    fn position(&self, id: SectionId) -> Result<(Vec<&Section>, usize)> {
        let section = self.get_section(id)?;
        let siblings = self.list_sections(section.book_id)?;
        let index = siblings
            .iter()
            .position(|s| s.id == id)
            .ok_or(LibraryError::NotFound(NotFound::Section(id)))?;
        Ok((siblings, index))
    }

    /// Summary line for a section, with its book's title
    pub fn summarize(&self, id: SectionId) -> Result<SectionSummary> {
        let section = self.get_section(id)?;
        let book = self.get_book(section.book_id)?;
        Ok(SectionSummary {
            id: section.id,
            title: section.title.clone(),
            book_title: book.title.clone(),
        })
    }

    /// Favorite sections in catalog order
    pub fn favorite_sections(&self) -> Vec<SectionSummary> {
        self.sections
            .iter()
            .filter(|s| s.is_favorite)
            .filter_map(|s| self.summarize(s.id).ok())
            .collect()
    }

    /// Replace the catalog with freshly fetched records
    ///
    /// User state on records that survive (pin, favorite, progress and a
    /// newer `last_accessed`) is carried over. Sections whose book is not in
    /// `books` are dropped, and a repeated id keeps the first position with
    /// the last record.
    pub(crate) fn merge_remote(&mut self, mut books: Vec<Book>, mut sections: Vec<Section>) {
        let old_books: HashMap<BookId, &Book> = self.books.iter().map(|b| (b.id, b)).collect();
        for book in &mut books {
            if let Some(old) = old_books.get(&book.id) {
                book.is_pinned = old.is_pinned;
                book.progress = old.progress;
                book.last_accessed = book.last_accessed.max(old.last_accessed);
            }
        }

        let favorites: HashSet<SectionId> = self
            .sections
            .iter()
            .filter(|s| s.is_favorite)
            .map(|s| s.id)
            .collect();
        for section in &mut sections {
            section.is_favorite |= favorites.contains(&section.id);
        }

        *self = Self::assemble(books, sections);
    }

    /// Rebuild from the stored records, restoring the insert invariants
    ///
    /// Used after deserializing, which bypasses `insert_book` and
    /// `insert_section`.
    pub(crate) fn normalize(&mut self) {
        let books = std::mem::take(&mut self.books);
        let sections = std::mem::take(&mut self.sections);
        *self = Self::assemble(books, sections);
    }

    /// Insert every record, dropping sections of unknown books
    fn assemble(books: Vec<Book>, sections: Vec<Section>) -> Self {
        let mut catalog = Self::new();
        for book in books {
            catalog.insert_book(book);
        }
        for section in sections {
            let (section_id, book_id) = (section.id, section.book_id);
            if catalog.insert_section(section).is_err() {
                tracing::warn!(section_id, book_id, "dropping section of unknown book");
            }
        }
        catalog
    }
}

fn sort_books(books: &mut [&Book], sort: BookSort) {
    match sort {
        BookSort::Title => {
            books.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        BookSort::RecentlyAccessed => books.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed)),
        BookSort::SectionCount => books.sort_by(|a, b| b.section_count.cmp(&a.section_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, day, 12, 0, 0).unwrap()
    }

    fn catalog() -> CatalogStore {
        CatalogStore::from_records(
            vec![
                Book::new(1, "Indian Penal Code, 1860")
                    .with_section_count(511)
                    .with_timestamps(at(12), at(1))
                    .pinned(),
                Book::new(2, "Companies Act, 2013")
                    .with_section_count(470)
                    .with_timestamps(at(5), at(1))
                    .new_arrival(),
                Book::new(3, "code of Criminal Procedure, 1973")
                    .with_section_count(484)
                    .with_timestamps(at(8), at(1)),
            ],
            vec![
                Section::new(201, 1, "Section 1", "Title and extent"),
                Section::new(202, 1, "Section 2", "Punishment within India").favorite(),
                Section::new(203, 1, "Section 3", "Punishment beyond India"),
                Section::new(301, 3, "Section 1", "Short title"),
            ],
        )
        .unwrap()
    }

    fn ids(books: &[&Book]) -> Vec<BookId> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_list_books_pinned_by_title() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.list_books(BookFilter::Pinned, BookSort::Title)), vec![1]);
    }

    #[test]
    fn test_sorts() {
        let catalog = catalog();
        assert_eq!(
            ids(&catalog.list_books(BookFilter::All, BookSort::Title)),
            vec![3, 2, 1]
        );
        assert_eq!(
            ids(&catalog.list_books(BookFilter::All, BookSort::RecentlyAccessed)),
            vec![1, 3, 2]
        );
        assert_eq!(
            ids(&catalog.list_books(BookFilter::All, BookSort::SectionCount)),
            vec![1, 3, 2]
        );
        assert_eq!(ids(&catalog.list_books(BookFilter::New, BookSort::Title)), vec![2]);
    }

    #[test]
    fn test_search_books() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.search_books("CODE")), vec![1, 3]);
        assert_eq!(ids(&catalog.search_books("  ")), vec![1, 2, 3]);
        assert!(catalog.search_books("evidence").is_empty());
        assert_eq!(
            ids(&catalog.query_books("code", BookFilter::All, BookSort::SectionCount)),
            vec![1, 3]
        );
    }

    #[test]
    fn test_next_and_previous_section() {
        let catalog = catalog();
        assert_eq!(catalog.next_section(201).unwrap().map(|s| s.id), Some(202));
        assert_eq!(catalog.next_section(203).unwrap(), None);
        assert_eq!(catalog.next_section(301).unwrap(), None);
        assert_eq!(catalog.previous_section(202).unwrap().map(|s| s.id), Some(201));
        assert_eq!(catalog.previous_section(201).unwrap(), None);
        assert!(catalog.next_section(999).unwrap_err().is_not_found());
    }

    #[test]
    fn test_open_book_touches_last_accessed() {
        let mut catalog = catalog();
        let before = Utc::now();
        let book = catalog.open_book(2).unwrap();
        assert!(book.last_accessed >= before);
        assert_eq!(catalog.recent_books(1)[0].id, 2);
        assert!(catalog.open_book(42).is_err());
    }

    #[test]
    fn test_insert_section_requires_book() {
        let mut catalog = catalog();
        let err = catalog
            .insert_section(Section::new(901, 9, "Orphan", ""))
            .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(NotFound::Book(9))));
        assert!(!catalog.contains_section(901));
    }

    #[test]
    fn test_list_sections_unknown_book() {
        let catalog = catalog();
        assert!(catalog.list_sections(2).unwrap().is_empty());
        assert!(catalog.list_sections(7).is_err());
    }

    #[test]
    fn test_favorite_sections() {
        let catalog = catalog();
        let favorites = catalog.favorite_sections();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, 202);
        assert_eq!(favorites[0].book_title, "Indian Penal Code, 1860");
    }

    #[test]
    fn test_merge_remote_keeps_user_state() {
        let mut catalog = catalog();
        catalog.toggle_favorite(203).unwrap();
        catalog.set_progress(3, 40).unwrap();

        catalog.merge_remote(
            vec![
                Book::new(1, "Indian Penal Code, 1860").with_timestamps(at(1), at(20)),
                Book::new(3, "Code of Criminal Procedure, 1973").with_timestamps(at(1), at(20)),
            ],
            vec![
                Section::new(203, 1, "Section 3", "Amended text"),
                Section::new(777, 4, "Stray", ""),
            ],
        );

        let ipc = catalog.get_book(1).unwrap();
        assert!(ipc.is_pinned);
        assert_eq!(ipc.last_accessed, at(12));
        assert_eq!(catalog.get_book(3).unwrap().progress, 40);
        assert!(catalog.get_section(203).unwrap().is_favorite);
        assert_eq!(catalog.get_section(203).unwrap().content, "Amended text");
        assert!(!catalog.contains_section(777));
        assert!(!catalog.contains_section(201));
    }

    #[test]
    fn test_merge_remote_collapses_repeated_ids() {
        let mut catalog = catalog();
        catalog.merge_remote(
            vec![
                Book::new(1, "Indian Penal Code, 1860"),
                Book::new(1, "Indian Penal Code, 1860 (revised)"),
            ],
            vec![
                Section::new(201, 1, "Section 1", "Title and extent"),
                Section::new(201, 1, "Section 1", "Title and extent (revised)"),
                Section::new(202, 1, "Section 2", "Punishment within India"),
            ],
        );

        assert_eq!(catalog.books().len(), 1);
        assert_eq!(catalog.get_book(1).unwrap().title, "Indian Penal Code, 1860 (revised)");
        let ids: Vec<SectionId> = catalog.sections().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![201, 202]);
        assert_eq!(catalog.next_section(201).unwrap().map(|s| s.id), Some(202));
        assert_eq!(catalog.next_section(202).unwrap(), None);
    }

    #[test]
    fn test_normalize_drops_orphans_and_duplicates() {
        let mut catalog: CatalogStore = serde_json::from_value(serde_json::json!({
            "books": [Book::new(1, "Indian Penal Code, 1860")],
            "sections": [
                Section::new(201, 1, "Section 1", "Title and extent"),
                Section::new(201, 1, "Section 1", "Title and extent"),
                Section::new(901, 9, "Orphan", ""),
            ],
        }))
        .unwrap();

        catalog.normalize();
        let ids: Vec<SectionId> = catalog.sections().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![201]);
    }
}
