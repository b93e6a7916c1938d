//! Built-in demo catalog of Indian statutes

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::library::{Library, LibraryConfig};
use crate::types::{Book, NotificationKind, Section, SectionId};
use chrono::{DateTime, NaiveDate, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn books() -> Vec<Book> {
    vec![
        Book::new(1, "The Constitution of India")
            .with_section_count(395)
            .with_progress(45)
            .with_timestamps(at(2025, 4, 10, 10, 30), at(2025, 3, 15, 0, 0))
            .pinned(),
        Book::new(2, "Indian Penal Code, 1860")
            .with_section_count(511)
            .with_progress(22)
            .with_timestamps(at(2025, 4, 12, 14, 20), at(2025, 2, 10, 0, 0))
            .pinned(),
        Book::new(3, "Code of Criminal Procedure, 1973")
            .with_section_count(484)
            .with_progress(10)
            .with_timestamps(at(2025, 4, 8, 9, 15), at(2025, 1, 20, 0, 0)),
        Book::new(4, "Indian Evidence Act, 1872")
            .with_section_count(167)
            .with_progress(65)
            .with_timestamps(at(2025, 4, 11, 16, 45), at(2025, 3, 5, 0, 0)),
        Book::new(5, "Civil Procedure Code, 1908")
            .with_section_count(158)
            .with_progress(5)
            .with_timestamps(at(2025, 4, 9, 11, 20), at(2025, 2, 25, 0, 0)),
        Book::new(6, "Information Technology Act, 2000")
            .with_section_count(94)
            .with_timestamps(at(2025, 4, 7, 15, 30), at(2025, 3, 30, 0, 0))
            .new_arrival(),
        Book::new(7, "Companies Act, 2013")
            .with_section_count(470)
            .with_progress(8)
            .with_timestamps(at(2025, 4, 5, 10, 10), at(2025, 3, 28, 0, 0))
            .new_arrival(),
    ]
}

fn sections() -> Vec<Section> {
    vec![
        Section::new(
            101,
            1,
            "Article 1: Name and territory of the Union",
            "India, that is Bharat, shall be a Union of States. The States and the territories \
             thereof shall be as specified in the First Schedule. The territory of India shall \
             comprise the territories of the States and the Union territories specified in the \
             First Schedule and such other territories as may be acquired.",
        )
        .with_description("Defines the name and territories of India.")
        .favorite(),
        Section::new(
            102,
            1,
            "Article 2: Admission or establishment of new States",
            "Parliament may by law admit into the Union, or establish, new States on such terms \
             and conditions as it thinks fit.",
        )
        .with_description("Parliament may by law admit into the Union, or establish, new States."),
        Section::new(
            103,
            1,
            "Article 3: Formation of new States and alteration of areas, boundaries or names of existing States",
            "Parliament may by law\n(a) form a new State by separation of territory from any State \
             or by uniting two or more States or parts of States or by uniting any territory to a \
             part of any State;\n(b) increase the area of any State;\n(c) diminish the area of any \
             State;\n(d) alter the boundaries of any State;\n(e) alter the name of any State.",
        )
        .with_description("Procedures for creating new states or changing existing ones.")
        .favorite(),
        Section::new(
            201,
            2,
            "Section 1: Title and extent of operation of the Code",
            "This Act shall be called the Indian Penal Code, and shall extend to the whole of India \
             except the State of Jammu and Kashmir.",
        )
        .with_description("Defines the title and extent of the Indian Penal Code."),
        Section::new(
            202,
            2,
            "Section 2: Punishment of offences committed within India",
            "Every person shall be liable to punishment under this Code and not otherwise for every \
             act or omission contrary to the provisions thereof, of which he shall be guilty within \
             the territory of India.",
        )
        .with_description("Every person shall be liable to punishment under this Code.")
        .favorite(),
        Section::new(
            203,
            2,
            "Section 3: Punishment of offences committed beyond, but which by law may be tried within, India",
            "Any person liable, by any Indian law, to be tried for an offence committed beyond India \
             shall be dealt with according to the provisions of this Code for any act committed \
             beyond India in the same manner as if such act had been committed within India.",
        )
        .with_description("Any person liable to be tried for an offence committed beyond India."),
    ]
}

const TAGS: [(&str, &str, &[SectionId]); 3] = [
    ("Important", "#FF6B6B", &[101, 202]),
    ("For Exam", "#4294ff", &[103, 202, 203]),
    ("Reference", "#10B981", &[102]),
];

/// The demo catalog alone
pub fn seed_catalog() -> Result<CatalogStore> {
    CatalogStore::from_records(books(), sections())
}

/// A library preloaded with the demo catalog, tags and notifications
pub fn seed_library(config: LibraryConfig) -> Result<Library> {
    let mut library = Library::with_catalog(config, seed_catalog()?);

    for (name, color, members) in TAGS {
        let id = library.create_tag(name, color)?.id;
        for section_id in members {
            library.add_section_to_tag(id, *section_id)?;
        }
    }

    let feed = library.notifications_mut();
    feed.clear_all();
    feed.push_at(
        NotificationKind::Tag,
        "New Tag Created",
        "You created a new tag: \"Constitutional Rights\"",
        at(2025, 4, 11, 16, 45),
    );
    if let Some(id) = feed
        .push_at(
            NotificationKind::Favorite,
            "Section Added to Favorites",
            "Article 1: Name and territory of the Union has been added to your favorites",
            at(2025, 4, 12, 10, 15),
        )
        .map(|n| n.id)
    {
        feed.mark_read(id)?;
    }
    feed.push_at(
        NotificationKind::Update,
        "New Updates Available",
        "The Constitution of India has been updated with recent amendments",
        at(2025, 4, 12, 14, 30),
    );

    Ok(library)
}
