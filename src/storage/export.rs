//! CSV serialization of conference records.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::ConferenceRecord;

/// Export columns, in record field order.
pub const COLUMNS: [&str; 7] = [
    "title",
    "link",
    "description",
    "deadline",
    "note",
    "categories",
    "name",
];

/// One flat CSV row; `categories` is comma-joined into a single cell.
#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    link: &'a str,
    description: &'a str,
    deadline: &'a str,
    note: &'a str,
    categories: String,
    name: &'a str,
}

impl<'a> From<&'a ConferenceRecord> for CsvRow<'a> {
    fn from(record: &'a ConferenceRecord) -> Self {
        Self {
            title: &record.title,
            link: &record.link,
            description: &record.description,
            deadline: &record.deadline,
            note: &record.note,
            categories: record.categories.join(","),
            name: &record.name,
        }
    }
}

/// Serialize records to CSV bytes. The header row is always present.
pub fn to_csv(records: &[ConferenceRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, categories: &[&str]) -> ConferenceRecord {
        ConferenceRecord {
            title: title.to_string(),
            link: "http://conf.example.org/".to_string(),
            description: "Desc [Vienna, Austria]".to_string(),
            deadline: "Jan 5, 2024".to_string(),
            note: String::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            name: "Conference".to_string(),
            feed_link: "http://www.wikicfp.com/x".to_string(),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let bytes = to_csv(&[record("CONF 2024 : Conference", &["ai", "security"])]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "title,link,description,deadline,note,categories,name");
        assert_eq!(
            lines[1],
            r#"CONF 2024 : Conference,http://conf.example.org/,"Desc [Vienna, Austria]","Jan 5, 2024",,"ai,security",Conference"#
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let text = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "title,link,description,deadline,note,categories,name\n");
    }

    #[test]
    fn test_feed_link_not_exported() {
        let text = String::from_utf8(to_csv(&[record("T", &[])]).unwrap()).unwrap();
        assert!(!text.contains("wikicfp.com/x"));
    }

    #[test]
    fn test_round_trips_through_reader() {
        let bytes = to_csv(&[record("Quote \"A\"", &["x"])]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Quote \"A\"");
        assert_eq!(&row[5], "x");
    }
}
