//! Feed entries, extracted fields, and merged conference records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::parse_deadline;

/// One `<item>` of a category feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Fields scraped from a conference detail page.
///
/// Any field may be empty when the page does not populate the slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Submission deadline, free text
    pub deadline: String,
    /// Short "extra info" note, empty unless 50..=150 characters
    pub note: String,
    /// Categories declared by the page itself
    pub categories: Vec<String>,
    /// The conference's own home link as declared on the page
    pub link: String,
}

/// A fully enriched conference listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConferenceRecord {
    pub title: String,

    /// Canonical link from the detail page (replaces the feed link)
    pub link: String,

    pub description: String,
    pub deadline: String,
    pub note: String,
    pub categories: Vec<String>,

    /// Canonical conference name derived from `title`
    pub name: String,

    /// Detail page URL the record was scraped from
    #[serde(skip)]
    pub feed_link: String,
}

impl ConferenceRecord {
    /// Merge a feed entry with its extracted fields.
    ///
    /// The extracted link always wins over the feed link, even when empty.
    pub fn merge(entry: FeedEntry, fields: ExtractedFields, name: String) -> Self {
        Self {
            title: entry.title,
            link: fields.link,
            description: entry.description,
            deadline: fields.deadline,
            note: fields.note,
            categories: fields.categories,
            name,
            feed_link: entry.link,
        }
    }

    /// Parsed submission deadline, if the text is a recognizable date.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        parse_deadline(&self.deadline)
    }

    /// Key used to detect the same conference listed under several categories.
    pub fn dedupe_key(&self) -> &str {
        if self.link.trim().is_empty() {
            &self.feed_link
        } else {
            self.link.trim()
        }
    }
}
