// src/models/selectors.rs

//! CSS selectors for scraping a conference detail page.

use serde::{Deserialize, Serialize};

/// Named extraction rules for a conference detail page.
///
/// Each rule targets one semantic slot of the page. The defaults encode the
/// table layout the listing site renders today; a layout change means
/// updating the affected rule here (or in `[selectors]` of the config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSelectors {
    /// Submission deadline cell
    #[serde(default = "defaults::deadline_cell")]
    pub deadline_cell: String,

    /// Free-text "extra info" paragraph
    #[serde(default = "defaults::note_cell")]
    pub note_cell: String,

    /// Heading listing the categories the page declares
    #[serde(default = "defaults::categories_cell")]
    pub categories_cell: String,

    /// Anchor holding the conference's own home link
    #[serde(default = "defaults::canonical_link")]
    pub canonical_link: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            deadline_cell: defaults::deadline_cell(),
            note_cell: defaults::note_cell(),
            categories_cell: defaults::categories_cell(),
            canonical_link: defaults::canonical_link(),
        }
    }
}

mod defaults {
    // Shared prefix: the main content table of the listing page.
    const MAIN_TABLE: &str = "body > div:nth-child(5) > center > table > tbody";

    // Nested info table in row 5 of the main table.
    const INFO_TABLE: &str =
        "tr:nth-child(5) > td > table > tbody > tr > td > table > tbody";

    pub fn deadline_cell() -> String {
        format!(
            "{MAIN_TABLE} > {INFO_TABLE} > tr:nth-child(1) > td > table > tbody > tr:nth-child(3) > td > span > span:nth-child(3)"
        )
    }

    pub fn note_cell() -> String {
        format!("{MAIN_TABLE} > tr:nth-child(8) > td > div > div > p:nth-child(4)")
    }

    pub fn categories_cell() -> String {
        format!(
            "{MAIN_TABLE} > {INFO_TABLE} > tr:nth-child(2) > td > table > tbody > tr:nth-child(2) > td > h5"
        )
    }

    pub fn canonical_link() -> String {
        format!("{MAIN_TABLE} > tr:nth-child(3) > td > a")
    }
}
