// src/services/extractor.rs

//! Detail page field extraction.
//!
//! Evaluates the named rules of [`DetailSelectors`] against a conference
//! detail page. A rule that matches nothing yields an empty field; pages
//! with an unexpected layout therefore produce empty records, not errors.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{DetailSelectors, ExtractedFields};

/// Notes outside this character range are treated as page boilerplate.
const NOTE_MIN_CHARS: usize = 50;
const NOTE_MAX_CHARS: usize = 150;

/// Separator between labels in the categories heading.
const CATEGORY_SEPARATOR: &str = "   ";

/// Extracts [`ExtractedFields`] from detail page HTML.
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    deadline: Selector,
    note: Selector,
    categories: Selector,
    link: Selector,
}

impl DetailExtractor {
    /// Compile the extraction rules.
    pub fn new(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            deadline: Self::parse_selector(&selectors.deadline_cell)?,
            note: Self::parse_selector(&selectors.note_cell)?,
            categories: Self::parse_selector(&selectors.categories_cell)?,
            link: Self::parse_selector(&selectors.canonical_link)?,
        })
    }

    /// Extract all fields from raw page content.
    pub fn extract(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);

        ExtractedFields {
            deadline: Self::text_of(&document, &self.deadline, "deadline_cell"),
            note: filter_note(Self::text_of(&document, &self.note, "note_cell")),
            categories: split_categories(&Self::text_of(
                &document,
                &self.categories,
                "categories_cell",
            )),
            link: Self::text_of(&document, &self.link, "canonical_link"),
        }
    }

    /// Concatenated text of every element the selector matches.
    fn text_of(document: &Html, selector: &Selector, rule: &str) -> String {
        let text: String = document
            .select(selector)
            .flat_map(|element| element.text())
            .collect();

        if text.is_empty() {
            log::debug!("Rule '{}' matched no content", rule);
        }
        text
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

impl Default for DetailExtractor {
    fn default() -> Self {
        Self::new(&DetailSelectors::default()).expect("default selectors are valid")
    }
}

/// Keep the note only when its length falls within the useful band.
fn filter_note(note: String) -> String {
    let len = note.chars().count();
    if len > NOTE_MAX_CHARS || len < NOTE_MIN_CHARS {
        String::new()
    } else {
        note
    }
}

/// Split a categories heading, dropping the leading label segment.
fn split_categories(text: &str) -> Vec<String> {
    text.split(CATEGORY_SEPARATOR)
        .skip(1)
        .map(|category| category.trim().to_string())
        .collect()
}
