//! RSS feed reading.
//!
//! Only the `<item>` elements of a category feed matter; channel-level
//! metadata is skipped.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{AppError, Result};
use crate::models::FeedEntry;

#[derive(Clone, Copy)]
enum ItemField {
    Title,
    Link,
    Description,
}

/// Parse an RSS document into its entries, in document order.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<ItemField> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => current = Some(FeedEntry::default()),
                b"title" if current.is_some() => field = Some(ItemField::Title),
                b"link" if current.is_some() => field = Some(ItemField::Link),
                b"description" if current.is_some() => field = Some(ItemField::Description),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    match e.unescape_with(resolve_entity) {
                        Ok(text) => push_text(entry, field, &text),
                        Err(err) => {
                            log::warn!("Keeping raw item text: {}", err);
                            push_text(entry, field, &String::from_utf8_lossy(&e));
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let bytes = e.into_inner();
                    push_text(entry, field, &String::from_utf8_lossy(&bytes));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    if let Some(entry) = current.take() {
                        entries.push(trimmed(entry));
                    }
                    field = None;
                }
                b"title" | b"link" | b"description" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::feed(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Predefined XML entities plus the HTML ones that show up in CFP titles.
fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "hellip" => "\u{2026}",
        "eacute" => "\u{e9}",
        "uuml" => "\u{fc}",
        "ouml" => "\u{f6}",
        "auml" => "\u{e4}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        _ => return None,
    })
}

fn push_text(entry: &mut FeedEntry, field: ItemField, text: &str) {
    let target = match field {
        ItemField::Title => &mut entry.title,
        ItemField::Link => &mut entry.link,
        ItemField::Description => &mut entry.description,
    };
    target.push_str(text);
}

fn trimmed(entry: FeedEntry) -> FeedEntry {
    FeedEntry {
        title: entry.title.trim().to_string(),
        link: entry.link.trim().to_string(),
        description: entry.description.trim().to_string(),
    }
}
