// Attribute-tagged documents handed to the host.
//
//   <suggestions page_url="..."><suggestion url="..." artist="..." title="..."/></suggestions>
//   <lyrics page_url="..." artist="..." title="...">text</lyrics>

use crate::record::{LyricsRecord, ResultList};
use crate::sanitize::{attribute_value, escape_text, sanitize};

/// Serializes result lists and lyrics records into the host's document format.
pub struct StructuredDocBuilder;

impl StructuredDocBuilder {
    /// Serialize a search result list. An empty list yields a self-closing root.
    pub fn suggestions(list: &ResultList) -> String {
        let mut doc = String::new();
        doc.push_str("<suggestions");
        push_attr(&mut doc, "page_url", &list.page_url);

        if list.entries.is_empty() {
            doc.push_str("/>");
            return doc;
        }
        doc.push('>');

        for entry in &list.entries {
            doc.push_str("<suggestion");
            push_attr(&mut doc, "url", &entry.url);
            push_attr(&mut doc, "artist", &entry.artist);
            push_attr(&mut doc, "title", &entry.title);
            doc.push_str("/>");
        }

        doc.push_str("</suggestions>");
        doc
    }

    /// Serialize a lyrics record, keeping the body's newlines.
    pub fn lyrics(record: &LyricsRecord) -> String {
        let mut doc = String::new();
        doc.push_str("<lyrics");
        push_attr(&mut doc, "page_url", &record.page_url);
        push_attr(&mut doc, "artist", &record.artist);
        push_attr(&mut doc, "title", &record.title);
        doc.push('>');
        doc.push_str(&escape_text(&sanitize(&record.body)));
        doc.push_str("</lyrics>");
        doc
    }
}

fn push_attr(doc: &mut String, name: &str, value: &str) {
    doc.push(' ');
    doc.push_str(name);
    doc.push_str("=\"");
    doc.push_str(&attribute_value(value));
    doc.push('"');
}
