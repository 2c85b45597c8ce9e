//! LIDO metadata records.
//!
//! Only one node of a record is consumed: the `linkResource` holding the
//! absolute URL of the item's image.

use crate::error::RetrieveError;
use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};
use std::borrow::Cow;
use std::path::Path;

pub const LIDO_NS: &str = "http://www.lido-schema.org";

/// Element names from the document root down to `linkResource`.
pub const LINK_RESOURCE_PATH: [&str; 5] = [
    "administrativeMetadata",
    "resourceWrap",
    "resourceSet",
    "resourceRepresentation",
    "linkResource",
];

/// Extract the image URL from the text of a LIDO record.
pub fn extract_image_url(xml: &str) -> Result<String, RetrieveError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let mut node = doc.root_element();
    for name in LINK_RESOURCE_PATH {
        node = lido_child(node, name).ok_or(RetrieveError::MissingNode)?;
    }

    let url = node.text().unwrap_or_default().trim();
    if url.is_empty() {
        return Err(RetrieveError::MissingNode);
    }

    Ok(url.to_string())
}

fn lido_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name((LIDO_NS, name)))
}

/// Decode raw record bytes to text.
///
/// A byte order mark wins, then the `encoding` of the XML declaration,
/// then UTF-8. Undecodable bytes become U+FFFD.
pub fn decode_record(bytes: &[u8]) -> Cow<'_, str> {
    let declared = declared_encoding(bytes).unwrap_or(UTF_8);
    let (text, _, _) = declared.decode(bytes);
    text
}

fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let prolog = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    if !prolog.starts_with(b"<?xml") {
        return None;
    }
    let end = prolog.iter().position(|&b| b == b'>')?;
    let decl = std::str::from_utf8(&prolog[..end]).ok()?;

    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let label = &rest[1..];
    let label = &label[..label.find(quote)?];

    Encoding::for_label(label.as_bytes())
}

/// Read a record from disk and extract its image URL.
pub async fn read_image_url(path: &Path) -> Result<String, RetrieveError> {
    let bytes = tokio::fs::read(path).await.map_err(RetrieveError::Read)?;
    extract_image_url(&decode_record(&bytes))
}
