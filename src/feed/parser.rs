//! Streaming RSS/Atom reader that turns feed bytes into [`FeedItem`]s.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, instrument};

use super::error::FeedError;
use super::item::{FeedItem, strip_namespace};

/// Local element names that delimit one article-like record.
const ITEM_ELEMENTS: [&str; 2] = ["item", "entry"];

/// A feed document reduced to its items plus enough structure for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    /// Root element name as written (e.g. `rss`, `rdf:RDF`, `feed`).
    pub root: String,
    /// Direct children of the root, in document order.
    pub top_level: Vec<String>,
    /// Items in document order.
    pub items: Vec<FeedItem>,
}

impl ParsedFeed {
    /// First item, used as the sample for tag discovery.
    #[must_use]
    pub fn first_item(&self) -> Option<&FeedItem> {
        self.items.first()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the feed has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses RSS 0.9x/1.0/2.0 or Atom bytes.
///
/// Every element whose local name is `item` or `entry` becomes a [`FeedItem`],
/// wherever it sits in the tree (RSS 1.0 places items beside the channel).
/// Each direct child of an item contributes one value: the text and CDATA of
/// the child and all its descendants. A childless `<link href="..."/>` (Atom)
/// contributes its `href`.
///
/// # Errors
///
/// - [`FeedError::Xml`] when the bytes are not well-formed XML
/// - [`FeedError::NoItems`] when no item elements are present
#[instrument(skip(bytes), fields(bytes = bytes.len()))]
pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, FeedError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut builder = FeedBuilder::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => builder.open(&start, reader.decoder()),
            Ok(Event::Empty(start)) => {
                builder.open(&start, reader.decoder());
                builder.close();
            }
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Text(text)) => {
                let decoded = decode_lossy(reader.decoder(), &text);
                builder.text(&unescape_lenient(&decoded));
            }
            Ok(Event::CData(cdata)) => builder.text(&decode_lossy(reader.decoder(), &cdata)),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                return Err(FeedError::Xml {
                    position: reader.error_position().try_into().unwrap_or_default(),
                    message: error.to_string(),
                });
            }
        }
        buf.clear();
    }

    builder.finish()
}

#[derive(Debug, Default)]
struct FeedBuilder {
    depth: usize,
    root: Option<String>,
    top_level: Vec<String>,
    items: Vec<FeedItem>,
    open_item: Option<OpenItem>,
}

#[derive(Debug)]
struct OpenItem {
    depth: usize,
    item: FeedItem,
    child: Option<OpenChild>,
}

#[derive(Debug)]
struct OpenChild {
    name: String,
    href: Option<String>,
    text: String,
    has_children: bool,
}

impl OpenChild {
    fn into_value(self) -> String {
        match self.href {
            Some(href) if self.text.trim().is_empty() => href,
            _ => self.text,
        }
    }
}

impl FeedBuilder {
    fn open(&mut self, start: &BytesStart<'_>, decoder: Decoder) {
        self.depth += 1;
        let depth = self.depth;
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        if depth == 1 {
            self.root = Some(name.clone());
        } else if depth == 2 {
            self.top_level.push(name.clone());
        }

        let Some(open) = self.open_item.as_mut() else {
            if ITEM_ELEMENTS.contains(&strip_namespace(&name)) {
                self.open_item = Some(OpenItem {
                    depth,
                    item: FeedItem::new(),
                    child: None,
                });
            }
            return;
        };

        if depth == open.depth + 1 {
            open.child = Some(OpenChild {
                href: href_attribute(start, decoder),
                name,
                text: String::new(),
                has_children: false,
            });
        } else if let Some(child) = open.child.as_mut() {
            // Mixed content such as `Text <b>bold</b>` still counts as text.
            if child.text.trim().is_empty() {
                child.has_children = true;
            }
            if !child.text.is_empty() && !child.text.ends_with(char::is_whitespace) {
                child.text.push(' ');
            }
        }
    }

    fn close(&mut self) {
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        let item_finished = match &mut self.open_item {
            Some(open) if depth == open.depth + 1 => {
                if let Some(child) = open.child.take() {
                    let name = child.name.clone();
                    let has_children = child.has_children;
                    open.item.push_child(&name, child.into_value(), has_children);
                }
                false
            }
            Some(open) => depth == open.depth,
            None => false,
        };

        if item_finished && let Some(open) = self.open_item.take() {
            self.items.push(open.item);
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(child) = self
            .open_item
            .as_mut()
            .and_then(|open| open.child.as_mut())
        {
            child.text.push_str(text);
        }
    }

    fn finish(self) -> Result<ParsedFeed, FeedError> {
        let Some(root) = self.root else {
            return Err(FeedError::Xml {
                position: 0,
                message: "document has no root element".to_string(),
            });
        };

        if self.items.is_empty() {
            return Err(FeedError::NoItems {
                root,
                top_level: self.top_level,
            });
        }

        debug!(root = %root, items = self.items.len(), "Feed parsed");
        Ok(ParsedFeed {
            root,
            top_level: self.top_level,
            items: self.items,
        })
    }
}

fn href_attribute(start: &BytesStart<'_>, decoder: Decoder) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"href")
        .map(|attr| unescape_lenient(&decode_lossy(decoder, &attr.value)).into_owned())
}

/// Decodes raw bytes in the document's declared encoding.
///
/// Bytes the encoding cannot represent are replaced rather than failing the item.
fn decode_lossy<'b>(decoder: Decoder, raw: &'b [u8]) -> Cow<'b, str> {
    decoder
        .decode(raw)
        .unwrap_or_else(|_| String::from_utf8_lossy(raw))
}

/// Resolves character and predefined entity references one at a time.
///
/// References that do not resolve (`&nbsp;` without a DTD, a bare `&`) stay
/// as literal text and do not affect their neighbours.
fn unescape_lenient(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail[1..].find(['&', ';']).map(|offset| offset + 1) {
            Some(end) if tail.as_bytes()[end] == b';' => {
                let reference = &tail[..=end];
                match escape::unescape(reference) {
                    Ok(resolved) => out.push_str(&resolved),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[end + 1..];
            }
            Some(end) => {
                out.push_str(&tail[..end]);
                rest = &tail[end..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
