// XML response representation and namespace flattening.
//
// The management daemon answers with namespace-heavy XML: error records
// live under the xnm namespace, and the `style` attribute is qualified by
// a firmware-versioned junos namespace. Responses are parsed into a
// tagged value tree with namespace-qualified keys (`{uri}:{local}` for
// elements, `@{uri}:{local}` for attributes), then flattened by a
// recursive walk that rewrites the known Juniper names to bare keys and
// drops structural `@xmlns` declarations.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::Error;

/// Juniper xnm namespace carrying error structures.
const XNM_NS: &str = "http://xml.juniper.net/xnm/1.1/xnm";

/// Prefix of the firmware-versioned junos namespace
/// (`http://xml.juniper.net/junos/<version>/junos`).
const JUNOS_NS_PREFIX: &str = "http://xml.juniper.net/junos/";

/// xnm-namespaced element names rewritten to bare keys.
const XNM_FLAT_NAMES: &[&str] = &[
    "error",
    "token",
    "message",
    "line-number",
    "column",
    "statement",
    "edit-path",
    "source-daemon",
];

/// A parsed XML document fragment.
///
/// Maps preserve document order; repeated sibling elements collapse into
/// a `List` under their shared key.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Null,
    Text(String),
    Map(IndexMap<String, XmlValue>),
    List(Vec<XmlValue>),
}

impl XmlValue {
    /// Child lookup on mapping nodes; `None` for every other shape.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, XmlValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<XmlValue> for serde_json::Value {
    fn from(value: XmlValue) -> Self {
        match value {
            XmlValue::Null => Self::Null,
            XmlValue::Text(text) => Self::String(text),
            XmlValue::Map(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
            XmlValue::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
        }
    }
}

fn xml_err(e: impl std::fmt::Display) -> Error {
    Error::UnexpectedResponse {
        message: e.to_string(),
    }
}

/// Parse an XML document into an [`XmlValue`] tree with
/// namespace-qualified keys.
pub fn parse_document(xml: &str) -> Result<XmlValue, Error> {
    let mut reader = NsReader::from_str(xml);
    let mut root = IndexMap::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let (key, value) = read_element(&mut reader, &e, false)?;
                insert_child(&mut root, key, value);
            }
            Event::Empty(e) => {
                let (key, value) = read_element(&mut reader, &e, true)?;
                insert_child(&mut root, key, value);
            }
            Event::Eof => break,
            // Top-level text is inter-element whitespace; declarations,
            // comments, and PIs carry no payload.
            _ => {}
        }
    }

    Ok(XmlValue::Map(root))
}

/// Read one element (and, unless empty, its subtree) into a value.
fn read_element(
    reader: &mut NsReader<&[u8]>,
    start: &BytesStart<'_>,
    is_empty: bool,
) -> Result<(String, XmlValue), Error> {
    let key = element_key(reader, start);
    let mut map = attribute_map(reader, start)?;
    let mut text = String::new();

    if !is_empty {
        loop {
            match reader.read_event().map_err(xml_err)? {
                Event::Start(e) => {
                    let (child_key, child) = read_element(reader, &e, false)?;
                    insert_child(&mut map, child_key, child);
                }
                Event::Empty(e) => {
                    let (child_key, child) = read_element(reader, &e, true)?;
                    insert_child(&mut map, child_key, child);
                }
                Event::Text(t) => {
                    let chunk = t.unescape().map_err(xml_err)?;
                    text.push_str(chunk.trim());
                }
                Event::CData(c) => {
                    text.push_str(String::from_utf8_lossy(&c.into_inner()).trim());
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(xml_err("unexpected end of document inside element"));
                }
                _ => {}
            }
        }
    }

    let value = if map.is_empty() {
        if text.is_empty() {
            XmlValue::Null
        } else {
            XmlValue::Text(text)
        }
    } else {
        if !text.is_empty() {
            map.insert("#text".to_owned(), XmlValue::Text(text));
        }
        XmlValue::Map(map)
    };

    Ok((key, value))
}

/// Namespace-qualified key for an element: `{uri}:{local}`, or the bare
/// local name when unbound.
fn element_key(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> String {
    let (resolved, local) = reader.resolve_element(start.name());
    let local = String::from_utf8_lossy(local.into_inner());
    match resolved {
        ResolveResult::Bound(ns) => {
            format!("{}:{local}", String::from_utf8_lossy(ns.into_inner()))
        }
        _ => local.into_owned(),
    }
}

/// Attributes of an element, keyed `@{uri}:{local}`. Namespace
/// declarations are kept as `@xmlns` / `@xmlns:{prefix}` so the flatten
/// pass can strip them explicitly.
fn attribute_map(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<IndexMap<String, XmlValue>, Error> {
    let mut map = IndexMap::new();

    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();

        let key = if let Some(decl) = attr.key.as_namespace_binding() {
            match decl {
                PrefixDeclaration::Default => "@xmlns".to_owned(),
                PrefixDeclaration::Named(prefix) => {
                    format!("@xmlns:{}", String::from_utf8_lossy(prefix))
                }
            }
        } else {
            let (resolved, local) = reader.resolve_attribute(attr.key);
            let local = String::from_utf8_lossy(local.into_inner());
            match resolved {
                ResolveResult::Bound(ns) => {
                    format!("@{}:{local}", String::from_utf8_lossy(ns.into_inner()))
                }
                _ => format!("@{local}"),
            }
        };

        map.insert(key, XmlValue::Text(value));
    }

    Ok(map)
}

/// Insert a child under `key`, collapsing repeated siblings into a list.
fn insert_child(map: &mut IndexMap<String, XmlValue>, key: String, value: XmlValue) {
    match map.get_mut(&key) {
        Some(XmlValue::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, XmlValue::Null);
            *existing = XmlValue::List(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Rewrite one namespace-qualified key to its flat form.
///
/// `None` means the key (and its subtree) is dropped entirely.
fn rewrite_key(key: &str) -> Option<String> {
    if key == "@xmlns" || key.starts_with("@xmlns:") {
        return None;
    }

    if let Some(local) = key
        .strip_prefix(XNM_NS)
        .and_then(|rest| rest.strip_prefix(':'))
    {
        if XNM_FLAT_NAMES.contains(&local) {
            return Some(local.to_owned());
        }
    }

    // The junos namespace embeds the firmware version, so the `style`
    // attribute is matched on both ends of the URI.
    if let Some(qualified) = key.strip_prefix('@') {
        if qualified.starts_with(JUNOS_NS_PREFIX) && qualified.ends_with("/junos:style") {
            return Some("style".to_owned());
        }
    }

    Some(key.to_owned())
}

/// Recursively flatten namespace-qualified keys throughout a tree.
pub fn flatten(value: XmlValue) -> XmlValue {
    match value {
        XmlValue::Map(map) => XmlValue::Map(
            map.into_iter()
                .filter_map(|(k, v)| rewrite_key(&k).map(|flat| (flat, flatten(v))))
                .collect(),
        ),
        XmlValue::List(items) => XmlValue::List(items.into_iter().map(flatten).collect()),
        other => other,
    }
}
