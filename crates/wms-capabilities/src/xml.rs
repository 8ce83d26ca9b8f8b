//! Owned, namespace-resolved XML element tree.
//!
//! Capabilities documents are small enough to materialise completely, which
//! lets handlers read attributes and all descendant text of any element
//! without coordinating with a pull parser. The tree is built with
//! quick-xml's `NsReader` so every element and attribute carries its
//! resolved namespace URI.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;

use crate::error::{CapabilitiesError, CapabilitiesResult};

/// XLink namespace used by `OnlineResource` style locators.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// A single attribute with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI, `None` for unprefixed attributes and undeclared prefixes
    pub namespace: Option<String>,
    /// Prefix as written in the document
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without a namespace.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    /// Create an element in the given namespace.
    pub fn with_namespace(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    /// Add an unqualified attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            namespace: None,
            prefix: None,
            local_name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a namespace-qualified attribute.
    pub fn attr_ns(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(Attribute {
            namespace: Some(namespace.into()),
            prefix: None,
            local_name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of an attribute that has neither a namespace nor a prefix.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.prefix.is_none() && a.local_name == name)
            .map(|a| a.value.as_str())
    }

    /// Value of an attribute in the given namespace.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.local_name == name)
            .map(|a| a.value.as_str())
    }

    /// Value of an attribute whose prefix was never bound to a namespace.
    pub fn unbound_attribute(&self, prefix: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| {
                a.namespace.is_none() && a.prefix.as_deref() == Some(prefix) && a.local_name == name
            })
            .map(|a| a.value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Parse a document held in memory and return its root element.
///
/// The text is already UTF-8, so an `encoding` in the XML declaration is
/// ignored. Returns `Ok(None)` when the input contains no element at all.
pub fn parse_str(xml: &str, max_depth: usize) -> CapabilitiesResult<Option<Element>> {
    parse_events(NsReader::from_str(xml), max_depth)
}

/// Parse a document from any buffered source and return its root element.
///
/// Bytes are decoded with the encoding named by a BOM or the XML
/// declaration, UTF-8 otherwise.
pub fn parse_reader<R: BufRead>(source: R, max_depth: usize) -> CapabilitiesResult<Option<Element>> {
    parse_events(NsReader::from_reader(source), max_depth)
}

fn parse_events<R: BufRead>(
    mut reader: NsReader<R>,
    max_depth: usize,
) -> CapabilitiesResult<Option<Element>> {
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(source) => {
                return Err(CapabilitiesError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };

        match event {
            Event::Start(start) => {
                if open.len() >= max_depth {
                    return Err(CapabilitiesError::DepthLimitExceeded { limit: max_depth });
                }
                open.push(open_element(&reader, &start)?);
            }
            Event::Empty(start) => {
                if open.len() >= max_depth {
                    return Err(CapabilitiesError::DepthLimitExceeded { limit: max_depth });
                }
                let element = open_element(&reader, &start)?;
                attach(&mut open, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    attach(&mut open, &mut root, element);
                }
            }
            Event::Text(text) => {
                if let Some(parent) = open.last_mut() {
                    let text = text.unescape().map_err(|source| CapabilitiesError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    parent.children.push(Node::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = open.last_mut() {
                    let raw = data.into_inner();
                    let text = reader.decoder().decode(&raw).map_err(|source| {
                        CapabilitiesError::Xml {
                            position: reader.buffer_position(),
                            source,
                        }
                    })?;
                    parent.children.push(Node::Text(text.into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    // Truncated documents keep whatever was read so far.
    while let Some(element) = open.pop() {
        attach(&mut open, &mut root, element);
    }

    Ok(root)
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn open_element<R>(reader: &NsReader<R>, start: &BytesStart<'_>) -> CapabilitiesResult<Element> {
    let (resolved, local) = reader.resolve_element(start.name());
    let mut element = Element {
        namespace: namespace_uri(resolved),
        local_name: decode_name(local.as_ref()),
        ..Default::default()
    };

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| CapabilitiesError::Xml {
            position: reader.buffer_position(),
            source: err.into(),
        })?;
        let key = attribute.key;
        if is_namespace_declaration(key) {
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(key);
        let value = attribute
            .decode_and_unescape_value(reader)
            .map_err(|source| CapabilitiesError::Xml {
                position: reader.buffer_position(),
                source,
            })?;

        element.attributes.push(Attribute {
            namespace: namespace_uri(resolved),
            prefix: key.prefix().map(|prefix| decode_name(prefix.as_ref())),
            local_name: decode_name(local.as_ref()),
            value: value.into_owned(),
        });
    }

    Ok(element)
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(namespace) => Some(decode_name(namespace.as_ref())),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn is_namespace_declaration(key: QName<'_>) -> bool {
    let raw = key.as_ref();
    raw == b"xmlns" || raw.starts_with(b"xmlns:")
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
