//! Declarative decoding engine.
//!
//! A [`Table`] maps element local names to [`Entry`] values. Each entry pairs
//! a reader, which turns a child element into a typed value, with the
//! [`MergePolicy`] used to fold that value into the accumulator of the
//! enclosing element. [`push_parse_and_pop`] walks the children of one
//! element in document order and applies the matching entries; children with
//! no entry are skipped without side effects.
//!
//! Readers receive a [`Context`], a stack of ancestor frames that lets a
//! reader see state already resolved for an enclosing element. Layer
//! inheritance is threaded through it.

use std::collections::HashMap;
use std::fmt;

use crate::grammar::Grammar;
use crate::model::Layer;
use crate::xml::Element;

/// Canonical WMS namespace URI.
pub const WMS_NAMESPACE: &str = "http://www.opengis.net/wms";

/// Namespaces accepted for every grammar element. Real documents are
/// inconsistent about declaring the WMS namespace, so both are matched.
pub const NAMESPACE_URIS: &[Option<&str>] = &[None, Some(WMS_NAMESPACE)];

/// How a reader's result is combined with the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Set or overwrite a singleton field
    Replace,
    /// Append to an ordered list of structured values
    AppendToSequence,
    /// Append trimmed element text to a list of strings
    AppendToStringList,
}

/// Turns an element into a value, or `None` when nothing usable was found.
pub type Reader<V> = fn(&Element, &Context<'_>) -> Option<V>;

type Fold<T> = Box<dyn Fn(&mut T, &Element, &Context<'_>) + Send + Sync>;

/// A grammar entry: a reader bound to a field of the accumulator.
pub struct Entry<T> {
    policy: MergePolicy,
    fold: Fold<T>,
}

impl<T> Entry<T> {
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    fn apply(&self, acc: &mut T, node: &Element, ctx: &Context<'_>) {
        (self.fold)(acc, node, ctx)
    }
}

impl<T> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("policy", &self.policy).finish()
    }
}

/// Replace policy: the reader's value overwrites `field`.
pub fn setter<T: 'static, V: 'static>(
    field: fn(&mut T) -> &mut Option<V>,
    read: Reader<V>,
) -> Entry<T> {
    Entry {
        policy: MergePolicy::Replace,
        fold: Box::new(move |acc: &mut T, node: &Element, ctx: &Context<'_>| {
            if let Some(value) = read(node, ctx) {
                *field(acc) = Some(value);
            }
        }),
    }
}

/// Append-to-sequence policy: the reader's value is pushed onto `field`.
pub fn pusher<T: 'static, V: 'static>(field: fn(&mut T) -> &mut Vec<V>, read: Reader<V>) -> Entry<T> {
    Entry {
        policy: MergePolicy::AppendToSequence,
        fold: Box::new(move |acc: &mut T, node: &Element, ctx: &Context<'_>| {
            if let Some(value) = read(node, ctx) {
                field(acc).push(value);
            }
        }),
    }
}

/// Append-to-string-list policy: trimmed element text is pushed onto `field`.
pub fn string_pusher<T: 'static>(field: fn(&mut T) -> &mut Vec<String>) -> Entry<T> {
    Entry {
        policy: MergePolicy::AppendToStringList,
        fold: Box::new(move |acc: &mut T, node: &Element, _ctx: &Context<'_>| {
            if let Some(text) = crate::xsd::read_string(Some(node.text_content().as_str())) {
                field(acc).push(text);
            }
        }),
    }
}

/// Element-name keyed entries for one parsing context.
pub struct Table<T> {
    namespaces: &'static [Option<&'static str>],
    entries: HashMap<&'static str, Entry<T>>,
}

impl<T> Table<T> {
    /// An empty table accepting the default namespaces.
    pub fn new() -> Self {
        Self {
            namespaces: NAMESPACE_URIS,
            entries: HashMap::new(),
        }
    }

    /// Register `entry` for elements named `local_name`, replacing any
    /// previous registration.
    pub fn with(mut self, local_name: &'static str, entry: Entry<T>) -> Self {
        self.entries.insert(local_name, entry);
        self
    }

    /// Entry for `node`, if its namespace and local name are known.
    pub fn lookup(&self, node: &Element) -> Option<&Entry<T>> {
        if !self.namespaces.contains(&node.namespace()) {
            return None;
        }
        self.entries.get(node.local_name())
    }

    /// Merge policy registered for `local_name`.
    pub fn policy(&self, local_name: &str) -> Option<MergePolicy> {
        self.entries.get(local_name).map(Entry::policy)
    }

    pub fn contains(&self, local_name: &str) -> bool {
        self.entries.contains_key(local_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("Table").field("elements", &names).finish()
    }
}

/// One level of the context stack.
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    /// Bottom of the stack
    Document,
    /// An element whose children are being decoded
    Element(&'a str),
    /// A layer whose own properties are resolved and whose nested layers
    /// are being decoded
    Layer(&'a Layer),
}

/// Last-in-first-out stack of ancestor frames for a single decode.
///
/// Each level borrows its parent, so pushing never mutates shared state and
/// a frame lives exactly as long as the subtree it describes.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    grammar: &'a Grammar,
    frame: Frame<'a>,
    parent: Option<&'a Context<'a>>,
    depth: usize,
}

impl<'a> Context<'a> {
    /// The bottom of a fresh stack decoding with `grammar`.
    pub fn new(grammar: &'a Grammar) -> Self {
        Self {
            grammar,
            frame: Frame::Document,
            parent: None,
            depth: 0,
        }
    }

    /// A new top of stack above `self`.
    pub fn push<'b>(&'b self, frame: Frame<'b>) -> Context<'b> {
        Context {
            grammar: self.grammar,
            frame,
            parent: Some(self),
            depth: self.depth + 1,
        }
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn frame(&self) -> Frame<'a> {
        self.frame
    }

    /// Number of frames above the document frame.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The nearest enclosing layer, if any.
    pub fn parent_layer(&self) -> Option<&Layer> {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if let Frame::Layer(layer) = ctx.frame {
                return Some(layer);
            }
            current = ctx.parent;
        }
        None
    }
}

/// Decode the children of `node` into `acc` using `table`.
///
/// `node` is pushed as a frame for the duration of its children. Children
/// without an entry in `table` are ignored, as are readers returning `None`.
pub fn push_parse_and_pop<T>(mut acc: T, table: &Table<T>, node: &Element, ctx: &Context<'_>) -> T {
    let scope = ctx.push(Frame::Element(node.local_name()));
    for child in node.children() {
        if let Some(entry) = table.lookup(child) {
            entry.apply(&mut acc, child, &scope);
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::WmsVersion;

    #[derive(Debug, Default)]
    struct Probe {
        title: Option<String>,
        items: Vec<String>,
        keywords: Vec<String>,
    }

    fn title(node: &Element, _ctx: &Context<'_>) -> Option<String> {
        Some(node.text_content().trim().to_string())
    }

    fn non_empty(node: &Element, _ctx: &Context<'_>) -> Option<String> {
        let text = node.text_content();
        (!text.trim().is_empty()).then(|| text.trim().to_string())
    }

    fn probe_table() -> Table<Probe> {
        Table::new()
            .with("Title", setter(|p: &mut Probe| &mut p.title, title))
            .with("Item", pusher(|p: &mut Probe| &mut p.items, non_empty))
            .with("Keyword", string_pusher(|p: &mut Probe| &mut p.keywords))
    }

    fn decode(node: &Element) -> Probe {
        let ctx = Context::new(WmsVersion::V1_3_0.grammar());
        push_parse_and_pop(Probe::default(), &probe_table(), node, &ctx)
    }

    #[test]
    fn test_replace_keeps_last_value() {
        let node = Element::new("Root")
            .child(Element::new("Title").text("first"))
            .child(Element::new("Title").text(" second "));
        assert_eq!(decode(&node).title.as_deref(), Some("second"));
    }

    #[test]
    fn test_append_preserves_document_order() {
        let node = Element::new("Root")
            .child(Element::new("Item").text("a"))
            .child(Element::new("Keyword").text(" k1 "))
            .child(Element::new("Item").text("b"))
            .child(Element::new("Keyword").text("k2"));
        let probe = decode(&node);
        assert_eq!(probe.items, vec!["a", "b"]);
        assert_eq!(probe.keywords, vec!["k1", "k2"]);
    }

    #[test]
    fn test_absent_result_leaves_accumulator_untouched() {
        let node = Element::new("Root").child(Element::new("Item").text("   "));
        assert!(decode(&node).items.is_empty());
    }

    #[test]
    fn test_unknown_and_foreign_elements_are_skipped() {
        let node = Element::new("Root")
            .child(Element::new("VendorThing").text("x"))
            .child(Element::with_namespace("http://example.com/ext", "Title").text("ext"))
            .child(Element::with_namespace(WMS_NAMESPACE, "Title").text("wms"));
        let probe = decode(&node);
        assert_eq!(probe.title.as_deref(), Some("wms"));
        assert!(probe.items.is_empty());
    }

    #[test]
    fn test_table_reports_policies() {
        let table = probe_table();
        assert_eq!(table.policy("Title"), Some(MergePolicy::Replace));
        assert_eq!(table.policy("Item"), Some(MergePolicy::AppendToSequence));
        assert_eq!(table.policy("Keyword"), Some(MergePolicy::AppendToStringList));
        assert_eq!(table.policy("Other"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_context_stack() {
        let ctx = Context::new(WmsVersion::V1_1_1.grammar());
        assert!(ctx.parent_layer().is_none());

        let layer = Layer {
            name: Some("parent".to_string()),
            ..Default::default()
        };
        let with_layer = ctx.push(Frame::Layer(&layer));
        let element = with_layer.push(Frame::Element("Layer"));
        assert_eq!(element.depth(), 2);
        assert_eq!(
            element.parent_layer().and_then(|l| l.name.as_deref()),
            Some("parent")
        );
    }
}
