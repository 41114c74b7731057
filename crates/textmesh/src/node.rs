//! Tag nodes and the forest that owns them.
//!
//! Nodes live in a flat arena owned by [`Forest`] and refer to each other by
//! [`NodeId`]. Children are owned top-down through the arena; the `parent`
//! handle is a plain index used for upward lookups only.

use std::ops::Range;

use once_cell::unsync::OnceCell;

use crate::catalog::Tag;
use crate::parser::scanner::{Attributes, VALUE_KEY};

/// Handle to a node inside a [`Forest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a node was finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Closing {
    /// A matching `</name>` was found.
    Explicit,
    /// The tag has no body.
    SelfClosing,
    /// Force-closed by a line break.
    LineBreak,
    /// Still open when the input ended.
    EndOfInput,
}

/// A matched tag span over the original input.
#[derive(Debug)]
pub struct TagNode<'a> {
    pub(crate) tag: Tag,
    pub(crate) attributes: Attributes<'a>,
    pub(crate) open_start: usize,
    pub(crate) open_end: usize,
    pub(crate) close_start: usize,
    pub(crate) close_end: usize,
    pub(crate) closing: Closing,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Child-rendered content, written once during rendering.
    pub(crate) content: OnceCell<String>,
}

impl<'a> TagNode<'a> {
    /// A node whose closing offsets are provisional until the builder
    /// finalizes it.
    pub(crate) fn open(
        tag: Tag,
        attributes: Attributes<'a>,
        start: usize,
        end: usize,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            tag,
            attributes,
            open_start: start,
            open_end: end,
            close_start: end,
            close_end: end,
            closing: Closing::EndOfInput,
            parent,
            children: Vec::new(),
            content: OnceCell::new(),
        }
    }

    pub(crate) fn close(&mut self, start: usize, end: usize, closing: Closing) {
        self.close_start = start;
        self.close_end = end;
        self.closing = closing;
    }
}

/// The ordered collection of top-level tag nodes parsed from one input.
#[derive(Debug)]
pub struct Forest<'a> {
    pub(crate) input: &'a str,
    pub(crate) nodes: Vec<TagNode<'a>>,
    pub(crate) roots: Vec<NodeId>,
}

impl<'a> Forest<'a> {
    /// The input this forest was parsed from.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = NodeRef<'_, 'a>> + '_ {
        self.roots.iter().map(move |&id| NodeRef { forest: self, id })
    }

    /// Total number of nodes, nested ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, 'a>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { forest: self, id })
    }

    /// Every node ordered by opening offset.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = NodeRef<'_, 'a>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            forest: self,
            id: NodeId(i),
        })
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> NodeRef<'_, 'a> {
        NodeRef { forest: self, id }
    }

    pub(crate) fn node(&self, id: NodeId) -> &TagNode<'a> {
        &self.nodes[id.0]
    }
}

/// Borrowed view of a node, handed to render callbacks.
#[derive(Clone, Copy)]
pub struct NodeRef<'f, 'a> {
    forest: &'f Forest<'a>,
    id: NodeId,
}

impl<'f, 'a> NodeRef<'f, 'a> {
    fn node(&self) -> &'f TagNode<'a> {
        self.forest.node(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> Tag {
        self.node().tag
    }

    pub fn attributes(&self) -> &'f Attributes<'a> {
        &self.node().attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node().attributes.get(name).copied()
    }

    /// The `value` of `<name=value>`, or the hex code of `<#rrggbb>`.
    pub fn value(&self) -> Option<&'a str> {
        self.attribute(VALUE_KEY)
    }

    /// The opening markup, e.g. `<color=red>`.
    pub fn open_markup(&self) -> &'a str {
        let node = self.node();
        &self.forest.input[node.open_start..node.open_end]
    }

    /// The closing markup, e.g. `</color>`. Empty for synthetic closes.
    pub fn close_markup(&self) -> &'a str {
        let node = self.node();
        &self.forest.input[node.close_start..node.close_end]
    }

    /// Full span, from the opening `<` to the end of the closing markup.
    pub fn span(&self) -> Range<usize> {
        let node = self.node();
        node.open_start..node.close_end
    }

    /// Range between the opening and the closing markup.
    pub fn content_range(&self) -> Range<usize> {
        let node = self.node();
        node.open_end..node.close_start
    }

    /// Content as written in the input, markup of children included.
    pub fn original_content(&self) -> &'a str {
        &self.forest.input[self.content_range()]
    }

    /// Content after every child has been rendered, if this node has been
    /// rendered already.
    pub fn rendered_content(&self) -> Option<&'f str> {
        self.node().content.get().map(String::as_str)
    }

    pub fn closing(&self) -> Closing {
        self.node().closing
    }

    pub fn parent(&self) -> Option<NodeRef<'f, 'a>> {
        self.node().parent.map(|id| NodeRef {
            forest: self.forest,
            id,
        })
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'f, 'a>> + 'f {
        let forest = self.forest;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { forest, id })
    }

    /// Ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'f, 'a>> {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// Number of ancestors; roots have depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Whether any ancestor is a `tag`.
    pub fn is_wrapped_by(&self, tag: Tag) -> bool {
        self.ancestors().any(|ancestor| ancestor.tag() == tag)
    }
}

impl std::fmt::Debug for NodeRef<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("span", &self.span())
            .field("closing", &self.closing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Forest;
    use crate::catalog::Tag;

    use super::Closing;

    #[test]
    fn node_ref_markup_and_ranges() {
        let forest = Forest::parse("x<color=red>ab</color>y");
        let node = forest.roots().next().unwrap();
        assert_eq!(node.open_markup(), "<color=red>");
        assert_eq!(node.close_markup(), "</color>");
        assert_eq!(node.span(), 1..22);
        assert_eq!(node.content_range(), 12..14);
        assert_eq!(node.original_content(), "ab");
        assert_eq!(node.closing(), Closing::Explicit);
        assert_eq!(node.value(), Some("red"));
        assert!(node.rendered_content().is_none());
    }

    #[test]
    fn ancestors_and_wrapping() {
        let forest = Forest::parse("<b><i><u>x</u></i></b>");
        let u = forest.iter().find(|n| n.tag() == Tag::Underline).unwrap();
        let tags: Vec<_> = u.ancestors().map(|n| n.tag()).collect();
        assert_eq!(tags, vec![Tag::Italic, Tag::Bold]);
        assert_eq!(u.depth(), 2);
        assert!(u.is_wrapped_by(Tag::Bold));
        assert!(!u.is_wrapped_by(Tag::Color));
        assert!(!u.is_wrapped_by(Tag::Underline));
    }

    #[test]
    fn get_out_of_range() {
        let forest = Forest::parse("<b>x</b>");
        assert_eq!(forest.len(), 1);
        assert!(forest.get(super::NodeId(0)).is_some());
        assert!(forest.get(super::NodeId(1)).is_none());
    }

    #[test]
    fn iter_is_document_order() {
        let forest = Forest::parse("<b>1<i>2</i></b><u>3</u>");
        let tags: Vec<_> = forest.iter().map(|n| n.tag()).collect();
        assert_eq!(tags, vec![Tag::Bold, Tag::Italic, Tag::Underline]);
    }
}
