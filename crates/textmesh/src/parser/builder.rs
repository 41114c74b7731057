//! Tree builder.
//!
//! Consumes the scanner's tokens and pairs opening and closing tags with an
//! explicit stack. Recovery is silent: mismatched closers are dropped, tags
//! never span a line break, and whatever is still open at the end of input is
//! closed there.

use crate::catalog::Tag;
use crate::node::{Closing, Forest, NodeId, TagNode};
use crate::options::ParseOptions;

use super::scanner::{CloseTag, OpenTag, Scanner, Token};

/// Builds a [`Forest`] from a token stream.
pub struct TreeBuilder<'a> {
    input: &'a str,
    options: ParseOptions,
    nodes: Vec<TagNode<'a>>,
    roots: Vec<NodeId>,
    /// Nodes that have been opened but not closed, innermost last.
    open: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            input,
            options,
            nodes: Vec::new(),
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Number of currently open tags.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether the innermost open tag is a `<noparse>` being honored.
    fn in_noparse(&self) -> bool {
        self.options.noparse
            && self
                .open
                .last()
                .is_some_and(|&id| self.nodes[id.0].tag == Tag::NoParse)
    }

    /// Feed one token.
    pub fn process(&mut self, token: Token<'a>) {
        match token {
            Token::Open(open) => self.process_open(open),
            Token::Close(close) => self.process_close(close),
            Token::Newline { offset } => {
                self.close_all(offset, Closing::LineBreak);
            }
            Token::Noop { .. } => {}
            Token::EndOfInput => {
                self.close_all(self.input.len(), Closing::EndOfInput);
            }
        }
    }

    fn process_open(&mut self, open: OpenTag<'a>) {
        if self.in_noparse() {
            log::trace!("ignoring {} inside noparse at {}", open.raw, open.start);
            return;
        }
        // Self-closing tags never deepen the stack, so the limit skips them.
        if !open.tag.is_self_closing() && !self.options.allows_depth(self.open.len()) {
            log::debug!("ignoring {} at {}: depth limit reached", open.raw, open.start);
            return;
        }

        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(TagNode::open(
            open.tag,
            open.attributes,
            open.start,
            open.end,
            parent,
        ));

        if open.tag.is_self_closing() {
            self.finalize(id, open.end, open.end, Closing::SelfClosing);
        } else {
            self.open.push(id);
        }
    }

    fn process_close(&mut self, close: CloseTag<'a>) {
        let Some(&top) = self.open.last() else {
            log::debug!("discarding {} at {}: nothing open", close.raw, close.start);
            return;
        };

        let top_tag = self.nodes[top.0].tag;
        if top_tag != close.tag {
            if self.in_noparse() {
                log::trace!("ignoring {} inside noparse at {}", close.raw, close.start);
            } else {
                log::debug!(
                    "discarding {} at {}: innermost open tag is {}",
                    close.raw,
                    close.start,
                    top_tag
                );
            }
            return;
        }

        self.open.pop();
        self.finalize(top, close.start, close.end, Closing::Explicit);
    }

    /// Close every open node, innermost first, at `offset`.
    fn close_all(&mut self, offset: usize, closing: Closing) {
        while let Some(id) = self.open.pop() {
            log::debug!(
                "closing {} from {} at {offset} ({closing:?})",
                self.nodes[id.0].tag,
                self.nodes[id.0].open_start
            );
            self.finalize(id, offset, offset, closing);
        }
    }

    /// Record the closing offsets of `id` and attach it to the node now on
    /// top of the stack, or to the roots.
    fn finalize(&mut self, id: NodeId, start: usize, end: usize, closing: Closing) {
        self.nodes[id.0].close(start, end, closing);
        match self.open.last() {
            Some(&parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
    }

    /// Close whatever is still open and hand over the forest.
    pub fn finish(mut self) -> Forest<'a> {
        self.process(Token::EndOfInput);
        log::debug!(
            "built forest: {} nodes, {} roots",
            self.nodes.len(),
            self.roots.len()
        );
        Forest {
            input: self.input,
            nodes: self.nodes,
            roots: self.roots,
        }
    }
}

impl<'a> Forest<'a> {
    /// Parse `input` with the default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use textmesh::{Forest, Tag};
    ///
    /// let forest = Forest::parse("<color=red>a <b>b</b></color>");
    /// let root = forest.roots().next().unwrap();
    /// assert_eq!(root.tag(), Tag::Color);
    /// assert_eq!(root.children().len(), 1);
    /// ```
    pub fn parse(input: &'a str) -> Self {
        Self::parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with(input: &'a str, options: &ParseOptions) -> Self {
        let mut builder = TreeBuilder::new(input, options.clone());
        for token in Scanner::new(input) {
            builder.process(token);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(forest: &Forest<'_>) -> Vec<(Tag, usize, std::ops::Range<usize>, Closing)> {
        forest
            .iter()
            .map(|n| (n.tag(), n.depth(), n.span(), n.closing()))
            .collect()
    }

    #[test]
    fn nested_tags() {
        let forest = Forest::parse("<b><i>x</i></b>");
        assert_eq!(
            shape(&forest),
            vec![
                (Tag::Bold, 0, 0..15, Closing::Explicit),
                (Tag::Italic, 1, 3..11, Closing::Explicit),
            ]
        );
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn siblings_keep_document_order() {
        let forest = Forest::parse("<b><i>1</i><u>2</u></b>");
        let root = forest.roots().next().unwrap();
        let children: Vec<_> = root.children().map(|n| n.tag()).collect();
        assert_eq!(children, vec![Tag::Italic, Tag::Underline]);
    }

    #[test]
    fn unclosed_tags_close_at_end_of_input() {
        let forest = Forest::parse("<b>x<i>y");
        assert_eq!(
            shape(&forest),
            vec![
                (Tag::Bold, 0, 0..8, Closing::EndOfInput),
                (Tag::Italic, 1, 4..8, Closing::EndOfInput),
            ]
        );
    }

    #[test]
    fn mismatched_closer_is_discarded() {
        let forest = Forest::parse("<color><b>text</color>");
        assert_eq!(
            shape(&forest),
            vec![
                (Tag::Color, 0, 0..22, Closing::EndOfInput),
                (Tag::Bold, 1, 7..22, Closing::EndOfInput),
            ]
        );
    }

    #[test]
    fn stray_closer_with_empty_stack() {
        let forest = Forest::parse("x</b>y");
        assert!(forest.is_empty());
        assert_eq!(forest.roots().len(), 0);
    }

    #[test]
    fn self_closing_tag_has_empty_body() {
        let forest = Forest::parse("a<page>b");
        let page = forest.roots().next().unwrap();
        assert_eq!(page.closing(), Closing::SelfClosing);
        assert_eq!(page.span(), 1..7);
        assert_eq!(page.content_range(), 7..7);
        assert_eq!(page.close_markup(), "");
    }

    #[test]
    fn self_closing_tag_attaches_to_parent() {
        let forest = Forest::parse("<b>x<space=5em>y</b>");
        let root = forest.roots().next().unwrap();
        let child = root.children().next().unwrap();
        assert_eq!(child.tag(), Tag::Space);
        assert_eq!(child.value(), Some("5em"));
        assert_eq!(root.closing(), Closing::Explicit);
    }

    #[test]
    fn line_break_closes_open_tags() {
        let forest = Forest::parse("<b><i>x\ny</i></b>");
        assert_eq!(
            shape(&forest),
            vec![
                (Tag::Bold, 0, 0..7, Closing::LineBreak),
                (Tag::Italic, 1, 3..7, Closing::LineBreak),
            ]
        );
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn mismatched_closer_then_line_break() {
        let forest = Forest::parse("<b>x</i>\ny");
        let b = forest.roots().next().unwrap();
        assert_eq!(b.closing(), Closing::LineBreak);
        assert_eq!(b.original_content(), "x</i>");
    }

    #[test]
    fn noparse_suppresses_inner_tags() {
        let forest = Forest::parse("<noparse><b>x</b></noparse>");
        assert_eq!(forest.len(), 1);
        let root = forest.roots().next().unwrap();
        assert_eq!(root.tag(), Tag::NoParse);
        assert_eq!(root.original_content(), "<b>x</b>");
        assert_eq!(root.closing(), Closing::Explicit);
    }

    #[test]
    fn noparse_disabled() {
        let options = ParseOptions::default().with_noparse(false);
        let forest = Forest::parse_with("<noparse><b>x</b></noparse>", &options);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn depth_limit_ignores_deep_tags() {
        let options = ParseOptions::default().with_max_depth(1);
        let forest = Forest::parse_with("<b><i>x</i></b>", &options);
        assert_eq!(forest.len(), 1);
        let root = forest.roots().next().unwrap();
        assert_eq!(root.closing(), Closing::Explicit);
        assert_eq!(root.original_content(), "<i>x</i>");
    }

    #[test]
    fn depth_limit_still_admits_self_closing_tags() {
        let options = ParseOptions::default().with_max_depth(1);
        let forest = Forest::parse_with("<b><page>x<i>y</i></b>", &options);
        let tags: Vec<_> = forest.iter().map(|n| n.tag()).collect();
        assert_eq!(tags, vec![Tag::Bold, Tag::Page]);
        let page = forest.iter().nth(1).unwrap();
        assert_eq!(page.closing(), Closing::SelfClosing);
        assert_eq!(page.parent().map(|p| p.tag()), Some(Tag::Bold));
    }

    #[test]
    fn builder_tracks_depth() {
        let mut builder = TreeBuilder::new("<b><i>", ParseOptions::default());
        for token in Scanner::new("<b><i>") {
            builder.process(token);
        }
        assert_eq!(builder.depth(), 2);
        let forest = builder.finish();
        assert_eq!(forest.len(), 2);
    }
}
