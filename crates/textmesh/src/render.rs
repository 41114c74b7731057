//! Bottom-up span renderer.
//!
//! Walks a [`Forest`] children-first. Each node's content is rebuilt from the
//! original input with every child span replaced by that child's rendered
//! text, stored in the node's content cell, and handed to the callback. The
//! callback's result replaces the node's whole span (markup included) in the
//! buffer that owns it: the parent's content, or the output for a root.

use std::convert::Infallible;
use std::slice;

use crate::node::{Forest, NodeId, NodeRef};

/// Renders a forest through a fallible callback.
///
/// The walk keeps its own stack of partially rebuilt nodes, so nesting depth
/// is bounded by memory rather than by the call stack.
pub struct Renderer<'f, 'a, F> {
    forest: &'f Forest<'a>,
    callback: F,
}

/// A range of the input being rebuilt, with the children still to splice in.
struct Frame<'f> {
    children: slice::Iter<'f, NodeId>,
    cursor: usize,
    end: usize,
    buf: String,
}

impl<'f> Frame<'f> {
    fn new(start: usize, end: usize, children: &'f [NodeId]) -> Self {
        let end = end.max(start);
        Self {
            children: children.iter(),
            cursor: start,
            end,
            buf: String::with_capacity(end - start),
        }
    }

    /// Copy input up to `offset`, clamped to what is left of the range.
    fn copy_until(&mut self, input: &str, offset: usize) {
        let stop = offset.clamp(self.cursor, self.end);
        self.buf.push_str(&input[self.cursor..stop]);
        self.cursor = stop;
    }

    /// Splice a rendered child in place of the span ending at `close_end`.
    fn splice(&mut self, rendered: &str, close_end: usize) {
        self.buf.push_str(rendered);
        self.cursor = close_end.clamp(self.cursor, self.end);
    }

    fn finish(mut self, input: &str) -> String {
        self.copy_until(input, self.end);
        self.buf
    }
}

impl<'f, 'a, F> Renderer<'f, 'a, F> {
    /// Pair `forest` with the callback that replaces each node.
    pub fn new(forest: &'f Forest<'a>, callback: F) -> Self {
        Self { forest, callback }
    }

    /// Render the whole input. Stops at the first callback error.
    pub fn render<E>(mut self) -> Result<String, E>
    where
        F: FnMut(NodeRef<'_, 'a>, &str) -> Result<String, E>,
    {
        let forest = self.forest;
        let input = forest.input;
        let mut root = Frame::new(0, input.len(), &forest.roots);
        let mut open: Vec<(NodeId, Frame<'f>)> = Vec::new();

        loop {
            let top = match open.last_mut() {
                Some((_, frame)) => frame,
                None => &mut root,
            };
            if let Some(&child) = top.children.next() {
                let node = forest.node(child);
                top.copy_until(input, node.open_start);
                open.push((child, Frame::new(node.open_end, node.close_start, &node.children)));
                continue;
            }

            let Some((id, frame)) = open.pop() else {
                return Ok(root.finish(input));
            };
            let node = forest.node(id);
            let content = frame.finish(input);
            let content = node.content.get_or_init(|| content);
            let rendered = (self.callback)(forest.node_ref(id), content.as_str())?;

            let owner = match open.last_mut() {
                Some((_, frame)) => frame,
                None => &mut root,
            };
            owner.splice(&rendered, node.close_end);
        }
    }
}

impl<'a> Forest<'a> {
    /// Render with an infallible callback.
    ///
    /// Rendering fills each node's content cell, so a forest is rendered
    /// once; this consumes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use textmesh::{Forest, Tag};
    ///
    /// let forest = Forest::parse("<b>bold</b> text");
    /// let out = forest.render(|node, content| match node.tag() {
    ///     Tag::Bold => format!("[b]{content}[/b]"),
    ///     _ => content.to_string(),
    /// });
    /// assert_eq!(out, "[b]bold[/b] text");
    /// ```
    pub fn render<F>(self, mut callback: F) -> String
    where
        F: FnMut(NodeRef<'_, 'a>, &str) -> String,
    {
        match self.try_render(|node, content| Ok::<_, Infallible>(callback(node, content))) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Render with a fallible callback; the first error is returned as is.
    pub fn try_render<F, E>(self, callback: F) -> Result<String, E>
    where
        F: FnMut(NodeRef<'_, 'a>, &str) -> Result<String, E>,
    {
        Renderer::new(&self, callback).render()
    }
}
