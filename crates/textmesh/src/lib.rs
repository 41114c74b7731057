//! Rich text tag parser and span rewriter.
//!
//! This crate parses TextMesh-style rich text, like
//! `<color=red>Hello</color> <b>World</b>`, into a tree of matched tag spans
//! over the original string, then rebuilds the string by handing every span to
//! a callback. It is meant for converting one rich text dialect into another.
//!
//! # Overview
//!
//! - `<b>text</b>` - tag without a value
//! - `<color=red>text</color>` - tag with a value
//! - `<#ff8800>text</color>` - color shorthand
//! - `<font="Noto Sans">text</font>` - quoted value
//! - `<sprite=0 tint=1>` - value plus attributes
//! - `<page>` - self-closing tag
//!
//! Parsing never fails. Unknown or malformed tags stay in the output as
//! literal text, closers that do not match the innermost open tag are
//! dropped, and tags still open at a line break or at the end of input are
//! closed there.
//!
//! # Usage
//!
//! ```
//! use textmesh::{transform, Tag};
//!
//! let out = transform("<color=red>a <b>b</b></color>", |node, content| {
//!     match node.tag() {
//!         Tag::Color => format!("[color={}]{content}[/color]", node.value().unwrap_or("")),
//!         Tag::Bold => format!("[b]{content}[/b]"),
//!         _ => content.to_string(),
//!     }
//! });
//! assert_eq!(out, "[color=red]a [b]b[/b][/color]");
//! ```

pub mod catalog;
pub mod error;
pub mod node;
pub mod options;
pub mod parser;
pub mod render;

pub use catalog::{Tag, TagFlags, TagSpec};
pub use error::MarkupError;
pub use node::{Closing, Forest, NodeId, NodeRef};
pub use options::ParseOptions;
pub use render::Renderer;

/// Transform `input` with the default options.
///
/// The callback is called once per matched tag, innermost first, with the
/// tag's content already rewritten by its children. Its return value replaces
/// the tag's whole span, markup included.
pub fn transform<F>(input: &str, callback: F) -> String
where
    F: FnMut(NodeRef<'_, '_>, &str) -> String,
{
    Transformer::new().transform(input, callback)
}

/// Like [`transform`], but the callback may fail. The first error aborts
/// the traversal and is returned unchanged.
pub fn try_transform<F, E>(input: &str, callback: F) -> Result<String, E>
where
    F: FnMut(NodeRef<'_, '_>, &str) -> Result<String, E>,
{
    Transformer::new().try_transform(input, callback)
}

/// Like [`transform`], threading a mutable context through every callback.
///
/// # Examples
///
/// ```
/// use textmesh::transform_with_context;
///
/// let mut seen = Vec::new();
/// let out = transform_with_context("<b>a</b><i>b</i>", &mut seen, |seen, node, content| {
///     seen.push(node.tag().as_str());
///     content.to_uppercase()
/// });
/// assert_eq!(out, "AB");
/// assert_eq!(seen, ["b", "i"]);
/// ```
pub fn transform_with_context<C, F>(input: &str, context: &mut C, callback: F) -> String
where
    F: FnMut(&mut C, NodeRef<'_, '_>, &str) -> String,
{
    Transformer::new().transform_with_context(input, context, callback)
}

/// A configured transform.
///
/// # Examples
///
/// ```
/// use textmesh::{ParseOptions, Transformer};
///
/// let transformer = Transformer::with_options(ParseOptions::default().with_noparse(false));
/// let out = transformer.transform("<noparse><b>x</b></noparse>", |node, content| {
///     format!("{}({content})", node.tag())
/// });
/// assert_eq!(out, "noparse(b(x))");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Transformer {
    options: ParseOptions,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transformer that parses with `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `input` into a forest without rendering it.
    pub fn parse<'a>(&self, input: &'a str) -> Forest<'a> {
        Forest::parse_with(input, &self.options)
    }

    pub fn transform<F>(&self, input: &str, callback: F) -> String
    where
        F: FnMut(NodeRef<'_, '_>, &str) -> String,
    {
        self.parse(input).render(callback)
    }

    pub fn try_transform<F, E>(&self, input: &str, callback: F) -> Result<String, E>
    where
        F: FnMut(NodeRef<'_, '_>, &str) -> Result<String, E>,
    {
        self.parse(input).try_render(callback)
    }

    pub fn transform_with_context<C, F>(
        &self,
        input: &str,
        context: &mut C,
        mut callback: F,
    ) -> String
    where
        F: FnMut(&mut C, NodeRef<'_, '_>, &str) -> String,
    {
        self.parse(input)
            .render(|node, content| callback(&mut *context, node, content))
    }
}
