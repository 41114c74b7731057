//! Tag catalog.
//!
//! The static table of every tag the scanner recognizes, which of them take a
//! value (`<color=red>`) and which are self-closing (`<page>`). The table is
//! built at compile time and never changes.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use phf::phf_map;

use crate::error::MarkupError;

bitflags! {
    /// Per-tag behavior flags.
    ///
    /// # Example
    ///
    /// ```
    /// use textmesh::catalog::TagFlags;
    /// use textmesh::Tag;
    ///
    /// let flags = Tag::Space.spec().flags;
    /// assert!(flags.contains(TagFlags::ACCEPTS_VALUE));
    /// assert!(flags.contains(TagFlags::SELF_CLOSING));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TagFlags: u8 {
        /// Tag takes a `=value` and an optional attribute list.
        const ACCEPTS_VALUE = 0b0000_0001;
        /// Tag has no body and no closer; it is finalized when opened.
        const SELF_CLOSING  = 0b0000_0010;
    }
}

/// Every tag known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Align,
    Alpha,
    Color,
    Bold,
    Italic,
    CSpace,
    Font,
    Indent,
    LineHeight,
    LineIndent,
    Link,
    Lowercase,
    Uppercase,
    Smallcaps,
    Margin,
    Mark,
    MSpace,
    NoParse,
    NoBr,
    Page,
    Pos,
    Size,
    Space,
    Sprite,
    Strikethrough,
    Underline,
    Style,
    Sub,
    Sup,
    VOffset,
    Width,
}

/// Catalog entry for a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    pub tag: Tag,
    pub flags: TagFlags,
}

impl TagSpec {
    /// Whether the tag takes `=value` and attribute pairs.
    pub fn accepts_value(&self) -> bool {
        self.flags.contains(TagFlags::ACCEPTS_VALUE)
    }

    /// Whether the tag closes itself where it opens.
    pub fn self_closing(&self) -> bool {
        self.flags.contains(TagFlags::SELF_CLOSING)
    }
}

/// Name lookup, keyed by the exact lowercase spelling used in markup.
static TAGS: phf::Map<&'static str, Tag> = phf_map! {
    "align" => Tag::Align,
    "alpha" => Tag::Alpha,
    "color" => Tag::Color,
    "b" => Tag::Bold,
    "i" => Tag::Italic,
    "cspace" => Tag::CSpace,
    "font" => Tag::Font,
    "indent" => Tag::Indent,
    "line-height" => Tag::LineHeight,
    "line-indent" => Tag::LineIndent,
    "link" => Tag::Link,
    "lowercase" => Tag::Lowercase,
    "uppercase" => Tag::Uppercase,
    "smallcaps" => Tag::Smallcaps,
    "margin" => Tag::Margin,
    "mark" => Tag::Mark,
    "mspace" => Tag::MSpace,
    "noparse" => Tag::NoParse,
    "nobr" => Tag::NoBr,
    "page" => Tag::Page,
    "pos" => Tag::Pos,
    "size" => Tag::Size,
    "space" => Tag::Space,
    "sprite" => Tag::Sprite,
    "s" => Tag::Strikethrough,
    "u" => Tag::Underline,
    "style" => Tag::Style,
    "sub" => Tag::Sub,
    "sup" => Tag::Sup,
    "voffset" => Tag::VOffset,
    "width" => Tag::Width,
};

impl Tag {
    /// All tags, in catalog order.
    pub const ALL: [Tag; 31] = [
        Tag::Align,
        Tag::Alpha,
        Tag::Color,
        Tag::Bold,
        Tag::Italic,
        Tag::CSpace,
        Tag::Font,
        Tag::Indent,
        Tag::LineHeight,
        Tag::LineIndent,
        Tag::Link,
        Tag::Lowercase,
        Tag::Uppercase,
        Tag::Smallcaps,
        Tag::Margin,
        Tag::Mark,
        Tag::MSpace,
        Tag::NoParse,
        Tag::NoBr,
        Tag::Page,
        Tag::Pos,
        Tag::Size,
        Tag::Space,
        Tag::Sprite,
        Tag::Strikethrough,
        Tag::Underline,
        Tag::Style,
        Tag::Sub,
        Tag::Sup,
        Tag::VOffset,
        Tag::Width,
    ];

    /// The name as written in markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Align => "align",
            Tag::Alpha => "alpha",
            Tag::Color => "color",
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::CSpace => "cspace",
            Tag::Font => "font",
            Tag::Indent => "indent",
            Tag::LineHeight => "line-height",
            Tag::LineIndent => "line-indent",
            Tag::Link => "link",
            Tag::Lowercase => "lowercase",
            Tag::Uppercase => "uppercase",
            Tag::Smallcaps => "smallcaps",
            Tag::Margin => "margin",
            Tag::Mark => "mark",
            Tag::MSpace => "mspace",
            Tag::NoParse => "noparse",
            Tag::NoBr => "nobr",
            Tag::Page => "page",
            Tag::Pos => "pos",
            Tag::Size => "size",
            Tag::Space => "space",
            Tag::Sprite => "sprite",
            Tag::Strikethrough => "s",
            Tag::Underline => "u",
            Tag::Style => "style",
            Tag::Sub => "sub",
            Tag::Sup => "sup",
            Tag::VOffset => "voffset",
            Tag::Width => "width",
        }
    }

    /// The catalog entry for this tag.
    pub fn spec(self) -> TagSpec {
        let flags = match self {
            Tag::Page => TagFlags::SELF_CLOSING,
            Tag::Pos | Tag::Space => TagFlags::ACCEPTS_VALUE | TagFlags::SELF_CLOSING,
            Tag::Align
            | Tag::Alpha
            | Tag::Color
            | Tag::CSpace
            | Tag::Font
            | Tag::Indent
            | Tag::LineHeight
            | Tag::LineIndent
            | Tag::Link
            | Tag::Margin
            | Tag::Mark
            | Tag::MSpace
            | Tag::Size
            | Tag::Sprite
            | Tag::Style
            | Tag::VOffset
            | Tag::Width => TagFlags::ACCEPTS_VALUE,
            Tag::Bold
            | Tag::Italic
            | Tag::Lowercase
            | Tag::Uppercase
            | Tag::Smallcaps
            | Tag::NoParse
            | Tag::NoBr
            | Tag::Strikethrough
            | Tag::Underline
            | Tag::Sub
            | Tag::Sup => TagFlags::empty(),
        };
        TagSpec { tag: self, flags }
    }

    pub fn accepts_value(self) -> bool {
        self.spec().accepts_value()
    }

    pub fn is_self_closing(self) -> bool {
        self.spec().self_closing()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).ok_or_else(|| MarkupError::UnknownTag(s.to_string()))
    }
}

/// Look up a tag by its markup name.
pub fn lookup(name: &str) -> Option<Tag> {
    TAGS.get(name).copied()
}

/// Whether `name` is in the tag catalog.
pub fn is_known_tag(name: &str) -> bool {
    TAGS.contains_key(name)
}

/// Returns false for unknown names.
pub fn accepts_value(name: &str) -> bool {
    lookup(name).is_some_and(Tag::accepts_value)
}

/// Returns false for unknown names.
pub fn is_self_closing(name: &str) -> bool {
    lookup(name).is_some_and(Tag::is_self_closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_round_trips_through_its_name() {
        for tag in Tag::ALL {
            assert_eq!(lookup(tag.as_str()), Some(tag));
            assert_eq!(tag.as_str().parse::<Tag>(), Ok(tag));
        }
        assert_eq!(TAGS.len(), Tag::ALL.len());
    }

    #[test]
    fn known_tags() {
        assert!(is_known_tag("color"));
        assert!(is_known_tag("line-height"));
        assert!(!is_known_tag("Color"));
        assert!(!is_known_tag("zzz"));
        assert!(!is_known_tag(""));
    }

    #[test]
    fn value_bearing_tags() {
        assert!(accepts_value("color"));
        assert!(accepts_value("sprite"));
        assert!(accepts_value("space"));
        assert!(!accepts_value("b"));
        assert!(!accepts_value("page"));
        assert!(!accepts_value("zzz"));
    }

    #[test]
    fn self_closing_tags() {
        assert!(is_self_closing("page"));
        assert!(is_self_closing("pos"));
        assert!(is_self_closing("space"));
        assert!(!is_self_closing("sprite"));
        assert!(!is_self_closing("b"));
        assert!(!is_self_closing("zzz"));
    }

    #[test]
    fn unknown_tag_error() {
        let err = "blink".parse::<Tag>().unwrap_err();
        assert_eq!(err, MarkupError::UnknownTag("blink".to_string()));
        assert_eq!(err.to_string(), "unknown tag: blink");
    }

    #[test]
    fn display_uses_markup_name() {
        assert_eq!(Tag::Strikethrough.to_string(), "s");
        assert_eq!(Tag::LineIndent.to_string(), "line-indent");
    }
}
