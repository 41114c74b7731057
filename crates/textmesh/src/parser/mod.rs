//! Parser for rich text markup.
//!
//! This module contains the scanner and the tree builder.

mod builder;
pub mod scanner;

pub use builder::TreeBuilder;
pub use scanner::{Attributes, CloseTag, OpenTag, Scanner, Token, VALUE_KEY};
