//! Parser configuration.

/// Options controlling how the tree builder treats the token stream.
///
/// # Examples
///
/// ```
/// use textmesh::ParseOptions;
///
/// let options = ParseOptions::default().with_noparse(false).with_max_depth(8);
/// assert!(!options.noparse);
/// assert_eq!(options.max_depth, Some(8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Honor `<noparse>`: while it is open, every other tag is literal text.
    pub noparse: bool,
    /// Ignore opening tags that would nest deeper than this.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            noparse: true,
            max_depth: None,
        }
    }
}

impl ParseOptions {
    /// Default options: `<noparse>` honored, no depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle whether `<noparse>` suppresses markup inside it.
    pub fn with_noparse(mut self, noparse: bool) -> Self {
        self.noparse = noparse;
        self
    }

    /// Limit the number of nested open tags; deeper tags stay literal.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether an open stack of `depth` entries has room for one more.
    pub(crate) fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}
