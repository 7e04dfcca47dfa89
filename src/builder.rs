use std::cmp::Ordering;
use std::ffi::OsStr;
use std::sync::Arc;

use regex::Regex;

use crate::error::WalkError;
use crate::filter::Filter;
use crate::options::{OrderFn, SearchOrder, WalkOptions};

// ---------------------------------------------------------------------------
// OptionsBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a traversal.
///
/// Created via [`deepwalk::options()`](crate::options). Configure with
/// chained builder methods, then call [`build()`](OptionsBuilder::build) to
/// compile the patterns into a [`WalkOptions`].
///
/// # Example
///
/// ```rust
/// let opts = deepwalk::options()
///     .exclude("node_modules")
///     .include(r"\.rs$|src$")
///     .order(|a, b| a.cmp(b))
///     .dfs()
///     .build()
///     .unwrap();
///
/// assert_eq!(opts.search_order(), deepwalk::SearchOrder::Dfs);
/// ```
#[derive(Default)]
pub struct OptionsBuilder {
    exclude:      Option<Pattern>,
    include:      Option<Pattern>,
    order:        Option<Arc<OrderFn>>,
    search_order: SearchOrder,
}

/// A pattern as the caller handed it over: raw text is compiled in `build()`.
enum Pattern {
    Raw(String),
    Compiled(Regex),
}

impl Pattern {
    fn compile(self) -> Result<Regex, WalkError> {
        match self {
            Self::Raw(s) => Regex::new(&s).map_err(|e| WalkError::InvalidPattern(e.to_string())),
            Self::Compiled(re) => Ok(re),
        }
    }
}

impl OptionsBuilder {
    // ── Filter ────────────────────────────────────────────────────────────

    /// Skip entries whose path matches `pattern`, and do not descend into
    /// matching directories.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(Pattern::Raw(pattern.into()));
        self
    }

    /// Skip entries whose path does not match `pattern`.
    ///
    /// Applies to directories too: a directory that does not match is
    /// neither emitted nor descended into.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(Pattern::Raw(pattern.into()));
        self
    }

    /// Like [`exclude`](Self::exclude), with an already compiled regex.
    pub fn exclude_regex(mut self, re: Regex) -> Self {
        self.exclude = Some(Pattern::Compiled(re));
        self
    }

    /// Like [`include`](Self::include), with an already compiled regex.
    pub fn include_regex(mut self, re: Regex) -> Self {
        self.include = Some(Pattern::Compiled(re));
        self
    }

    // ── Ordering ──────────────────────────────────────────────────────────

    /// Sort each directory's children with `cmp` before visiting them.
    ///
    /// Only affects order among siblings. Without a comparator, children
    /// are visited in the order the filesystem lists them.
    pub fn order<C>(mut self, cmp: C) -> Self
    where
        C: Fn(&OsStr, &OsStr) -> Ordering + Send + Sync + 'static,
    {
        self.order = Some(Arc::new(cmp));
        self
    }

    pub fn search_order(mut self, order: SearchOrder) -> Self {
        self.search_order = order;
        self
    }

    /// Shorthand for `.search_order(SearchOrder::Bfs)`.
    pub fn bfs(self) -> Self {
        self.search_order(SearchOrder::Bfs)
    }

    /// Shorthand for `.search_order(SearchOrder::Dfs)`.
    pub fn dfs(self) -> Self {
        self.search_order(SearchOrder::Dfs)
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Compile the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidPattern`] if `exclude` or `include` is
    /// not a valid regular expression.
    pub fn build(self) -> Result<WalkOptions, WalkError> {
        let exclude = self.exclude.map(Pattern::compile).transpose()?;
        let include = self.include.map(Pattern::compile).transpose()?;

        Ok(WalkOptions {
            filter:       Filter::new(exclude, include),
            order:        self.order,
            search_order: self.search_order,
        })
    }
}
