use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::filter::Filter;

/// Comparator over sibling names, used to reorder a directory listing.
pub type OrderFn = dyn Fn(&OsStr, &OsStr) -> Ordering + Send + Sync;

/// Which traversal algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Every entry at depth N is emitted before any entry at depth N+1.
    #[default]
    Bfs,

    /// Post-order: every entry is emitted before its parent directory.
    Dfs,
}

/// Validated, immutable configuration for one traversal call.
///
/// Built with [`deepwalk::options()`](crate::options). The default is no
/// filters, breadth-first, and the filesystem's own listing order.
#[derive(Clone, Default)]
pub struct WalkOptions {
    pub(crate) filter: Filter,
    pub(crate) order: Option<Arc<OrderFn>>,
    pub(crate) search_order: SearchOrder,
}

impl WalkOptions {
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn search_order(&self) -> SearchOrder {
        self.search_order
    }

    /// Whether a sibling comparator was configured.
    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    /// Shorthand for `self.filter().passes(path)`.
    pub fn passes(&self, path: &Path) -> bool {
        self.filter.passes(path)
    }

    /// A copy of these options with a different search order.
    pub fn with_search_order(&self, search_order: SearchOrder) -> Self {
        Self {
            search_order,
            ..self.clone()
        }
    }

    /// Reorder a directory listing in place. No-op without a comparator.
    pub(crate) fn sort(&self, names: &mut [OsString]) {
        if let Some(cmp) = &self.order {
            names.sort_by(|a, b| cmp(a, b));
        }
    }
}

impl fmt::Debug for WalkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkOptions")
            .field("filter", &self.filter)
            .field("order", &self.order.as_ref().map(|_| "..."))
            .field("search_order", &self.search_order)
            .finish()
    }
}
