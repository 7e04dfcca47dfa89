use std::path::Path;

use regex::Regex;

/// The exclude/include predicate pair applied to every candidate path.
///
/// Matching is an unanchored regex search over the whole path (lossily
/// converted to UTF-8), not glob matching on the file name. Anchor the
/// pattern yourself when you mean "ends with" or "starts with".
#[derive(Debug, Clone, Default)]
pub struct Filter {
    exclude: Option<Regex>,
    include: Option<Regex>,
}

impl Filter {
    pub fn new(exclude: Option<Regex>, include: Option<Regex>) -> Self {
        Self { exclude, include }
    }

    /// Returns `true` if `path` should be visited.
    ///
    /// Rejected when `exclude` matches, or when `include` is set and does
    /// not match. Everything else passes.
    pub fn passes(&self, path: &Path) -> bool {
        if self.exclude.is_none() && self.include.is_none() {
            return true;
        }

        let path_str = path.to_string_lossy();

        if let Some(re) = &self.exclude {
            if re.is_match(&path_str) {
                return false;
            }
        }

        match &self.include {
            Some(re) => re.is_match(&path_str),
            None => true,
        }
    }

    pub fn exclude(&self) -> Option<&Regex> {
        self.exclude.as_ref()
    }

    pub fn include(&self) -> Option<&Regex> {
        self.include.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_none() && self.include.is_none()
    }
}
