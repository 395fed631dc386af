//! Helpers over dotted rule names.
//!
//! A name like `users.remove.administrator` is read as a path of segments.
//! None of these functions validate the name shape; empty segments are simply
//! counted like any other.

/// Separator between the segments of a rule name.
pub const SEPARATOR: char = '.';

/// Returns the nesting depth of a name: the number of separators in it.
///
/// # Example
///
/// ```
/// use permtree::path::depth;
///
/// assert_eq!(depth("users"), 0);
/// assert_eq!(depth("users.remove.administrator"), 2);
/// ```
pub fn depth(name: &str) -> usize {
    name.matches(SEPARATOR).count()
}

/// Returns the name with its last segment removed, or `None` for a top-level name.
///
/// # Example
///
/// ```
/// use permtree::path::parent;
///
/// assert_eq!(parent("users.remove"), Some("users"));
/// assert_eq!(parent("users"), None);
/// ```
pub fn parent(name: &str) -> Option<&str> {
    name.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Iterates over the proper ancestors of a name, nearest first.
///
/// `a.b.c` yields `a.b`, then `a`.
pub fn ancestors(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(parent(name), |current| parent(*current))
}

/// Checks whether `name` lies under `base`, i.e. starts with `base` followed by
/// a separator. Depth is not considered.
pub fn has_prefix(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Checks whether `name` is a direct structural child of `base`.
pub fn is_child(name: &str, base: &str) -> bool {
    has_prefix(name, base) && depth(name) == depth(base) + 1
}
