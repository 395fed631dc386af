//! Ancestor-gated filtering.
//!
//! A rule survives the filter only if it was asked for and its parent survived
//! too. The requested names only decide membership; the order in which they are
//! given does not matter.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::rule::Rule;

/// Selects the rules named in `names` whose whole ancestor chain is also
/// selected.
///
/// Rules are evaluated shallowest first, keeping declaration order among rules
/// of equal depth, so a parent is always decided before its children. The
/// returned rules share their allocation with `rules`.
pub(crate) fn ancestor_gated<S: AsRef<str>>(rules: &[Arc<Rule>], names: &[S]) -> Vec<Arc<Rule>> {
    let requested: HashSet<&str> = names.iter().map(S::as_ref).collect();

    let mut pre_allowed: Vec<&Arc<Rule>> = rules
        .iter()
        .filter(|rule| requested.contains(rule.name()))
        .collect();
    pre_allowed.sort_by_key(|rule| rule.depth());

    let mut post_allowed: HashSet<&str> = HashSet::new();
    let mut accepted = Vec::with_capacity(pre_allowed.len());

    for rule in pre_allowed {
        if let Some(parent) = rule.parent_name() {
            if !post_allowed.contains(parent) {
                debug!(
                    rule = rule.name(),
                    parent, "dropping rule whose parent was not granted"
                );
                continue;
            }
        }

        post_allowed.insert(rule.name());
        accepted.push(Arc::clone(rule));
    }

    trace!(
        requested = requested.len(),
        accepted = accepted.len(),
        "filtered rules by granted names"
    );

    accepted
}
