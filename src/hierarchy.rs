//! Canonical hierarchy ordering.
//!
//! Rules are stored flat, in insertion order. The canonical order walks them as
//! an implicit tree: every top-level rule (in insertion order) followed by its
//! descendants, depth first. Parent/child links are never stored; a rule is a
//! child of a base when its name extends the base name by one segment.

use std::sync::Arc;

use tracing::trace;

use crate::path;
use crate::rule::Rule;

/// Returns the rules in canonical hierarchy order.
///
/// Rules whose ancestor chain does not reach a declared top-level rule are left
/// out, and every stored entry is emitted at most once.
pub(crate) fn canonical_order(rules: &[Arc<Rule>]) -> Vec<Arc<Rule>> {
    let mut unplaced = vec![true; rules.len()];
    let mut ordered = Vec::with_capacity(rules.len());

    for (index, rule) in rules.iter().enumerate() {
        if rule.depth() == 0 && unplaced[index] {
            unplaced[index] = false;
            place(rules, &mut unplaced, &mut ordered, index);
        }
    }

    if ordered.len() < rules.len() {
        trace!(
            unreachable = rules.len() - ordered.len(),
            "rules without a top-level ancestor left out of hierarchy order"
        );
    }

    ordered
}

/// Emits `rules[base]`, then each of its unplaced children (in insertion
/// order) together with their own subtrees.
fn place(
    rules: &[Arc<Rule>],
    unplaced: &mut [bool],
    ordered: &mut Vec<Arc<Rule>>,
    base: usize,
) {
    let base_rule = &rules[base];
    ordered.push(Arc::clone(base_rule));

    let child_depth = base_rule.depth() + 1;

    for index in 0..rules.len() {
        if !unplaced[index] {
            continue;
        }

        let candidate = &rules[index];
        if candidate.depth() == child_depth && path::has_prefix(candidate.name(), base_rule.name())
        {
            unplaced[index] = false;
            place(rules, unplaced, ordered, index);
        }
    }
}
