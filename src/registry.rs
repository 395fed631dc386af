use std::sync::Arc;

use serde_json::Value;

use crate::grant;
use crate::hierarchy;
use crate::path;
use crate::rule::Rule;

/// Iterator over the rules of a [`Registry`] in insertion order.
pub type Iter<'a> = std::iter::Map<std::slice::Iter<'a, Arc<Rule>>, fn(&'a Arc<Rule>) -> &'a Rule>;

/// A registry is an insertion-ordered collection of rules.
///
/// The registry never rejects or deduplicates rules: names are taken as given
/// and a name may be declared more than once. Lookups by name return the first
/// declaration.
///
/// Rules are reference counted, so the registries derived with
/// [`Registry::only`] share them with the registry they came from.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: Vec<Arc<Rule>>,
}

impl Registry {
    /// Creates a new registry holding the given rules, in order.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::{Registry, Rule};
    ///
    /// let registry = Registry::new(vec![
    ///     Rule::new("users"),
    ///     Rule::new("users.list"),
    /// ]);
    /// assert!(registry.has("users.list"));
    /// ```
    pub fn new(rules: Vec<Rule>) -> Self {
        rules.into_iter().collect()
    }

    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(Arc::new(rule));
    }

    /// Builds a rule from its raw fields and appends it.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::Registry;
    /// use serde_json::json;
    ///
    /// let mut registry = Registry::empty();
    /// registry.add_parts(
    ///     "users.remove.administrator",
    ///     Some("Remove administrators".into()),
    ///     None,
    ///     Some(json!({"audit": true})),
    /// );
    ///
    /// let rule = registry.get("users.remove.administrator").unwrap();
    /// assert_eq!(rule.title(), Some("Remove administrators"));
    /// ```
    pub fn add_parts(
        &mut self,
        name: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        payload: Option<Value>,
    ) {
        self.add(Rule::from_parts(name, title, description, payload));
    }

    /// Returns the number of stored rules, counting duplicates and rules that
    /// are unreachable in hierarchy order.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the stored rules in insertion order, with nothing filtered out.
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    /// Iterates over the stored rules in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        let unwrap: fn(&Arc<Rule>) -> &Rule = |rule| &**rule;
        self.rules.iter().map(unwrap)
    }

    /// Returns the first rule declared with exactly this name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.iter().find(|rule| rule.name() == name)
    }

    /// Checks whether a rule with this name was declared.
    ///
    /// Being declared does not mean being reachable: see [`Registry::all`].
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Checks whether every name was declared. True for no names.
    pub fn has_all<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().all(|name| self.has(name.as_ref()))
    }

    /// Checks whether at least one name was declared. False for no names.
    pub fn has_one<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().any(|name| self.has(name.as_ref()))
    }

    /// Checks whether a declared rule has at least one declared descendant.
    ///
    /// Useful when a rule only groups other rules and makes no sense enabled
    /// on its own. Returns false when `name` is not declared.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::{Registry, Rule};
    ///
    /// let registry = Registry::new(vec![
    ///     Rule::new("users"),
    ///     Rule::new("users.remove"),
    ///     Rule::new("users.remove.administrator"),
    /// ]);
    ///
    /// assert!(registry.has_children("users"));
    /// assert!(registry.has_children("users.remove"));
    /// assert!(!registry.has_children("users.remove.administrator"));
    /// assert!(!registry.has_children("unknown"));
    /// ```
    pub fn has_children(&self, name: &str) -> bool {
        let Some(current) = self.get(name) else {
            return false;
        };

        let depth = current.depth();
        self.iter()
            .any(|rule| path::has_prefix(rule.name(), name) && rule.depth() > depth)
    }

    /// Returns the first declared rule named by `name`'s parent.
    ///
    /// Returns `None` for a top-level name or when the parent is undeclared.
    /// `name` itself need not be declared.
    pub fn parent(&self, name: &str) -> Option<&Rule> {
        self.get(path::parent(name)?)
    }

    /// Returns the declared rules exactly one level below `name`, in insertion
    /// order. Empty when `name` is not declared.
    pub fn children(&self, name: &str) -> Vec<&Rule> {
        if !self.has(name) {
            return Vec::new();
        }

        self.iter()
            .filter(|rule| path::is_child(rule.name(), name))
            .collect()
    }

    /// Returns the rules in hierarchy order.
    ///
    /// Top-level rules appear in insertion order, each immediately followed by
    /// its descendants, depth first. Rules whose ancestors do not lead back to
    /// a declared top-level rule are left out; use [`Registry::rules`] for the
    /// raw declaration list.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::Registry;
    ///
    /// let registry: Registry = ["b", "b.a", "a", "b.b", "b.b.a", "c.a"]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let names: Vec<_> = registry.all().iter().map(|rule| rule.name().to_string()).collect();
    /// assert_eq!(names, ["b", "b.a", "b.b", "b.b.a", "a"]);
    /// assert_eq!(registry.rules().len(), 6);
    /// ```
    pub fn all(&self) -> Vec<Arc<Rule>> {
        hierarchy::canonical_order(&self.rules)
    }

    /// Returns the rule names in hierarchy order.
    pub fn names(&self) -> Vec<String> {
        self.all()
            .iter()
            .map(|rule| rule.name().to_string())
            .collect()
    }

    /// Derives a registry restricted to `names`.
    ///
    /// A rule is kept only if its name is listed and its parent was kept too,
    /// so a child can never be granted without every one of its ancestors.
    /// The order of `names` does not matter. The result can itself be
    /// restricted again, e.g. to compute what a user may delegate to a
    /// sub-user.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::Registry;
    ///
    /// let schema: Registry = ["users", "users.list", "users.remove", "users.remove.administrator"]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert!(schema.only(&["users.remove"]).is_empty());
    /// assert_eq!(schema.only(&["users.remove", "users"]).names(), ["users", "users.remove"]);
    /// ```
    pub fn only<S: AsRef<str>>(&self, names: &[S]) -> Registry {
        Registry {
            rules: grant::ancestor_gated(&self.rules, names),
        }
    }
}

impl FromIterator<Rule> for Registry {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for Registry {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Rule::new).collect()
    }
}

impl Extend<Rule> for Registry {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter.into_iter().map(Arc::new));
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Rule;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
