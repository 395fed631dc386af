use std::hash::{Hash, Hasher};

use serde_json::Value;

use crate::path;

/// A rule names one permission point in a dot-separated hierarchy.
///
/// A rule's identity is its name: two rules with the same name compare equal
/// regardless of title, description or payload. The nesting depth is derived
/// from the name and never stored.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    title: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    description: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    payload: Option<Value>,
}

impl Rule {
    /// Creates a new rule with the given dotted name and no metadata.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::Rule;
    ///
    /// let rule = Rule::new("users.remove.administrator")
    ///     .with_title("Remove administrators");
    /// assert_eq!(rule.depth(), 2);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            payload: None,
        }
    }

    /// Creates a rule from all of its raw fields at once.
    pub fn from_parts(
        name: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        payload: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            title,
            description,
            payload,
        }
    }

    /// Sets the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the display description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches an opaque payload.
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Returns the dotted name of this rule.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the whole payload, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns the nesting depth: `users` is 0, `users.remove.administrator` is 2.
    pub fn depth(&self) -> usize {
        path::depth(&self.name)
    }

    /// Returns the name of the enclosing rule, or `None` at the top level.
    pub fn parent_name(&self) -> Option<&str> {
        path::parent(&self.name)
    }

    /// Checks whether this rule sits exactly one level below `parent`.
    pub fn is_child_of(&self, parent: &Rule) -> bool {
        path::is_child(&self.name, &parent.name)
    }

    /// Reads `key` out of the payload when the payload is a JSON object.
    ///
    /// Returns `None` when there is no payload, the payload is not an object,
    /// or the key is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use permtree::Rule;
    /// use serde_json::json;
    ///
    /// let rule = Rule::new("users").with_payload(json!({"data1": "value1"}));
    /// assert_eq!(rule.payload_value("data1"), Some(&json!("value1")));
    /// assert_eq!(rule.payload_value("data2"), None);
    /// ```
    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.as_ref()?.as_object()?.get(key)
    }

    /// Like [`Rule::payload_value`], falling back to `default` when the key
    /// cannot be read.
    pub fn payload_value_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.payload_value(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Rule::new(name)
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Rule::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_fields() {
        let rule = Rule::from_parts(
            "name",
            Some("title".to_string()),
            Some("description".to_string()),
            Some(json!({"data1": "value1"})),
        );

        assert_eq!(rule.name(), "name");
        assert_eq!(rule.title(), Some("title"));
        assert_eq!(rule.description(), Some("description"));
        assert_eq!(rule.depth(), 0);
        assert_eq!(rule.payload(), Some(&json!({"data1": "value1"})));
    }

    #[test]
    fn test_rule_depth() {
        assert_eq!(Rule::new("a.b").depth(), 1);
        assert_eq!(Rule::new("a.b.c").depth(), 2);
        assert_eq!(Rule::new("a.b.c.d.e.f.g.h.i.j").depth(), 9);
    }

    #[test]
    fn test_payload_value() {
        let rule = Rule::new("name").with_payload(json!({"data1": "value1"}));

        assert_eq!(rule.payload_value("data1"), Some(&json!("value1")));
        assert_eq!(rule.payload_value_or("data1", "other"), json!("value1"));
        assert_eq!(rule.payload_value_or("data2", "value2"), json!("value2"));
    }

    #[test]
    fn test_payload_value_without_object() {
        assert_eq!(Rule::new("a").payload_value("key"), None);
        assert_eq!(Rule::new("a").payload_value_or("key", 7), json!(7));

        let scalar = Rule::new("a").with_payload("opaque");
        assert_eq!(scalar.payload(), Some(&json!("opaque")));
        assert_eq!(scalar.payload_value("key"), None);
        assert_eq!(scalar.payload_value_or("key", false), json!(false));
    }

    #[test]
    fn test_identity_is_name_only() {
        let plain = Rule::new("users.list");
        let titled = Rule::new("users.list")
            .with_title("List users")
            .with_payload(json!({"audit": true}));

        assert_eq!(plain, titled);
        assert_ne!(plain, Rule::new("users.create"));
    }

    #[test]
    fn test_parent_name() {
        assert_eq!(Rule::new("users.remove").parent_name(), Some("users"));
        assert_eq!(Rule::new("users").parent_name(), None);
    }

    #[test]
    fn test_is_child_of() {
        let users = Rule::new("users");
        assert!(Rule::new("users.list").is_child_of(&users));
        assert!(!Rule::new("users.remove.administrator").is_child_of(&users));
        assert!(!Rule::new("view.list").is_child_of(&users));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_optional_fields() {
        let rule: Rule = serde_json::from_value(json!({"name": "users.list"})).unwrap();
        assert_eq!(rule.name(), "users.list");
        assert_eq!(rule.title(), None);
        assert_eq!(rule.payload(), None);

        let rule: Rule = serde_json::from_value(json!({
            "name": "users",
            "title": "Users",
            "payload": {"menu": "admin"}
        }))
        .unwrap();
        assert_eq!(rule.title(), Some("Users"));
        assert_eq!(rule.payload_value("menu"), Some(&json!("admin")));
    }
}
