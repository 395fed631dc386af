//! Loading a rule schema from a JSON file.
//!
//! A schema is a JSON array of rule objects:
//!
//! ```json
//! [
//!     { "name": "users", "title": "Users" },
//!     { "name": "users.remove", "description": "Remove a user" },
//!     { "name": "users.remove.administrator", "payload": { "audit": true } }
//! ]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use permtree::{Registry, Rule};
use tracing::{info, warn};

use crate::error::CliError;

/// Reads and parses the schema at `path`.
pub fn load(path: &Path) -> Result<Registry, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let registry = parse(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rules = registry.len(), "loaded rule schema");
    Ok(registry)
}

/// Parses a schema document, warning about rules that will never be shown or
/// granted as expected.
pub fn parse(contents: &str) -> Result<Registry, serde_json::Error> {
    let rules: Vec<Rule> = serde_json::from_str(contents)?;
    let registry: Registry = rules.into_iter().collect();

    let mut seen = HashSet::new();
    for rule in &registry {
        if !seen.insert(rule.name()) {
            warn!(rule = rule.name(), "rule declared more than once");
        }
    }

    let reachable = registry.all().len();
    if reachable < registry.len() {
        warn!(
            unreachable = registry.len() - reachable,
            "some rules have no declared top-level ancestor and will be hidden"
        );
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_schema() {
        let registry = parse(
            r#"[
                {"name": "users", "title": "Users"},
                {"name": "users.list"},
                {"name": "users.remove", "payload": {"audit": true}}
            ]"#,
        )
        .unwrap();

        assert_eq!(registry.names(), ["users", "users.list", "users.remove"]);
        assert_eq!(registry.get("users").and_then(Rule::title), Some("Users"));
        assert_eq!(
            registry.get("users.remove").and_then(|rule| rule.payload_value("audit")),
            Some(&json!(true))
        );
    }

    #[test]
    fn test_parse_keeps_duplicates_and_orphans() {
        let registry = parse(r#"[{"name": "a"}, {"name": "a"}, {"name": "b.c"}]"#).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), ["a", "a"]);
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        assert!(parse(r#"[{"title": "No name"}]"#).is_err());
        assert!(parse(r#"{"name": "users"}"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/permtree/schema.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
