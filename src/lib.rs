//! Permtree: hierarchical, dot-separated permission rules.
//!
//! A [`Registry`] holds the permission schema of an application as a flat list
//! of [`Rule`]s whose names encode the hierarchy (`users`, `users.remove`,
//! `users.remove.administrator`). The registry answers membership queries,
//! lists rules in hierarchy order, and intersects the schema with the names a
//! principal was granted, keeping a rule only when all of its ancestors were
//! granted too.
//!
//! # Example
//!
//! ```
//! use permtree::{Registry, Rule};
//!
//! let mut schema = Registry::empty();
//! schema.add(Rule::new("users").with_title("Users"));
//! schema.add(Rule::new("users.list"));
//! schema.add(Rule::new("users.remove"));
//! schema.add(Rule::new("users.remove.administrator"));
//!
//! assert!(schema.has("users.remove"));
//! assert!(schema.has_children("users.remove"));
//!
//! // A child is only granted together with its parent.
//! let granted = schema.only(&["users.remove", "users.remove.administrator"]);
//! assert!(granted.is_empty());
//!
//! let granted = schema.only(&["users.remove", "users"]);
//! assert_eq!(granted.names(), ["users", "users.remove"]);
//!
//! // Granted sets can be narrowed again, e.g. for a sub-user.
//! let delegated = granted.only(&["users", "users.remove", "users.remove.administrator"]);
//! assert_eq!(delegated.names(), ["users", "users.remove"]);
//! ```

mod grant;
mod hierarchy;
pub mod path;
mod registry;
mod rule;

pub use registry::{Iter, Registry};
pub use rule::Rule;
