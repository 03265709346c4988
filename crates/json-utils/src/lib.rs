//! Dotted-path access to nested JSON-like values.
//!
//! This crate reads and writes [`Node`] trees through paths such as
//! `"a.b.0"`, walks every attribute of a tree, and builds empty-valued mocks
//! that mirror a tree's shape.
//!
//! # Example
//!
//! ```
//! use json_utils::{ensure, get, set, traverse, Node};
//! use serde_json::{json, Value};
//!
//! let mut doc = Node::from(json!({"a": 1, "b": {"b1": "x"}, "c": [2]}));
//!
//! // Read a value
//! assert_eq!(get(&doc, "b.b1"), Some(&Node::from("x")));
//!
//! // Write a value, creating the intermediate mappings
//! set(&mut doc, "d.e", Node::from(true));
//! assert_eq!(get(&doc, "d.e"), Some(&Node::from(true)));
//!
//! // Make sure a path exists
//! ensure(&mut doc, "b.b3.b31");
//! assert_eq!(get(&doc, "b.b3.b31"), Some(&Node::object()));
//!
//! // Visit every attribute
//! let mut paths = Vec::new();
//! traverse(&doc, 1, |visit| paths.push(visit.path.to_string()));
//! assert_eq!(paths, vec!["a", "b", "b.b1", "b.b3", "c", "c.0", "d", "d.e"]);
//!
//! assert_eq!(
//!     Value::from(doc),
//!     json!({"a": 1, "b": {"b1": "x", "b3": {"b31": {}}}, "c": [2], "d": {"e": true}})
//! );
//! ```
//!
//! All operations are synchronous and keep no state between calls. `set`,
//! `ensure` and `traverse_mut` mutate the structure passed in and hand it
//! back for chaining.

use thiserror::Error;

pub mod get;
pub mod mock;
pub mod node;
pub mod path;
pub mod set;
pub mod traverse;

pub use get::{get, get_mut, resolve};
pub use mock::{create_mock, mock_value, MockSource, Prototype};
pub use node::{Callable, Node, Object};
pub use set::{ensure, set, set_with, try_set, SetOptions};
pub use traverse::{
    traverse, traverse_mut, traverse_with, try_traverse, try_traverse_mut, TraverseOptions, Visit,
    VisitMut,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The root is absent or the path is empty.
    #[error("Invalid path.")]
    InvalidArgument,
    /// A segment could not be resolved or written.
    #[error("path broken at segment `{segment}`")]
    PathBroken { segment: String },
    /// Traversal needs a mapping or sequence at the root.
    #[error("root is neither a mapping nor a sequence")]
    UnsupportedRootType,
}
