use tracing::warn;

use crate::node::Node;
use crate::path;
use crate::PathError;

/// Resolve a dotted path, reporting why the lookup failed.
///
/// # Errors
///
/// - `PathError::InvalidArgument` - if `root` is falsy or `path` is empty
/// - `PathError::PathBroken` - if a segment is missing along the way
pub fn resolve<'a>(root: &'a Node, path: &str) -> Result<&'a Node, PathError> {
    if root.is_falsy() || path.is_empty() {
        return Err(PathError::InvalidArgument);
    }

    let mut current = root;
    for segment in path::segments(path) {
        // Falsy nodes are scalars, so a broken path always shows up here.
        current = current.child(segment).ok_or_else(|| PathError::PathBroken {
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

/// Get the value at a dotted path.
///
/// Returns `None` if the path does not fully resolve. Calling it with a falsy
/// root or an empty path also returns `None` and emits a warning.
///
/// # Example
///
/// ```
/// use json_utils::{get, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": {"b1": 2}, "c": [0]}));
/// assert_eq!(get(&doc, "a.b1"), Some(&Node::from(2i64)));
/// assert_eq!(get(&doc, "c.0"), Some(&Node::from(0i64)));
/// assert_eq!(get(&doc, "a.b2"), None);
/// ```
pub fn get<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    match resolve(root, path) {
        Ok(found) => Some(found),
        Err(PathError::InvalidArgument) => {
            warn!(target: "json_utils", path, "Invalid path.");
            None
        }
        Err(_) => None,
    }
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(root: &'a mut Node, path: &str) -> Option<&'a mut Node> {
    if root.is_falsy() || path.is_empty() {
        warn!(target: "json_utils", path, "Invalid path.");
        return None;
    }

    let mut current = root;
    for segment in path::segments(path) {
        current = current.child_mut(segment)?;
    }
    Some(current)
}
