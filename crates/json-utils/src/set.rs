use tracing::debug;

use crate::node::Node;
use crate::path;
use crate::PathError;

/// Options for [`set_with`] and [`try_set`].
#[derive(Debug, Clone)]
pub struct SetOptions {
    /// If true, missing intermediate containers are created as empty
    /// mappings. If false, a missing intermediate stops the write.
    pub force: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self { force: true }
    }
}

/// Write `value` at a dotted path, reporting why a write was skipped.
///
/// A `None` value is stored as an empty mapping. An empty `path` leaves
/// `root` untouched; otherwise a falsy `root` is first replaced with an
/// empty mapping. The path is trimmed before it is split.
///
/// # Errors
///
/// - `PathError::PathBroken` - if an intermediate segment is missing and
///   `force` is off, or a segment lands on a scalar or a non-index key of a
///   sequence
pub fn try_set<'a>(
    root: &'a mut Node,
    path: &str,
    value: Option<Node>,
    options: &SetOptions,
) -> Result<&'a mut Node, PathError> {
    apply(root, path, value, options)?;
    Ok(root)
}

fn apply(
    root: &mut Node,
    path: &str,
    value: Option<Node>,
    options: &SetOptions,
) -> Result<(), PathError> {
    if path.is_empty() {
        return Ok(());
    }
    if root.is_falsy() {
        *root = Node::object();
    }

    let segments = path::split(path.trim());
    match segments.split_last() {
        Some((last, parents)) => write(root, parents, last, value, options.force),
        None => Ok(()),
    }
}

fn write(
    root: &mut Node,
    parents: &[&str],
    last: &str,
    value: Option<Node>,
    force: bool,
) -> Result<(), PathError> {
    let mut current = root;
    for &segment in parents.iter().filter(|s| !s.is_empty()) {
        let present = current.child(segment).is_some_and(|child| !child.is_falsy());
        if !present {
            if !force {
                return Err(PathError::PathBroken {
                    segment: segment.to_string(),
                });
            }
            current.put(segment, Node::object())?;
        }
        current = current
            .child_mut(segment)
            .ok_or_else(|| PathError::PathBroken {
                segment: segment.to_string(),
            })?;
    }

    if last.is_empty() {
        return Ok(());
    }
    current.put(last, value.unwrap_or_else(Node::object))
}

/// Set a value at a dotted path, creating missing intermediate mappings.
///
/// Mutates `root` in place and returns it for chaining. Passing `None` as
/// the value stores an empty mapping.
///
/// # Example
///
/// ```
/// use json_utils::{set, Node};
/// use serde_json::{json, Value};
///
/// let mut doc = Node::from(json!({"a": {"b1": 2}}));
/// set(&mut doc, "a.b2", Node::from(3i64));
/// assert_eq!(Value::from(doc), json!({"a": {"b1": 2, "b2": 3}}));
/// ```
pub fn set<'a>(root: &'a mut Node, path: &str, value: impl Into<Option<Node>>) -> &'a mut Node {
    set_with(root, path, value, &SetOptions::default())
}

/// [`set`] with explicit options. Writes that cannot complete are skipped
/// silently and leave `root` as it was at the point of the skip.
pub fn set_with<'a>(
    root: &'a mut Node,
    path: &str,
    value: impl Into<Option<Node>>,
    options: &SetOptions,
) -> &'a mut Node {
    if let Err(err) = apply(root, path, value.into(), options) {
        debug!(target: "json_utils", path, error = %err, "Skipped write");
    }
    root
}

/// Make sure every segment of `path` exists.
///
/// The leaf is always replaced with an empty mapping, even when it already
/// holds a value.
pub fn ensure<'a>(root: &'a mut Node, path: &str) -> &'a mut Node {
    set_with(root, path, None, &SetOptions { force: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get::get;
    use serde_json::{json, Value};

    fn doc() -> Node {
        Node::from(json!({"a": 1, "b": {"b1": "x"}, "c": [2]}))
    }

    #[test]
    fn test_set_adds_sibling() {
        let mut doc = doc();
        set(&mut doc, "b.b2", Node::from(3i64));
        assert_eq!(
            Value::from(doc),
            json!({"a": 1, "b": {"b1": "x", "b2": 3}, "c": [2]})
        );
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut doc = Node::object();
        set(&mut doc, "x.y.z", Node::from(true));
        assert_eq!(Value::from(doc), json!({"x": {"y": {"z": true}}}));
    }

    #[test]
    fn test_set_without_force_stops() {
        let mut doc = doc();
        let before = doc.clone();
        set_with(&mut doc, "x.y", Node::from(1i64), &SetOptions { force: false });
        assert_eq!(doc, before);

        let err = try_set(&mut doc, "x.y", Some(Node::from(1i64)), &SetOptions { force: false });
        assert!(matches!(err, Err(PathError::PathBroken { segment }) if segment == "x"));
    }

    #[test]
    fn test_set_without_force_writes_existing_parent() {
        let mut doc = doc();
        set_with(&mut doc, "b.b2", Node::from(5i64), &SetOptions { force: false });
        assert_eq!(get(&doc, "b.b2"), Some(&Node::from(5i64)));
    }

    #[test]
    fn test_set_replaces_falsy_intermediate() {
        let mut doc = Node::from(json!({"a": null, "b": "", "c": false}));
        set(&mut doc, "a.x", Node::from(1i64));
        set(&mut doc, "b.x", Node::from(2i64));
        set(&mut doc, "c.x", Node::from(3i64));
        assert_eq!(
            Value::from(doc),
            json!({"a": {"x": 1}, "b": {"x": 2}, "c": {"x": 3}})
        );
    }

    #[test]
    fn test_set_none_value_stores_empty_object() {
        let mut doc = Node::object();
        set(&mut doc, "a", None);
        assert_eq!(Value::from(doc), json!({"a": {}}));
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let mut doc = Node::Null;
        set(&mut doc, "", Node::from(1i64));
        assert_eq!(doc, Node::Null);
    }

    #[test]
    fn test_set_initializes_falsy_root() {
        let mut doc = Node::Null;
        set(&mut doc, "a", Node::from(1i64));
        assert_eq!(Value::from(doc), json!({"a": 1}));

        // Even a path made only of delimiters initializes the root
        let mut doc = Node::Null;
        set(&mut doc, ".", Node::from(1i64));
        assert_eq!(doc, Node::object());
    }

    #[test]
    fn test_set_empty_last_segment() {
        let mut doc = Node::object();
        set(&mut doc, "a.", Node::from(1i64));
        assert_eq!(Value::from(doc), json!({"a": {}}));
    }

    #[test]
    fn test_set_trims_path() {
        let mut doc = Node::object();
        set(&mut doc, "  a.b ", Node::from(1i64));
        assert_eq!(Value::from(doc), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_into_sequence() {
        let mut doc = doc();
        set(&mut doc, "c.0", Node::from(9i64));
        set(&mut doc, "c.1", Node::from(7i64));
        assert_eq!(get(&doc, "c"), Some(&Node::from(json!([9, 7]))));

        // Gaps are never opened
        set(&mut doc, "c.5", Node::from(1i64));
        set(&mut doc, "c.18446744073709551615", Node::from(1i64));
        assert_eq!(get(&doc, "c"), Some(&Node::from(json!([9, 7]))));

        // A missing slot just past the end becomes a mapping
        set(&mut doc, "c.2.k", Node::from("v"));
        assert_eq!(get(&doc, "c.2"), Some(&Node::from(json!({"k": "v"}))));
    }

    #[test]
    fn test_set_through_scalar_is_skipped() {
        let mut doc = doc();
        let before = doc.clone();
        set(&mut doc, "a.x", Node::from(1i64));
        set(&mut doc, "c.len", Node::from(1i64));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_set_zero_intermediate_is_kept() {
        let mut doc = Node::from(json!({"n": 0}));
        let before = doc.clone();
        // `0` is present, so no mapping is created over it
        set(&mut doc, "n.x", Node::from(1i64));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_set_returns_root_for_chaining() {
        let mut doc = Node::object();
        set(set(&mut doc, "a", Node::from(1i64)), "b", Node::from(2i64));
        assert_eq!(Value::from(doc), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_ensure_creates_path() {
        let mut doc = doc();
        ensure(&mut doc, "b.b3.b31");
        assert_eq!(
            Value::from(doc),
            json!({"a": 1, "b": {"b1": "x", "b3": {"b31": {}}}, "c": [2]})
        );
    }

    #[test]
    fn test_ensure_twice_same_shape() {
        let mut once = doc();
        ensure(&mut once, "b.b3.b31");
        let mut twice = once.clone();
        ensure(&mut twice, "b.b3.b31");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ensure_overwrites_existing_leaf() {
        let mut doc = doc();
        set(&mut doc, "b.b3", Node::from(json!({"keep": 1})));
        ensure(&mut doc, "b.b3");
        assert_eq!(get(&doc, "b.b3"), Some(&Node::object()));

        ensure(&mut doc, "b.b1");
        assert_eq!(get(&doc, "b.b1"), Some(&Node::object()));
    }
}
