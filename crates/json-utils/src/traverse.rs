//! Depth-first attribute traversal.
//!
//! Every own key of a mapping or sequence is reported once, parents before
//! their children, in natural order: insertion order for mappings and index
//! order for sequences. Empty containers, binary blobs and other scalars are
//! leaves.
//!
//! Owned [`Node`] trees cannot contain reference cycles, so the walk always
//! terminates.

use crate::node::Node;
use crate::path;
use crate::PathError;

/// One attribute reported by the traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// The mapping or sequence holding the attribute.
    pub parent: &'a Node,
    /// The attribute's own key. Sequence indices are rendered in decimal.
    pub key: &'a str,
    /// Dotted path of the attribute, counted from the root.
    pub path: &'a str,
    /// `0` for top-level keys.
    pub depth: usize,
    pub value: &'a Node,
}

/// One attribute reported by [`traverse_mut`].
///
/// The callback may rewrite `value` in place. Its children are read after
/// the callback returns, so a replaced value is walked in its new shape.
#[derive(Debug)]
pub struct VisitMut<'a> {
    pub key: &'a str,
    pub path: &'a str,
    pub depth: usize,
    pub value: &'a mut Node,
}

/// Options for [`traverse_with`].
#[derive(Debug, Clone, Default)]
pub struct TraverseOptions {
    /// Deepest level to report. `0` means unlimited.
    pub max_depth: usize,
}

/// Walk every attribute of `root`, calling `callback` for each one.
///
/// # Errors
///
/// - `PathError::UnsupportedRootType` - if `root` is not a mapping or a
///   sequence; the callback is never invoked
pub fn try_traverse<'a, F>(
    root: &'a Node,
    options: &TraverseOptions,
    mut callback: F,
) -> Result<&'a Node, PathError>
where
    F: FnMut(Visit<'_>),
{
    if !root.is_container() {
        return Err(PathError::UnsupportedRootType);
    }
    step(root, None, 0, options.max_depth, &mut callback);
    Ok(root)
}

/// [`traverse`] with explicit options.
pub fn traverse_with<'a, F>(root: &'a Node, options: &TraverseOptions, callback: F) -> Option<&'a Node>
where
    F: FnMut(Visit<'_>),
{
    try_traverse(root, options, callback).ok()
}

/// Walk every attribute of `root` down to `max_depth` (`0` for unlimited).
///
/// Returns `root` back, or `None` without calling `callback` when `root` is a
/// scalar.
///
/// # Example
///
/// ```
/// use json_utils::{traverse, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": 1, "b": {"b1": "x"}, "c": [2]}));
/// let mut seen = Vec::new();
/// traverse(&doc, 0, |visit| seen.push((visit.path.to_string(), visit.depth)));
///
/// assert_eq!(seen, vec![
///     ("a".to_string(), 0),
///     ("b".to_string(), 0),
///     ("b.b1".to_string(), 1),
///     ("c".to_string(), 0),
///     ("c.0".to_string(), 1),
/// ]);
/// ```
pub fn traverse<'a, F>(root: &'a Node, max_depth: usize, callback: F) -> Option<&'a Node>
where
    F: FnMut(Visit<'_>),
{
    traverse_with(root, &TraverseOptions { max_depth }, callback)
}

/// Mutable counterpart of [`try_traverse`].
///
/// # Errors
///
/// - `PathError::UnsupportedRootType` - if `root` is not a mapping or a
///   sequence; the callback is never invoked
pub fn try_traverse_mut<'a, F>(
    root: &'a mut Node,
    options: &TraverseOptions,
    mut callback: F,
) -> Result<&'a mut Node, PathError>
where
    F: FnMut(VisitMut<'_>),
{
    if !root.is_container() {
        return Err(PathError::UnsupportedRootType);
    }
    step_mut(root, None, 0, options.max_depth, &mut callback);
    Ok(root)
}

/// Walk every attribute of `root` with write access to each value.
///
/// Visits happen in the same order and honour the same depth limit as
/// [`traverse`]. Keys cannot be added or removed during the walk.
///
/// # Example
///
/// ```
/// use json_utils::{traverse_mut, Node};
/// use serde_json::{json, Value};
///
/// let mut doc = Node::from(json!({"a": 1, "b": {"b1": 2}}));
/// traverse_mut(&mut doc, 0, |visit| {
///     if let Some(n) = visit.value.as_i64() {
///         *visit.value = Node::from(n * 10);
///     }
/// });
/// assert_eq!(Value::from(doc), json!({"a": 10, "b": {"b1": 20}}));
/// ```
pub fn traverse_mut<F>(root: &mut Node, max_depth: usize, callback: F) -> Option<&mut Node>
where
    F: FnMut(VisitMut<'_>),
{
    try_traverse_mut(root, &TraverseOptions { max_depth }, callback).ok()
}

fn step<F>(node: &Node, prefix: Option<&str>, depth: usize, max_depth: usize, callback: &mut F)
where
    F: FnMut(Visit<'_>),
{
    if max_depth != 0 && depth > max_depth {
        return;
    }
    match node {
        Node::Object(map) => {
            for (key, value) in map {
                visit(node, key, value, prefix, depth, max_depth, callback);
            }
        }
        Node::Array(items) => {
            for (idx, value) in items.iter().enumerate() {
                visit(node, &idx.to_string(), value, prefix, depth, max_depth, callback);
            }
        }
        _ => {}
    }
}

fn visit<F>(
    parent: &Node,
    key: &str,
    value: &Node,
    prefix: Option<&str>,
    depth: usize,
    max_depth: usize,
    callback: &mut F,
) where
    F: FnMut(Visit<'_>),
{
    let full_key = path::join(prefix, key);
    callback(Visit {
        parent,
        key,
        path: &full_key,
        depth,
        value,
    });
    if value.is_container() && !value.is_empty() {
        step(value, Some(full_key.as_str()), depth + 1, max_depth, callback);
    }
}

fn step_mut<F>(node: &mut Node, prefix: Option<&str>, depth: usize, max_depth: usize, callback: &mut F)
where
    F: FnMut(VisitMut<'_>),
{
    if max_depth != 0 && depth > max_depth {
        return;
    }
    match node {
        Node::Object(map) => {
            for (key, value) in map.iter_mut() {
                visit_mut(key, value, prefix, depth, max_depth, callback);
            }
        }
        Node::Array(items) => {
            for (idx, value) in items.iter_mut().enumerate() {
                visit_mut(&idx.to_string(), value, prefix, depth, max_depth, callback);
            }
        }
        _ => {}
    }
}

fn visit_mut<F>(
    key: &str,
    value: &mut Node,
    prefix: Option<&str>,
    depth: usize,
    max_depth: usize,
    callback: &mut F,
) where
    F: FnMut(VisitMut<'_>),
{
    let full_key = path::join(prefix, key);
    callback(VisitMut {
        key,
        path: &full_key,
        depth,
        value: &mut *value,
    });
    if value.is_container() && !value.is_empty() {
        step_mut(value, Some(full_key.as_str()), depth + 1, max_depth, callback);
    }
}
