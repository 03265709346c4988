//! [`Node`]: the nested value every path operation works on.
//!
//! A node is a keyed mapping, an ordered sequence or a scalar. Scalars cover
//! the JSON primitives plus two opaque kinds: binary blobs and callables.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::path;
use crate::PathError;

/// Insertion-ordered mapping used for object nodes.
pub type Object = IndexMap<String, Node>;

/// A callable reference stored inside a structure.
///
/// Two callables are equal only when they share the same allocation, so a
/// clone compares equal to its source while a freshly built callable never
/// does.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn(&[Node]) -> Node + Send + Sync>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Node]) -> Node + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A callable that ignores its arguments and returns `null`.
    pub fn noop() -> Self {
        Self::new(|_| Node::Null)
    }

    pub fn call(&self, args: &[Node]) -> Node {
        (self.0)(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// A dynamically shaped value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Opaque byte blob. Never descended into by traversal.
    Binary(Vec<u8>),
    Callable(Callable),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    /// An empty mapping.
    pub fn object() -> Self {
        Node::Object(Object::new())
    }

    /// An empty sequence.
    pub fn array() -> Self {
        Node::Array(Vec::new())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Node::Binary(bytes.into())
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Node]) -> Node + Send + Sync + 'static,
    {
        Node::Callable(Callable::new(f))
    }

    /// Whether this node counts as "absent" when walking a path.
    ///
    /// `null`, `false` and the empty string are falsy. Numbers never are:
    /// `0` is a present value.
    pub fn is_falsy(&self) -> bool {
        match self {
            Node::Null | Node::Bool(false) => true,
            Node::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True for mappings and sequences. Binary blobs are not containers.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// Number of own keys for containers, `0` for everything else.
    pub fn len(&self) -> usize {
        match self {
            Node::Object(map) => map.len(),
            Node::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Node::Callable(f) => Some(f),
            _ => None,
        }
    }

    /// Look up a direct child by path segment.
    ///
    /// Sequences accept canonical decimal indices only (`"0"`, `"12"`, not
    /// `"012"`). Scalars have no children.
    pub fn child(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(key),
            Node::Array(items) => items.get(path::parse_index(key)?),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Object(map) => map.get_mut(key),
            Node::Array(items) => items.get_mut(path::parse_index(key)?),
            _ => None,
        }
    }

    /// Write `value` under `key`, replacing whatever was there.
    ///
    /// Sequences accept an existing index or the one just past the end;
    /// any other index fails without touching the sequence.
    pub fn put(&mut self, key: &str, value: Node) -> Result<(), PathError> {
        match self {
            Node::Object(map) => {
                map.insert(key.to_string(), value);
                Ok(())
            }
            Node::Array(items) => {
                let broken = || PathError::PathBroken {
                    segment: key.to_string(),
                };
                let idx = path::parse_index(key).ok_or_else(broken)?;
                match idx.cmp(&items.len()) {
                    Ordering::Less => items[idx] = value,
                    Ordering::Equal => items.push(value),
                    Ordering::Greater => return Err(broken()),
                }
                Ok(())
            }
            _ => Err(PathError::PathBroken {
                segment: key.to_string(),
            }),
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for Value {
    /// Callables have no JSON form and become `null`; binary blobs become
    /// arrays of byte values.
    fn from(node: Node) -> Self {
        match node {
            Node::Null | Node::Callable(_) => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Binary(bytes) => {
                Value::Array(bytes.into_iter().map(|b| Value::Number(b.into())).collect())
            }
            Node::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Object(map) => {
                let mut out = Map::new();
                for (key, val) in map {
                    out.insert(key, Value::from(val));
                }
                Value::Object(out)
            }
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n.into())
    }
}

impl From<f64> for Node {
    /// Non-finite floats have no numeric representation and map to `null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Node::Null, Node::Number)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Callable> for Node {
    fn from(f: Callable) -> Self {
        Node::Callable(f)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Node::Object(map)
    }
}
