//! Mock generation.
//!
//! A mock has the same attribute shape as its source, with every leaf
//! swapped for an empty stand-in of the same kind.

use crate::node::{Callable, Node};
use crate::set::set;
use crate::traverse::traverse;

/// Anything exposing a set of named attributes to mock.
pub trait MockSource {
    /// The attribute template to walk.
    fn attributes(&self) -> &Node;
}

impl MockSource for Node {
    fn attributes(&self) -> &Node {
        self
    }
}

/// A named, class-like attribute template shared by every instance.
///
/// Mocking a `Prototype` mocks its shared attributes, not the wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    name: String,
    attributes: Node,
}

impl Prototype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Node::object(),
        }
    }

    /// Add a shared attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        if let Node::Object(map) = &mut self.attributes {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Add a shared method.
    pub fn method<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Node]) -> Node + Send + Sync + 'static,
    {
        self.with(key, Callable::new(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl MockSource for Prototype {
    fn attributes(&self) -> &Node {
        &self.attributes
    }
}

/// The stand-in for a single value.
///
/// | source | mock |
/// |---|---|
/// | mapping | `{}` |
/// | callable | fresh no-op callable |
/// | sequence | `[]` |
/// | number | `0` |
/// | string | `""` |
/// | anything else | unchanged |
pub fn mock_value(value: &Node) -> Node {
    match value {
        Node::Object(_) => Node::object(),
        Node::Callable(_) => Node::Callable(Callable::noop()),
        Node::Array(_) => Node::array(),
        Node::Number(_) => Node::from(0i64),
        Node::String(_) => Node::String(String::new()),
        Node::Null | Node::Bool(_) | Node::Binary(_) => value.clone(),
    }
}

/// Build a mock of `source`.
///
/// The source is walked to full depth and each attribute's stand-in is
/// written at the same path in a fresh mapping. A scalar source yields an
/// empty mapping. The source is never modified.
///
/// # Example
///
/// ```
/// use json_utils::{create_mock, Node};
/// use serde_json::{json, Value};
///
/// let source = Node::from(json!({"id": 7, "tags": ["a"], "owner": {"name": "x"}}));
/// let mock = create_mock(&source);
/// assert_eq!(Value::from(mock), json!({"id": 0, "tags": [""], "owner": {"name": ""}}));
/// ```
pub fn create_mock<S>(source: &S) -> Node
where
    S: MockSource + ?Sized,
{
    let mut mock = Node::object();
    traverse(source.attributes(), 0, |visit| {
        set(&mut mock, visit.path, mock_value(visit.value));
    });
    mock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get::get;
    use serde_json::{json, Value};

    #[test]
    fn test_mock_value_table() {
        assert_eq!(mock_value(&Node::from(json!({"a": 1}))), Node::object());
        assert_eq!(mock_value(&Node::from(json!([1, 2]))), Node::array());
        assert_eq!(mock_value(&Node::from(123i64)), Node::from(0i64));
        assert_eq!(mock_value(&Node::from(1.5)), Node::from(0i64));
        assert_eq!(mock_value(&Node::from("abc")), Node::from(""));
        assert_eq!(mock_value(&Node::Null), Node::Null);
        assert_eq!(mock_value(&Node::Bool(true)), Node::Bool(true));
        assert_eq!(mock_value(&Node::binary(vec![1u8])), Node::binary(vec![1u8]));
    }

    #[test]
    fn test_mock_value_fresh_callable() {
        let source = Callable::new(|_| Node::from(1i64));
        let mocked = mock_value(&Node::Callable(source.clone()));
        let mocked = mocked.as_callable().unwrap();
        assert!(!mocked.ptr_eq(&source));
        assert_eq!(mocked.call(&[]), Node::Null);
    }

    #[test]
    fn test_create_mock_prototype() {
        let proto = Prototype::new("TestClass")
            .method("fn1", |_| Node::Null)
            .method("fn2", |_| Node::Null)
            .with("obj1", 123i64)
            .with("obj2", "abc")
            .with("obj3", Node::Null)
            .with("obj4", Node::from(json!({"foo": "bar"})));

        let mock = create_mock(&proto);

        let fn1 = get(&mock, "fn1").and_then(Node::as_callable).unwrap();
        let fn2 = get(&mock, "fn2").and_then(Node::as_callable).unwrap();
        let orig1 = get(proto.attributes(), "fn1").and_then(Node::as_callable).unwrap();
        let orig2 = get(proto.attributes(), "fn2").and_then(Node::as_callable).unwrap();
        assert!(!fn1.ptr_eq(orig1));
        assert!(!fn2.ptr_eq(orig2));

        assert_eq!(get(&mock, "obj1"), Some(&Node::from(0i64)));
        assert_eq!(get(&mock, "obj2"), Some(&Node::from("")));
        assert_eq!(mock.child("obj3"), Some(&Node::Null));
        assert_eq!(get(&mock, "obj4"), Some(&Node::from(json!({"foo": ""}))));
        assert_eq!(proto.name(), "TestClass");
    }

    #[test]
    fn test_create_mock_keeps_sequence_shape() {
        let source = Node::from(json!({"c": [2, "x", {"k": true}]}));
        let mock = create_mock(&source);
        assert_eq!(Value::from(mock), json!({"c": [0, "", {"k": true}]}));
    }

    #[test]
    fn test_create_mock_does_not_touch_source() {
        let source = Node::from(json!({"a": 1, "b": {"b1": "x"}}));
        let before = source.clone();
        let _ = create_mock(&source);
        assert_eq!(source, before);
    }

    #[test]
    fn test_create_mock_scalar_source() {
        assert_eq!(create_mock(&Node::from(5i64)), Node::object());
    }
}
