//! Generic document tree handed to the serializer.
//!
//! Every builder in this crate produces [`Node`] values. A node is a tagged variant over the
//! value kinds a structured document can hold; mappings keep insertion order so the emitted
//! document reads in the order it was assembled. Mapping keys are either strings or unsigned
//! integers, since response status codes are emitted as integer keys.

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::debug;
use serde::ser::{Serialize, Serializer};
use serde_json::Number;
use std::fmt;

/// Insertion-ordered mapping used for every map in the document tree.
pub type Mapping = IndexMap<Key, Node>;

/// Key of a [`Mapping`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A string key such as a path, a method or a field name
    Str(String),
    /// An integer key, used for response status codes
    Int(u64),
}

/// A value in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    /// An empty mapping node.
    pub fn mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// Looks up `key` when this node is a mapping.
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Node> {
        match self {
            Node::Mapping(map) => map.get(&key.into()),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

/// Resolves two values competing for the same key.
///
/// The incoming value replaces the existing one entirely; nothing of the earlier value is
/// carried over. This is the policy for duplicate status codes, schema names, security scheme
/// names, media types and for repeated components entries.
pub fn merge_last_wins(existing: Option<Node>, incoming: Node) -> Node {
    if let Some(previous) = existing {
        debug!("Replacing previous value ({}) under duplicated key", previous.kind());
    }
    incoming
}

/// Inserts `incoming` under `key`, applying [`merge_last_wins`] when the key is already taken.
///
/// A replaced entry keeps its original position in the mapping.
pub fn insert_last_wins<K: Into<Key>>(map: &mut Mapping, key: K, incoming: Node) {
    match map.entry(key.into()) {
        Entry::Occupied(mut entry) => {
            debug!("Key `{}` already present, last value wins", entry.key());
            let existing = std::mem::replace(entry.get_mut(), Node::Null);
            *entry.get_mut() = merge_last_wins(Some(existing), incoming);
        }
        Entry::Vacant(entry) => {
            entry.insert(merge_last_wins(None, incoming));
        }
    }
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<u16> for Key {
    fn from(n: u16) -> Self {
        Key::Int(u64::from(n))
    }
}

impl From<u64> for Key {
    fn from(n: u64) -> Self {
        Key::Int(n)
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

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::String(s.clone())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::Number(Number::from(n))
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<&[String]> for Node {
    fn from(items: &[String]) -> Self {
        Node::Sequence(items.iter().map(Node::from).collect())
    }
}

impl From<&serde_json::Value> for Node {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(n) => Node::Number(n.clone()),
            Value::String(s) => Node::String(s.clone()),
            Value::Array(items) => Node::Sequence(items.iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (Key::from(k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Str(s) => serializer.serialize_str(s),
            Key::Int(n) => serializer.serialize_u64(*n),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Mapping(map) => serializer.collect_map(map),
        }
    }
}
