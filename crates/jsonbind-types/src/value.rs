//! Dynamic host values.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A value in a host object graph.
///
/// Structured objects are shared by reference ([`ObjectRef`]), so a graph may
/// contain cycles. Every other variant is owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Enum {
        type_name: String,
        name: String,
        ordinal: usize,
    },
    /// Value of a custom scalar type, kept as its normalized text.
    Custom {
        type_name: String,
        text: String,
    },
    Array(Vec<Value>),
    List(Vec<Value>),
    Map(MapValue),
    Object(ObjectRef),
}

impl Value {
    /// Short description of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Enum { .. } => "enum",
            Value::Custom { .. } => "custom scalar",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            Value::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Constant name of an enum value.
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Value::Enum { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Elements of an array or list.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Field of an object value, cloned.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(field))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<MapValue> for Value {
    fn from(map: MapValue) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Associative container with keys of any [`Value`] form.
///
/// Entries keep insertion order. Keys are compared structurally, so a key
/// rebuilt from the same data finds the stored entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value for an equal key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Instance of a structured type: its type name and named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Set a field, replacing an existing value of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Shared, mutable reference to an [`Object`].
///
/// Equality is identity first, then structural. Comparing two distinct
/// cyclic graphs does not terminate.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self::from_object(Object::new(type_name))
    }

    pub fn from_object(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn type_name(&self) -> String {
        self.0.borrow().type_name.clone()
    }

    /// Field value, cloned. Nested objects are shared, not copied.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.borrow_mut().set(name, value.into());
    }

    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Whether both references point to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

thread_local! {
    static FORMATTING: RefCell<Vec<*const RefCell<Object>>> = const { RefCell::new(Vec::new()) };
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ptr = Rc::as_ptr(&self.0);
        if FORMATTING.with(|active| active.borrow().contains(&ptr)) {
            return write!(f, "<cycle {}>", self.0.borrow().type_name);
        }
        FORMATTING.with(|active| active.borrow_mut().push(ptr));
        let result = {
            let object = self.0.borrow();
            let mut s = f.debug_struct(&object.type_name);
            for (name, value) in &object.fields {
                s.field(name, value);
            }
            s.finish()
        };
        FORMATTING.with(|active| active.borrow_mut().pop());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonbind_testhelpers::setup;

    #[test]
    fn test_map_replaces_equal_key() {
        setup();
        let mut map = MapValue::new();
        assert_eq!(map.insert(Value::Int(1964), "worker".into()), None);
        assert_eq!(
            map.insert(Value::Int(1964), "retired".into()),
            Some(Value::from("worker"))
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::Int(1964)), Some(&Value::from("retired")));
    }

    #[test]
    fn test_map_lookup_by_reconstructed_object_key() {
        setup();
        let key = ObjectRef::new("app.Person").with("name", "John");
        let map: MapValue = [(Value::from(key), Value::from(1))].into_iter().collect();

        let rebuilt = ObjectRef::new("app.Person").with("name", "John");
        assert_eq!(map.get(&Value::from(rebuilt)), Some(&Value::Int(1)));

        let other = ObjectRef::new("app.Person").with("name", "Jane");
        assert!(!map.contains_key(&Value::from(other)));
    }

    #[test]
    fn test_map_null_key() {
        setup();
        let mut map = MapValue::new();
        map.insert(Value::Null, "nothing".into());
        assert_eq!(map.get(&Value::Null), Some(&Value::from("nothing")));
    }

    #[test]
    fn test_object_set_replaces() {
        setup();
        let person = ObjectRef::new("app.Person").with("age", 1);
        person.set("age", 50);
        assert_eq!(person.get("age"), Some(Value::Int(50)));
        assert_eq!(person.borrow().fields().count(), 1);
    }

    #[test]
    fn test_shared_object_identity() {
        setup();
        let a = ObjectRef::new("app.Node");
        let b = a.clone();
        b.set("label", "x");
        assert!(a.ptr_eq(&b));
        assert_eq!(a.get("label"), Some(Value::from("x")));
    }

    #[test]
    fn test_debug_on_cycle_terminates() {
        setup();
        let node = ObjectRef::new("app.Node");
        node.set("next", node.clone());
        let rendered = format!("{:?}", node);
        assert!(rendered.contains("<cycle app.Node>"), "{}", rendered);
    }

    #[test]
    fn test_accessors() {
        setup();
        assert_eq!(Value::UInt(5).as_i64(), Some(5));
        assert_eq!(Value::Int(-1).as_u64(), None);
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }
}
