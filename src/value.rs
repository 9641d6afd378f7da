use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

/// A bencode integer.
///
/// The wire format carries arbitrary decimal digits; this crate accepts the
/// union of the signed and unsigned 64-bit ranges. Equality, ordering and
/// hashing compare the numeric value, so `Unsigned(5) == Signed(5)`.
#[derive(Debug, Clone, Copy)]
pub enum Integer {
    /// A value in the `i64` range.
    Signed(i64),
    /// A value in the `u64` range, used for values above `i64::MAX`.
    Unsigned(u64),
}

impl Integer {
    /// Returns the value as an `i64` if it fits.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Integer::Signed(n) => Some(n),
            Integer::Unsigned(n) => i64::try_from(n).ok(),
        }
    }

    /// Returns the value as a `u64` if it fits.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Integer::Signed(n) => u64::try_from(n).ok(),
            Integer::Unsigned(n) => Some(n),
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Integer::Signed(n) if n < 0)
    }

    fn widen(self) -> i128 {
        match self {
            Integer::Signed(n) => i128::from(n),
            Integer::Unsigned(n) => i128::from(n),
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.widen() == other.widen()
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.widen().cmp(&other.widen())
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.widen().hash(state);
    }
}

macro_rules! impl_integer_from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                fn from(n: $ty) -> Self {
                    Integer::Signed(i64::from(n))
                }
            }
        )*
    };
}

impl_integer_from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Integer {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Integer::Signed(n),
            Err(_) => Integer::Unsigned(n),
        }
    }
}

/// A dictionary from byte-string keys to values.
///
/// Entries are kept in byte-wise key order, which is the order the encoder
/// must emit them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dictionary {
    entries: BTreeMap<Bytes, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<Bytes>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.entries.get(key.as_ref())
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Value> {
        self.entries.get_mut(key.as_ref())
    }

    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<Value> {
        self.entries.remove(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in canonical (byte-wise sorted) key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Bytes, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Bytes, Value> {
        self.entries.keys()
    }
}

impl<K: Into<Bytes>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<Bytes>, V: Into<Value>> Extend<(K, V)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Dictionary {
    type Item = (Bytes, Value);
    type IntoIter = btree_map::IntoIter<Bytes, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Bytes, &'a Value);
    type IntoIter = btree_map::Iter<'a, Bytes, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A schemaless bencode value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer in the combined `i64`/`u64` range.
    Integer(Integer),

    /// Length-prefixed raw bytes, not necessarily UTF-8.
    Bytes(Bytes),

    /// Ordered list of values.
    List(Vec<Value>),

    /// Dictionary keyed by byte strings.
    Dict(Dictionary),
}

impl Value {
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the byte string as text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }
}

macro_rules! impl_value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(Integer::from(n))
                }
            }
        )*
    };
}

impl_value_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::Integer(n)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dict(dict)
    }
}
