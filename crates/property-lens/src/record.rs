//! Semi-structured listing records.
//!
//! A [`Record`] is one listing from an upstream provider with no fixed
//! schema. Containers are reference counted so the same mapping can be
//! reachable from several places (or from itself); every traversal in the
//! engine tracks mappings by [`MappingId`] rather than by value.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::types::{ListingError, ListingResult};

/// Largest integer an `f64` can hold exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// One listing value of unknown shape.
#[derive(Clone, Default)]
pub enum Record {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Rc<Vec<Record>>),
    Mapping(Rc<Mapping>),
}

/// Identity of a mapping allocation, used for visited tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingId(usize);

impl MappingId {
    pub fn of(mapping: &Rc<Mapping>) -> Self {
        MappingId(Rc::as_ptr(mapping) as *const () as usize)
    }
}

/// String-keyed entries that enumerate in insertion order.
///
/// Entries sit behind a `RefCell` so shared and self-referential graphs can
/// be assembled after the `Rc` exists. Readers only take shared borrows.
#[derive(Default)]
pub struct Mapping {
    entries: RefCell<IndexMap<String, Record>>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, keeping the original position on replace.
    pub fn insert(&self, key: impl Into<String>, value: Record) -> Option<Record> {
        self.entries.borrow_mut().insert(key.into(), value)
    }

    /// Exact (case-sensitive) lookup.
    pub fn get(&self, key: &str) -> Option<Record> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Borrow the entries for enumeration.
    pub fn entries(&self) -> Ref<'_, IndexMap<String, Record>> {
        self.entries.borrow()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Mapping {
    // Keys only: values may lead back to this mapping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("keys", &self.entries.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Null => f.write_str("Null"),
            Record::Bool(b) => write!(f, "Bool({b})"),
            Record::Number(n) => write!(f, "Number({n})"),
            Record::String(s) => write!(f, "String({s:?})"),
            Record::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            Record::Mapping(map) => map.fmt(f),
        }
    }
}

impl Record {
    /// Build a mapping record from key/value pairs, preserving their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Record)>,
    {
        let map = Mapping::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        Record::Mapping(Rc::new(map))
    }

    /// Build a sequence record.
    pub fn sequence(items: Vec<Record>) -> Self {
        Record::Sequence(Rc::new(items))
    }

    /// Parse JSON text into a record, keeping document key order.
    pub fn from_json_str(text: &str) -> ListingResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Record::from(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Record::Null)
    }

    pub fn as_mapping(&self) -> Option<&Rc<Mapping>> {
        match self {
            Record::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Record]> {
        match self {
            Record::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Record::String(s) => Some(s),
            _ => None,
        }
    }

    /// Identity of this record when it is a mapping.
    pub fn identity(&self) -> Option<MappingId> {
        self.as_mapping().map(MappingId::of)
    }

    /// Convert back into a JSON value. Fails on circular records.
    pub fn to_json_value(&self) -> ListingResult<Value> {
        serde_json::to_value(self).map_err(|e| ListingError::Serialize(e.to_string()))
    }

    /// Render as indented JSON text. Fails on circular records.
    pub fn to_json_pretty(&self) -> ListingResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ListingError::Serialize(e.to_string()))
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Record::Null,
            Value::Bool(b) => Record::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Record::Null, Record::Number),
            Value::String(s) => Record::String(s),
            Value::Array(items) => {
                Record::sequence(items.into_iter().map(Record::from).collect())
            }
            Value::Object(map) => {
                Record::mapping(map.into_iter().map(|(k, v)| (k, Record::from(v))))
            }
        }
    }
}

impl From<f64> for Record {
    fn from(n: f64) -> Self {
        Record::Number(n)
    }
}

impl From<bool> for Record {
    fn from(b: bool) -> Self {
        Record::Bool(b)
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::String(s.to_string())
    }
}

impl From<String> for Record {
    fn from(s: String) -> Self {
        Record::String(s)
    }
}

impl From<Vec<Record>> for Record {
    fn from(items: Vec<Record>) -> Self {
        Record::sequence(items)
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let path = RefCell::new(Vec::new());
        Tracked {
            record: self,
            path: &path,
        }
        .serialize(serializer)
    }
}

/// A record plus the mappings currently open above it. Re-entering one of
/// those is a cycle; reaching a shared mapping through a sibling is not.
struct Tracked<'a> {
    record: &'a Record,
    path: &'a RefCell<Vec<MappingId>>,
}

impl Serialize for Tracked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.record {
            Record::Null => serializer.serialize_unit(),
            Record::Bool(b) => serializer.serialize_bool(*b),
            Record::Number(n) => {
                if !n.is_finite() {
                    serializer.serialize_unit()
                } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Record::String(s) => serializer.serialize_str(s),
            Record::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&Tracked {
                        record: item,
                        path: self.path,
                    })?;
                }
                seq.end()
            }
            Record::Mapping(map) => {
                let id = MappingId::of(map);
                if self.path.borrow().contains(&id) {
                    return Err(S::Error::custom("circular reference in record"));
                }
                self.path.borrow_mut().push(id);
                let entries = map.entries();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    out.serialize_entry(
                        key,
                        &Tracked {
                            record: value,
                            path: self.path,
                        },
                    )?;
                }
                self.path.borrow_mut().pop();
                out.end()
            }
        }
    }
}
