//! `serde::Serialize` for the tag model, used to export trees as JSON.
//!
//! The mapping is lossy on types (a `TAG_Short` and a `TAG_Long` both become
//! numbers) but keeps structure and member order. Error tags refuse to
//! serialize, just as they refuse to encode.

use serde::ser::{Error as _, SerializeMap, Serializer};
use serde::Serialize;

use crate::container::{CompoundTag, ListTag};
use crate::types::{NamedTag, Tag};

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::End => serializer.serialize_unit(),
            Tag::Byte(v) => serializer.serialize_i8(*v),
            Tag::Short(v) => serializer.serialize_i16(*v),
            Tag::Int(v) => serializer.serialize_i32(*v),
            Tag::Long(v) => serializer.serialize_i64(*v),
            Tag::Float(v) => serializer.serialize_f32(*v),
            Tag::Double(v) => serializer.serialize_f64(*v),
            Tag::ByteArray(v) => v.serialize(serializer),
            Tag::String(v) => serializer.serialize_str(v),
            Tag::List(v) => v.serialize(serializer),
            Tag::Compound(v) => v.serialize(serializer),
            Tag::IntArray(v) => v.serialize(serializer),
            Tag::LongArray(v) => v.serialize(serializer),
            Tag::Named(v) => v.serialize(serializer),
            Tag::Error(e) => Err(S::Error::custom(format!(
                "cannot serialize error tag: {}",
                e.message()
            ))),
        }
    }
}

impl Serialize for ListTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// A JSON object in member order. Duplicate names are all written; most
/// readers keep the last one.
impl Serialize for CompoundTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for item in self {
            map.serialize_entry(&item.name, &item.tag)?;
        }
        map.end()
    }
}

/// A single-entry object `{name: value}`.
impl Serialize for NamedTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.tag)?;
        map.end()
    }
}
