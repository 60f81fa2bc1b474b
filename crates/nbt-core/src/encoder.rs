//! NBT encoder: [`Tag`] tree → byte stream.
//!
//! The output layout mirrors the decoder exactly: big-endian integers, no
//! padding, compound members in insertion order, strings in modified UTF-8.
//!
//! Encoding an error tag anywhere in the tree fails the whole write with
//! [`NbtError::ErrorTag`].
//!
//! # Example
//! ```
//! use nbt_core::{from_bytes, to_bytes, CompoundTag, NamedTag, Tag};
//!
//! let mut level = CompoundTag::new();
//! level.add("Version", 19133i32);
//! let root = NamedTag::new("", level);
//!
//! let bytes = to_bytes(&root).unwrap();
//! assert_eq!(from_bytes(&bytes), root.clone().into_tag());
//! ```

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{NbtError, Result};
use crate::mutf8;
use crate::types::{NamedTag, Tag, TAG_END};

/// Write one document: the root's type byte, its name, then its payload.
pub fn encode<W: Write>(root: &NamedTag, writer: &mut W) -> Result<()> {
    write_named(writer, &root.name, &root.tag)
}

/// Encode a document into a fresh buffer. See [`encode`].
pub fn to_bytes(root: &NamedTag) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(root, &mut out)?;
    Ok(out)
}

/// Write a single payload with no type byte or name in front of it.
///
/// A [`Tag::Named`] in payload position is transparent: only the wrapped
/// value's payload is written.
pub fn write_payload<W: Write>(tag: &Tag, writer: &mut W) -> Result<()> {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => writer.write_i8(*v)?,
        Tag::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Tag::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Tag::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Tag::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Tag::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Tag::ByteArray(data) => {
            write_len(writer, data.len())?;
            writer.write_all(data)?;
        }
        Tag::String(s) => write_string(writer, s)?,
        Tag::List(list) => {
            writer.write_u8(list.item_type())?;
            write_len(writer, list.len())?;
            for item in list {
                write_payload(item, writer)?;
            }
        }
        Tag::Compound(compound) => {
            for item in compound {
                write_named(writer, &item.name, &item.tag)?;
            }
            writer.write_u8(TAG_END)?;
        }
        Tag::IntArray(data) => {
            write_len(writer, data.len())?;
            for v in data {
                writer.write_i32::<BigEndian>(*v)?;
            }
        }
        Tag::LongArray(data) => {
            write_len(writer, data.len())?;
            for v in data {
                writer.write_i64::<BigEndian>(*v)?;
            }
        }
        Tag::Named(named) => write_payload(&named.tag, writer)?,
        Tag::Error(e) => return Err(NbtError::ErrorTag(e.message().to_string())),
    }
    Ok(())
}

fn write_named<W: Write>(writer: &mut W, name: &str, tag: &Tag) -> Result<()> {
    let tag_type = match tag.tag_type() {
        Some(t) => t,
        None => return Err(NbtError::ErrorTag(tag.unpack().error().to_string())),
    };
    writer.write_u8(tag_type)?;
    write_string(writer, name)?;
    write_payload(tag, writer)
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    let bytes = mutf8::encode(s);
    let len = u16::try_from(bytes.len()).map_err(|_| NbtError::StringTooLong(bytes.len()))?;
    writer.write_u16::<BigEndian>(len)?;
    writer.write_all(&bytes)?;
    Ok(())
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| NbtError::LengthOverflow(len))?;
    writer.write_i32::<BigEndian>(len)?;
    Ok(())
}
