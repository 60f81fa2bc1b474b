//! NBT decoder: byte stream → [`Tag`] tree.
//!
//! The decoder never returns an error. Problems end up in the tree in one of
//! two ways:
//!
//! - **Decode errors** become an inline [`Tag::Error`] in place of the value:
//!   a leaf cut short by the end of the stream, a negative array length,
//!   malformed modified UTF-8, an unknown type id, or a list of `TAG_End`
//!   with a non-zero count.
//! - **Truncation** inside a compound or list loop is absorbed: the loop
//!   stops and the container keeps the members read so far. The member that
//!   was cut short is dropped and no error tag is produced.
//!
//! An unknown type id inside a container is stored as an error member and
//! also ends that container, since the size of the unknown payload (and so
//! the position of the next member) cannot be known.
//!
//! Allocation follows the bytes actually read; a corrupt length prefix cannot
//! make the decoder reserve gigabytes up front. Containers nested more than
//! [`MAX_DEPTH`] levels deep fail the whole payload with an inline
//! `"Tag nesting too deep"` error instead of exhausting the call stack.

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use crate::container::{CompoundTag, ListTag};
use crate::mutf8;
use crate::skip::try_skip;
use crate::types::{
    type_name, NamedTag, Tag, TAG_BYTE, TAG_BYTE_ARRAY, TAG_COMPOUND, TAG_DOUBLE, TAG_END,
    TAG_FLOAT, TAG_INT, TAG_INT_ARRAY, TAG_LIST, TAG_LONG, TAG_LONG_ARRAY, TAG_SHORT, TAG_STRING,
};

/// Upper bound for capacity reserved from a length prefix before any
/// elements have been read.
const MAX_PREALLOC: usize = 4096;

/// Deepest container nesting the decoder, skipper and selective walk will
/// follow. The root payload is at depth 0.
pub const MAX_DEPTH: usize = 512;

/// Why a value could not be read.
#[derive(Debug)]
pub(crate) enum Failure {
    /// The stream ended (or failed) part-way through the value.
    Truncated(io::Error),
    /// The bytes were read but do not describe a valid value.
    Malformed(String),
    /// Containers nested past [`MAX_DEPTH`]. The stream position is lost, so
    /// every enclosing container gives up too.
    TooDeep,
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Truncated(e)
    }
}

impl Failure {
    /// Render as an inline error tag for a value of type `tag_type`.
    pub(crate) fn into_tag(self, tag_type: u8) -> Tag {
        match self {
            Failure::Truncated(e) => Tag::new_error(format!(
                "I/O error while reading {}: {e}",
                type_name(tag_type)
            )),
            Failure::Malformed(message) => Tag::new_error(message),
            Failure::TooDeep => Tag::new_error("Tag nesting too deep"),
        }
    }
}

/// Decode one document: a type byte, the root name, then the payload.
///
/// Returns a [`Tag::Named`] root, [`Tag::End`] for a document that starts
/// with a zero type byte, or a [`Tag::Error`] when not even the root header
/// could be read.
///
/// # Examples
///
/// ```
/// use nbt_core::{decode, Tag};
///
/// // TAG_Int named "x" with value 7.
/// let bytes = [3u8, 0, 1, b'x', 0, 0, 0, 7];
/// let root = decode(&mut &bytes[..]);
/// assert!(root.is_named("x"));
/// assert_eq!(root.unpack(), &Tag::Int(7));
/// ```
pub fn decode<R: Read>(reader: &mut R) -> Tag {
    let tag_type = match reader.read_u8() {
        Ok(t) => t,
        Err(e) => return Tag::new_error(format!("I/O error while reading tag type: {e}")),
    };
    if tag_type == TAG_END {
        return Tag::End;
    }
    let name = match read_name(reader) {
        Ok(name) => name,
        Err(failure) => return failure.into_tag(TAG_STRING),
    };
    let payload = read_payload(tag_type, reader);
    NamedTag::new(name, payload).into_tag()
}

/// Decode a complete in-memory document. See [`decode`].
pub fn from_bytes(bytes: &[u8]) -> Tag {
    decode(&mut &bytes[..])
}

/// Decode a single payload of the given type, with no type byte or name in
/// front of it. Failures are returned as an inline [`Tag::Error`].
pub fn read_payload<R: Read>(tag_type: u8, reader: &mut R) -> Tag {
    read_value(tag_type, reader, 0).unwrap_or_else(|failure| failure.into_tag(tag_type))
}

/// Read a name or string payload: 2-byte length, then modified UTF-8.
pub(crate) fn read_name<R: Read>(reader: &mut R) -> Result<String, Failure> {
    let len = reader.read_u16::<BigEndian>()? as usize;
    let bytes = read_bytes(reader, len)?;
    mutf8::decode(&bytes).map_err(|e| Failure::Malformed(e.to_string()))
}

/// Read one payload of `tag_type` sitting `depth` containers below the root.
pub(crate) fn read_value<R: Read>(
    tag_type: u8,
    reader: &mut R,
    depth: usize,
) -> Result<Tag, Failure> {
    if (tag_type == TAG_LIST || tag_type == TAG_COMPOUND) && depth >= MAX_DEPTH {
        return Err(Failure::TooDeep);
    }
    Ok(match tag_type {
        TAG_END => Tag::End,
        TAG_BYTE => Tag::Byte(reader.read_i8()?),
        TAG_SHORT => Tag::Short(reader.read_i16::<BigEndian>()?),
        TAG_INT => Tag::Int(reader.read_i32::<BigEndian>()?),
        TAG_LONG => Tag::Long(reader.read_i64::<BigEndian>()?),
        TAG_FLOAT => Tag::Float(reader.read_f32::<BigEndian>()?),
        TAG_DOUBLE => Tag::Double(reader.read_f64::<BigEndian>()?),
        TAG_BYTE_ARRAY => {
            let len = read_array_len(reader)?;
            Tag::ByteArray(read_bytes(reader, len)?)
        }
        TAG_STRING => Tag::String(read_name(reader)?),
        TAG_LIST => Tag::List(read_list(reader, depth)?),
        TAG_COMPOUND => Tag::Compound(read_compound(reader, depth)?),
        TAG_INT_ARRAY => {
            let len = read_array_len(reader)?;
            let mut data = Vec::with_capacity(len.min(MAX_PREALLOC));
            for _ in 0..len {
                data.push(reader.read_i32::<BigEndian>()?);
            }
            Tag::IntArray(data)
        }
        TAG_LONG_ARRAY => {
            let len = read_array_len(reader)?;
            let mut data = Vec::with_capacity(len.min(MAX_PREALLOC));
            for _ in 0..len {
                data.push(reader.read_i64::<BigEndian>()?);
            }
            Tag::LongArray(data)
        }
        other => return Err(Failure::Malformed(format!("Unknown tag type: {other}"))),
    })
}

fn read_array_len<R: Read>(reader: &mut R) -> Result<usize, Failure> {
    let len = reader.read_i32::<BigEndian>()?;
    usize::try_from(len).map_err(|_| Failure::Malformed(format!("Negative array length: {len}")))
}

fn read_bytes<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len.min(MAX_PREALLOC));
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if data.len() < len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(data)
}

fn read_list<R: Read>(reader: &mut R, depth: usize) -> Result<ListTag, Failure> {
    let item_type = reader.read_u8()?;
    let count = reader.read_i32::<BigEndian>()?;
    if item_type == TAG_END && count > 0 {
        return Err(Failure::Malformed("Cannot create list of TAG_End".to_string()));
    }
    let mut list = ListTag::empty(item_type);
    for _ in 0..count.max(0) {
        match read_value(item_type, reader, depth + 1) {
            Ok(tag) => list.add(tag),
            Err(Failure::Truncated(e)) => {
                debug!("TAG_List truncated after {} of {count} items: {e}", list.len());
                break;
            }
            Err(Failure::Malformed(message)) => {
                list.add(Tag::new_error(message));
                if item_type > TAG_LONG_ARRAY {
                    break;
                }
            }
            Err(Failure::TooDeep) => return Err(Failure::TooDeep),
        }
    }
    Ok(list)
}

fn read_compound<R: Read>(reader: &mut R, depth: usize) -> Result<CompoundTag, Failure> {
    let mut compound = CompoundTag::new();
    loop {
        let item_type = match reader.read_u8() {
            Ok(t) => t,
            Err(e) => {
                debug!("TAG_Compound truncated after {} members: {e}", compound.len());
                break;
            }
        };
        if item_type == TAG_END {
            break;
        }
        let name = match read_name(reader) {
            Ok(name) => name,
            Err(Failure::Truncated(e)) => {
                debug!("TAG_Compound truncated in member name: {e}");
                break;
            }
            Err(Failure::Malformed(message)) => {
                // The payload is still intact; step over it to stay aligned.
                compound.add("", Tag::new_error(message));
                if let Err(e) = try_skip(item_type, reader, depth + 1) {
                    debug!("TAG_Compound lost alignment after a bad member name: {e}");
                    break;
                }
                continue;
            }
            Err(Failure::TooDeep) => return Err(Failure::TooDeep),
        };
        match read_value(item_type, reader, depth + 1) {
            Ok(tag) => compound.add(name, tag),
            Err(Failure::Truncated(e)) => {
                debug!("TAG_Compound truncated in member {name:?}: {e}");
                break;
            }
            Err(Failure::Malformed(message)) => {
                compound.add(name, Tag::new_error(message));
                if item_type > TAG_LONG_ARRAY {
                    break;
                }
            }
            Err(Failure::TooDeep) => return Err(Failure::TooDeep),
        }
    }
    Ok(compound)
}
