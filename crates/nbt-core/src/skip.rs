//! Skip over encoded values without building them.
//!
//! [`skip`] consumes exactly the bytes that [`read_payload`] would have
//! consumed for the same type, but allocates nothing: fixed-size leaves and
//! array bodies are drained into a sink, containers are walked member by
//! member. The selective parser uses it for every subtree nobody asked for.
//!
//! Skipping is best effort. If the stream ends early, or containers nest past
//! [`MAX_DEPTH`], the skip just stops; the caller finds out on its next read.
//!
//! [`read_payload`]: crate::read_payload

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use log::trace;

use crate::decoder::MAX_DEPTH;
use crate::types::{
    type_name, TAG_BYTE, TAG_BYTE_ARRAY, TAG_COMPOUND, TAG_DOUBLE, TAG_END, TAG_FLOAT, TAG_INT,
    TAG_INT_ARRAY, TAG_LIST, TAG_LONG, TAG_LONG_ARRAY, TAG_SHORT, TAG_STRING,
};

/// Advance `reader` past one payload of type `tag_type`.
///
/// Unknown type ids (and `TAG_End`) have no payload and skip nothing.
pub fn skip<R: Read>(tag_type: u8, reader: &mut R) {
    if let Err(e) = try_skip(tag_type, reader, 0) {
        trace!("skip of {} stopped early: {e}", type_name(tag_type));
    }
}

/// Skip one payload sitting `depth` containers below the root.
pub(crate) fn try_skip<R: Read>(tag_type: u8, reader: &mut R, depth: usize) -> io::Result<()> {
    if (tag_type == TAG_LIST || tag_type == TAG_COMPOUND) && depth >= MAX_DEPTH {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Tag nesting too deep",
        ));
    }
    match tag_type {
        TAG_BYTE => skip_bytes(reader, 1),
        TAG_SHORT => skip_bytes(reader, 2),
        TAG_INT | TAG_FLOAT => skip_bytes(reader, 4),
        TAG_LONG | TAG_DOUBLE => skip_bytes(reader, 8),
        TAG_BYTE_ARRAY => {
            let len = reader.read_i32::<BigEndian>()?;
            skip_bytes(reader, len.max(0) as u64)
        }
        TAG_STRING => skip_string(reader),
        TAG_LIST => {
            let item_type = reader.read_u8()?;
            let count = reader.read_i32::<BigEndian>()?;
            if item_type == TAG_END || item_type > TAG_LONG_ARRAY {
                return Ok(());
            }
            for _ in 0..count.max(0) {
                try_skip(item_type, reader, depth + 1)?;
            }
            Ok(())
        }
        TAG_COMPOUND => loop {
            let item_type = reader.read_u8()?;
            if item_type == TAG_END {
                return Ok(());
            }
            skip_string(reader)?;
            if item_type > TAG_LONG_ARRAY {
                return Ok(());
            }
            try_skip(item_type, reader, depth + 1)?;
        },
        TAG_INT_ARRAY => {
            let len = reader.read_i32::<BigEndian>()?;
            skip_bytes(reader, len.max(0) as u64 * 4)
        }
        TAG_LONG_ARRAY => {
            let len = reader.read_i32::<BigEndian>()?;
            skip_bytes(reader, len.max(0) as u64 * 8)
        }
        _ => Ok(()),
    }
}

/// Skip a name or string payload.
pub(crate) fn skip_string<R: Read>(reader: &mut R) -> io::Result<()> {
    let len = reader.read_u16::<BigEndian>()?;
    skip_bytes(reader, len as u64)
}

fn skip_bytes<R: Read>(reader: &mut R, len: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(())
}
