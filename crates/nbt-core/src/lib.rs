//! # nbt-core
//!
//! Pure-Rust model, codec and selective parser for **NBT (Named Binary Tag)**,
//! the big-endian binary tree format Minecraft uses for level, player and
//! chunk data.
//!
//! Decoding is total: it never fails and never panics on bad input. Problems
//! are reported inside the tree as [`Tag::Error`] values, and a document cut
//! short keeps everything read before the cut. Encoding is fallible and
//! refuses to write error tags.
//!
//! ## Quick start
//!
//! ```rust
//! use nbt_core::{from_bytes, selective_decode, to_bytes, CompoundTag, NamedTag};
//!
//! let mut data = CompoundTag::new();
//! data.add("LevelName", "World");
//! data.add("Version", 19133i32);
//! let mut root = CompoundTag::new();
//! root.add("Data", data);
//! let bytes = to_bytes(&NamedTag::new("", root)).unwrap();
//!
//! // Full decode.
//! let tree = from_bytes(&bytes);
//! assert_eq!(tree.as_compound().find("Data").unwrap().get("Version").int_value(), 19133);
//!
//! // Selective decode: only the requested value is built.
//! let found = selective_decode(&mut &bytes[..], [".Data.LevelName"]);
//! assert_eq!(found[".Data.LevelName"].string_value(), "World");
//! ```
//!
//! ## Modules
//!
//! - [`types`] — `Tag` and `NamedTag`, accessors, equality and hashing
//! - [`container`] — `ListTag` and `CompoundTag`
//! - [`decoder`] — byte stream → tree
//! - [`encoder`] — tree → byte stream
//! - [`skip`] — step over payloads without building them
//! - [`selective`] — decode only requested dotted paths
//! - [`mutf8`] — modified UTF-8 string codec
//! - [`error`] — error type for the write side

pub mod container;
pub mod decoder;
mod dump;
pub mod encoder;
pub mod error;
pub mod mutf8;
pub mod selective;
mod serialize;
pub mod skip;
pub mod types;

pub use container::{CompoundTag, ListTag};
pub use decoder::{decode, from_bytes, read_payload, MAX_DEPTH};
pub use encoder::{encode, to_bytes, write_payload};
pub use error::NbtError;
pub use selective::{selective_decode, Selection, SelectiveParser, WalkStats, NOT_LOADED};
pub use skip::skip;
pub use types::{
    type_name, ErrorTag, NamedTag, Tag, TAG_BYTE, TAG_BYTE_ARRAY, TAG_COMPOUND, TAG_DOUBLE,
    TAG_END, TAG_FLOAT, TAG_INT, TAG_INT_ARRAY, TAG_LIST, TAG_LONG, TAG_LONG_ARRAY, TAG_SHORT,
    TAG_STRING,
};
