//! Error types for NBT encoding.
//!
//! Decoding never returns these: a malformed document is reported inline as a
//! [`Tag::Error`](crate::Tag::Error) value. `NbtError` covers the write side,
//! where a failure must abort the whole operation.

use thiserror::Error;

/// Errors that can occur while encoding an NBT tree.
#[derive(Error, Debug)]
pub enum NbtError {
    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tree contains an error tag. Error tags are produced by the decoder
    /// and can never be written back.
    #[error("Cannot write an error tag to NBT stream ({0})")]
    ErrorTag(String),

    /// A string payload does not fit the 2-byte length prefix.
    #[error("Encoded string too long: {0} bytes")]
    StringTooLong(usize),

    /// An array or list does not fit the 4-byte signed length prefix.
    #[error("Length does not fit in a signed 32-bit prefix: {0}")]
    LengthOverflow(usize),

    /// A string payload is not valid modified UTF-8.
    #[error("Malformed modified UTF-8: {0}")]
    MalformedString(String),
}

/// Convenience alias used throughout nbt-core.
pub type Result<T> = std::result::Result<T, NbtError>;
