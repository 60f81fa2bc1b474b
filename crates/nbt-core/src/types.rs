//! The NBT value model.
//!
//! A document is a tree of [`Tag`] values. Leaves carry numbers, strings and
//! arrays; the two container kinds are [`ListTag`] (homogeneous, ordered) and
//! [`CompoundTag`] (named members). The document root is a [`NamedTag`]
//! wrapped in [`Tag::Named`].
//!
//! Decode failures are not thrown: they show up in the tree as
//! [`Tag::Error`] values, so every accessor here has a zero-value fallback
//! instead of a failure mode. Check [`Tag::is_error`] before trusting a value
//! that came from untrusted input.
//!
//! # Equality
//!
//! - Numbers compare by value; floats compare by bit pattern, which keeps
//!   `Eq` reflexive for NaN.
//! - Lists compare item type and elements, in order.
//! - Compounds compare by bidirectional containment, so member order does not
//!   matter. A duplicated name is matched by its first occurrence.
//! - Error tags only ever equal themselves (or a clone of themselves). Two
//!   errors with the same message are different values.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

use crate::container::{CompoundTag, ListTag, EMPTY_COMPOUND, EMPTY_LIST};

pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BYTE_ARRAY: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;
pub const TAG_INT_ARRAY: u8 = 11;
pub const TAG_LONG_ARRAY: u8 = 12;

/// Human-readable name of a wire type id, as used in tree dumps.
pub fn type_name(id: u8) -> &'static str {
    match id {
        TAG_END => "TAG_End",
        TAG_BYTE => "TAG_Byte",
        TAG_SHORT => "TAG_Short",
        TAG_INT => "TAG_Int",
        TAG_LONG => "TAG_Long",
        TAG_FLOAT => "TAG_Float",
        TAG_DOUBLE => "TAG_Double",
        TAG_BYTE_ARRAY => "TAG_Byte_Array",
        TAG_STRING => "TAG_String",
        TAG_LIST => "TAG_List",
        TAG_COMPOUND => "TAG_Compound",
        TAG_INT_ARRAY => "TAG_Int_Array",
        TAG_LONG_ARRAY => "TAG_Long_Array",
        _ => "TAG_Unknown",
    }
}

/// One node of an NBT tree.
#[derive(Debug, Clone)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    /// A name/value pair outside of a compound, i.e. the document root.
    Named(Box<NamedTag>),
    /// Inline decode failure. Never encodable.
    Error(ErrorTag),
}

/// A name paired with a tag: a compound member, or the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Wrap this pair as a root [`Tag::Named`].
    pub fn into_tag(self) -> Tag {
        Tag::Named(Box::new(self))
    }
}

/// The payload of [`Tag::Error`].
///
/// The message lives in its own allocation; that allocation is the error's
/// identity. Cloning shares it, constructing a new error never does.
#[derive(Debug, Clone)]
pub struct ErrorTag {
    message: Arc<str>,
}

impl ErrorTag {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Arc::from(message.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Identity equality: two failures with the same message are still distinct.
impl PartialEq for ErrorTag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.message, &other.message)
    }
}

impl Eq for ErrorTag {}

impl Hash for ErrorTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.message) as *const u8 as usize).hash(state);
    }
}

impl Tag {
    /// Build an inline error value.
    pub fn new_error(message: impl Into<String>) -> Self {
        Tag::Error(ErrorTag::new(message))
    }

    /// Wire type id of this tag. Named tags report the id of their value;
    /// error tags have none.
    pub fn tag_type(&self) -> Option<u8> {
        Some(match self {
            Tag::End => TAG_END,
            Tag::Byte(_) => TAG_BYTE,
            Tag::Short(_) => TAG_SHORT,
            Tag::Int(_) => TAG_INT,
            Tag::Long(_) => TAG_LONG,
            Tag::Float(_) => TAG_FLOAT,
            Tag::Double(_) => TAG_DOUBLE,
            Tag::ByteArray(_) => TAG_BYTE_ARRAY,
            Tag::String(_) => TAG_STRING,
            Tag::List(_) => TAG_LIST,
            Tag::Compound(_) => TAG_COMPOUND,
            Tag::IntArray(_) => TAG_INT_ARRAY,
            Tag::LongArray(_) => TAG_LONG_ARRAY,
            Tag::Named(named) => return named.tag.tag_type(),
            Tag::Error(_) => return None,
        })
    }

    /// Name of this tag's type, as printed by [`Tag::dump_tree`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Tag::Named(_) => "TAG_Named",
            Tag::Error(_) => "Tag.Error",
            other => other.tag_type().map_or("TAG_Unknown", type_name),
        }
    }

    /// Strip one [`Tag::Named`] wrapper. Any other tag is returned as is.
    pub fn unpack(&self) -> &Tag {
        match self {
            Tag::Named(named) => &named.tag,
            other => other,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Tag::Error(_))
    }

    /// The message of an error tag, or `""` for any other tag.
    pub fn error(&self) -> &str {
        match self {
            Tag::Error(e) => e.message(),
            _ => "",
        }
    }

    /// True for `TAG_End` and for error tags. Both mark a place where no
    /// further value can be read.
    pub fn is_end(&self) -> bool {
        matches!(self, Tag::End | Tag::Error(_))
    }

    /// True for a named tag with exactly this name.
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Tag::Named(named) if named.name == name)
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Tag::Compound(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Tag::List(_))
    }

    /// True for a string tag holding exactly `s`.
    pub fn same(&self, s: &str) -> bool {
        matches!(self, Tag::String(value) if value == s)
    }

    /// True for a byte array of at least `min_len` bytes.
    pub fn is_byte_array(&self, min_len: usize) -> bool {
        matches!(self, Tag::ByteArray(v) if v.len() >= min_len)
    }

    /// True for an int array of at least `min_len` elements.
    pub fn is_int_array(&self, min_len: usize) -> bool {
        matches!(self, Tag::IntArray(v) if v.len() >= min_len)
    }

    /// True for a long array of at least `min_len` elements.
    pub fn is_long_array(&self, min_len: usize) -> bool {
        matches!(self, Tag::LongArray(v) if v.len() >= min_len)
    }

    // ------------------------------------------------------------------
    // Typed accessors. The plain form falls back to zero/empty, the `_or`
    // form to the caller's default.
    // ------------------------------------------------------------------

    /// Any integral tag, as a flag (non-zero is `true`).
    pub fn bool_value(&self) -> bool {
        self.bool_value_or(false)
    }

    pub fn bool_value_or(&self, default: bool) -> bool {
        match self {
            Tag::Byte(v) => *v != 0,
            Tag::Short(v) => *v != 0,
            Tag::Int(v) => *v != 0,
            Tag::Long(v) => *v != 0,
            _ => default,
        }
    }

    pub fn byte_value(&self) -> i8 {
        self.byte_value_or(0)
    }

    pub fn byte_value_or(&self, default: i8) -> i8 {
        match self {
            Tag::Byte(v) => *v,
            _ => default,
        }
    }

    pub fn short_value(&self) -> i16 {
        self.short_value_or(0)
    }

    pub fn short_value_or(&self, default: i16) -> i16 {
        match self {
            Tag::Short(v) => *v,
            _ => default,
        }
    }

    pub fn int_value(&self) -> i32 {
        self.int_value_or(0)
    }

    pub fn int_value_or(&self, default: i32) -> i32 {
        match self {
            Tag::Int(v) => *v,
            _ => default,
        }
    }

    pub fn long_value(&self) -> i64 {
        self.long_value_or(0)
    }

    pub fn long_value_or(&self, default: i64) -> i64 {
        match self {
            Tag::Long(v) => *v,
            _ => default,
        }
    }

    pub fn float_value(&self) -> f32 {
        self.float_value_or(0.0)
    }

    pub fn float_value_or(&self, default: f32) -> f32 {
        match self {
            Tag::Float(v) => *v,
            _ => default,
        }
    }

    pub fn double_value(&self) -> f64 {
        self.double_value_or(0.0)
    }

    pub fn double_value_or(&self, default: f64) -> f64 {
        match self {
            Tag::Double(v) => *v,
            _ => default,
        }
    }

    pub fn string_value(&self) -> &str {
        self.string_value_or("")
    }

    pub fn string_value_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Tag::String(v) => v,
            _ => default,
        }
    }

    pub fn byte_array(&self) -> &[u8] {
        self.byte_array_or(&[])
    }

    pub fn byte_array_or<'a>(&'a self, default: &'a [u8]) -> &'a [u8] {
        match self {
            Tag::ByteArray(v) => v,
            _ => default,
        }
    }

    pub fn int_array(&self) -> &[i32] {
        self.int_array_or(&[])
    }

    pub fn int_array_or<'a>(&'a self, default: &'a [i32]) -> &'a [i32] {
        match self {
            Tag::IntArray(v) => v,
            _ => default,
        }
    }

    pub fn long_array(&self) -> &[i64] {
        self.long_array_or(&[])
    }

    pub fn long_array_or<'a>(&'a self, default: &'a [i64]) -> &'a [i64] {
        match self {
            Tag::LongArray(v) => v,
            _ => default,
        }
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// This tag as a list, looking through a named wrapper. Anything else
    /// gives a shared, immutable empty list.
    pub fn as_list(&self) -> &ListTag {
        match self {
            Tag::List(list) => list,
            Tag::Named(named) => named.tag.as_list(),
            _ => &EMPTY_LIST,
        }
    }

    /// This tag as a compound, looking through a named wrapper. Anything else
    /// gives a shared, immutable empty compound.
    pub fn as_compound(&self) -> &CompoundTag {
        match self {
            Tag::Compound(compound) => compound,
            Tag::Named(named) => named.tag.as_compound(),
            _ => &EMPTY_COMPOUND,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListTag> {
        match self {
            Tag::List(list) => Some(list),
            Tag::Named(named) => named.tag.as_list_mut(),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundTag> {
        match self {
            Tag::Compound(compound) => Some(compound),
            Tag::Named(named) => named.tag.as_compound_mut(),
            _ => None,
        }
    }

    /// Look up a compound member by name.
    ///
    /// Returns the first member with that name, or an error tag when there is
    /// none or when this is not a compound.
    pub fn get(&self, name: &str) -> Cow<'_, Tag> {
        match self {
            Tag::Compound(compound) => match compound.find(name) {
                Some(tag) => Cow::Borrowed(tag),
                None => Cow::Owned(Tag::new_error(format!(
                    "No item named \"{name}\" in this compound tag."
                ))),
            },
            _ => Cow::Owned(Tag::new_error("Can not index-by-name in a non-CompoundTag")),
        }
    }

    /// Look up a list element by index.
    ///
    /// # Panics
    ///
    /// Panics if this is a list and `index` is out of bounds.
    pub fn get_index(&self, index: usize) -> Cow<'_, Tag> {
        match self {
            Tag::List(list) => Cow::Borrowed(&list[index]),
            _ => Cow::Owned(Tag::new_error("Can not index a non-ListTag")),
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tag::End, Tag::End) => true,
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a.to_bits() == b.to_bits(),
            (Tag::Double(a), Tag::Double(b)) => a.to_bits() == b.to_bits(),
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::List(a), Tag::List(b)) => a == b,
            (Tag::Compound(a), Tag::Compound(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            (Tag::LongArray(a), Tag::LongArray(b)) => a == b,
            (Tag::Named(a), Tag::Named(b)) => a == b,
            (Tag::Error(a), Tag::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Tag::End => {}
            Tag::Byte(v) => v.hash(state),
            Tag::Short(v) => v.hash(state),
            Tag::Int(v) => v.hash(state),
            Tag::Long(v) => v.hash(state),
            Tag::Float(v) => v.to_bits().hash(state),
            Tag::Double(v) => v.to_bits().hash(state),
            Tag::ByteArray(v) => v.hash(state),
            Tag::String(v) => v.hash(state),
            Tag::List(v) => v.hash(state),
            Tag::Compound(v) => v.hash(state),
            Tag::IntArray(v) => v.hash(state),
            Tag::LongArray(v) => v.hash(state),
            Tag::Named(v) => v.hash(state),
            Tag::Error(v) => v.hash(state),
        }
    }
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Byte(value as i8)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(value: $ty) -> Self {
                    Tag::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<u8> => ByteArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    ListTag => List,
    CompoundTag => Compound,
    ErrorTag => Error,
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_string())
    }
}

impl From<NamedTag> for Tag {
    fn from(value: NamedTag) -> Self {
        value.into_tag()
    }
}
