//! The two container tags: [`ListTag`] and [`CompoundTag`].
//!
//! Both are plain owned vectors. The only edit points are appending and, for
//! lists, replacing an element in place; nothing removes or reorders members.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::types::{NamedTag, Tag, TAG_END};

/// Fallback returned by [`Tag::as_list`] for non-list tags.
pub(crate) static EMPTY_LIST: ListTag = ListTag {
    item_type: TAG_END,
    items: Vec::new(),
};

/// Fallback returned by [`Tag::as_compound`] for non-compound tags.
pub(crate) static EMPTY_COMPOUND: CompoundTag = CompoundTag { items: Vec::new() };

/// An ordered sequence of tags sharing one declared item type.
///
/// The item type is written once in the list header. It is not checked
/// against the elements: a list built with mismatching elements encodes to a
/// stream that will not decode back to the same list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListTag {
    item_type: u8,
    items: Vec<Tag>,
}

impl ListTag {
    pub fn new(item_type: u8, items: Vec<Tag>) -> Self {
        Self { item_type, items }
    }

    /// An empty list of the given item type.
    pub fn empty(item_type: u8) -> Self {
        Self::new(item_type, Vec::new())
    }

    /// Wire type id of the elements.
    pub fn item_type(&self) -> u8 {
        self.item_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn add(&mut self, tag: impl Into<Tag>) {
        self.items.push(tag.into());
    }

    /// Replace the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) {
        self.items[index] = tag.into();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Tag] {
        &self.items
    }
}

impl Index<usize> for ListTag {
    type Output = Tag;

    fn index(&self, index: usize) -> &Tag {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Named members in insertion order.
///
/// Names are not required to be unique; lookups return the first match.
/// Equality ignores member order, iteration and encoding preserve it.
#[derive(Debug, Clone, Default)]
pub struct CompoundTag {
    items: Vec<NamedTag>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a member. An existing member with the same name is kept, and
    /// keeps shadowing the new one in lookups.
    pub fn add(&mut self, name: impl Into<String>, tag: impl Into<Tag>) {
        self.items.push(NamedTag::new(name, tag));
    }

    pub fn add_named(&mut self, item: NamedTag) {
        self.items.push(item);
    }

    /// First member with this name, with any named wrapper stripped.
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.tag.unpack())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedTag> {
        self.items.iter()
    }

    pub fn items(&self) -> &[NamedTag] {
        &self.items
    }

    /// Every member of `self` has an equal counterpart in `other`.
    fn contained_in(&self, other: &CompoundTag) -> bool {
        self.items
            .iter()
            .all(|item| other.find(&item.name) == Some(item.tag.unpack()))
    }
}

impl PartialEq for CompoundTag {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.contained_in(other) && other.contained_in(self))
    }
}

impl Eq for CompoundTag {}

/// XOR of `(name, value)` hashes over the first member of each name, the
/// same members [`PartialEq`] looks at.
impl Hash for CompoundTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut seen = HashSet::new();
        let code = self
            .items
            .iter()
            .filter(|item| seen.insert(item.name.as_str()))
            .map(|item| {
                let mut hasher = DefaultHasher::new();
                item.name.hash(&mut hasher);
                item.tag.unpack().hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, |acc, h| acc ^ h);
        state.write_u64(code);
    }
}

impl From<Vec<NamedTag>> for CompoundTag {
    fn from(items: Vec<NamedTag>) -> Self {
        Self { items }
    }
}

impl FromIterator<NamedTag> for CompoundTag {
    fn from_iter<I: IntoIterator<Item = NamedTag>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = &'a NamedTag;
    type IntoIter = std::slice::Iter<'a, NamedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
