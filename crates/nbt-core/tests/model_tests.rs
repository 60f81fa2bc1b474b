use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use nbt_core::{
    CompoundTag, ErrorTag, ListTag, NamedTag, Tag, TAG_COMPOUND, TAG_END, TAG_INT, TAG_LIST,
    TAG_STRING,
};

fn hash_of(tag: &Tag) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    hasher.finish()
}

fn sample_compound() -> CompoundTag {
    let mut compound = CompoundTag::from(vec![NamedTag::new("bart", 10i32)]);
    compound.add("burt", "bort");
    compound
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn typed_accessors_on_matching_variant() {
    assert_eq!(Tag::Byte(101).byte_value(), 101);
    assert_eq!(Tag::Short(101).short_value(), 101);
    assert_eq!(Tag::Int(101).int_value(), 101);
    assert_eq!(Tag::Long(101).long_value(), 101);
    assert_eq!(Tag::Float(1.5).float_value(), 1.5);
    assert_eq!(Tag::Double(1.5).double_value(), 1.5);
    assert_eq!(Tag::from("mystring").string_value(), "mystring");
    assert_eq!(Tag::ByteArray(vec![1, 2]).byte_array(), &[1u8, 2]);
    assert_eq!(Tag::IntArray(vec![3]).int_array(), &[3]);
    assert_eq!(Tag::LongArray(vec![4]).long_array(), &[4i64]);
}

#[test]
fn typed_accessors_fall_back_on_other_variants() {
    let tag = Tag::Compound(sample_compound());
    assert_eq!(tag.byte_value(), 0);
    assert_eq!(tag.byte_value_or(-1), -1);
    assert_eq!(tag.short_value(), 0);
    assert_eq!(tag.short_value_or(-1), -1);
    assert_eq!(tag.int_value(), 0);
    assert_eq!(tag.int_value_or(-1), -1);
    assert_eq!(tag.long_value(), 0);
    assert_eq!(tag.long_value_or(-1), -1);
    assert_eq!(tag.float_value(), 0.0);
    assert_eq!(tag.float_value_or(123.0), 123.0);
    assert_eq!(tag.double_value(), 0.0);
    assert_eq!(tag.double_value_or(123.0), 123.0);
    assert_eq!(tag.string_value(), "");
    assert_eq!(tag.string_value_or("not string"), "not string");
    assert!(tag.byte_array().is_empty());
    assert_eq!(tag.int_array_or(&[7]), &[7]);
    assert_eq!(tag.long_array_or(&[8]), &[8i64]);
    assert!(!tag.bool_value());
    assert!(tag.bool_value_or(true));
}

#[test]
fn accessors_do_not_convert_between_widths() {
    assert_eq!(Tag::Byte(5).int_value(), 0);
    assert_eq!(Tag::Int(5).long_value_or(-1), -1);
    assert_eq!(Tag::Float(1.0).double_value(), 0.0);
}

#[test]
fn bool_value_reads_any_integer() {
    assert!(Tag::from(true).bool_value());
    assert_eq!(Tag::from(true), Tag::Byte(1));
    assert_eq!(Tag::from(false), Tag::Byte(0));
    assert!(Tag::Short(-3).bool_value());
    assert!(!Tag::Int(0).bool_value_or(true));
    assert!(Tag::Long(1 << 40).bool_value());
    assert!(!Tag::from("true").bool_value());
}

#[test]
fn predicates() {
    let tag = Tag::from("bort");
    assert!(tag.same("bort"));
    assert!(!tag.same("bart"));
    assert!(!Tag::Int(1).same("1"));

    assert!(Tag::ByteArray(vec![0; 4]).is_byte_array(4));
    assert!(!Tag::ByteArray(vec![0; 4]).is_byte_array(5));
    assert!(Tag::IntArray(vec![]).is_int_array(0));
    assert!(!Tag::Int(1).is_int_array(0));
    assert!(Tag::LongArray(vec![1]).is_long_array(1));

    assert!(Tag::End.is_end());
    assert!(Tag::new_error("failed horribly").is_end());
    assert!(!Tag::Compound(CompoundTag::new()).is_end());
    assert!(Tag::Compound(CompoundTag::new()).is_compound());
    assert!(Tag::List(ListTag::empty(TAG_INT)).is_list());
    assert!(NamedTag::new("burt", 1i8).into_tag().is_named("burt"));
    assert!(!Tag::Compound(sample_compound()).is_named("burt"));
}

#[test]
fn type_names() {
    assert_eq!(Tag::Int(0).type_name(), "TAG_Int");
    assert_eq!(Tag::ByteArray(vec![]).type_name(), "TAG_Byte_Array");
    assert_eq!(Tag::List(ListTag::empty(TAG_END)).type_name(), "TAG_List");
    assert_eq!(NamedTag::new("", 0i8).into_tag().type_name(), "TAG_Named");
    assert_eq!(Tag::new_error("x").type_name(), "Tag.Error");
    assert_eq!(Tag::new_error("x").tag_type(), None);
    assert_eq!(Tag::Compound(CompoundTag::new()).tag_type(), Some(TAG_COMPOUND));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn unpack_strips_one_named_layer() {
    let inner = Tag::Int(3);
    assert_eq!(inner.unpack(), &inner);
    let named = NamedTag::new("n", 3i32).into_tag();
    assert_eq!(named.unpack(), &Tag::Int(3));
}

#[test]
fn as_compound_looks_through_named() {
    let root = NamedTag::new("", sample_compound()).into_tag();
    assert_eq!(root.as_compound().len(), 2);
    assert!(root.as_list().is_empty());
}

#[test]
fn fallback_containers_are_empty() {
    let tag = Tag::Int(1);
    assert!(tag.as_list().is_empty());
    assert_eq!(tag.as_list().item_type(), TAG_END);
    assert!(tag.as_compound().is_empty());
}

#[test]
fn get_by_name() {
    let tag = Tag::Compound(sample_compound());
    assert_eq!(tag.get("burt").string_value(), "bort");
    assert_eq!(
        tag.get("foo").error(),
        "No item named \"foo\" in this compound tag."
    );
    assert_eq!(
        Tag::Int(1).get("foo").error(),
        "Can not index-by-name in a non-CompoundTag"
    );
}

#[test]
fn get_by_name_unpacks_named_members() {
    let mut compound = CompoundTag::new();
    compound.add("wrapped", NamedTag::new("inner", 4i32));
    let tag = Tag::Compound(compound);
    assert_eq!(tag.get("wrapped").int_value(), 4);
}

#[test]
fn get_by_index() {
    let list = ListTag::new(TAG_STRING, vec![Tag::Int(10), Tag::from("bort")]);
    let tag = Tag::List(list);
    assert_eq!(tag.get_index(1).string_value(), "bort");
    assert_eq!(
        Tag::Compound(sample_compound()).get_index(44).error(),
        "Can not index a non-ListTag"
    );
}

#[test]
#[should_panic]
fn get_by_index_out_of_bounds_panics() {
    let tag = Tag::List(ListTag::empty(TAG_INT));
    let _ = tag.get_index(0);
}

#[test]
fn mutation_points() {
    let mut root = NamedTag::new("", CompoundTag::new()).into_tag();
    root.as_compound_mut().unwrap().add("list", ListTag::empty(TAG_INT));
    assert!(root.as_list_mut().is_none());

    let Tag::Named(named) = &mut root else {
        panic!("expected a named root");
    };
    let Tag::Compound(compound) = &mut named.tag else {
        panic!("expected a compound");
    };
    assert_eq!(compound.len(), 1);

    let mut list_tag = Tag::List(ListTag::empty(TAG_INT));
    let list = list_tag.as_list_mut().unwrap();
    list.add(1i32);
    list.add(2i32);
    list.set(1, 5i32);
    assert_eq!(list_tag.as_list().items(), &[Tag::Int(1), Tag::Int(5)]);
}

#[test]
fn list_item_type_is_not_enforced() {
    let mut list = ListTag::empty(TAG_INT);
    list.add("not an int");
    assert_eq!(list.item_type(), TAG_INT);
    assert_eq!(list.len(), 1);
}

// ============================================================================
// Equality and hashing
// ============================================================================

#[test]
fn compound_equality_is_order_independent() {
    let mut a = CompoundTag::new();
    a.add("A", 1i8);
    a.add("B", 2i8);
    a.add("C", 3i8);
    let mut b = CompoundTag::new();
    b.add("C", 3i8);
    b.add("A", 1i8);
    b.add("B", 2i8);
    assert_eq!(a, b);
    assert_eq!(hash_of(&Tag::Compound(a)), hash_of(&Tag::Compound(b)));
}

#[test]
fn compound_equality_needs_both_directions() {
    let small: CompoundTag = vec![NamedTag::new("A", 1i8)].into();
    let mut big = small.clone();
    big.add("B", 2i8);
    assert_ne!(small, big);
    assert_ne!(big, small);
}

#[test]
fn compound_duplicates_match_first_occurrence() {
    let b: CompoundTag = vec![NamedTag::new("x", 1i8)].into();
    let same: CompoundTag = vec![NamedTag::new("x", 1i8), NamedTag::new("x", 1i8)].into();
    assert_eq!(same, b);
    assert_eq!(
        hash_of(&Tag::Compound(same.clone())),
        hash_of(&Tag::Compound(b.clone()))
    );

    // The shadowed "x" = 2 has no counterpart anywhere.
    let shadowed: CompoundTag = vec![NamedTag::new("x", 1i8), NamedTag::new("x", 2i8)].into();
    assert_ne!(shadowed, b);
    // Only the identity shortcut keeps it equal to itself.
    let alias = &shadowed;
    assert_eq!(&shadowed, alias);
    assert_ne!(shadowed, shadowed.clone());
}

#[test]
fn compound_hash_looks_through_named_members() {
    let plain: CompoundTag = vec![NamedTag::new("x", 1i8)].into();
    let mut wrapped = CompoundTag::new();
    wrapped.add("x", NamedTag::new("inner", 1i8));
    assert_eq!(plain, wrapped);
    assert_eq!(
        hash_of(&Tag::Compound(plain)),
        hash_of(&Tag::Compound(wrapped))
    );
}

#[test]
fn list_equality_is_order_sensitive() {
    let a = ListTag::new(TAG_INT, vec![Tag::Int(1), Tag::Int(2)]);
    let b = ListTag::new(TAG_INT, vec![Tag::Int(2), Tag::Int(1)]);
    assert_ne!(a, b);
}

#[test]
fn list_equality_checks_item_type() {
    assert_ne!(ListTag::empty(TAG_INT), ListTag::empty(TAG_LIST));
}

#[test]
fn named_equality_compares_name_and_value() {
    assert_eq!(NamedTag::new("a", 1i8), NamedTag::new("a", 1i8));
    assert_ne!(NamedTag::new("a", 1i8), NamedTag::new("b", 1i8));
    assert_ne!(NamedTag::new("a", 1i8), NamedTag::new("a", 2i8));
}

#[test]
fn floats_compare_by_bits() {
    assert_eq!(Tag::Float(f32::NAN), Tag::Float(f32::NAN));
    assert_ne!(Tag::Double(0.0), Tag::Double(-0.0));
    assert_eq!(hash_of(&Tag::Double(f64::NAN)), hash_of(&Tag::Double(f64::NAN)));
}

#[test]
fn variants_never_cross_compare() {
    assert_ne!(Tag::Byte(1), Tag::Short(1));
    assert_ne!(Tag::Int(1), Tag::Long(1));
    assert_ne!(NamedTag::new("", 1i32).into_tag(), Tag::Int(1));
}

#[test]
fn errors_with_equal_messages_differ() {
    let a = Tag::new_error("boom");
    let b = Tag::new_error("boom");
    assert_ne!(a, b);
    assert_eq!(a, a.clone());

    let e = ErrorTag::new("boom");
    assert_eq!(e.message(), "boom");
    assert_ne!(e, ErrorTag::new("boom"));
}

#[test]
fn errors_hash_by_identity() {
    let a = Tag::new_error("boom");
    let mut set = HashSet::new();
    set.insert(a.clone());
    set.insert(a.clone());
    set.insert(Tag::new_error("boom"));
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn error_message_accessor() {
    assert_eq!(Tag::new_error("failed horribly").error(), "failed horribly");
    assert!(Tag::new_error("x").is_error());
    assert_eq!(Tag::Int(1).error(), "");
}
