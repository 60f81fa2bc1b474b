//! Indented text rendering of a tag tree.
//!
//! One node per line, two spaces of indentation per level:
//!
//! ```text
//! TAG_Named: ""
//!   TAG_Compound
//!     Data:
//!       TAG_Compound
//!         Version:
//!           TAG_Int: 19133
//! ```
//!
//! The rendering depends only on the tree, so a tree and its encode/decode
//! round trip always print identically.

use std::fmt;

use crate::types::Tag;

impl Tag {
    /// Render this tree as indented text, one node per line.
    pub fn dump_tree(&self) -> String {
        Tree(self).to_string()
    }

    /// The value part of a node's line, including the leading `": "`.
    fn extra_info(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Byte(v) => write!(f, ": {v}"),
            Tag::Short(v) => write!(f, ": {v}"),
            Tag::Int(v) => write!(f, ": {v}"),
            Tag::Long(v) => write!(f, ": {v}"),
            Tag::Float(v) => write!(f, ": {}", java_float(*v)),
            Tag::Double(v) => write!(f, ": {}", java_float(*v)),
            Tag::ByteArray(v) => write!(f, ": {}", v.len()),
            Tag::IntArray(v) => write!(f, ": {}", v.len()),
            Tag::LongArray(v) => write!(f, ": {}", v.len()),
            Tag::String(v) => write!(f, ": \"{v}\""),
            Tag::Error(e) => write!(f, ": \"{}\"", e.message()),
            Tag::Named(named) => write!(f, ": \"{}\"", named.name),
            Tag::End | Tag::List(_) | Tag::Compound(_) => Ok(()),
        }
    }
}

/// Leaves print their single line without a newline; containers and named
/// tags print the full tree.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::List(_) | Tag::Compound(_) | Tag::Named(_) => {
                fmt::Display::fmt(&Tree(self), f)
            }
            leaf => {
                f.write_str(leaf.type_name())?;
                leaf.extra_info(f)
            }
        }
    }
}

/// Floating point text in Java's `Float.toString` form: plain decimal for
/// magnitudes in `[1e-3, 1e7)`, `1.0E10` style outside it.
fn java_float<T>(v: T) -> String
where
    T: Copy + fmt::Debug + fmt::LowerExp + Into<f64>,
{
    let x: f64 = v.into();
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{v:?}");
    }
    let scientific = format!("{v:e}");
    match scientific.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{mantissa}E{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}.0E{exp}"),
        None => scientific,
    }
}

struct Tree<'a>(&'a Tag);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, tag: &Tag, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    f.write_str(tag.type_name())?;
    tag.extra_info(f)?;
    f.write_str("\n")?;
    match tag {
        Tag::Named(named) => write_node(f, &named.tag, depth + 1),
        Tag::List(list) => list
            .iter()
            .try_for_each(|item| write_node(f, item, depth + 1)),
        Tag::Compound(compound) => compound.iter().try_for_each(|item| {
            indent(f, depth + 1)?;
            writeln!(f, "{}:", item.name)?;
            write_node(f, &item.tag, depth + 2)
        }),
        _ => Ok(()),
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = depth * 2)
}
