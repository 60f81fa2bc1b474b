//! Selective decoding -- pull a few values out of a large document.
//!
//! Requests are dotted paths. Under a compound a segment is a member name,
//! under a list it is a zero-based index. The root's own name is the first
//! segment; it is usually empty, which is why paths tend to start with a dot:
//!
//! - `".Data.Version.Name"` -- member `Name` of `Version` of `Data`
//! - `".Data.Player.Attributes.3.Name"` -- `Name` of the fourth element of
//!   the `Attributes` list
//!
//! The stream is read once, front to back. A value whose path was requested
//! is decoded in full. A container whose path is a proper ancestor of some
//! request is walked member by member. Everything else is skipped without
//! being built. As soon as the last request is satisfied the walk stops and
//! the rest of the stream is never read.
//!
//! When one request is an ancestor of another, the ancestor wins: it is
//! decoded whole and the descendant keeps its `"[not loaded]"` placeholder.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use crate::decoder::{read_name, read_value, Failure, MAX_DEPTH};
use crate::skip::try_skip;
use crate::types::{Tag, TAG_COMPOUND, TAG_END, TAG_LIST, TAG_LONG_ARRAY};

/// Message of the placeholder stored for requests the walk never reached.
pub const NOT_LOADED: &str = "[not loaded]";

/// Counters describing one selective walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Requested values decoded in full.
    pub decoded: usize,
    /// Containers walked because they lead to a request.
    pub descended: usize,
    /// Values stepped over without being built.
    pub skipped: usize,
}

/// Result of [`SelectiveParser::parse`].
#[derive(Debug, Clone)]
pub struct Selection {
    /// One entry per requested path. Unreached paths hold a
    /// [`NOT_LOADED`] error tag.
    pub values: HashMap<String, Tag>,
    /// Requested paths that were not found in the stream.
    pub unresolved: HashSet<String>,
    pub stats: WalkStats,
}

/// A reusable set of requested paths.
#[derive(Debug, Clone)]
pub struct SelectiveParser {
    requested: HashSet<String>,
    prefixes: HashSet<String>,
}

impl SelectiveParser {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested: HashSet<String> = paths.into_iter().map(Into::into).collect();
        let prefixes = requested
            .iter()
            .flat_map(|path| ancestors(path))
            .map(str::to_string)
            .collect();
        Self {
            requested,
            prefixes,
        }
    }

    pub fn requested(&self) -> &HashSet<String> {
        &self.requested
    }

    /// Walk one document from `reader`, decoding only the requested paths.
    pub fn parse<R: Read>(&self, reader: &mut R) -> Selection {
        let values = self
            .requested
            .iter()
            .map(|path| (path.clone(), Tag::new_error(NOT_LOADED)))
            .collect();
        let mut walk = Walk {
            reader,
            prefixes: &self.prefixes,
            pending: self.requested.clone(),
            values,
            stats: WalkStats::default(),
            exhausted: false,
        };

        if let Ok(tag_type) = walk.reader.read_u8() {
            if tag_type != TAG_END {
                if let Ok(name) = read_name(walk.reader) {
                    walk.visit(tag_type, name, 0);
                }
            }
        }

        debug!(
            "selective parse: {} decoded, {} descended, {} skipped, {} unresolved",
            walk.stats.decoded,
            walk.stats.descended,
            walk.stats.skipped,
            walk.pending.len()
        );
        Selection {
            values: walk.values,
            unresolved: walk.pending,
            stats: walk.stats,
        }
    }
}

/// Decode only the requested paths of the document in `reader`.
///
/// Every requested path is a key of the result. Paths that were not found
/// map to a `"[not loaded]"` error tag.
///
/// # Examples
///
/// ```
/// use nbt_core::{selective_decode, to_bytes, CompoundTag, NamedTag};
///
/// let mut version = CompoundTag::new();
/// version.add("Name", "17w13b");
/// let mut data = CompoundTag::new();
/// data.add("Version", version);
/// let mut root = CompoundTag::new();
/// root.add("Data", data);
/// let bytes = to_bytes(&NamedTag::new("", root)).unwrap();
///
/// let result = selective_decode(&mut &bytes[..], [".Data.Version.Name"]);
/// assert_eq!(result[".Data.Version.Name"].string_value(), "17w13b");
/// ```
pub fn selective_decode<R, I, S>(reader: &mut R, paths: I) -> HashMap<String, Tag>
where
    R: Read,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectiveParser::new(paths).parse(reader).values
}

/// Proper ancestors of a dotted path: the text before each dot.
///
/// `".Data.Version.Name"` gives `""`, `".Data"` and `".Data.Version"`.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('.').map(move |(i, _)| &path[..i])
}

struct Walk<'a, R> {
    reader: &'a mut R,
    prefixes: &'a HashSet<String>,
    pending: HashSet<String>,
    values: HashMap<String, Tag>,
    stats: WalkStats,
    /// Set once a read fails; nothing after that point can be trusted.
    exhausted: bool,
}

impl<R: Read> Walk<'_, R> {
    /// Handle the value of type `tag_type` at `path`, `depth` containers
    /// below the root, whose payload is next in the stream.
    ///
    /// Returns `false` without reading anything if the path is neither
    /// requested nor on the way to a request; the caller skips it then.
    fn visit(&mut self, tag_type: u8, path: String, depth: usize) -> bool {
        if self.pending.remove(&path) {
            trace!("decode {path}");
            let tag = match read_value(tag_type, self.reader, depth) {
                Ok(tag) => tag,
                Err(failure) => {
                    if matches!(failure, Failure::Truncated(_) | Failure::TooDeep) {
                        self.exhausted = true;
                    }
                    failure.into_tag(tag_type)
                }
            };
            self.values.insert(path, tag);
            self.stats.decoded += 1;
            true
        } else if self.prefixes.contains(&path) {
            trace!("descend {path}");
            self.stats.descended += 1;
            match tag_type {
                TAG_COMPOUND | TAG_LIST if depth >= MAX_DEPTH => {
                    debug!("selective walk gave up at {path}: nesting too deep");
                    self.exhausted = true;
                }
                TAG_COMPOUND => self.walk_compound(&path, depth),
                TAG_LIST => self.walk_list(&path, depth),
                // A leaf where a container was expected; nothing below it.
                other => self.skip(other, depth),
            }
            true
        } else {
            false
        }
    }

    fn walk_compound(&mut self, prefix: &str, depth: usize) {
        while !self.exhausted {
            let Ok(item_type) = self.reader.read_u8() else {
                self.exhausted = true;
                return;
            };
            if item_type == TAG_END {
                return;
            }
            let name = match read_name(self.reader) {
                Ok(name) => name,
                Err(Failure::Truncated(_)) => {
                    self.exhausted = true;
                    return;
                }
                Err(_) => {
                    self.skip(item_type, depth + 1);
                    continue;
                }
            };
            let path = format!("{prefix}.{name}");
            if self.visit(item_type, path, depth + 1) {
                if self.pending.is_empty() {
                    return;
                }
            } else {
                trace!("skip {prefix}.{name}");
                self.stats.skipped += 1;
                self.skip(item_type, depth + 1);
            }
            if item_type > TAG_LONG_ARRAY {
                // Unknown payload size; the next member cannot be located.
                return;
            }
        }
    }

    fn walk_list(&mut self, prefix: &str, depth: usize) {
        let header = self
            .reader
            .read_u8()
            .and_then(|t| Ok((t, self.reader.read_i32::<BigEndian>()?)));
        let Ok((item_type, count)) = header else {
            self.exhausted = true;
            return;
        };
        if item_type == TAG_END || item_type > TAG_LONG_ARRAY {
            return;
        }
        for index in 0..count.max(0) {
            if self.exhausted {
                return;
            }
            let path = format!("{prefix}.{index}");
            if self.visit(item_type, path, depth + 1) {
                if self.pending.is_empty() {
                    return;
                }
            } else {
                self.stats.skipped += 1;
                self.skip(item_type, depth + 1);
            }
        }
    }

    fn skip(&mut self, tag_type: u8, depth: usize) {
        if try_skip(tag_type, self.reader, depth).is_err() {
            self.exhausted = true;
        }
    }
}
