//! Element model: `Tag`, `ElementType`, and decoded primitive `Value`s.
//!
//! # Tag layout (64 bits)
//!
//! | Bits   | Field        |
//! |--------|--------------|
//! | 63-32  | `profile_id` |
//! | 31-0   | `tag_num`    |
//!
//! Profile id `0xFFFF_FFFF` is the special-tag marker: context tags live
//! under it, and the all-ones value is the anonymous tag.
//!
//! Tags are compared by raw `u64` equality only. Two tags that name the
//! "same" field under different representations are different tags.

use std::fmt;

const SPECIAL_TAG_MARKER: u64 = 0xFFFF_FFFF_0000_0000;
const PROFILE_ID_MASK: u64 = 0xFFFF_FFFF_0000_0000;
const TAG_NUM_MASK: u64 = 0x0000_0000_FFFF_FFFF;

/// An opaque 64-bit element tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u64);

impl Tag {
    /// The anonymous tag (elements of arrays, top-level untagged elements).
    pub const ANONYMOUS: Self = Self(u64::MAX);

    /// Construct from the raw 64-bit value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Profile-specific tag.
    #[must_use]
    pub const fn profile(profile_id: u32, tag_num: u32) -> Self {
        Self(((profile_id as u64) << 32) | tag_num as u64)
    }

    /// Tag in the common profile (profile id 0).
    #[must_use]
    pub const fn common(tag_num: u32) -> Self {
        Self::profile(0, tag_num)
    }

    /// Context-specific tag, meaningful only inside its enclosing structure.
    #[must_use]
    pub const fn context(tag_num: u8) -> Self {
        Self(SPECIAL_TAG_MARKER | tag_num as u64)
    }

    /// The raw 64-bit value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_anonymous(self) -> bool {
        self.0 == Self::ANONYMOUS.0
    }

    /// True for context tags (special marker, number fits in a byte).
    #[must_use]
    pub const fn is_context(self) -> bool {
        self.0 & PROFILE_ID_MASK == SPECIAL_TAG_MARKER && self.0 & TAG_NUM_MASK <= 0xFF
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn profile_id(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn tag_num(self) -> u32 {
        (self.0 & TAG_NUM_MASK) as u32
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self} / 0x{:016x})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "anon")
        } else if self.is_context() {
            write!(f, "ctx:{}", self.tag_num())
        } else {
            write!(f, "{}:{}", self.profile_id(), self.tag_num())
        }
    }
}

/// The kind of container an element opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Members are tagged; order carries no meaning to the format.
    Structure,
    /// Members are anonymous and ordered.
    Array,
    /// Members are ordered and may be tagged.
    List,
}

/// Type of the element under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    SignedInteger,
    UnsignedInteger,
    Boolean,
    FloatingPoint,
    Utf8String,
    ByteString,
    Null,
    Structure,
    Array,
    List,
}

impl ElementType {
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Structure | Self::Array | Self::List)
    }

    /// The container kind, if this type opens a container.
    #[must_use]
    pub const fn container_kind(self) -> Option<ContainerKind> {
        match self {
            Self::Structure => Some(ContainerKind::Structure),
            Self::Array => Some(ContainerKind::Array),
            Self::List => Some(ContainerKind::List),
            _ => None,
        }
    }

    /// Stable lowercase name (used by renderers and fixtures).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SignedInteger => "int",
            Self::UnsignedInteger => "uint",
            Self::Boolean => "bool",
            Self::FloatingPoint => "float",
            Self::Utf8String => "string",
            Self::ByteString => "bytes",
            Self::Null => "null",
            Self::Structure => "structure",
            Self::Array => "array",
            Self::List => "list",
        }
    }
}

impl From<ContainerKind> for ElementType {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Structure => Self::Structure,
            ContainerKind::Array => Self::Array,
            ContainerKind::List => Self::List,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded primitive value.
///
/// Containers carry no value; their contents are reached by entering them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Signed(i64),
    Unsigned(u64),
    Bool(bool),
    Float(f64),
    Utf8(String),
    Bytes(Vec<u8>),
    Null,
}

impl Value {
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Signed(_) => ElementType::SignedInteger,
            Self::Unsigned(_) => ElementType::UnsignedInteger,
            Self::Bool(_) => ElementType::Boolean,
            Self::Float(_) => ElementType::FloatingPoint,
            Self::Utf8(_) => ElementType::Utf8String,
            Self::Bytes(_) => ElementType::ByteString,
            Self::Null => ElementType::Null,
        }
    }
}
