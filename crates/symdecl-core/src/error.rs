//! # Error Types
//!
//! Fatal conditions of a parse.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages. Every variant aborts the whole pass: the parser
//! does not guess its way past malformed input or record kinds it does not
//! understand. Duplicate struct and union definitions are not errors; they are
//! logged and shadowed (see [`crate::parser`]).

use thiserror::Error;

use crate::record::{Base, Class};
use crate::types::Address;

/// Which tag namespace an aggregate lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind
{
    Struct,
    Union,
    Enum,
}

impl std::fmt::Display for TagKind
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let label = match self {
            TagKind::Struct => "struct",
            TagKind::Union => "union",
            TagKind::Enum => "enum",
        };
        write!(f, "{label}")
    }
}

/// Main error type for parsing a SYM record stream
///
/// ## Error Categories
///
/// 1. **Unsupported input**: UnsupportedRecordKind, UnsupportedClass, UnsupportedBase
/// 2. **Dangling references**: UnresolvedTag, UnknownFunction, UnknownOverlay
/// 3. **Malformed structure**: TruncatedFunction, TruncatedAggregate, UnbalancedBlock,
///    MismatchedTagBase, MissingArrayDimension
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymError
{
    /// A record kind that is not valid at this point of the stream
    ///
    /// `context` names the construct being parsed, e.g. "function body".
    #[error("Unsupported {kind} record in {context}")]
    UnsupportedRecordKind
    {
        kind: &'static str,
        context: &'static str,
    },

    /// A definition record whose storage class is not valid at this point
    #[error("Unsupported symbol class {class} in {context}")]
    UnsupportedClass
    {
        class: Class,
        context: &'static str,
    },

    /// A base type the C model has no representation for (float, double,
    /// enum member)
    #[error("Unsupported base type {0}")]
    UnsupportedBase(Base),

    /// A struct, union or enum tag record whose type code has the wrong base
    #[error("Tag record for {kind} {tag} has base type {base}")]
    MismatchedTagBase
    {
        kind: TagKind,
        tag: String,
        base: Base,
    },

    /// An aggregate reference to a tag the prescan never registered
    #[error("Unable to locate {kind} {tag:?}")]
    UnresolvedTag
    {
        kind: TagKind,
        tag: String,
    },

    /// A function body whose name/address pair matches no declaration
    #[error("Unable to locate function {name:?} at {address}")]
    UnknownFunction
    {
        name: String,
        address: Address,
    },

    /// An overlay switch to an id no Overlay record declared
    #[error("Unable to locate overlay with ID {0:#x}")]
    UnknownOverlay(u32),

    /// The stream ended inside a function body
    #[error("Function {name:?} has no FuncEnd record")]
    TruncatedFunction
    {
        name: String
    },

    /// The stream ended inside a struct, union or enum member list
    #[error("Member list of {kind} {tag:?} has no EOS record")]
    TruncatedAggregate
    {
        kind: TagKind,
        tag: String,
    },

    /// A block end with no block open
    #[error("BlockEnd at line {line} in function {function:?} closes no open block")]
    UnbalancedBlock
    {
        function: String,
        line: u32,
    },

    /// An array modifier with no dimension left to consume
    #[error("Array modifier #{index} has no matching dimension")]
    MissingArrayDimension
    {
        index: usize
    },
}

/// Convenience type alias for `Result<T, SymError>`
///
/// ```rust
/// use symdecl_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SymError>;
