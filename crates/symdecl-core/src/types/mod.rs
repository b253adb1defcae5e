//! # Types
//!
//! The recovered C model: types, declarations, and the address newtype they
//! share. Nothing in here has behavior beyond construction helpers; the
//! parser builds these values and downstream renderers read them.

pub mod address;
pub mod ctype;
pub mod decl;

// Re-export all public types
pub use address::Address;
pub use ctype::{EnumMember, EnumType, Field, FuncType, StructType, Type, UnionType, Var};
pub use decl::{Block, FuncDecl, Line, StorageClass, Symbol, VarDecl};
