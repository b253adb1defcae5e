//! # symdecl-core
//!
//! Recovers C declarations from PlayStation SYM debug-record streams.
//!
//! This crate provides the interpreter that turns an ordered list of SYM
//! records into:
//! - Struct, union, enum and typedef definitions, with forward references
//!   resolved by tag
//! - Global and static variables and functions, partitioned per overlay
//! - Function parameters, nested lexical blocks and their locals
//! - Named symbols and the address to source line table
//!
//! Decoding the binary SYM container and rendering C source are left to the
//! caller.
//!
//! ## Overlays
//!
//! Overlay binaries have their own declaration namespace. The main binary is
//! always present as the default overlay; `SetOverlay` records redirect
//! declarations to another one.

pub mod error;
pub mod overlay;
pub mod parser;
pub mod prelude;
pub mod record;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SymError};
pub use overlay::{Overlay, OverlayRegistry};
pub use parser::{parse, Parser, SymbolModel};
pub use record::{Record, RecordBody};
