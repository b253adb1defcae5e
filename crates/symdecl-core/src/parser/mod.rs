//! # Parser
//!
//! The interpreter that turns a SYM record stream into the C declaration
//! model.
//!
//! Parsing runs in three passes over the same record slice:
//!
//! 1. [`Parser::prescan`] registers an empty shell for every struct, union
//!    and enum tag, so later references resolve regardless of order.
//! 2. [`Parser::parse_types`] fills in member lists and typedefs.
//! 3. [`Parser::parse_decls`] builds the per-overlay variables, functions
//!    (with parameters, blocks and locals), symbols and line table.
//!
//! Sub-parsers for member lists and function bodies take the record slice and
//! a position and return the position just past the records they consumed.
//!
//! ## Usage
//!
//! ```rust
//! use symdecl_core::parser::parse;
//! use symdecl_core::record::{Base, Class, Def, Record, RecordBody, SymType};
//!
//! let records = vec![
//!     Record::new(
//!         0x8001_0000,
//!         RecordBody::Def(Def {
//!             class: Class::Ext,
//!             ty: SymType::from(Base::Int),
//!             size: 4,
//!             name: "frame_count".to_string(),
//!         }),
//!     ),
//!     Record::new(0x8001_0000, RecordBody::Name1 { name: "frame_count".to_string() }),
//! ];
//!
//! let model = parse(&records)?;
//! let main = model.overlays.main();
//! assert_eq!(main.vars()[0].name(), "frame_count");
//! assert_eq!(main.symbols()[0].to_string(), "frame_count@0x80010000");
//! # Ok::<(), symdecl_core::error::SymError>(())
//! ```

mod aggregates;
mod decls;
mod func;
pub mod names;
pub mod prescan;
mod resolve;
mod tables;

use std::collections::HashSet;

use tracing::{debug, info_span};

pub use decls::storage_class;
pub use resolve::apply_modifiers;
pub use tables::{TagTable, TypeTables};

use crate::error::Result;
use crate::overlay::OverlayRegistry;
use crate::record::Record;

/// Everything recovered from one record stream.
#[derive(Debug, Clone)]
pub struct SymbolModel
{
    /// Struct, union, enum and typedef definitions shared by all overlays.
    pub types: TypeTables,
    /// Per-overlay declarations, including the main binary.
    pub overlays: OverlayRegistry,
}

/// Interpreter state shared by all passes.
#[derive(Debug, Clone, Default)]
pub struct Parser
{
    types: TypeTables,
    overlays: OverlayRegistry,
    /// Enumerator names used so far, across every enum.
    enum_members: HashSet<String>,
}

impl Parser
{
    /// Fresh parser with empty tables and the main binary as current overlay.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn types(&self) -> &TypeTables
    {
        &self.types
    }

    pub fn overlays(&self) -> &OverlayRegistry
    {
        &self.overlays
    }

    /// Hand over the recovered model.
    #[must_use]
    pub fn finish(self) -> SymbolModel
    {
        SymbolModel {
            types: self.types,
            overlays: self.overlays,
        }
    }
}

/// Run all three passes over `records`.
///
/// ## Errors
///
/// Returns the first fatal [`SymError`](crate::error::SymError); no partial
/// model is produced.
pub fn parse(records: &[Record]) -> Result<SymbolModel>
{
    let span = info_span!("parse", records = records.len());
    let _guard = span.enter();

    let mut parser = Parser::new();
    parser.prescan(records);
    parser.parse_types(records)?;
    parser.parse_decls(records)?;

    let model = parser.finish();
    debug!(
        overlays = model.overlays.overlays().len(),
        structs = model.types.structs().len(),
        typedefs = model.types.typedefs().len(),
        "parsed symbol stream"
    );
    Ok(model)
}
