//! Common module for library exports

pub use crate::error::{Result, SymError, TagKind};
pub use crate::overlay::{Overlay, OverlayRegistry};
pub use crate::parser::{parse, Parser, SymbolModel, TypeTables};
pub use crate::record::{Base, Class, Def, Def2, FuncStart, Modifier, Record, RecordBody, SymType};
pub use crate::types::{Address, Block, FuncDecl, Line, StorageClass, Symbol, Type, Var, VarDecl};
