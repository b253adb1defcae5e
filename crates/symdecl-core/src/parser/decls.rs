//! Declaration pass: symbols, line table, variables and functions.

use tracing::{debug_span, trace};

use super::names::{unique_name, valid_name};
use super::Parser;
use crate::error::{Result, SymError};
use crate::overlay::Overlay;
use crate::record::{Class, DefView, Record, RecordBody};
use crate::types::{Address, FuncDecl, Line, StorageClass, Symbol, Type, Var, VarDecl};

/// Current source position as tracked by the line records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineCursor
{
    path: String,
    line: u32,
}

impl LineCursor
{
    fn at(&self, address: Address) -> Line
    {
        Line {
            address,
            path: self.path.clone(),
            line: self.line,
        }
    }
}

impl Parser
{
    /// Walk the stream once, filling the overlay registry.
    ///
    /// Must run after [`Parser::prescan`] and [`Parser::parse_types`], since
    /// every definition's type is resolved against the type tables.
    ///
    /// ## Errors
    ///
    /// Any record the pass does not understand aborts it; see [`SymError`].
    pub fn parse_decls(&mut self, records: &[Record]) -> Result<()>
    {
        let span = debug_span!("parse_decls", records = records.len());
        let _guard = span.enter();

        let mut cursor = LineCursor::default();
        let mut pos = 0;
        while let Some(record) = records.get(pos) {
            pos += 1;
            let address = Address::new(record.value);
            match &record.body {
                RecordBody::Name1 { name } | RecordBody::Name2 { name } => {
                    self.overlays.current_mut().push_symbol(Symbol {
                        address,
                        name: name.clone(),
                    });
                }
                RecordBody::IncSld => {
                    cursor.line = cursor.line.wrapping_add(1);
                    self.overlays.current_mut().push_line(cursor.at(address));
                }
                RecordBody::IncSldByte { inc } => {
                    cursor.line = cursor.line.wrapping_add(u32::from(*inc));
                    self.overlays.current_mut().push_line(cursor.at(address));
                }
                RecordBody::IncSldWord { inc } => {
                    cursor.line = cursor.line.wrapping_add(u32::from(*inc));
                    self.overlays.current_mut().push_line(cursor.at(address));
                }
                RecordBody::SetSld { line } => {
                    cursor.line = *line;
                    self.overlays.current_mut().push_line(cursor.at(address));
                }
                RecordBody::SetSld2 { line, path } => {
                    cursor = LineCursor {
                        path: path.clone(),
                        line: *line,
                    };
                    self.overlays.current_mut().push_line(cursor.at(address));
                }
                RecordBody::EndSld => cursor = LineCursor::default(),
                RecordBody::FuncStart(start) => pos = self.parse_func(address, start, records, pos)?,
                RecordBody::Def(def) => self.parse_top_level_def(address, &def.view())?,
                RecordBody::Def2(def) => self.parse_top_level_def(address, &def.view())?,
                RecordBody::Overlay { length, id } => {
                    trace!(id = *id, address = %address, length = *length, "registered overlay");
                    self.overlays.insert(Overlay::new(address, *id, *length));
                }
                RecordBody::SetOverlay => {
                    self.overlays.switch_to(record.value)?;
                    trace!(id = record.value, "switched overlay");
                }
                RecordBody::FuncEnd { .. } | RecordBody::BlockStart { .. } | RecordBody::BlockEnd { .. } => {
                    return Err(SymError::UnsupportedRecordKind {
                        kind: record.body.kind_name(),
                        context: "top level",
                    });
                }
            }
        }
        Ok(())
    }

    fn parse_top_level_def(&mut self, address: Address, def: &DefView<'_>) -> Result<()>
    {
        match def.class {
            Class::Ext | Class::Stat => self.register_decl(address, def),
            // Handled by the prescan and the type pass.
            Class::Mos
            | Class::StrTag
            | Class::Mou
            | Class::UnTag
            | Class::TpDef
            | Class::EnTag
            | Class::Moe
            | Class::Field
            | Class::Eos => Ok(()),
            class => Err(SymError::UnsupportedClass {
                class,
                context: "top-level definition",
            }),
        }
    }

    /// Register a global or file-static variable or function in the current
    /// overlay.
    ///
    /// Variables and functions share one namespace per overlay; a name that
    /// is already taken gets the address appended.
    fn register_decl(&mut self, address: Address, def: &DefView<'_>) -> Result<()>
    {
        let overlay = self.overlays.current_mut();
        let mut name = valid_name(def.name);
        if overlay.is_name_taken(&name) {
            name = unique_name(&name, address);
            trace!(name = %name, "disambiguated repeated declaration name");
        }

        let storage = storage_class(def.class)?;
        match self.types.resolve(def.ty, def.dims, def.tag)? {
            Type::Function(signature) => {
                overlay.push_func(FuncDecl::new(address, def.size, storage, name, signature));
            }
            ty => overlay.push_var(VarDecl {
                address,
                size: def.size,
                storage,
                var: Var::new(name, ty),
            }),
        }
        Ok(())
    }
}

/// Map a symbol class to the C storage class it declares.
///
/// ## Errors
///
/// Returns [`SymError::UnsupportedClass`] for classes that do not declare
/// storage (members, tags, markers).
pub fn storage_class(class: Class) -> Result<StorageClass>
{
    match class {
        Class::Auto => Ok(StorageClass::Auto),
        Class::Ext => Ok(StorageClass::Extern),
        Class::Stat => Ok(StorageClass::Static),
        Class::Reg => Ok(StorageClass::Register),
        Class::TpDef => Ok(StorageClass::Typedef),
        class => Err(SymError::UnsupportedClass {
            class,
            context: "storage class",
        }),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_storage_class_mapping()
    {
        assert_eq!(storage_class(Class::Ext), Ok(StorageClass::Extern));
        assert_eq!(storage_class(Class::Stat), Ok(StorageClass::Static));
        assert_eq!(storage_class(Class::Reg), Ok(StorageClass::Register));
        assert!(storage_class(Class::Mos).is_err());
    }

    #[test]
    fn test_line_cursor_snapshot()
    {
        let cursor = LineCursor {
            path: "main.c".to_string(),
            line: 12,
        };
        let line = cursor.at(Address::new(0x40));
        assert_eq!(line.path, "main.c");
        assert_eq!(line.line, 12);
        assert_eq!(line.address, Address::new(0x40));
    }
}
