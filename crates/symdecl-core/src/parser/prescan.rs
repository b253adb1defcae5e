//! Tag prescan.
//!
//! Registers an empty shell for every struct, union and enum tag in the whole
//! stream before anything else is parsed, so that a type reference can be
//! resolved no matter where the referenced member list appears.

use std::collections::HashSet;

use tracing::{debug, debug_span};

use super::names::{duplicate_tag, valid_name};
use super::Parser;
use crate::record::{Class, Record};
use crate::types::{EnumType, StructType, Type, UnionType, VarDecl};

/// Struct shell registered unconditionally for C++ virtual table pointers.
pub const VTBL_PTR_TYPE: &str = "__vtbl_ptr_type";

/// Typedef that the null base type resolves to.
pub const BOOL_TYPEDEF: &str = "bool";

impl Parser
{
    /// Register the scaffolding types and an empty shell for every tag record.
    ///
    /// Member records are never read here. A tag seen a second time in the
    /// same namespace is registered under [`duplicate_tag`].
    pub fn prescan(&mut self, records: &[Record])
    {
        let span = debug_span!("prescan", records = records.len());
        let _guard = span.enter();

        self.types
            .structs
            .insert(VTBL_PTR_TYPE.to_string(), StructType::shell(VTBL_PTR_TYPE, None));
        self.types
            .insert_builtin_typedef(VarDecl::typedef(BOOL_TYPEDEF, Type::Int));

        let mut seen_structs = HashSet::new();
        let mut seen_unions = HashSet::new();
        let mut seen_enums = HashSet::new();

        for def in records.iter().filter_map(Record::as_def) {
            match def.class {
                Class::StrTag => {
                    let tag = claim_tag(&mut seen_structs, def.name);
                    let shell = StructType::shell(tag.clone(), Some(def.size));
                    self.types.structs.insert(tag, shell);
                }
                Class::UnTag => {
                    let tag = claim_tag(&mut seen_unions, def.name);
                    let shell = UnionType::shell(tag.clone(), Some(def.size));
                    self.types.unions.insert(tag, shell);
                }
                Class::EnTag => {
                    let tag = claim_tag(&mut seen_enums, def.name);
                    self.types.enums.insert(tag.clone(), EnumType::shell(tag));
                }
                _ => {}
            }
        }

        debug!(
            structs = self.types.structs.len(),
            unions = self.types.unions.len(),
            enums = self.types.enums.len(),
            "registered aggregate shells"
        );
    }
}

fn claim_tag(seen: &mut HashSet<String>, raw: &str) -> String
{
    let mut tag = valid_name(raw);
    if seen.contains(&tag) {
        tag = duplicate_tag(&tag);
    }
    seen.insert(tag.clone());
    tag
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::record::{Base, Def, Def2, RecordBody, SymType};

    fn tag_record(class: Class, base: Base, size: u32, name: &str) -> Record
    {
        Record::new(
            0,
            RecordBody::Def(Def {
                class,
                ty: SymType::from(base),
                size,
                name: name.to_string(),
            }),
        )
    }

    #[test]
    fn test_scaffolding_is_registered()
    {
        let mut parser = Parser::new();
        parser.prescan(&[]);

        let vtbl = parser.types().struct_type(VTBL_PTR_TYPE).unwrap();
        assert!(vtbl.fields.is_empty());
        assert_eq!(vtbl.size, None);
        assert_eq!(parser.types().typedef(BOOL_TYPEDEF).unwrap().var.ty, Type::Int);
        assert!(parser.types().typedefs().is_empty());
    }

    #[test]
    fn test_shells_in_encounter_order_with_duplicates()
    {
        let records = [
            tag_record(Class::StrTag, Base::Struct, 8, "Node"),
            tag_record(Class::EnTag, Base::Enum, 4, "Color"),
            tag_record(Class::UnTag, Base::Union, 4, "Word"),
            tag_record(Class::StrTag, Base::Struct, 12, "Node"),
            tag_record(Class::StrTag, Base::Struct, 2, "a.b"),
        ];
        let mut parser = Parser::new();
        parser.prescan(&records);

        let types = parser.types();
        assert_eq!(types.structs().tags(), [VTBL_PTR_TYPE, "Node", "_duplicate_Node", "a_b"]);
        assert_eq!(types.struct_type("Node").unwrap().size, Some(8));
        assert_eq!(types.struct_type("_duplicate_Node").unwrap().size, Some(12));
        assert_eq!(types.unions().tags(), ["Word"]);
        assert_eq!(types.enums().tags(), ["Color"]);
    }

    #[test]
    fn test_tag_namespaces_are_independent()
    {
        let records = [
            tag_record(Class::StrTag, Base::Struct, 8, "Thing"),
            tag_record(Class::UnTag, Base::Union, 8, "Thing"),
            tag_record(Class::EnTag, Base::Enum, 4, "Thing"),
        ];
        let mut parser = Parser::new();
        parser.prescan(&records);

        assert!(parser.types().struct_type("Thing").is_some());
        assert!(parser.types().union_type("Thing").is_some());
        assert!(parser.types().enum_type("Thing").is_some());
        assert!(parser.types().struct_type("_duplicate_Thing").is_none());
    }

    #[test]
    fn test_long_form_tag_records_are_registered()
    {
        let record = Record::new(
            0,
            RecordBody::Def2(Def2 {
                class: Class::StrTag,
                ty: SymType::from(Base::Struct),
                size: 16,
                dims: Vec::new(),
                tag: "Pair".to_string(),
                name: "Pair".to_string(),
            }),
        );
        let mut parser = Parser::new();
        parser.prescan(&[record]);
        assert_eq!(parser.types().struct_type("Pair").unwrap().size, Some(16));
    }
}
