//! Type pass: struct, union and enum member lists, and typedefs.

use tracing::{debug_span, trace, warn};

use super::names::{duplicate_enum_member, duplicate_tag, valid_name};
use super::Parser;
use crate::error::{Result, SymError, TagKind};
use crate::record::{Base, Class, DefView, Record};
use crate::types::{EnumMember, EnumType, Field, StructType, UnionType, Var, VarDecl};

impl TagKind
{
    fn base(self) -> Base
    {
        match self {
            TagKind::Struct => Base::Struct,
            TagKind::Union => Base::Union,
            TagKind::Enum => Base::Enum,
        }
    }

    fn member_context(self) -> &'static str
    {
        match self {
            TagKind::Struct => "struct member list",
            TagKind::Union => "union member list",
            TagKind::Enum => "enum member list",
        }
    }
}

impl Parser
{
    /// Walk the whole stream and fill in aggregate member lists and typedefs.
    ///
    /// Must run after [`Parser::prescan`]. Records other than tag and typedef
    /// definitions are skipped.
    ///
    /// ## Errors
    ///
    /// Fails on the first malformed member list or unresolvable member type.
    pub fn parse_types(&mut self, records: &[Record]) -> Result<()>
    {
        let span = debug_span!("parse_types", records = records.len());
        let _guard = span.enter();

        let mut pos = 0;
        while let Some(record) = records.get(pos) {
            pos += 1;
            let Some(def) = record.as_def() else {
                continue;
            };
            match def.class {
                Class::StrTag => pos = self.parse_struct(&def, records, pos)?,
                Class::UnTag => pos = self.parse_union(&def, records, pos)?,
                Class::EnTag => pos = self.parse_enum(&def, records, pos)?,
                Class::TpDef => self.parse_typedef(&def)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Parse the member list following a struct tag record at `pos`.
    ///
    /// Returns the position just past the closing EOS record.
    fn parse_struct(&mut self, def: &DefView<'_>, records: &[Record], pos: usize) -> Result<usize>
    {
        let tag = tag_of(TagKind::Struct, def)?;
        let shell = self
            .types
            .structs
            .get(&tag)
            .ok_or_else(|| SymError::UnresolvedTag {
                kind: TagKind::Struct,
                tag: tag.clone(),
            })?;

        let mut target = if shell.fields.is_empty() {
            shell.clone()
        } else {
            warn!(tag = %tag, "duplicate struct tag definition, recording it as a shadow type");
            StructType::shell(duplicate_tag(&tag), Some(def.size))
        };

        let (fields, end) = self.parse_fields(TagKind::Struct, &target.tag, &[Class::Mos, Class::Field], records, pos)?;
        target.fields = fields;
        self.types.structs.insert(target.tag.clone(), target);
        Ok(end)
    }

    /// Parse the member list following a union tag record at `pos`.
    fn parse_union(&mut self, def: &DefView<'_>, records: &[Record], pos: usize) -> Result<usize>
    {
        let tag = tag_of(TagKind::Union, def)?;
        let shell = self
            .types
            .unions
            .get(&tag)
            .ok_or_else(|| SymError::UnresolvedTag {
                kind: TagKind::Union,
                tag: tag.clone(),
            })?;

        let mut target = if shell.fields.is_empty() {
            shell.clone()
        } else {
            warn!(tag = %tag, "duplicate union tag definition, recording it as a shadow type");
            UnionType::shell(duplicate_tag(&tag), Some(def.size))
        };

        let (fields, end) = self.parse_fields(TagKind::Union, &target.tag, &[Class::Mou], records, pos)?;
        target.fields = fields;
        self.types.unions.insert(target.tag.clone(), target);
        Ok(end)
    }

    /// Collect struct/union members up to and including the EOS record.
    fn parse_fields(
        &self,
        kind: TagKind,
        tag: &str,
        member_classes: &[Class],
        records: &[Record],
        mut pos: usize,
    ) -> Result<(Vec<Field>, usize)>
    {
        let mut fields = Vec::new();
        while let Some(record) = records.get(pos) {
            pos += 1;
            let def = member_def(kind, record)?;
            match def.class {
                Class::Eos => return Ok((fields, pos)),
                class if member_classes.contains(&class) => {
                    let ty = self.types.resolve(def.ty, def.dims, def.tag)?;
                    fields.push(Field {
                        offset: record.value,
                        size: def.size,
                        var: Var::new(valid_name(def.name), ty),
                    });
                }
                class => {
                    return Err(SymError::UnsupportedClass {
                        class,
                        context: kind.member_context(),
                    })
                }
            }
        }
        Err(SymError::TruncatedAggregate {
            kind,
            tag: tag.to_string(),
        })
    }

    /// Parse the enumerators following an enum tag record at `pos`.
    ///
    /// Enumerator names share one namespace across the whole pass; a repeated
    /// name gets the upper-cased duplicate prefix. A repeated enum tag gets a
    /// shadow type, as for structs.
    fn parse_enum(&mut self, def: &DefView<'_>, records: &[Record], mut pos: usize) -> Result<usize>
    {
        let kind = TagKind::Enum;
        let tag = tag_of(kind, def)?;
        let shell = self
            .types
            .enums
            .get(&tag)
            .ok_or_else(|| SymError::UnresolvedTag {
                kind,
                tag: tag.clone(),
            })?;

        let mut target = if shell.members.is_empty() {
            shell.clone()
        } else {
            warn!(tag = %tag, "duplicate enum tag definition, recording it as a shadow type");
            EnumType::shell(duplicate_tag(&tag))
        };

        while let Some(record) = records.get(pos) {
            pos += 1;
            let member = member_def(kind, record)?;
            match member.class {
                Class::Eos => {
                    self.types.enums.insert(target.tag.clone(), target);
                    return Ok(pos);
                }
                Class::Moe => {
                    let mut name = valid_name(member.name);
                    if !self.enum_members.insert(name.clone()) {
                        name = duplicate_enum_member(&name);
                        trace!(enumerator = %name, "renamed repeated enumerator");
                        self.enum_members.insert(name.clone());
                    }
                    target.members.push(EnumMember {
                        name,
                        value: record.value,
                    });
                }
                class => {
                    return Err(SymError::UnsupportedClass {
                        class,
                        context: kind.member_context(),
                    })
                }
            }
        }
        Err(SymError::TruncatedAggregate {
            kind,
            tag: target.tag,
        })
    }

    fn parse_typedef(&mut self, def: &DefView<'_>) -> Result<()>
    {
        let name = valid_name(def.name);
        let ty = self.types.resolve(def.ty, def.dims, def.tag)?;
        trace!(typedef = %name, ty = %ty, "registered typedef");
        self.types.push_typedef(VarDecl::typedef(name, ty));
        Ok(())
    }
}

/// Sanitized tag of a tag record, after checking its base type.
fn tag_of(kind: TagKind, def: &DefView<'_>) -> Result<String>
{
    let tag = valid_name(def.name);
    let base = def.ty.base();
    if base == kind.base() {
        Ok(tag)
    } else {
        Err(SymError::MismatchedTagBase { kind, tag, base })
    }
}

fn member_def<'a>(kind: TagKind, record: &'a Record) -> Result<DefView<'a>>
{
    record.as_def().ok_or(SymError::UnsupportedRecordKind {
        kind: record.body.kind_name(),
        context: kind.member_context(),
    })
}
