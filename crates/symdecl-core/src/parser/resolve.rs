//! Type resolution: type code + dimensions + tag to a [`Type`].

use super::names::valid_name;
use super::prescan::BOOL_TYPEDEF;
use super::tables::TypeTables;
use crate::error::{Result, SymError, TagKind};
use crate::record::{Base, Modifier, SymType};
use crate::types::{FuncType, Type};

impl TypeTables
{
    /// Resolve a type code into a C type.
    ///
    /// The base is resolved first; the modifiers are then applied innermost
    /// first, i.e. in reverse of their encoded (outermost-first) order. Each
    /// array modifier takes the next entry of `dims`.
    ///
    /// ## Errors
    ///
    /// - [`SymError::UnresolvedTag`] if an aggregate base names a tag that is
    ///   not registered
    /// - [`SymError::UnsupportedBase`] for float, double and enum-member bases
    /// - [`SymError::MissingArrayDimension`] if `dims` runs out
    pub fn resolve(&self, ty: SymType, dims: &[u32], tag: &str) -> Result<Type>
    {
        let base = self.resolve_base(ty.base(), tag)?;
        apply_modifiers(base, &ty.modifiers(), dims)
    }

    fn resolve_base(&self, base: Base, tag: &str) -> Result<Type>
    {
        let ty = match base {
            Base::Null => Type::Typedef(BOOL_TYPEDEF.to_string()),
            Base::Void => Type::Void,
            Base::Char => Type::Char,
            Base::Short => Type::Short,
            Base::Int => Type::Int,
            Base::Long => Type::Long,
            Base::UChar => Type::UChar,
            Base::UShort => Type::UShort,
            Base::UInt => Type::UInt,
            Base::ULong => Type::ULong,
            Base::Struct => Type::Struct(self.registered_tag(TagKind::Struct, tag)?),
            Base::Union => Type::Union(self.registered_tag(TagKind::Union, tag)?),
            Base::Enum => Type::Enum(self.registered_tag(TagKind::Enum, tag)?),
            Base::Float | Base::Double | Base::Moe => return Err(SymError::UnsupportedBase(base)),
        };
        Ok(ty)
    }

    fn registered_tag(&self, kind: TagKind, raw: &str) -> Result<String>
    {
        let tag = valid_name(raw);
        let present = match kind {
            TagKind::Struct => self.structs.contains(&tag),
            TagKind::Union => self.unions.contains(&tag),
            TagKind::Enum => self.enums.contains(&tag),
        };
        if present {
            Ok(tag)
        } else {
            Err(SymError::UnresolvedTag { kind, tag })
        }
    }
}

/// Wrap `ty` in `modifiers`, given outermost first.
///
/// Function modifiers produce a signature with no parameters; parameters are
/// attached later, when the function's body records are parsed.
///
/// ## Errors
///
/// Returns [`SymError::MissingArrayDimension`] if there are more array
/// modifiers than entries in `dims`.
pub fn apply_modifiers(mut ty: Type, modifiers: &[Modifier], dims: &[u32]) -> Result<Type>
{
    let mut next_dim = 0;
    for modifier in modifiers.iter().rev() {
        ty = match modifier {
            Modifier::Pointer => Type::Pointer(Box::new(ty)),
            Modifier::Function => Type::Function(FuncType::returning(ty)),
            Modifier::Array => {
                let len = *dims
                    .get(next_dim)
                    .ok_or(SymError::MissingArrayDimension { index: next_dim })?;
                next_dim += 1;
                Type::Array {
                    elem: Box::new(ty),
                    len,
                }
            }
        };
    }
    Ok(ty)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::types::StructType;

    fn pointer(ty: Type) -> Type
    {
        Type::Pointer(Box::new(ty))
    }

    #[test]
    fn test_array_of_pointers()
    {
        // int *a[3]
        let tables = TypeTables::new();
        let ty = SymType::from_parts(Base::Int, &[Modifier::Array, Modifier::Pointer]);
        let resolved = tables.resolve(ty, &[3], "").unwrap();
        assert_eq!(
            resolved,
            Type::Array {
                elem: Box::new(pointer(Type::Int)),
                len: 3,
            }
        );
    }

    #[test]
    fn test_pointer_to_array()
    {
        // int (*p)[3]
        let tables = TypeTables::new();
        let ty = SymType::from_parts(Base::Int, &[Modifier::Pointer, Modifier::Array]);
        let resolved = tables.resolve(ty, &[3], "").unwrap();
        assert_eq!(
            resolved,
            pointer(Type::Array {
                elem: Box::new(Type::Int),
                len: 3,
            })
        );
    }

    #[test]
    fn test_function_returning_pointer()
    {
        // char *f()
        let tables = TypeTables::new();
        let ty = SymType::from_parts(Base::Char, &[Modifier::Function, Modifier::Pointer]);
        let resolved = tables.resolve(ty, &[], "").unwrap();
        let Type::Function(func) = &resolved else {
            panic!("expected a function type, got {resolved}");
        };
        assert_eq!(*func.ret, pointer(Type::Char));
        assert!(func.params.is_empty());
        assert!(!func.variadic);
    }

    #[test]
    fn test_dimensions_are_consumed_in_forward_order()
    {
        let tables = TypeTables::new();
        let ty = SymType::from_parts(Base::Char, &[Modifier::Array, Modifier::Array]);
        let resolved = tables.resolve(ty, &[2, 5], "").unwrap();
        assert_eq!(resolved.to_string(), "array[5] of array[2] of char");
    }

    #[test]
    fn test_missing_dimension()
    {
        let tables = TypeTables::new();
        let ty = SymType::from_parts(Base::Int, &[Modifier::Array, Modifier::Array]);
        assert_eq!(
            tables.resolve(ty, &[4], ""),
            Err(SymError::MissingArrayDimension { index: 1 })
        );
    }

    #[test]
    fn test_null_base_is_bool_typedef()
    {
        let tables = TypeTables::new();
        assert_eq!(
            tables.resolve(SymType::from(Base::Null), &[], ""),
            Ok(Type::Typedef("bool".to_string()))
        );
    }

    #[test]
    fn test_aggregate_tag_is_sanitized_and_checked()
    {
        let mut tables = TypeTables::new();
        tables
            .structs
            .insert("list_node".to_string(), StructType::shell("list_node", Some(8)));

        let ty = SymType::from_parts(Base::Struct, &[Modifier::Pointer]);
        assert_eq!(
            tables.resolve(ty, &[], "list.node"),
            Ok(pointer(Type::Struct("list_node".to_string())))
        );
        assert_eq!(
            tables.resolve(SymType::from(Base::Union), &[], "list.node"),
            Err(SymError::UnresolvedTag {
                kind: TagKind::Union,
                tag: "list_node".to_string(),
            })
        );
    }

    #[test]
    fn test_unsupported_bases()
    {
        let tables = TypeTables::new();
        for base in [Base::Float, Base::Double, Base::Moe] {
            assert_eq!(
                tables.resolve(SymType::from(base), &[], ""),
                Err(SymError::UnsupportedBase(base))
            );
        }
    }
}
