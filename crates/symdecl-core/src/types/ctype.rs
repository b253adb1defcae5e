//! C type model.
//!
//! Aggregates and typedefs are referenced by key: a [`Type::Struct`] holds the
//! struct's tag, not the struct itself. The definitions live in
//! [`TypeTables`](crate::parser::TypeTables) and may still be filled in after
//! the reference has been created, which is how forward and self references
//! are represented.

use std::fmt;

/// A C type as recovered from a type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type
{
    Void,
    Char,
    Short,
    Int,
    Long,
    UChar,
    UShort,
    UInt,
    ULong,
    /// Pointer to the element type.
    Pointer(Box<Type>),
    /// Fixed-length array of the element type.
    Array
    {
        elem: Box<Type>,
        len: u32,
    },
    /// Function type.
    Function(FuncType),
    /// Reference to a struct by tag.
    Struct(String),
    /// Reference to a union by tag.
    Union(String),
    /// Reference to an enum by tag.
    Enum(String),
    /// Reference to a typedef by name.
    Typedef(String),
}

impl fmt::Display for Type
{
    /// Terse English description, e.g. `array[3] of pointer to int`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Type::Void => write!(f, "void"),
            Type::Char => write!(f, "char"),
            Type::Short => write!(f, "short"),
            Type::Int => write!(f, "int"),
            Type::Long => write!(f, "long"),
            Type::UChar => write!(f, "unsigned char"),
            Type::UShort => write!(f, "unsigned short"),
            Type::UInt => write!(f, "unsigned int"),
            Type::ULong => write!(f, "unsigned long"),
            Type::Pointer(elem) => write!(f, "pointer to {elem}"),
            Type::Array { elem, len } => write!(f, "array[{len}] of {elem}"),
            Type::Function(func) => write!(f, "function returning {}", func.ret),
            Type::Struct(tag) => write!(f, "struct {tag}"),
            Type::Union(tag) => write!(f, "union {tag}"),
            Type::Enum(tag) => write!(f, "enum {tag}"),
            Type::Typedef(name) => write!(f, "{name}"),
        }
    }
}

/// Function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType
{
    /// Return type.
    pub ret: Box<Type>,
    /// Parameters, in declaration order.
    pub params: Vec<Var>,
    /// Whether the function takes a variable argument list.
    pub variadic: bool,
}

impl FuncType
{
    /// Function returning `ret` with no parameters.
    pub fn returning(ret: Type) -> Self
    {
        Self {
            ret: Box::new(ret),
            params: Vec::new(),
            variadic: false,
        }
    }

    /// Append a parameter unless one with the same name is already present.
    pub fn add_param(&mut self, param: Var)
    {
        if self.params.iter().all(|existing| existing.name != param.name) {
            self.params.push(param);
        }
    }
}

/// A named, typed entity: parameter, local, member or declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var
{
    pub name: String,
    pub ty: Type,
}

impl Var
{
    pub fn new(name: impl Into<String>, ty: Type) -> Self
    {
        Self { name: name.into(), ty }
    }
}

/// Struct or union member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field
{
    /// Byte offset within the aggregate.
    pub offset: u32,
    /// Size in bytes.
    pub size: u32,
    pub var: Var,
}

/// Struct definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType
{
    pub tag: String,
    /// Total size in bytes, when the record stream provides it.
    pub size: Option<u32>,
    pub fields: Vec<Field>,
}

impl StructType
{
    /// Member-less shell, to be filled in when the member list is parsed.
    pub fn shell(tag: impl Into<String>, size: Option<u32>) -> Self
    {
        Self {
            tag: tag.into(),
            size,
            fields: Vec::new(),
        }
    }
}

/// Union definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType
{
    pub tag: String,
    /// Total size in bytes, when the record stream provides it.
    pub size: Option<u32>,
    pub fields: Vec<Field>,
}

impl UnionType
{
    /// Member-less shell, to be filled in when the member list is parsed.
    pub fn shell(tag: impl Into<String>, size: Option<u32>) -> Self
    {
        Self {
            tag: tag.into(),
            size,
            fields: Vec::new(),
        }
    }
}

/// Enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType
{
    pub tag: String,
    pub members: Vec<EnumMember>,
}

impl EnumType
{
    /// Member-less shell, to be filled in when the member list is parsed.
    pub fn shell(tag: impl Into<String>) -> Self
    {
        Self {
            tag: tag.into(),
            members: Vec::new(),
        }
    }
}

/// Enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember
{
    pub name: String,
    pub value: u32,
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_display_reads_outside_in()
    {
        let ty = Type::Array {
            elem: Box::new(Type::Pointer(Box::new(Type::Int))),
            len: 3,
        };
        assert_eq!(ty.to_string(), "array[3] of pointer to int");
    }

    #[test]
    fn test_add_param_skips_duplicate_names()
    {
        let mut func = FuncType::returning(Type::Void);
        func.add_param(Var::new("a", Type::Int));
        func.add_param(Var::new("a", Type::Char));
        func.add_param(Var::new("b", Type::Char));

        let names: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(func.params[0].ty, Type::Int);
    }
}
