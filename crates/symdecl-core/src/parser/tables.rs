//! Process-wide type tables.

use std::collections::HashMap;

use crate::types::{EnumType, StructType, UnionType, VarDecl};

/// Tag-keyed table that remembers the order tags were first registered in.
#[derive(Debug, Clone)]
pub struct TagTable<T>
{
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for TagTable<T>
{
    fn default() -> Self
    {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> TagTable<T>
{
    pub fn get(&self, tag: &str) -> Option<&T>
    {
        self.entries.get(tag)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool
    {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize
    {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.order.is_empty()
    }

    /// Tags in first-registration order.
    pub fn tags(&self) -> &[String]
    {
        &self.order
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T>
    {
        self.order.iter().filter_map(|tag| self.entries.get(tag))
    }

    /// Insert or replace the entry for `tag`; a replaced tag keeps its
    /// original position.
    pub(crate) fn insert(&mut self, tag: String, value: T)
    {
        if !self.entries.contains_key(&tag) {
            self.order.push(tag.clone());
        }
        self.entries.insert(tag, value);
    }
}

/// Struct, union, enum and typedef definitions shared by every overlay.
#[derive(Debug, Clone, Default)]
pub struct TypeTables
{
    pub(crate) structs: TagTable<StructType>,
    pub(crate) unions: TagTable<UnionType>,
    pub(crate) enums: TagTable<EnumType>,
    typedefs: Vec<VarDecl>,
    typedef_names: HashMap<String, VarDecl>,
}

impl TypeTables
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn structs(&self) -> &TagTable<StructType>
    {
        &self.structs
    }

    pub fn unions(&self) -> &TagTable<UnionType>
    {
        &self.unions
    }

    pub fn enums(&self) -> &TagTable<EnumType>
    {
        &self.enums
    }

    pub fn struct_type(&self, tag: &str) -> Option<&StructType>
    {
        self.structs.get(tag)
    }

    pub fn union_type(&self, tag: &str) -> Option<&UnionType>
    {
        self.unions.get(tag)
    }

    pub fn enum_type(&self, tag: &str) -> Option<&EnumType>
    {
        self.enums.get(tag)
    }

    /// Typedefs from the record stream, in encounter order.
    ///
    /// Built-in scaffolding typedefs are not listed here; see [`Self::typedef`].
    pub fn typedefs(&self) -> &[VarDecl]
    {
        &self.typedefs
    }

    /// Look up a typedef by name, including built-in ones such as `bool`.
    /// When a name is defined twice the later definition wins.
    pub fn typedef(&self, name: &str) -> Option<&VarDecl>
    {
        self.typedef_names.get(name)
    }

    pub(crate) fn push_typedef(&mut self, decl: VarDecl)
    {
        self.typedef_names.insert(decl.var.name.clone(), decl.clone());
        self.typedefs.push(decl);
    }

    pub(crate) fn insert_builtin_typedef(&mut self, decl: VarDecl)
    {
        self.typedef_names.insert(decl.var.name.clone(), decl);
    }
}
