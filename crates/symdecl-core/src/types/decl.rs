//! Declarations: variables, functions, lexical blocks, symbols and lines.

use std::fmt;

use super::address::Address;
use super::ctype::{FuncType, Type, Var};

/// C storage class of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass
{
    Auto,
    Extern,
    Static,
    Register,
    Typedef,
}

impl fmt::Display for StorageClass
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            StorageClass::Auto => "auto",
            StorageClass::Extern => "extern",
            StorageClass::Static => "static",
            StorageClass::Register => "register",
            StorageClass::Typedef => "typedef",
        };
        write!(f, "{label}")
    }
}

/// Variable (or typedef) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl
{
    pub address: Address,
    /// Size in bytes.
    pub size: u32,
    pub storage: StorageClass,
    pub var: Var,
}

impl VarDecl
{
    /// Typedef declaration binding `name` to `ty`.
    pub fn typedef(name: impl Into<String>, ty: Type) -> Self
    {
        Self {
            address: Address::ZERO,
            size: 0,
            storage: StorageClass::Typedef,
            var: Var::new(name, ty),
        }
    }

    pub fn name(&self) -> &str
    {
        &self.var.name
    }
}

/// Function declaration, with its body once the body records are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl
{
    pub address: Address,
    /// Size in bytes.
    pub size: u32,
    pub storage: StorageClass,
    pub name: String,
    pub signature: FuncType,
    /// Lexical blocks in the order they open.
    pub blocks: Vec<Block>,
    /// First source line of the body; 0 until the body is parsed.
    pub line_start: u32,
    /// Last source line of the body; 0 until the body is parsed.
    pub line_end: u32,
}

impl FuncDecl
{
    pub fn new(address: Address, size: u32, storage: StorageClass, name: impl Into<String>, signature: FuncType) -> Self
    {
        Self {
            address,
            size,
            storage,
            name: name.into(),
            signature,
            blocks: Vec::new(),
            line_start: 0,
            line_end: 0,
        }
    }

    /// Whether a body has already been attached to this declaration.
    #[must_use]
    pub fn has_body(&self) -> bool
    {
        self.line_start != 0
    }
}

/// Lexical scope inside a function body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block
{
    pub line_start: u32,
    pub line_end: u32,
    /// Number of enclosing blocks (0 for a block directly in the function).
    pub depth: usize,
    pub locals: Vec<Var>,
}

impl Block
{
    pub fn new(line_start: u32, depth: usize) -> Self
    {
        Self {
            line_start,
            depth,
            ..Self::default()
        }
    }

    /// Append a local unless one with the same name is already present.
    pub fn add_local(&mut self, local: Var)
    {
        if self.locals.iter().all(|existing| existing.name != local.name) {
            self.locals.push(local);
        }
    }
}

/// Named address from a `Name1`/`Name2` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol
{
    pub address: Address,
    pub name: String,
}

impl fmt::Display for Symbol
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}@{}", self.name, self.address)
    }
}

/// Address to source line mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line
{
    pub address: Address,
    /// Source file; empty when no path has been set.
    pub path: String,
    pub line: u32,
}
