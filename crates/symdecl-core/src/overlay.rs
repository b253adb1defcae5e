//! # Overlays
//!
//! Per-overlay declaration namespaces.
//!
//! An overlay is a code/data region appended to the executable and loaded at
//! runtime; each one gets its own variables, functions, symbols and line
//! table. The main binary is modelled as an overlay too (address, id and
//! length all zero) and is current until the first `SetOverlay` record.

use std::collections::HashMap;

use crate::error::{Result, SymError};
use crate::types::{Address, FuncDecl, Line, Symbol, VarDecl};

/// Declarations belonging to one overlay (or the main binary).
#[derive(Debug, Clone, Default)]
pub struct Overlay
{
    /// Base address at which the overlay is loaded.
    pub address: Address,
    /// Overlay ID.
    pub id: u32,
    /// Overlay length in bytes.
    pub length: u32,
    vars: Vec<VarDecl>,
    funcs: Vec<FuncDecl>,
    var_names: HashMap<String, usize>,
    func_names: HashMap<String, usize>,
    symbols: Vec<Symbol>,
    lines: Vec<Line>,
}

impl Overlay
{
    /// Empty overlay loaded at `address`.
    pub fn new(address: Address, id: u32, length: u32) -> Self
    {
        Self {
            address,
            id,
            length,
            ..Self::default()
        }
    }

    /// Variable declarations in encounter order.
    pub fn vars(&self) -> &[VarDecl]
    {
        &self.vars
    }

    /// Function declarations in encounter order.
    pub fn funcs(&self) -> &[FuncDecl]
    {
        &self.funcs
    }

    /// Named symbols in encounter order.
    pub fn symbols(&self) -> &[Symbol]
    {
        &self.symbols
    }

    /// Line table in encounter order.
    pub fn lines(&self) -> &[Line]
    {
        &self.lines
    }

    /// Look up a variable by its final (sanitized, disambiguated) name.
    pub fn var(&self, name: &str) -> Option<&VarDecl>
    {
        self.var_names.get(name).map(|&index| &self.vars[index])
    }

    /// Look up a function by its final (sanitized, disambiguated) name.
    pub fn func(&self, name: &str) -> Option<&FuncDecl>
    {
        self.func_names.get(name).map(|&index| &self.funcs[index])
    }

    /// Whether `name` is taken by a variable or a function.
    #[must_use]
    pub fn is_name_taken(&self, name: &str) -> bool
    {
        self.var_names.contains_key(name) || self.func_names.contains_key(name)
    }

    /// Whether the overlay has no declarations, symbols or lines.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.vars.is_empty() && self.funcs.is_empty() && self.symbols.is_empty() && self.lines.is_empty()
    }

    pub(crate) fn func_index(&self, name: &str) -> Option<usize>
    {
        self.func_names.get(name).copied()
    }

    pub(crate) fn func_mut(&mut self, index: usize) -> &mut FuncDecl
    {
        &mut self.funcs[index]
    }

    pub(crate) fn push_var(&mut self, decl: VarDecl)
    {
        self.var_names.insert(decl.var.name.clone(), self.vars.len());
        self.vars.push(decl);
    }

    pub(crate) fn push_func(&mut self, decl: FuncDecl)
    {
        self.func_names.insert(decl.name.clone(), self.funcs.len());
        self.funcs.push(decl);
    }

    pub(crate) fn push_symbol(&mut self, symbol: Symbol)
    {
        self.symbols.push(symbol);
    }

    pub(crate) fn push_line(&mut self, line: Line)
    {
        self.lines.push(line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot
{
    Main,
    Overlay(usize),
}

/// The main binary plus every overlay declared in the stream.
///
/// Exactly one entry is *current*; the declaration pass writes into it and
/// `SetOverlay` records redirect it.
#[derive(Debug, Clone)]
pub struct OverlayRegistry
{
    main: Overlay,
    overlays: Vec<Overlay>,
    ids: HashMap<u32, usize>,
    current: Slot,
}

impl Default for OverlayRegistry
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl OverlayRegistry
{
    /// Registry holding only the main binary, which is current.
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            main: Overlay::default(),
            overlays: Vec::new(),
            ids: HashMap::new(),
            current: Slot::Main,
        }
    }

    /// The main (un-overlaid) binary.
    pub fn main(&self) -> &Overlay
    {
        &self.main
    }

    /// Overlays in the order their Overlay records appeared.
    pub fn overlays(&self) -> &[Overlay]
    {
        &self.overlays
    }

    /// Look up an overlay by id. A repeated id resolves to the latest overlay.
    pub fn get(&self, id: u32) -> Option<&Overlay>
    {
        self.ids.get(&id).map(|&index| &self.overlays[index])
    }

    /// The overlay declarations are currently written to.
    pub fn current(&self) -> &Overlay
    {
        match self.current {
            Slot::Main => &self.main,
            Slot::Overlay(index) => &self.overlays[index],
        }
    }

    pub(crate) fn current_mut(&mut self) -> &mut Overlay
    {
        match self.current {
            Slot::Main => &mut self.main,
            Slot::Overlay(index) => &mut self.overlays[index],
        }
    }

    /// Register a new overlay. The current overlay does not change.
    pub fn insert(&mut self, overlay: Overlay)
    {
        self.ids.insert(overlay.id, self.overlays.len());
        self.overlays.push(overlay);
    }

    /// Make the overlay with `id` current.
    ///
    /// ## Errors
    ///
    /// Returns [`SymError::UnknownOverlay`] if no overlay with `id` was inserted.
    pub fn switch_to(&mut self, id: u32) -> Result<()>
    {
        let index = *self.ids.get(&id).ok_or(SymError::UnknownOverlay(id))?;
        self.current = Slot::Overlay(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_main_is_current_initially()
    {
        let mut registry = OverlayRegistry::new();
        registry.current_mut().push_symbol(Symbol {
            address: Address::new(0x10),
            name: "start".to_string(),
        });
        assert_eq!(registry.main().symbols().len(), 1);
        assert!(registry.overlays().is_empty());
    }

    #[test]
    fn test_switch_to_unknown_overlay_fails()
    {
        let mut registry = OverlayRegistry::new();
        assert_eq!(registry.switch_to(7), Err(SymError::UnknownOverlay(7)));
    }

    #[test]
    fn test_insert_does_not_switch()
    {
        let mut registry = OverlayRegistry::new();
        registry.insert(Overlay::new(Address::new(0x8010_0000), 3, 0x100));
        assert_eq!(registry.current().id, 0);

        registry.switch_to(3).unwrap();
        assert_eq!(registry.current().id, 3);
        assert_eq!(registry.get(3).map(|o| o.length), Some(0x100));
    }
}
