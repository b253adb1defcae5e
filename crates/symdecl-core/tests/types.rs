//! Tests for the record encoding and the declaration model types

use symdecl_core::parser::{apply_modifiers, storage_class};
use symdecl_core::record::{Base, Class, Modifier, SymType};
use symdecl_core::types::{Address, Block, FuncDecl, FuncType, StorageClass, Symbol, Type, Var};

#[test]
fn test_address_display()
{
    assert_eq!(Address::new(0x10).to_string(), "0x00000010");
    assert_eq!(Address::new(0x8001_2345).to_string(), "0x80012345");
    assert_eq!(format!("{:08X}", Address::new(0xabc)), "00000ABC");
}

#[test]
fn test_address_conversions()
{
    let address = Address::from(0x1000u32);
    assert_eq!(u32::from(address), 0x1000);
    assert_eq!(Address::default(), Address::ZERO);
}

#[test]
fn test_sym_type_raw_layout()
{
    // int *: pointer group in bits 4..6
    assert_eq!(SymType::from_parts(Base::Int, &[Modifier::Pointer]), SymType(0x14));
    // char f(): function group
    assert_eq!(SymType::from_parts(Base::Char, &[Modifier::Function]), SymType(0x22));
    // struct x[]: array group
    assert_eq!(SymType::from_parts(Base::Struct, &[Modifier::Array]), SymType(0x38));
}

#[test]
fn test_sym_type_decoding()
{
    let ty = SymType(0x0074);
    assert_eq!(ty.base(), Base::Int);
    assert_eq!(ty.modifiers().as_slice(), &[Modifier::Array, Modifier::Pointer]);

    let plain = SymType::from(Base::ULong);
    assert_eq!(plain.base(), Base::ULong);
    assert!(plain.modifiers().is_empty());
}

#[test]
fn test_sym_type_holds_six_modifiers()
{
    let mods = [Modifier::Pointer; 7];
    let ty = SymType::from_parts(Base::Void, &mods);
    assert_eq!(ty.modifiers().len(), 6);
}

#[test]
fn test_class_from_raw()
{
    assert_eq!(Class::from_raw(2), Some(Class::Ext));
    assert_eq!(Class::from_raw(10), Some(Class::StrTag));
    assert_eq!(Class::from_raw(102), Some(Class::Eos));
    assert_eq!(Class::from_raw(255), Some(Class::Efcn));
    assert_eq!(Class::from_raw(50), None);
}

#[test]
fn test_apply_modifiers_function_returning_pointer()
{
    let ty = apply_modifiers(Type::Char, &[Modifier::Function, Modifier::Pointer], &[]).unwrap();
    assert_eq!(ty, Type::Function(FuncType::returning(Type::Pointer(Box::new(Type::Char)))));
    assert_eq!(ty.to_string(), "function returning pointer to char");
}

#[test]
fn test_apply_modifiers_two_dimensional_array()
{
    let ty = apply_modifiers(Type::Short, &[Modifier::Array, Modifier::Array], &[4, 2]).unwrap();
    // dims are taken in order as the modifiers are applied innermost first
    assert_eq!(ty.to_string(), "array[2] of array[4] of short");
}

#[test]
fn test_storage_class_for_declarations()
{
    assert_eq!(storage_class(Class::Auto).unwrap(), StorageClass::Auto);
    assert_eq!(storage_class(Class::TpDef).unwrap(), StorageClass::Typedef);
    assert!(storage_class(Class::Eos).is_err());
    assert_eq!(StorageClass::Extern.to_string(), "extern");
}

#[test]
fn test_func_decl_body_state()
{
    let mut func = FuncDecl::new(Address::new(0x100), 8, StorageClass::Static, "tick", FuncType::returning(Type::Void));
    assert!(!func.has_body());
    func.line_start = 3;
    assert!(func.has_body());
}

#[test]
fn test_block_deduplicates_locals()
{
    let mut block = Block::new(5, 0);
    block.add_local(Var::new("i", Type::Int));
    block.add_local(Var::new("i", Type::Char));
    block.add_local(Var::new("j", Type::Int));

    assert_eq!(block.locals.len(), 2);
    assert_eq!(block.locals[0].ty, Type::Int);
}

#[test]
fn test_symbol_display()
{
    let symbol = Symbol {
        address: Address::new(0x8004_0000),
        name: "VSync".to_string(),
    };
    assert_eq!(symbol.to_string(), "VSync@0x80040000");
}
