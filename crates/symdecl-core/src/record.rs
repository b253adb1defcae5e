//! # SYM Records
//!
//! The ordered record stream the interpreter consumes.
//!
//! Decoding the binary SYM container is someone else's job: by the time a
//! stream reaches this crate it is a `&[Record]` in file order. Every record
//! carries a 32-bit `value` whose meaning depends on the kind (an address for
//! names and definitions, a member offset inside a struct, an enumerator value
//! inside an enum, an overlay id for `SetOverlay`).
//!
//! Type codes follow the COFF layout: the low four bits hold the [`Base`] and
//! each following 2-bit group holds one [`Modifier`], outermost declarator
//! first.

use std::fmt;

use smallvec::SmallVec;

/// Maximum number of derived-type modifiers a type code can hold.
pub const MAX_MODIFIERS: usize = 6;

/// A single decoded record of the SYM stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record
{
    /// Kind-dependent value (address, offset, enumerator value or overlay id).
    pub value: u32,
    /// Kind-specific payload.
    pub body: RecordBody,
}

impl Record
{
    /// Construct a record from its value and payload.
    pub fn new(value: u32, body: RecordBody) -> Self
    {
        Self { value, body }
    }

    /// Borrow the payload as a definition, regardless of which of the two
    /// definition encodings it uses.
    #[must_use]
    pub fn as_def(&self) -> Option<DefView<'_>>
    {
        self.body.as_def()
    }
}

/// Payload of a record, one variant per record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody
{
    /// Symbol name (short form).
    Name1
    {
        name: String
    },
    /// Symbol name (long form).
    Name2
    {
        name: String
    },
    /// Advance the current source line by one.
    IncSld,
    /// Advance the current source line by a byte delta.
    IncSldByte
    {
        inc: u8
    },
    /// Advance the current source line by a word delta.
    IncSldWord
    {
        inc: u16
    },
    /// Set the current source line, keeping the path.
    SetSld
    {
        line: u32
    },
    /// Set both the current source path and line.
    SetSld2
    {
        line: u32,
        path: String,
    },
    /// End of source line information.
    EndSld,
    /// Start of a function body.
    FuncStart(FuncStart),
    /// End of a function body.
    FuncEnd
    {
        line: u32
    },
    /// Start of a lexical block.
    BlockStart
    {
        line: u32
    },
    /// End of a lexical block.
    BlockEnd
    {
        line: u32
    },
    /// Definition without array dimensions or tag.
    Def(Def),
    /// Definition carrying array dimensions and a tag.
    Def2(Def2),
    /// Overlay header; the record value is the overlay's load address.
    Overlay
    {
        length: u32,
        id: u32,
    },
    /// Switch to the overlay whose id is the record value.
    SetOverlay,
}

impl RecordBody
{
    /// Short name of the record kind, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str
    {
        match self {
            RecordBody::Name1 { .. } => "Name1",
            RecordBody::Name2 { .. } => "Name2",
            RecordBody::IncSld => "IncSLD",
            RecordBody::IncSldByte { .. } => "IncSLDByte",
            RecordBody::IncSldWord { .. } => "IncSLDWord",
            RecordBody::SetSld { .. } => "SetSLD",
            RecordBody::SetSld2 { .. } => "SetSLD2",
            RecordBody::EndSld => "EndSLD",
            RecordBody::FuncStart(_) => "FuncStart",
            RecordBody::FuncEnd { .. } => "FuncEnd",
            RecordBody::BlockStart { .. } => "BlockStart",
            RecordBody::BlockEnd { .. } => "BlockEnd",
            RecordBody::Def(_) => "Def",
            RecordBody::Def2(_) => "Def2",
            RecordBody::Overlay { .. } => "Overlay",
            RecordBody::SetOverlay => "SetOverlay",
        }
    }

    /// Borrow the payload as a definition view (`Def` or `Def2`).
    #[must_use]
    pub fn as_def(&self) -> Option<DefView<'_>>
    {
        match self {
            RecordBody::Def(def) => Some(def.view()),
            RecordBody::Def2(def) => Some(def.view()),
            _ => None,
        }
    }
}

/// Function start payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncStart
{
    /// Frame pointer register.
    pub fp: u16,
    /// Frame size.
    pub fsize: u32,
    /// Return address register.
    pub ret_reg: u16,
    /// Saved register mask.
    pub mask: u32,
    /// Saved register mask offset.
    pub mask_offset: i32,
    /// Source line of the function's opening brace.
    pub line: u32,
    /// Source file the function is defined in.
    pub path: String,
    /// Function name as written by the compiler.
    pub name: String,
}

/// Definition record without dimensions or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def
{
    pub class: Class,
    pub ty: SymType,
    pub size: u32,
    pub name: String,
}

/// Definition record with array dimensions and an aggregate tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def2
{
    pub class: Class,
    pub ty: SymType,
    pub size: u32,
    pub dims: Vec<u32>,
    pub tag: String,
    pub name: String,
}

impl Def
{
    /// View with no dimensions and an empty tag.
    #[must_use]
    pub fn view(&self) -> DefView<'_>
    {
        DefView {
            class: self.class,
            ty: self.ty,
            size: self.size,
            dims: &[],
            tag: "",
            name: &self.name,
        }
    }
}

impl Def2
{
    #[must_use]
    pub fn view(&self) -> DefView<'_>
    {
        DefView {
            class: self.class,
            ty: self.ty,
            size: self.size,
            dims: &self.dims,
            tag: &self.tag,
            name: &self.name,
        }
    }
}

/// Uniform borrowed view of `Def` and `Def2`.
///
/// A `Def` is viewed as a `Def2` with no dimensions and an empty tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefView<'a>
{
    pub class: Class,
    pub ty: SymType,
    pub size: u32,
    pub dims: &'a [u32],
    pub tag: &'a str,
    pub name: &'a str,
}

/// Base type stored in the low four bits of a type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base
{
    Null,
    Void,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Struct,
    Union,
    Enum,
    /// Member of enumeration.
    Moe,
    UChar,
    UShort,
    UInt,
    ULong,
}

impl Base
{
    const ALL: [Base; 16] = [
        Base::Null,
        Base::Void,
        Base::Char,
        Base::Short,
        Base::Int,
        Base::Long,
        Base::Float,
        Base::Double,
        Base::Struct,
        Base::Union,
        Base::Enum,
        Base::Moe,
        Base::UChar,
        Base::UShort,
        Base::UInt,
        Base::ULong,
    ];

    /// Decode the low four bits of `raw`.
    #[must_use]
    pub fn from_bits(raw: u16) -> Self
    {
        Self::ALL[usize::from(raw & 0xF)]
    }

    /// Four-bit encoding of this base type.
    #[must_use]
    pub fn bits(self) -> u16
    {
        self as u16
    }
}

impl fmt::Display for Base
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            Base::Null => "null",
            Base::Void => "void",
            Base::Char => "char",
            Base::Short => "short",
            Base::Int => "int",
            Base::Long => "long",
            Base::Float => "float",
            Base::Double => "double",
            Base::Struct => "struct",
            Base::Union => "union",
            Base::Enum => "enum",
            Base::Moe => "enum member",
            Base::UChar => "unsigned char",
            Base::UShort => "unsigned short",
            Base::UInt => "unsigned int",
            Base::ULong => "unsigned long",
        };
        write!(f, "{label}")
    }
}

/// Derived-type modifier stored in a 2-bit group of a type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier
{
    Pointer,
    Function,
    Array,
}

impl Modifier
{
    fn from_bits(raw: u16) -> Option<Self>
    {
        match raw & 0x3 {
            1 => Some(Modifier::Pointer),
            2 => Some(Modifier::Function),
            3 => Some(Modifier::Array),
            _ => None,
        }
    }

    fn bits(self) -> u16
    {
        match self {
            Modifier::Pointer => 1,
            Modifier::Function => 2,
            Modifier::Array => 3,
        }
    }
}

/// Raw COFF-style type code.
///
/// ```rust
/// use symdecl_core::record::{Base, Modifier, SymType};
///
/// // int *a[3]: array (outermost) of pointer to int
/// let ty = SymType::from_parts(Base::Int, &[Modifier::Array, Modifier::Pointer]);
/// assert_eq!(ty.base(), Base::Int);
/// assert_eq!(ty.modifiers().as_slice(), &[Modifier::Array, Modifier::Pointer]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymType(pub u16);

impl SymType
{
    /// Build a type code from a base and modifiers listed outermost first.
    ///
    /// Modifiers past [`MAX_MODIFIERS`] do not fit the encoding and are dropped.
    #[must_use]
    pub fn from_parts(base: Base, modifiers: &[Modifier]) -> Self
    {
        let mut raw = base.bits();
        for (i, modifier) in modifiers.iter().take(MAX_MODIFIERS).enumerate() {
            raw |= modifier.bits() << (4 + 2 * i);
        }
        SymType(raw)
    }

    /// Base type of this code.
    #[must_use]
    pub fn base(self) -> Base
    {
        Base::from_bits(self.0)
    }

    /// Modifiers, outermost declarator first.
    #[must_use]
    pub fn modifiers(self) -> SmallVec<[Modifier; MAX_MODIFIERS]>
    {
        (0..MAX_MODIFIERS)
            .map_while(|i| Modifier::from_bits(self.0 >> (4 + 2 * i)))
            .collect()
    }
}

impl From<Base> for SymType
{
    fn from(base: Base) -> Self
    {
        SymType(base.bits())
    }
}

/// COFF storage class of a definition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class
{
    /// Physical end of function.
    Efcn,
    Null,
    Auto,
    Ext,
    Stat,
    Reg,
    ExtDef,
    Label,
    ULabel,
    /// Member of structure.
    Mos,
    Arg,
    StrTag,
    /// Member of union.
    Mou,
    UnTag,
    TpDef,
    UStatic,
    EnTag,
    /// Member of enumeration.
    Moe,
    RegParm,
    Field,
    Block,
    Fcn,
    /// End of structure, union or enumeration.
    Eos,
    File,
    Line,
    Alias,
    Hidden,
}

impl Class
{
    /// Decode a raw storage-class byte.
    #[must_use]
    pub fn from_raw(raw: u8) -> Option<Self>
    {
        let class = match raw {
            0xFF => Class::Efcn,
            0 => Class::Null,
            1 => Class::Auto,
            2 => Class::Ext,
            3 => Class::Stat,
            4 => Class::Reg,
            5 => Class::ExtDef,
            6 => Class::Label,
            7 => Class::ULabel,
            8 => Class::Mos,
            9 => Class::Arg,
            10 => Class::StrTag,
            11 => Class::Mou,
            12 => Class::UnTag,
            13 => Class::TpDef,
            14 => Class::UStatic,
            15 => Class::EnTag,
            16 => Class::Moe,
            17 => Class::RegParm,
            18 => Class::Field,
            100 => Class::Block,
            101 => Class::Fcn,
            102 => Class::Eos,
            103 => Class::File,
            104 => Class::Line,
            105 => Class::Alias,
            106 => Class::Hidden,
            _ => return None,
        };
        Some(class)
    }
}

impl fmt::Display for Class
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            Class::Efcn => "EFCN",
            Class::Null => "NULL",
            Class::Auto => "AUTO",
            Class::Ext => "EXT",
            Class::Stat => "STAT",
            Class::Reg => "REG",
            Class::ExtDef => "EXTDEF",
            Class::Label => "LABEL",
            Class::ULabel => "ULABEL",
            Class::Mos => "MOS",
            Class::Arg => "ARG",
            Class::StrTag => "STRTAG",
            Class::Mou => "MOU",
            Class::UnTag => "UNTAG",
            Class::TpDef => "TPDEF",
            Class::UStatic => "USTATIC",
            Class::EnTag => "ENTAG",
            Class::Moe => "MOE",
            Class::RegParm => "REGPARM",
            Class::Field => "FIELD",
            Class::Block => "BLOCK",
            Class::Fcn => "FCN",
            Class::Eos => "EOS",
            Class::File => "FILE",
            Class::Line => "LINE",
            Class::Alias => "ALIAS",
            Class::Hidden => "HIDDEN",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_base_bits_round_trip()
    {
        for base in Base::ALL {
            assert_eq!(Base::from_bits(base.bits()), base);
        }
    }

    #[test]
    fn test_modifiers_stop_at_first_empty_group()
    {
        // pointer, then an empty group, then a stray array bit pattern
        let raw = (1 << 4) | (3 << 8) | Base::Char.bits();
        let ty = SymType(raw);
        assert_eq!(ty.modifiers().as_slice(), &[Modifier::Pointer]);
    }

    #[test]
    fn test_class_from_raw()
    {
        assert_eq!(Class::from_raw(2), Some(Class::Ext));
        assert_eq!(Class::from_raw(102), Some(Class::Eos));
        assert_eq!(Class::from_raw(0xFF), Some(Class::Efcn));
        assert_eq!(Class::from_raw(50), None);
    }

    #[test]
    fn test_def_view_of_plain_def()
    {
        let record = Record::new(
            0x80,
            RecordBody::Def(Def {
                class: Class::Ext,
                ty: SymType::from(Base::Int),
                size: 4,
                name: "counter".to_string(),
            }),
        );
        let view = record.as_def().unwrap();
        assert_eq!(view.class, Class::Ext);
        assert!(view.dims.is_empty());
        assert_eq!(view.tag, "");
        assert_eq!(view.name, "counter");
    }

    #[test]
    fn test_def2_view_borrows_dims_and_tag()
    {
        let def = Def2 {
            class: Class::Mos,
            ty: SymType::from_parts(Base::Struct, &[Modifier::Array]),
            size: 24,
            dims: vec![3],
            tag: "Vec2".to_string(),
            name: "points".to_string(),
        };
        let record = Record::new(0, RecordBody::Def2(def.clone()));
        let view = def.view();
        assert_eq!(view.dims, [3].as_slice());
        assert_eq!(view.tag, "Vec2");
        assert_eq!(view.name, "points");
        assert_eq!(record.as_def(), Some(view));
    }
}
