//! Identifier sanitizing and collision handling.

use crate::types::Address;

/// Prefix given to the second and later struct, union or enum tag with the
/// same name.
pub const DUPLICATE_PREFIX: &str = "_duplicate_";

/// Map a raw record name to a valid C identifier.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, one for one.
///
/// ```rust
/// use symdecl_core::parser::names::valid_name;
///
/// assert_eq!(valid_name("operator<<"), "operator__");
/// assert_eq!(valid_name("pad.0"), "pad_0");
/// ```
#[must_use]
pub fn valid_name(raw: &str) -> String
{
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Disambiguate `name` by appending the address as 8 upper-case hex digits.
///
/// ```rust
/// use symdecl_core::parser::names::unique_name;
/// use symdecl_core::types::Address;
///
/// assert_eq!(unique_name("bar", Address::new(0x30)), "bar_addr_00000030");
/// ```
#[must_use]
pub fn unique_name(name: &str, address: Address) -> String
{
    format!("{name}_addr_{address:08X}")
}

/// Tag to use for a shadow aggregate that duplicates `tag`.
#[must_use]
pub fn duplicate_tag(tag: &str) -> String
{
    format!("{DUPLICATE_PREFIX}{tag}")
}

/// Name to use for an enumerator that repeats `name` anywhere in the pass.
#[must_use]
pub fn duplicate_enum_member(name: &str) -> String
{
    format!("{}{name}", DUPLICATE_PREFIX.to_uppercase())
}

#[cfg(test)]
mod tests
{
    use super::*;

    const SAMPLES: &[&str] = &["", "plain", "with space", "a::b<c>", "ünïcode", "$gp", "__vtbl_ptr_type", "x.1"];

    #[test]
    fn test_valid_name_charset()
    {
        for raw in SAMPLES {
            let name = valid_name(raw);
            assert!(
                name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{raw:?} -> {name:?}"
            );
        }
    }

    #[test]
    fn test_valid_name_preserves_length()
    {
        for raw in SAMPLES {
            assert_eq!(valid_name(raw).chars().count(), raw.chars().count());
        }
    }

    #[test]
    fn test_valid_name_idempotent()
    {
        for raw in SAMPLES {
            let once = valid_name(raw);
            assert_eq!(valid_name(&once), once);
        }
    }

    #[test]
    fn test_unique_name_pads_and_uppercases()
    {
        assert_eq!(unique_name("f", Address::new(0x8001_abcd)), "f_addr_8001ABCD");
        assert_eq!(unique_name("g", Address::ZERO), "g_addr_00000000");
    }

    #[test]
    fn test_duplicate_markers()
    {
        assert_eq!(duplicate_tag("Node"), "_duplicate_Node");
        assert_eq!(duplicate_enum_member("A"), "_DUPLICATE_A");
    }
}
