//! Target address type.

use std::fmt;

/// Strongly typed 32-bit target address
///
/// SYM files describe a 32-bit MIPS target, so every address in the
/// declaration model fits in a `u32`. The newtype keeps addresses from being
/// mixed up with sizes, offsets and line numbers, which share the same raw
/// integer type in the record stream.
///
/// ## Example
///
/// ```rust
/// use symdecl_core::types::Address;
///
/// let addr = Address::from(0x8001_0000);
/// assert_eq!(addr.value(), 0x8001_0000);
/// assert_eq!(addr.to_string(), "0x80010000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u32);

impl Address
{
    /// The null address (0x0)
    ///
    /// Used for declarations that have no storage, such as typedefs.
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u32` value
    ///
    /// This is equivalent to `Address::from(value)` but can be used in const contexts.
    pub const fn new(value: u32) -> Self
    {
        Address(value)
    }

    /// Get the raw `u32` value of this address
    pub const fn value(self) -> u32
    {
        self.0
    }
}

impl From<u32> for Address
{
    fn from(value: u32) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u32
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::UpperHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
