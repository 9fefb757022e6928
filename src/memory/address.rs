// Mon Oct 19 2026 - Alex

use std::fmt;

/// A 32-bit virtual address as seen by the captured console process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u32,
}

impl Address {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u32(&self) -> u32 {
        self.value
    }

    pub fn as_u64(&self) -> u64 {
        self.value as u64
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn is_aligned(&self, alignment: u32) -> bool {
        alignment == 0 || self.value % alignment == 0
    }

    pub fn offset(&self, delta: u32) -> Option<Self> {
        self.value.checked_add(delta).map(Self::new)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_is_fixed_width() {
        assert_eq!(Address::new(0x4000).to_string(), "0x00004000");
        assert_eq!(Address::new(0x8200_1000).to_string(), "0x82001000");
    }

    #[test]
    fn test_address_offset_overflow() {
        assert_eq!(Address::new(0x10).offset(0x10), Some(Address::new(0x20)));
        assert_eq!(Address::new(u32::MAX).offset(1), None);
    }

    #[test]
    fn test_address_alignment() {
        assert!(Address::new(0x1000).is_aligned(4));
        assert!(!Address::new(0x1002).is_aligned(4));
        assert!(Address::zero().is_null());
    }
}
