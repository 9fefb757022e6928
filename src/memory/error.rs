// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Read of {len} bytes at file offset {offset:#x} exceeds dump size {size:#x}")]
    OutOfBounds { offset: u64, len: usize, size: u64 },
    #[error("Virtual address {0:#010x} is not captured in the dump")]
    Unmapped(u64),
    #[error("Invalid region map: {0}")]
    InvalidRegionMap(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MemoryError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, MemoryError::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = MemoryError::OutOfBounds { offset: 0x10, len: 8, size: 0x14 };
        assert!(err.is_out_of_bounds());
        assert_eq!(
            err.to_string(),
            "Read of 8 bytes at file offset 0x10 exceeds dump size 0x14"
        );
    }

    #[test]
    fn test_unmapped_message() {
        let err = MemoryError::Unmapped(0x8200_1000);
        assert!(!err.is_out_of_bounds());
        assert_eq!(err.to_string(), "Virtual address 0x82001000 is not captured in the dump");
    }
}
