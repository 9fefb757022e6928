// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// A byte range inside the dump file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRange {
    pub file_offset: u64,
    pub size: u64,
}

impl FileRange {
    pub fn new(file_offset: u64, size: u64) -> Self {
        Self { file_offset, size }
    }

    pub fn end(&self) -> u64 {
        self.file_offset.saturating_add(self.size)
    }

    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.file_offset && offset < self.end()
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.file_offset < other.end() && self.end() > other.file_offset
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Clips the range to a file of `len` bytes.
    pub fn clamp_to(&self, len: u64) -> Self {
        let start = self.file_offset.min(len);
        let end = self.end().min(len);
        Self::new(start, end - start)
    }
}

impl fmt::Display for FileRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.file_offset, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let range = FileRange::new(0x100, 0x20);
        assert!(range.contains(0x100));
        assert!(range.contains(0x11F));
        assert!(!range.contains(0x120));
        assert!(!range.contains(0xFF));
    }

    #[test]
    fn test_overlaps() {
        let a = FileRange::new(0x100, 0x100);
        assert!(a.overlaps(&FileRange::new(0x1F0, 0x20)));
        assert!(!a.overlaps(&FileRange::new(0x200, 0x20)));
    }

    #[test]
    fn test_clamp_to_file_length() {
        let range = FileRange::new(0x100, 0x100);
        assert_eq!(range.clamp_to(0x180), FileRange::new(0x100, 0x80));
        assert!(range.clamp_to(0x80).is_empty());
    }
}
