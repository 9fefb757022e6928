// Mon Oct 19 2026 - Alex

use crate::memory::FileRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A captured span of the target's virtual address space and where it lives in the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    pub virtual_address: u64,
    pub size: u64,
    pub file_offset: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MemoryRegion {
    pub fn new(virtual_address: u64, size: u64, file_offset: u64) -> Self {
        Self {
            virtual_address,
            size,
            file_offset,
            name: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn virtual_end(&self) -> u64 {
        self.virtual_address.saturating_add(self.size)
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.virtual_address && address < self.virtual_end()
    }

    pub fn file_range(&self) -> FileRange {
        FileRange::new(self.file_offset, self.size)
    }

    /// File offset of `address`, which must lie inside the region.
    pub fn offset_of(&self, address: u64) -> Option<u64> {
        if !self.contains(address) {
            return None;
        }
        Some(self.file_offset + (address - self.virtual_address))
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#010x}-{:#010x} @ file {:#x}",
            self.virtual_address,
            self.virtual_end(),
            self.file_offset
        )?;
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

/// The byte range a loaded module image occupies in the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRange {
    pub name: String,
    pub file_offset: u64,
    pub size: u64,
}

impl ModuleRange {
    pub fn new(name: &str, file_offset: u64, size: u64) -> Self {
        Self {
            name: name.to_string(),
            file_offset,
            size,
        }
    }

    pub fn file_range(&self) -> FileRange {
        FileRange::new(self.file_offset, self.size)
    }
}

/// Regions that sit back-to-back in the file and can be scanned as one span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionGroup {
    pub total_size: u64,
    pub regions: Vec<FileRange>,
}

impl RegionGroup {
    pub fn push(&mut self, range: FileRange) {
        self.total_size += range.size;
        self.regions.push(range);
    }

    pub fn span(&self) -> Option<FileRange> {
        let first = self.regions.first()?;
        Some(FileRange::new(first.file_offset, self.total_size))
    }
}
